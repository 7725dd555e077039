//! traverser.rs — Parcours générique en profondeur de l'AST source.
//!
//! Le [`Visitor`] associe à chaque [`NodeKind`] une paire optionnelle de
//! callbacks `{enter, exit}`. Pour chaque nœud : `enter` (pré-ordre), puis
//! les enfants, puis `exit` (post-ordre). Chaque callback reçoit
//! `(node, parent, state)` ; le parent de la racine est `None`.
//!
//! L'état `S` est fourni par l'appelant et passé explicitement à chaque
//! callback : aucun champ n'est jamais ajouté aux nœuds.

use std::collections::HashMap;

use thiserror::Error;

use crate::ast::{Node, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// `Program` ailleurs qu'à la racine.
    #[error("nœud Program inattendu à la profondeur {depth}")]
    NestedProgram { depth: usize },

    /// Un callback du visiteur a échoué.
    #[error("visiteur {kind} : {reason}")]
    Hook { kind: NodeKind, reason: String },
}

impl TraversalError {
    pub fn hook(kind: NodeKind, reason: impl Into<String>) -> Self {
        Self::Hook { kind, reason: reason.into() }
    }
}

/// Callback de visite : `(node, parent, state)`.
pub type Hook<'v, S> = Box<dyn FnMut(&Node, Option<&Node>, &mut S) -> Result<(), TraversalError> + 'v>;

/// Paire `{enter, exit}` pour une étiquette.
pub struct Hooks<'v, S> {
    pub enter: Option<Hook<'v, S>>,
    pub exit: Option<Hook<'v, S>>,
}

impl<S> Default for Hooks<'_, S> {
    fn default() -> Self {
        Self { enter: None, exit: None }
    }
}

/// Enregistrement de capacités : étiquette → callbacks.
pub struct Visitor<'v, S> {
    hooks: HashMap<NodeKind, Hooks<'v, S>>,
}

impl<S> Default for Visitor<'_, S> {
    fn default() -> Self {
        Self { hooks: HashMap::new() }
    }
}

impl<'v, S> Visitor<'v, S> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_enter<F>(mut self, kind: NodeKind, f: F) -> Self
    where
        F: FnMut(&Node, Option<&Node>, &mut S) -> Result<(), TraversalError> + 'v,
    {
        self.hooks.entry(kind).or_default().enter = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_exit<F>(mut self, kind: NodeKind, f: F) -> Self
    where
        F: FnMut(&Node, Option<&Node>, &mut S) -> Result<(), TraversalError> + 'v,
    {
        self.hooks.entry(kind).or_default().exit = Some(Box::new(f));
        self
    }

    fn enter(&mut self, node: &Node, parent: Option<&Node>, state: &mut S) -> Result<(), TraversalError> {
        match self.hooks.get_mut(&node.kind()).and_then(|h| h.enter.as_mut()) {
            Some(f) => f(node, parent, state),
            None => Ok(()),
        }
    }

    fn exit(&mut self, node: &Node, parent: Option<&Node>, state: &mut S) -> Result<(), TraversalError> {
        match self.hooks.get_mut(&node.kind()).and_then(|h| h.exit.as_mut()) {
            Some(f) => f(node, parent, state),
            None => Ok(()),
        }
    }
}

/// Étape en attente sur la pile de parcours.
enum Step<'a> {
    Enter { node: &'a Node, parent: Option<&'a Node>, depth: usize },
    Exit { node: &'a Node, parent: Option<&'a Node> },
}

/// Parcourt `ast` (n'importe quel nœud peut servir de racine).
/// S'arrête à la première erreur. La pile de parcours est un `Vec` :
/// aucune limite de profondeur.
pub fn traverse<S>(ast: &Node, visitor: &mut Visitor<'_, S>, state: &mut S) -> Result<(), TraversalError> {
    let mut steps = vec![Step::Enter { node: ast, parent: None, depth: 0 }];

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter { node, parent, depth } => {
                if depth > 0 && node.kind() == NodeKind::Program {
                    return Err(TraversalError::NestedProgram { depth });
                }
                visitor.enter(node, parent, state)?;
                steps.push(Step::Exit { node, parent });
                // ordre inverse : le premier enfant sort en premier
                for child in node.children().iter().rev() {
                    steps.push(Step::Enter { node: child, parent: Some(node), depth: depth + 1 });
                }
            }
            Step::Exit { node, parent } => visitor.exit(node, parent, state)?,
        }
    }
    Ok(())
}
