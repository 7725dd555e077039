//! transformer.rs — AST source → AST cible, en un seul parcours.
//!
//! L'état du parcours est une pile de « cibles d'ajout » (le *contexte*) :
//! - la base de la pile est le `body` du `Program` cible ;
//! - `CallExpression` (enter) ouvre une nouvelle cible pour ses arguments ;
//! - `CallExpression` (exit) la referme, construit l'appel cible et l'ajoute
//!   à la cible englobante, enveloppé dans `ExpressionStatement` si son
//!   parent n'est pas lui-même un appel ;
//! - les littéraux s'ajoutent à la cible courante.
//!
//! Un appel est fermé avant que ses frères suivants soient visités : l'ordre
//! des nœuds cibles suit exactement l'ordre source.

use crate::ast::{Identifier, Node, NodeKind, TargetNode};
use crate::traverser::{traverse, TraversalError, Visitor};

/// Cible d'ajout ouverte pendant le parcours.
struct Scope {
    /// `None` pour le corps du programme.
    call: Option<PendingCall>,
    items: Vec<TargetNode>,
}

struct PendingCall {
    callee: Identifier,
    statement: bool,
}

struct Context {
    scopes: Vec<Scope>,
}

impl Context {
    fn with_body() -> Self {
        Self { scopes: vec![Scope { call: None, items: Vec::new() }] }
    }

    fn append(&mut self, kind: NodeKind, node: TargetNode) -> Result<(), TraversalError> {
        let scope = self
            .scopes
            .last_mut()
            .ok_or_else(|| TraversalError::hook(kind, "aucune cible d'ajout ouverte"))?;
        scope.items.push(node);
        Ok(())
    }
}

fn enter_number(node: &Node, _parent: Option<&Node>, cx: &mut Context) -> Result<(), TraversalError> {
    if let Node::NumberLiteral { value } = node {
        cx.append(node.kind(), TargetNode::number(value.as_str()))?;
    }
    Ok(())
}

fn enter_string(node: &Node, _parent: Option<&Node>, cx: &mut Context) -> Result<(), TraversalError> {
    if let Node::StringLiteral { value } = node {
        cx.append(node.kind(), TargetNode::string(value.as_str()))?;
    }
    Ok(())
}

fn enter_call(node: &Node, parent: Option<&Node>, cx: &mut Context) -> Result<(), TraversalError> {
    if let Node::CallExpression { name, .. } = node {
        let statement = !matches!(parent, Some(Node::CallExpression { .. }));
        cx.scopes.push(Scope {
            call: Some(PendingCall { callee: Identifier::new(name.as_str()), statement }),
            items: Vec::new(),
        });
    }
    Ok(())
}

fn exit_call(node: &Node, _parent: Option<&Node>, cx: &mut Context) -> Result<(), TraversalError> {
    let kind = node.kind();
    let (pending, arguments) = match cx.scopes.pop() {
        Some(Scope { call: Some(pending), items }) => (pending, items),
        _ => return Err(TraversalError::hook(kind, "aucun appel ouvert à refermer")),
    };

    let call = TargetNode::CallExpression { callee: pending.callee, arguments };
    let built = if pending.statement { TargetNode::statement(call) } else { call };
    cx.append(kind, built)
}

/// Construit l'arbre cible. La racine attendue est un `Program` ; une autre
/// racine est traitée comme l'unique élément d'un programme.
pub fn transform(ast: &Node) -> Result<TargetNode, TraversalError> {
    let mut visitor = Visitor::new()
        .on_enter(NodeKind::NumberLiteral, enter_number)
        .on_enter(NodeKind::StringLiteral, enter_string)
        .on_enter(NodeKind::CallExpression, enter_call)
        .on_exit(NodeKind::CallExpression, exit_call);

    let mut cx = Context::with_body();
    traverse(ast, &mut visitor, &mut cx)?;

    match (cx.scopes.pop(), cx.scopes.is_empty()) {
        (Some(Scope { call: None, items }), true) => Ok(TargetNode::program(items)),
        _ => Err(TraversalError::hook(ast.kind(), "pile de contexte déséquilibrée")),
    }
}
