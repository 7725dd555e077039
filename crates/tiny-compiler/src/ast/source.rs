//! source.rs — AST côté source (forme produite par le parser).
//!
//! Quatre variantes fermées : `Program`, `CallExpression`, `NumberLiteral`,
//! `StringLiteral`. `Program` n'apparaît qu'à la racine.
//!
//! `Display` réimprime l'arbre sous forme d'expressions S canoniques :
//! `parse(tokenize(&node.to_string()))` redonne le même arbre.

use std::fmt;

/// Étiquette d'un nœud source (sert au dispatch du visiteur et aux erreurs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    CallExpression,
    NumberLiteral,
    StringLiteral,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Program,
        NodeKind::CallExpression,
        NodeKind::NumberLiteral,
        NodeKind::StringLiteral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Program => "Program",
            Self::CallExpression => "CallExpression",
            Self::NumberLiteral => "NumberLiteral",
            Self::StringLiteral => "StringLiteral",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nœud de l'AST source.
///
/// En JSON (feature `serde`) : `{"type": "CallExpression", "name": "add", "params": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type")
)]
pub enum Node {
    Program { body: Vec<Node> },
    CallExpression { name: String, params: Vec<Node> },
    NumberLiteral { value: String },
    StringLiteral { value: String },
}

impl Node {
    pub fn program(body: Vec<Node>) -> Self {
        Self::Program { body }
    }

    pub fn call(name: impl Into<String>, params: Vec<Node>) -> Self {
        Self::CallExpression { name: name.into(), params }
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self::NumberLiteral { value: value.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral { value: value.into() }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Program { .. } => NodeKind::Program,
            Self::CallExpression { .. } => NodeKind::CallExpression,
            Self::NumberLiteral { .. } => NodeKind::NumberLiteral,
            Self::StringLiteral { .. } => NodeKind::StringLiteral,
        }
    }

    /// Enfants dans l'ordre de parcours ; vide pour les littéraux.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Program { body } => body,
            Self::CallExpression { params, .. } => params,
            Self::NumberLiteral { .. } | Self::StringLiteral { .. } => &[],
        }
    }

    /// Détache les enfants dans `out`, laissant `self` sans descendance.
    fn detach_children(&mut self, out: &mut Vec<Node>) {
        match self {
            Self::Program { body: kids } | Self::CallExpression { params: kids, .. } => out.append(kids),
            Self::NumberLiteral { .. } | Self::StringLiteral { .. } => {}
        }
    }
}

/// Libération à pile explicite : la profondeur de l'arbre n'est pas bornée.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

/// Morceau restant à écrire par `Display`.
enum Piece<'a> {
    Node(&'a Node),
    Text(&'static str),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut todo = vec![Piece::Node(self)];
        while let Some(piece) = todo.pop() {
            let node = match piece {
                Piece::Text(t) => {
                    f.write_str(t)?;
                    continue;
                }
                Piece::Node(node) => node,
            };
            match node {
                Self::Program { body } => {
                    for (i, n) in body.iter().enumerate().rev() {
                        todo.push(Piece::Node(n));
                        if i > 0 {
                            todo.push(Piece::Text("\n"));
                        }
                    }
                }
                Self::CallExpression { name, params } => {
                    write!(f, "({name}")?;
                    todo.push(Piece::Text(")"));
                    for p in params.iter().rev() {
                        todo.push(Piece::Node(p));
                        todo.push(Piece::Text(" "));
                    }
                }
                Self::NumberLiteral { value } => f.write_str(value)?,
                Self::StringLiteral { value } => write!(f, "\"{value}\"")?,
            }
        }
        Ok(())
    }
}
