//! target.rs — AST côté cible (forme façon C), produit uniquement par le transformer.
//!
//! Règle structurante : un `CallExpression` enfant direct de `Program` est
//! enveloppé dans un `ExpressionStatement` ; un `CallExpression` argument d'un
//! autre appel ne l'est jamais.

/// Nom appelé par un `CallExpression` cible.
///
/// En JSON (feature `serde`) : `{"type": "Identifier", "name": "add"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type")
)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type")
)]
pub enum TargetNode {
    Program { body: Vec<TargetNode> },
    ExpressionStatement { expression: Box<TargetNode> },
    CallExpression { callee: Identifier, arguments: Vec<TargetNode> },
    Identifier { name: String },
    NumberLiteral { value: String },
    StringLiteral { value: String },
}

impl TargetNode {
    pub fn program(body: Vec<TargetNode>) -> Self {
        Self::Program { body }
    }

    pub fn statement(expression: TargetNode) -> Self {
        Self::ExpressionStatement { expression: Box::new(expression) }
    }

    pub fn call(callee: impl Into<String>, arguments: Vec<TargetNode>) -> Self {
        Self::CallExpression { callee: Identifier::new(callee), arguments }
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self::NumberLiteral { value: value.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral { value: value.into() }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Program { .. } => "Program",
            Self::ExpressionStatement { .. } => "ExpressionStatement",
            Self::CallExpression { .. } => "CallExpression",
            Self::Identifier { .. } => "Identifier",
            Self::NumberLiteral { .. } => "NumberLiteral",
            Self::StringLiteral { .. } => "StringLiteral",
        }
    }

    /// Détache les sous-nœuds dans `out` ; une instruction garde un littéral vide.
    fn detach_children(&mut self, out: &mut Vec<TargetNode>) {
        match self {
            Self::Program { body: kids } | Self::CallExpression { arguments: kids, .. } => out.append(kids),
            Self::ExpressionStatement { expression } => {
                out.push(std::mem::replace(expression.as_mut(), Self::NumberLiteral { value: String::new() }));
            }
            Self::Identifier { .. } | Self::NumberLiteral { .. } | Self::StringLiteral { .. } => {}
        }
    }
}

/// Libération à pile explicite, comme pour l'AST source.
impl Drop for TargetNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}
