//! codegen.rs — AST cible → texte façon C, par impression structurelle.
//!
//! Le parcours utilise une pile de tâches et écrit dans un seul tampon.
//!
//! - `Program`             → corps joint par `\n`
//! - `ExpressionStatement` → expression + `;`
//! - `CallExpression`      → `callee(arg, arg)`
//! - `Identifier`          → nom verbatim
//! - `NumberLiteral`       → texte verbatim (aucun reformatage)
//! - `StringLiteral`       → texte entre `"` (aucun ré-échappement)

use thiserror::Error;

use crate::ast::TargetNode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeGenError {
    #[error("nœud Program inattendu hors de la racine")]
    NestedProgram,

    /// Un appel imbriqué ne doit jamais être une instruction.
    #[error("ExpressionStatement inattendu en position d'expression")]
    StatementInExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Root,
    Statement,
    Expression,
}

/// Travail restant : un nœud à imprimer dans une position, ou du texte fixe.
enum Task<'a> {
    Emit(&'a TargetNode, Slot),
    Text(&'static str),
}

pub fn generate(node: &TargetNode) -> Result<String, CodeGenError> {
    let mut out = String::new();
    let mut tasks = vec![Task::Emit(node, Slot::Root)];

    while let Some(task) = tasks.pop() {
        let (node, slot) = match task {
            Task::Text(t) => {
                out.push_str(t);
                continue;
            }
            Task::Emit(node, slot) => (node, slot),
        };
        match node {
            TargetNode::Program { body } => {
                if slot != Slot::Root {
                    return Err(CodeGenError::NestedProgram);
                }
                push_joined(&mut tasks, body, Slot::Statement, "\n");
            }
            TargetNode::ExpressionStatement { expression } => {
                if slot == Slot::Expression {
                    return Err(CodeGenError::StatementInExpression);
                }
                tasks.push(Task::Text(";"));
                tasks.push(Task::Emit(expression, Slot::Expression));
            }
            TargetNode::CallExpression { callee, arguments } => {
                out.push_str(&callee.name);
                out.push('(');
                tasks.push(Task::Text(")"));
                push_joined(&mut tasks, arguments, Slot::Expression, ", ");
            }
            TargetNode::Identifier { name } => out.push_str(name),
            TargetNode::NumberLiteral { value } => out.push_str(value),
            TargetNode::StringLiteral { value } => {
                out.push('"');
                out.push_str(value);
                out.push('"');
            }
        }
    }
    Ok(out)
}

/// Empile `items` séparés par `sep`, dans l'ordre inverse de sortie.
fn push_joined<'a>(tasks: &mut Vec<Task<'a>>, items: &'a [TargetNode], slot: Slot, sep: &'static str) {
    for (i, item) in items.iter().enumerate().rev() {
        tasks.push(Task::Emit(item, slot));
        if i > 0 {
            tasks.push(Task::Text(sep));
        }
    }
}
