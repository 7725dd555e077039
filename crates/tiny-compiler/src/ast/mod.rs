//! Deux familles de nœuds distinctes : l'arbre source (sortie du parser) et
//! l'arbre cible (sortie du transformer).

pub mod source;
pub mod target;

pub use source::{Node, NodeKind};
pub use target::{Identifier, TargetNode};
