//! tiny-compiler — compilateur source-à-source minimal.
//!
//! Entrée : appels façon Lisp `(add 2 (subtract 4 2))`.
//! Sortie : appels façon C `add(2, subtract(4, 2));`.
//!
//! ## Pipeline
//! `tokenize` → `parse` → `transform` → `generate`, chaque étape ne dépendant
//! que de la sortie de la précédente. Le `transformer` s'appuie en interne
//! sur le `traverser` générique.
//!
//! ## Modules
//! - `lexer`       : texte → tokens (`paren`, `name`, `number`, `string`).
//! - `parser`      : tokens → AST source (descente à pile explicite).
//! - `ast`         : AST source (`Node`) et AST cible (`TargetNode`).
//! - `traverser`   : parcours en profondeur avec visiteur `{enter, exit}`.
//! - `transformer` : AST source → AST cible.
//! - `codegen`     : AST cible → texte.
//!
//! ## Features
//! - **tracing** *(par défaut)* : un évènement `debug` par étape.
//! - **serde** : (dé)sérialisation des tokens et des deux AST.
//!
//! ## Erreurs
//! Échec immédiat : la première erreur d'une étape arrête tout, aucune sortie
//! partielle. [`Error`] transporte l'erreur d'étape telle quelle.
//!
//! ```
//! let out = tiny_compiler::compile("(add 2 (subtract 4 2))").unwrap();
//! assert_eq!(out, "add(2, subtract(4, 2));");
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

#[cfg(feature = "tracing")]
use tracing::debug;

// ---------- Modules publics ----------
pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod transformer;
pub mod traverser;

// ---------- Reexports de confort ----------
pub use ast::{Identifier, Node, NodeKind, TargetNode};
pub use codegen::{generate, CodeGenError};
pub use lexer::{tokenize, LexError, Lexer, Token, TokenKind};
pub use parser::{parse, ParseError, Parser};
pub use transformer::transform;
pub use traverser::{traverse, Hooks, TraversalError, Visitor};

// ---------- Version ----------
/// Version du crate (lisible, via Cargo).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------- Erreurs & Résultat ----------
use thiserror::Error;

/// Erreur d'une des quatre étapes, sans enrobage du message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Traversal(#[from] TraversalError),

    #[error(transparent)]
    CodeGen(#[from] CodeGenError),
}

impl Error {
    /// Nom de l'étape en échec.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Lex(_) => "lexer",
            Self::Parse(_) => "parser",
            Self::Traversal(_) => "transformer",
            Self::CodeGen(_) => "codegen",
        }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

// ---------- API publique ----------

/// Tous les artefacts d'une compilation réussie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileProduct {
    pub tokens: Vec<Token>,
    pub ast: Node,
    pub target: TargetNode,
    pub output: String,
}

/// `generate(transform(parse(tokenize(source))))`.
pub fn compile(source: &str) -> Result<String> {
    compile_product(source).map(|p| p.output)
}

/// Comme [`compile`], en conservant chaque étape intermédiaire.
pub fn compile_product(source: &str) -> Result<CompileProduct> {
    let res = run_pipeline(source);
    if let Err(err) = &res {
        log_failure(err);
    }
    res
}

fn run_pipeline(source: &str) -> Result<CompileProduct> {
    let tokens = tokenize(source)?;
    #[cfg(feature = "tracing")]
    debug!(target: "tiny_compiler", stage = "lexer", tokens = tokens.len());

    let ast = parse(&tokens)?;
    #[cfg(feature = "tracing")]
    debug!(target: "tiny_compiler", stage = "parser", top_level = ast.children().len());

    let target = transform(&ast)?;
    #[cfg(feature = "tracing")]
    debug!(target: "tiny_compiler", stage = "transformer", root = target.kind_name());

    let output = generate(&target)?;
    #[cfg(feature = "tracing")]
    debug!(target: "tiny_compiler", stage = "codegen", bytes = output.len());

    Ok(CompileProduct { tokens, ast, target, output })
}

// ---------- Intégration tracing (optionnelle) ----------
#[cfg(feature = "tracing")]
fn log_failure(err: &Error) {
    debug!(target: "tiny_compiler", stage = err.stage(), error = %err, "compilation interrompue");
}

#[cfg(not(feature = "tracing"))]
fn log_failure(_err: &Error) {}
