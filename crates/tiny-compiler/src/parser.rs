//! parser.rs — Descente « récursive » à pile explicite : tokens → AST source.
//!
//! Un curseur partagé, un seul passage :
//! - `number` / `string` → littéral, ajouté à l'appel ouvert (ou au programme) ;
//! - `(` → `name` obligatoire, un nouvel appel est ouvert ;
//! - `)` → referme l'appel ouvert le plus interne ;
//! - tout le reste → [`ParseError::UnexpectedToken`].
//!
//! Les appels ouverts vivent sur une pile `Vec`, pas sur la pile d'exécution :
//! la profondeur d'imbrication n'est bornée que par la mémoire.

use thiserror::Error;

use crate::ast::Node;
use crate::lexer::{Token, TokenKind};

/* ───────────────────────── Erreurs ───────────────────────── */

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Token qui ne peut pas commencer une expression (typiquement `)` orpheline).
    #[error("token inattendu {kind} {text:?} (token #{index}), expression attendue")]
    UnexpectedToken { kind: TokenKind, text: String, index: usize },

    /// Après `(`, seul un `name` est accepté comme appelé.
    #[error("nom de fonction attendu après '(' mais trouvé {kind} {text:?} (token #{index})")]
    ExpectedCallee { kind: TokenKind, text: String, index: usize },

    /// Fin des tokens au milieu d'un appel (parenthèse fermante manquante).
    #[error("fin d'entrée inattendue (token #{index}) : ')' manquante")]
    UnexpectedEof { index: usize },
}

/* ───────────────────────── Parser ───────────────────────── */

/// Appel dont la `)` n'a pas encore été lue.
struct OpenCall {
    name: String,
    params: Vec<Node>,
}

pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Racine : toujours un `Node::Program`.
    pub fn parse_program(&mut self) -> Result<Node, ParseError> {
        let mut body = Vec::new();
        let mut open: Vec<OpenCall> = Vec::new();

        loop {
            let index = self.pos;
            let Some(tok) = self.advance() else {
                if open.is_empty() {
                    break;
                }
                return Err(ParseError::UnexpectedEof { index });
            };

            let node = match tok.kind {
                TokenKind::Number => Node::number(tok.text.as_str()),
                TokenKind::String => Node::string(tok.text.as_str()),
                TokenKind::Paren if tok.is_open_paren() => {
                    let name = self.callee()?;
                    open.push(OpenCall { name, params: Vec::new() });
                    continue;
                }
                TokenKind::Paren if tok.is_close_paren() && !open.is_empty() => {
                    let Some(call) = open.pop() else { continue };
                    Node::call(call.name, call.params)
                }
                kind => return Err(ParseError::UnexpectedToken { kind, text: tok.text.clone(), index }),
            };

            match open.last_mut() {
                Some(call) => call.params.push(node),
                None => body.push(node),
            }
        }
        Ok(Node::program(body))
    }

    /// `(` déjà consommée : l'appelé doit être un `name`.
    fn callee(&mut self) -> Result<String, ParseError> {
        let index = self.pos;
        match self.advance() {
            Some(t) if t.kind == TokenKind::Name => Ok(t.text.clone()),
            Some(t) => Err(ParseError::ExpectedCallee { kind: t.kind, text: t.text.clone(), index }),
            None => Err(ParseError::UnexpectedEof { index }),
        }
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let t = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(t)
    }
}

pub fn parse(tokens: &[Token]) -> Result<Node, ParseError> {
    Parser::new(tokens).parse_program()
}
