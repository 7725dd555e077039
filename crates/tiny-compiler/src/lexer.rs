//! lexer.rs — Analyse lexicale : texte brut → suite plate de tokens.
//!
//! Un seul passage gauche → droite, un seul curseur, aucun retour arrière.
//! Règles essayées **dans cet ordre** sur le caractère courant :
//!
//! 1. `(` ou `)`            → token `paren`
//! 2. blanc (classe Unicode) → ignoré
//! 3. chiffre ASCII          → suite maximale de chiffres, token `number`
//! 4. `"`                    → tout jusqu'au `"` suivant (aucun échappement), token `string`
//! 5. lettre ASCII           → suite maximale de lettres, token `name`
//! 6. autre                  → [`LexError::UnexpectedChar`], arrêt immédiat
//!
//! Les nombres restent du texte : `007` ressort `007`.
//!
//! Les offsets rapportés dans les erreurs sont des offsets **octets** dans la source.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

/* ───────────────────────── Tokens ───────────────────────── */

/// Catégorie d'un token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TokenKind {
    Paren,
    Name,
    Number,
    String,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paren => "paren",
            Self::Name => "name",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token immuable : une catégorie + son texte littéral.
///
/// En JSON (feature `serde`) : `{"type": "paren", "value": "("}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: TokenKind,
    #[cfg_attr(feature = "serde", serde(rename = "value"))]
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    pub fn paren(ch: char) -> Self { Self::new(TokenKind::Paren, ch) }
    pub fn name(text: impl Into<String>) -> Self { Self::new(TokenKind::Name, text) }
    pub fn number(text: impl Into<String>) -> Self { Self::new(TokenKind::Number, text) }
    pub fn string(text: impl Into<String>) -> Self { Self::new(TokenKind::String, text) }

    pub fn is_open_paren(&self) -> bool {
        self.kind == TokenKind::Paren && self.text == "("
    }

    pub fn is_close_paren(&self) -> bool {
        self.kind == TokenKind::Paren && self.text == ")"
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.kind, self.text)
    }
}

/* ───────────────────────── Erreurs lexing ───────────────────────── */

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("caractère inattendu {ch:?} à l'offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("chaîne non terminée (guillemet ouvrant à l'offset {offset})")]
    UnterminatedString { offset: usize },
}

/* ───────────────────────── Lexer ───────────────────────── */

/// Lexer paresseux : chaque appel à [`Lexer::next_token`] produit un token.
///
/// Après une erreur, le lexer est épuisé (plus aucun token).
pub struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { chars: src.char_indices().peekable(), failed: false }
    }

    /// `Ok(None)` en fin d'entrée.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.failed {
            return Ok(None);
        }
        let res = self.scan();
        if res.is_err() {
            self.failed = true;
        }
        res
    }

    fn scan(&mut self) -> Result<Option<Token>, LexError> {
        while let Some(&(offset, ch)) = self.chars.peek() {
            match ch {
                '(' | ')' => {
                    self.chars.next();
                    return Ok(Some(Token::paren(ch)));
                }
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                c if c.is_ascii_digit() => {
                    let digits = self.take_while(|c| c.is_ascii_digit());
                    return Ok(Some(Token::number(digits)));
                }
                '"' => return self.read_string(offset).map(Some),
                c if c.is_ascii_alphabetic() => {
                    let letters = self.take_while(|c| c.is_ascii_alphabetic());
                    return Ok(Some(Token::name(letters)));
                }
                _ => return Err(LexError::UnexpectedChar { ch, offset }),
            }
        }
        Ok(None)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            s.push(c);
            self.chars.next();
        }
        s
    }

    /// Contenu verbatim entre deux `"` ; aucun échappement n'est interprété.
    fn read_string(&mut self, offset: usize) -> Result<Token, LexError> {
        self.chars.next(); // guillemet ouvrant
        let mut s = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == '"' {
                return Ok(Token::string(s));
            }
            s.push(c);
        }
        Err(LexError::UnterminatedString { offset })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Découpe toute la source ; s'arrête à la première erreur.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_call() {
        let toks = tokenize("(add 2 (subtract 4 2))").unwrap();
        assert_eq!(
            toks,
            vec![
                Token::paren('('),
                Token::name("add"),
                Token::number("2"),
                Token::paren('('),
                Token::name("subtract"),
                Token::number("4"),
                Token::number("2"),
                Token::paren(')'),
                Token::paren(')'),
            ]
        );
    }

    #[test]
    fn numbers_keep_their_spelling() {
        assert_eq!(tokenize("007").unwrap(), vec![Token::number("007")]);
    }

    #[test]
    fn strings_are_verbatim() {
        let toks = tokenize(r#""a \n b""#).unwrap();
        assert_eq!(toks, vec![Token::string(r"a \n b")]);
        assert_eq!(tokenize(r#""""#).unwrap(), vec![Token::string("")]);
    }

    #[test]
    fn letters_and_digits_split() {
        // une lettre arrête un nombre, un chiffre arrête un nom
        let toks = tokenize("abc12de").unwrap();
        assert_eq!(toks, vec![Token::name("abc"), Token::number("12"), Token::name("de")]);
    }

    #[test]
    fn names_are_case_insensitive_letters() {
        assert_eq!(tokenize("FooBar").unwrap(), vec![Token::name("FooBar")]);
    }

    #[test]
    fn unicode_whitespace_is_skipped() {
        let toks = tokenize("(\u{a0}a\t\n)").unwrap();
        assert_eq!(toks, vec![Token::paren('('), Token::name("a"), Token::paren(')')]);
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  \n ").unwrap().is_empty());
    }

    #[test]
    fn unknown_char() {
        let err = tokenize("(add 1 @)").unwrap_err();
        assert_eq!(err, LexError::UnexpectedChar { ch: '@', offset: 7 });
        assert!(err.to_string().contains('@'));
    }

    #[test]
    fn underscore_is_not_a_letter() {
        assert_eq!(
            tokenize("a_b").unwrap_err(),
            LexError::UnexpectedChar { ch: '_', offset: 1 }
        );
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(
            tokenize(r#"(concat "abc"#).unwrap_err(),
            LexError::UnterminatedString { offset: 8 }
        );
    }

    #[test]
    fn lexer_is_exhausted_after_error() {
        let mut lx = Lexer::new("a # b");
        assert_eq!(lx.next_token().unwrap(), Some(Token::name("a")));
        assert!(lx.next_token().is_err());
        assert_eq!(lx.next_token().unwrap(), None);
    }
}
