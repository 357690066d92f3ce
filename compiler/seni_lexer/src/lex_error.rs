//! Lexer errors.
//!
//! Lexing is all-or-nothing: the first character that starts no token ends
//! the attempt, and the error carries that character as an `Unknown` token.

use seni_ir::{Literal, Span, Token, TokenKind};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// The single `Unknown` token produced by the failed attempt.
    pub token: Token,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LexErrorKind {
    /// No token starts with this character.
    UnknownCharacter(char),
    /// A digit sequence that does not fit an `i64`.
    IntOverflow(String),
}

impl LexError {
    pub(crate) fn unknown_character(c: char, span: Span) -> Self {
        LexError {
            kind: LexErrorKind::UnknownCharacter(c),
            token: Token::new(TokenKind::Unknown, Some(Literal::Text(c.to_string())), span),
        }
    }

    pub(crate) fn int_overflow(text: &str, span: Span) -> Self {
        LexError {
            kind: LexErrorKind::IntOverflow(text.to_owned()),
            token: Token::new(TokenKind::Unknown, Some(Literal::Text(text.to_owned())), span),
        }
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.token.span
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnknownCharacter(c) => write!(f, "unknown token: {c}"),
            LexErrorKind::IntOverflow(text) => write!(f, "integer out of range: {text}"),
        }
    }
}

impl std::error::Error for LexError {}
