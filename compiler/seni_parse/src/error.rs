//! Parse errors.
//!
//! Parsing is fatal on the first error; no partial tree is returned.

use seni_ir::{NodeKind, Span};
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// Tokens ran out inside `(`, `[` or after `'`.
    UnexpectedEndOfList,
    /// `)` with no open list.
    MismatchedClosingParens,
    /// `]` with no open bracket.
    MismatchedClosingBrackets,
    /// The value inside `[...]` cannot be altered.
    NonMutableNode(NodeKind),
    /// `[]` with nothing inside.
    EmptyBrackets,
    /// An `Unknown` token reached the parser.
    UnknownToken(String),
}

impl ParseError {
    #[inline]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedEndOfList => f.write_str("unexpected end of list"),
            ParseErrorKind::MismatchedClosingParens => f.write_str("mismatched closing parens"),
            ParseErrorKind::MismatchedClosingBrackets => {
                f.write_str("mismatched closing square brackets")
            }
            ParseErrorKind::NonMutableNode(_) => {
                f.write_str("non-mutable node within square brackets")
            }
            ParseErrorKind::EmptyBrackets => f.write_str("empty square brackets"),
            ParseErrorKind::UnknownToken(text) => write!(f, "unknown token: {text}"),
        }
    }
}

impl std::error::Error for ParseError {}
