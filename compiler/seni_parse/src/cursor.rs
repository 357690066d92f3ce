//! Destructive token cursor.

use seni_ir::{Span, Token};

/// Hands out tokens left to right, each exactly once.
pub(crate) struct Cursor {
    tokens: std::vec::IntoIter<Token>,
    last_span: Span,
}

impl Cursor {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Cursor {
            tokens: tokens.into_iter(),
            last_span: Span::DUMMY,
        }
    }

    /// Take the next token.
    pub(crate) fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.next()?;
        self.last_span = token.span;
        Some(token)
    }

    /// Span of the most recently taken token, for end-of-input errors.
    pub(crate) fn last_span(&self) -> Span {
        self.last_span
    }
}
