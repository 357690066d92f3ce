//! Lexer for Seni-script using `logos`.
//!
//! Two entry points share one scanner:
//! - [`tokenize`] drops whitespace (commas count as whitespace) and keeps
//!   comments, which the parser discards.
//! - [`tokenize_with_trivia`] keeps whitespace too, so the script can be
//!   written back out byte-for-byte.
//!
//! Both stop at the first character that starts no token.

mod convert;
mod escape;
mod lex_error;
mod raw_token;

use logos::Logos;
use seni_ir::{Span, Token, TokenKind};

pub use escape::escape_string;
pub use lex_error::{LexError, LexErrorKind};

use convert::convert_token;
use raw_token::RawToken;

/// Tokenize a script, dropping whitespace.
#[tracing::instrument(level = "debug", skip_all)]
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    scan(source, false)
}

/// Tokenize a script, keeping whitespace and comment tokens.
#[tracing::instrument(level = "debug", skip_all)]
pub fn tokenize_with_trivia(source: &str) -> Result<Vec<Token>, LexError> {
    scan(source, true)
}

fn scan(source: &str, keep_whitespace: bool) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::Whitespace) if !keep_whitespace => {}
            Ok(raw) => tokens.push(convert_token(raw, slice, span)?),
            Err(()) => {
                let c = slice.chars().next().unwrap_or('\u{fffd}');
                let error = LexError::unknown_character(c, span);
                tracing::debug!(%error, %span, "lexing stopped");
                return Err(error);
            }
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized");
    Ok(tokens)
}

/// Kinds of a token list, convenient for assertions and debugging.
pub fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

#[cfg(test)]
mod tests;
