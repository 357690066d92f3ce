//! Token conversion.
//!
//! Turns a raw `logos` match into a [`Token`] with its literal payload.

use seni_ir::{Literal, Span, Token, TokenKind};

use crate::escape::unescape_string;
use crate::lex_error::LexError;
use crate::raw_token::RawToken;

pub(crate) fn convert_token(raw: RawToken, slice: &str, span: Span) -> Result<Token, LexError> {
    let token = match raw {
        RawToken::Whitespace => text_token(TokenKind::Whitespace, slice, span),
        RawToken::Comment => text_token(TokenKind::Comment, &slice[1..], span),
        RawToken::Quote => Token::punct(TokenKind::QuoteAbbrev, span),
        RawToken::ListStart => Token::punct(TokenKind::ListStart, span),
        RawToken::ListEnd => Token::punct(TokenKind::ListEnd, span),
        RawToken::BracketStart => Token::punct(TokenKind::BracketStart, span),
        RawToken::BracketEnd => Token::punct(TokenKind::BracketEnd, span),
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            Token::new(
                TokenKind::String,
                Some(Literal::Text(unescape_string(content))),
                span,
            )
        }
        RawToken::Int => {
            let value = slice
                .parse::<i64>()
                .map_err(|_| LexError::int_overflow(slice, span))?;
            Token::new(TokenKind::Int, Some(Literal::Int(value)), span)
        }
        RawToken::Float => float_token(slice, span),
        RawToken::Label => text_token(TokenKind::Label, &slice[..slice.len() - 1], span),
        RawToken::Name => text_token(TokenKind::Name, slice, span),
    };
    Ok(token)
}

fn text_token(kind: TokenKind, text: &str, span: Span) -> Token {
    Token::new(kind, Some(Literal::Text(text.to_owned())), span)
}

fn float_token(slice: &str, span: Span) -> Token {
    let decimals = slice
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len());
    // The grammar guarantees at least one digit, which `f64::from_str` accepts.
    let value = slice.parse::<f64>().unwrap_or_default();
    Token::new(TokenKind::Float, Some(Literal::Float { value, decimals }), span)
}
