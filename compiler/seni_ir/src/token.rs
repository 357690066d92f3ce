//! Token types for the Seni lexer.

use super::Span;
use std::fmt;

/// A token with its literal payload and its span in the source.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<Literal>,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, value: Option<Literal>, span: Span) -> Self {
        Token { kind, value, span }
    }

    /// A payload-free token (parens, brackets, quote).
    #[inline]
    pub fn punct(kind: TokenKind, span: Span) -> Self {
        Token {
            kind,
            value: None,
            span,
        }
    }

    /// Text payload of a name, label, string, comment or whitespace token.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            Some(Literal::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Whitespace and comments: tokens with no meaning to the compiler.
    #[inline]
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{:?}({:?}) @ {}", self.kind, value, self.span),
            None => write!(f, "{:?} @ {}", self.kind, self.span),
        }
    }
}

/// Token kinds for Seni-script.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// `(`
    ListStart,
    /// `)`
    ListEnd,
    /// `[`
    BracketStart,
    /// `]`
    BracketEnd,
    /// `42`, `-7`
    Int,
    /// `3.14`, `.5`, `-2.`
    Float,
    /// `circle`, `col/rgb`, `+`
    Name,
    /// `radius:` (value excludes the colon)
    Label,
    /// `"hello"` (value is the unescaped text)
    String,
    /// `'`
    QuoteAbbrev,
    /// `; to end of line` (value excludes the `;`)
    Comment,
    /// Runs of spaces, tabs, newlines and commas
    Whitespace,
    /// The first unrecognised character
    Unknown,
}

impl TokenKind {
    /// Human-readable description used in parse errors.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::ListStart => "'('",
            TokenKind::ListEnd => "')'",
            TokenKind::BracketStart => "'['",
            TokenKind::BracketEnd => "']'",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::Name => "name",
            TokenKind::Label => "label",
            TokenKind::String => "string",
            TokenKind::QuoteAbbrev => "quote",
            TokenKind::Comment => "comment",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Unknown => "unknown token",
        }
    }
}

/// Literal payload carried by tokens and front-AST nodes.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Int(i64),
    /// A float and the number of decimal places written in the source.
    Float { value: f64, decimals: usize },
    Text(String),
    /// Canonical boolean, displayed as `#t` / `#f`.
    Bool(bool),
}

impl Literal {
    /// Numeric view of `Int` and `Float` literals.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(value) => Some(*value as f64),
            Literal::Float { value, .. } => Some(*value),
            Literal::Text(_) | Literal::Bool(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Float { value, decimals } => write!(f, "{value:.decimals$}"),
            Literal::Text(text) => f.write_str(text),
            Literal::Bool(true) => f.write_str("#t"),
            Literal::Bool(false) => f.write_str("#f"),
        }
    }
}
