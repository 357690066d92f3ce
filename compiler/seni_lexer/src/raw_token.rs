//! Raw token definitions recognised by `logos`.

use logos::Logos;

/// Token shapes before literal payloads are extracted.
///
/// Numbers take priority over names so that `-5` is a number while `-` and
/// `-x` stay names.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawToken {
    #[regex(r"[ \t\r\n,]+")]
    Whitespace,

    #[regex(r";[^\n]*")]
    Comment,

    #[token("'")]
    Quote,

    #[token("(")]
    ListStart,
    #[token(")")]
    ListEnd,
    #[token("[")]
    BracketStart,
    #[token("]")]
    BracketEnd,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"-?[0-9]+", priority = 3)]
    Int,

    #[regex(r"-?([0-9]+\.[0-9]*|\.[0-9]+)", priority = 3)]
    Float,

    #[regex(r"[a-zA-Z+\-*/<>=!@#$%\^&?][a-zA-Z0-9+\-*/<>=!@#$%\^&?]*:", priority = 2)]
    Label,

    #[regex(r"[a-zA-Z+\-*/<>=!@#$%\^&?][a-zA-Z0-9+\-*/<>=!@#$%\^&?]*", priority = 2)]
    Name,
}
