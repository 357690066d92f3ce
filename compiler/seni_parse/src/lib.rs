//! Parser for Seni-script.
//!
//! Turns a token list into the front AST. The tree keeps everything the
//! unparser needs: bracketed (alterable) values with their generators, quote
//! abbreviations, and, for [`parse_with_trivia`], every whitespace run and
//! comment.
//!
//! # Bracketed forms
//!
//! `[value generator...]`: the first item is the alterable value and must be
//! a scalar literal or name. Everything after it up to `]` is the generator
//! (`parameter_ast`); trivia before the value is kept in `parameter_prefix`.
//! A literal list is accepted as the value only when its generator maps over
//! the elements, e.g. `[(list 1 2) map (int)]`.

mod cursor;
mod error;

use cursor::Cursor;
use seni_ir::{is_map_generator, Literal, Node, NodeKind, Span, Token, TokenKind};
use seni_stack::ensure_sufficient_stack;

pub use error::{ParseError, ParseErrorKind};

/// Parse tokens into sibling top-level forms, discarding whitespace and comments.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Node>, ParseError> {
    Parser::new(tokens, false).parse_all()
}

/// Parse tokens, keeping whitespace and comments as trivia nodes.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_with_trivia(tokens: Vec<Token>) -> Result<Vec<Node>, ParseError> {
    Parser::new(tokens, true).parse_all()
}

struct Parser {
    cursor: Cursor,
    keep_trivia: bool,
}

impl Parser {
    fn new(tokens: Vec<Token>, keep_trivia: bool) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            keep_trivia,
        }
    }

    fn parse_all(mut self) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        while let Some(token) = self.cursor.bump() {
            if let Some(node) = self.parse_item(token)? {
                nodes.push(node);
            }
        }
        tracing::trace!(forms = nodes.len(), "parsed");
        Ok(nodes)
    }

    /// Parse the item starting at `token`. Dropped trivia yields `None`.
    fn parse_item(&mut self, token: Token) -> Result<Option<Node>, ParseError> {
        ensure_sufficient_stack(|| {
            let span = token.span;
            let node = match token.kind {
                TokenKind::ListStart => self.parse_list(span)?,
                TokenKind::BracketStart => self.parse_bracket(span)?,
                TokenKind::QuoteAbbrev => self.parse_quote(span)?,
                TokenKind::ListEnd => {
                    return Err(ParseError::new(
                        ParseErrorKind::MismatchedClosingParens,
                        span,
                    ))
                }
                TokenKind::BracketEnd => {
                    return Err(ParseError::new(
                        ParseErrorKind::MismatchedClosingBrackets,
                        span,
                    ))
                }
                TokenKind::Comment | TokenKind::Whitespace => {
                    if !self.keep_trivia {
                        return Ok(None);
                    }
                    let kind = if token.kind == TokenKind::Comment {
                        NodeKind::Comment
                    } else {
                        NodeKind::Whitespace
                    };
                    leaf(kind, token)
                }
                TokenKind::Int => leaf(NodeKind::Int, token),
                TokenKind::Float => leaf(NodeKind::Float, token),
                TokenKind::String => leaf(NodeKind::String, token),
                TokenKind::Label => leaf(NodeKind::Label, token),
                TokenKind::Name => match token.text() {
                    Some("true" | "#t") => {
                        Node::leaf(NodeKind::Boolean, Literal::Bool(true), span)
                    }
                    Some("false" | "#f") => {
                        Node::leaf(NodeKind::Boolean, Literal::Bool(false), span)
                    }
                    _ => leaf(NodeKind::Name, token),
                },
                TokenKind::Unknown => {
                    let text = token.text().unwrap_or_default().to_owned();
                    return Err(ParseError::new(ParseErrorKind::UnknownToken(text), span));
                }
            };
            Ok(Some(node))
        })
    }

    fn parse_list(&mut self, open: Span) -> Result<Node, ParseError> {
        let mut children = Vec::new();
        loop {
            let Some(token) = self.cursor.bump() else {
                return Err(self.end_of_input());
            };
            if token.kind == TokenKind::ListEnd {
                return Ok(Node::list(children, open.merge(token.span)));
            }
            if let Some(child) = self.parse_item(token)? {
                children.push(child);
            }
        }
    }

    fn parse_bracket(&mut self, open: Span) -> Result<Node, ParseError> {
        let mut prefix = Vec::new();
        let mut value = loop {
            let Some(token) = self.cursor.bump() else {
                return Err(self.end_of_input());
            };
            if token.kind == TokenKind::BracketEnd {
                return Err(ParseError::new(
                    ParseErrorKind::EmptyBrackets,
                    open.merge(token.span),
                ));
            }
            match self.parse_item(token)? {
                Some(node) if node.is_trivia() => prefix.push(node),
                Some(node) => break node,
                None => {}
            }
        };

        let mut parameters = Vec::new();
        loop {
            let Some(token) = self.cursor.bump() else {
                return Err(self.end_of_input());
            };
            if token.kind == TokenKind::BracketEnd {
                break;
            }
            if let Some(node) = self.parse_item(token)? {
                parameters.push(node);
            }
        }

        if !is_alterable(&value, &parameters) {
            return Err(ParseError::new(
                ParseErrorKind::NonMutableNode(value.kind),
                value.span,
            ));
        }

        value.alterable = true;
        value.parameter_ast = parameters;
        value.parameter_prefix = prefix;
        Ok(value)
    }

    /// `'form` becomes `(quote form)` marked as abbreviated.
    fn parse_quote(&mut self, quote: Span) -> Result<Node, ParseError> {
        loop {
            let Some(token) = self.cursor.bump() else {
                return Err(self.end_of_input());
            };
            match self.parse_item(token)? {
                Some(node) if !node.is_trivia() => {
                    let span = quote.merge(node.span);
                    let mut list = Node::list(vec![Node::name("quote", quote), node], span);
                    list.abbreviated = true;
                    return Ok(list);
                }
                _ => {}
            }
        }
    }

    fn end_of_input(&self) -> ParseError {
        ParseError::new(ParseErrorKind::UnexpectedEndOfList, self.cursor.last_span())
    }
}

fn leaf(kind: NodeKind, token: Token) -> Node {
    let span = token.span;
    let value = token.value.unwrap_or(Literal::Text(String::new()));
    Node::leaf(kind, value, span)
}

/// Scalars may always be bracketed; a literal list only when its generator
/// maps over scalar elements.
fn is_alterable(value: &Node, parameters: &[Node]) -> bool {
    if value.alterable {
        return false;
    }
    if value.kind.is_scalar() {
        return true;
    }
    value.kind == NodeKind::List
        && !value.abbreviated
        && is_map_generator(parameters)
        && value
            .gene_elements()
            .all(|element| element.kind.is_scalar() && !element.alterable)
}

#[cfg(test)]
mod tests;
