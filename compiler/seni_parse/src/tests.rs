#![allow(clippy::unwrap_used, reason = "tests parse known-good input")]

use super::*;
use pretty_assertions::assert_eq;
use seni_lexer::{tokenize, tokenize_with_trivia};

fn parse_str(source: &str) -> Result<Vec<Node>, ParseError> {
    parse(tokenize(source).unwrap())
}

fn parse_ok(source: &str) -> Vec<Node> {
    parse_str(source).unwrap()
}

fn error_message(source: &str) -> String {
    parse_str(source).unwrap_err().to_string()
}

#[test]
fn nested_lists() {
    let ast = parse_ok("(+ 1 (* 2 3))");
    assert_eq!(ast.len(), 1);
    let outer = &ast[0];
    assert_eq!(outer.kind, NodeKind::List);
    assert_eq!(outer.children.len(), 3);
    assert!(outer.children[0].is_name("+"));
    assert_eq!(outer.children[1].value, Some(Literal::Int(1)));
    assert_eq!(outer.children[2].children.len(), 3);
}

#[test]
fn sibling_top_level_forms() {
    let ast = parse_ok("(a) 4 b");
    assert_eq!(ast.len(), 3);
    assert_eq!(ast[1].kind, NodeKind::Int);
    assert_eq!(ast[2].kind, NodeKind::Name);
}

#[test]
fn booleans_are_canonical() {
    let ast = parse_ok("true false");
    assert_eq!(ast[0].kind, NodeKind::Boolean);
    assert_eq!(ast[0].value, Some(Literal::Bool(true)));
    assert_eq!(ast[1].value, Some(Literal::Bool(false)));
}

#[test]
fn canonical_boolean_spelling() {
    let ast = parse_ok("#t #f (= #t x)");
    assert_eq!(ast[0].kind, NodeKind::Boolean);
    assert_eq!(ast[0].value, Some(Literal::Bool(true)));
    assert_eq!(ast[1].value, Some(Literal::Bool(false)));
    assert_eq!(ast[2].children[1].kind, NodeKind::Boolean);
    assert!(ast[2].children[2].is_name("x"));
}

#[test]
fn comments_are_dropped() {
    let ast = parse_ok("; heading\n(go) ; trailing");
    assert_eq!(ast.len(), 1);
    assert_eq!(ast[0].children.len(), 1);
}

#[test]
fn quote_abbreviation() {
    let ast = parse_ok("'(a b)");
    let quote = &ast[0];
    assert!(quote.abbreviated);
    assert_eq!(quote.children.len(), 2);
    assert!(quote.children[0].is_name("quote"));
    assert_eq!(quote.children[1].kind, NodeKind::List);
}

#[test]
fn bracket_with_generator() {
    let ast = parse_ok("(+ 3 [4 (int min: 0 max: 8)])");
    let gene = &ast[0].children[2];
    assert!(gene.alterable);
    assert_eq!(gene.value, Some(Literal::Int(4)));
    assert_eq!(gene.parameter_ast.len(), 1);
    assert!(gene.parameter_ast[0].children[0].is_name("int"));
    assert!(gene.parameter_prefix.is_empty());
}

#[test]
fn bracket_without_generator() {
    let ast = parse_ok("(+ 2 [1])");
    let gene = &ast[0].children[2];
    assert!(gene.alterable);
    assert!(gene.parameter_ast.is_empty());
}

#[test]
fn bracket_keeps_prefix_trivia() {
    let ast = parse_with_trivia(tokenize_with_trivia("[ ; pick\n 3 (int)]").unwrap()).unwrap();
    let gene = &ast[0];
    assert_eq!(
        gene.parameter_prefix
            .iter()
            .map(|node| node.kind)
            .collect::<Vec<_>>(),
        vec![NodeKind::Whitespace, NodeKind::Comment, NodeKind::Whitespace]
    );
    assert_eq!(gene.parameter_ast[0].kind, NodeKind::Whitespace);
    assert_eq!(gene.parameter_ast[1].kind, NodeKind::List);
}

#[test]
fn multi_gene_list() {
    let ast = parse_ok("(define f [(list 1 2) map (select from: (list 1 2 3 4))])");
    let gene = &ast[0].children[2];
    assert!(gene.is_multi_gene());
    assert_eq!(gene.gene_count(), 2);
}

#[test]
fn list_without_map_is_not_alterable() {
    assert_eq!(
        error_message("[(list 1 2) (int)]"),
        "non-mutable node within square brackets"
    );
    assert_eq!(
        error_message("[x: 1]"),
        "non-mutable node within square brackets"
    );
}

#[test]
fn structural_errors() {
    assert_eq!(error_message("(+ 1 2"), "unexpected end of list");
    assert_eq!(error_message("(+ 1 2))"), "mismatched closing parens");
    assert_eq!(error_message("4]"), "mismatched closing square brackets");
    assert_eq!(error_message("[4 (int)"), "unexpected end of list");
    assert_eq!(error_message("'"), "unexpected end of list");
    assert_eq!(error_message("[]"), "empty square brackets");
}

#[test]
fn error_spans_point_at_offender() {
    let error = parse_str("(a))").unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::MismatchedClosingParens);
    assert_eq!(error.span, Span::new(3, 4));
}

#[test]
fn list_span_covers_parens() {
    let ast = parse_ok("  (a b)");
    assert_eq!(ast[0].span, Span::new(2, 7));
}

#[test]
fn deep_nesting() {
    let depth = 1_000;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let ast = parse_ok(&source);
    assert_eq!(ast.len(), 1);
}
