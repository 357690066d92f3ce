#![allow(clippy::unwrap_used, reason = "tests unwrap freely")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use seni_genetic::{build_traits, genotype_from_initial_values};
use seni_ir::Name;

use super::*;

fn parse(source: &str) -> Vec<Node> {
    seni_parse::parse(seni_lexer::tokenize(source).unwrap()).unwrap()
}

fn parse_with_trivia(source: &str) -> Vec<Node> {
    seni_parse::parse_with_trivia(seni_lexer::tokenize_with_trivia(source).unwrap()).unwrap()
}

fn authored(ast: &[Node]) -> Vec<Value> {
    genotype_from_initial_values(&build_traits(ast)).to_vec()
}

fn round_trip(source: &str) -> String {
    let ast = parse_with_trivia(source);
    unparse(&ast, &authored(&ast)).unwrap()
}

#[test]
fn round_trips_with_trivia() {
    for source in [
        "(+ 1 [ 3 (int)])",
        "(define f [(list 1 2) map (select from: (list 1 2 3 4))])",
        "; heading\n(define\n  x [0.50 (scalar)] ; trailing\n  y 2)\n",
        "(print \"say \\\"hi\\\"\" 'foo '(a b))",
        "(rect position: [(list 10 20) map (int max: 100)],  width: 3.25)",
        "(if true [false] [name (select from: '(name other))])",
    ] {
        assert_eq!(round_trip(source), source);
    }
}

#[test]
fn brackets_inside_generators_are_not_genes() {
    let source = "(+ [5 (int min: [0] max: [10 (int)])] 1)";
    let ast = parse_with_trivia(source);
    assert_eq!(build_traits(&ast).len(), 1);
    assert_eq!(round_trip(source), source);
    assert_eq!(
        unparse(&ast, &[Value::Number(7.0)]).unwrap(),
        "(+ [7 (int min: [0] max: [10 (int)])] 1)"
    );
}

#[test]
fn non_finite_numbers_are_rejected() {
    let ast = parse("(+ [1])");
    assert_eq!(
        unparse(&ast, &[Value::Number(f64::INFINITY)]),
        Err(UnparseError::Unrepresentable {
            index: 0,
            type_name: "non-finite number"
        })
    );
}

#[test]
fn plain_parse_inserts_single_spaces() {
    let ast = parse("(+   1\n [3   (int)] )\n\n(foo bar: 2)");
    assert_eq!(
        unparse(&ast, &authored(&ast)).unwrap(),
        "(+ 1 [3 (int)])\n(foo bar: 2)"
    );
}

#[test]
fn substitutes_genotype_values() {
    let ast = parse("(+ 3 [4 (int min: 0 max: 8)])");
    let script = unparse(&ast, &[Value::Number(7.0)]).unwrap();
    assert_eq!(script, "(+ 3 [7 (int min: 0 max: 8)])");
}

#[test]
fn floats_keep_their_precision() {
    let ast = parse("(scale [0.50 (scalar)] [2.5 (scalar min: 1 max: 5)])");
    let script = unparse(&ast, &[Value::Number(0.123_456), Value::Number(3.0)]).unwrap();
    assert_eq!(script, "(scale [0.12 (scalar)] [3.0 (scalar min: 1 max: 5)])");
}

#[test]
fn multi_gene_lists_take_one_value_per_element() {
    let ast = parse("(define f [(list 1 2) map (select from: (list 1 2 3 4))])");
    let script = unparse(&ast, &[Value::Number(4.0), Value::Number(3.0)]).unwrap();
    assert_eq!(
        script,
        "(define f [(list 4 3) map (select from: (list 1 2 3 4))])"
    );
}

#[test]
fn names_strings_and_booleans() {
    let ast = parse("(list [circle (select from: '(circle square))] [\"a\"] [true])");
    let genotype = [
        Value::Name(Name::new("square")),
        Value::Str("b\"c".to_owned()),
        Value::FALSE,
    ];
    assert_eq!(
        unparse(&ast, &genotype).unwrap(),
        "(list [square (select from: '(circle square))] [\"b\\\"c\"] [false])"
    );
}

#[test]
fn list_values_unparse_as_list_calls() {
    let ast = parse("(move to: [0 (vec2 min: 0 max: 10)])");
    let genotype = [Value::List(vec![Value::Number(1.5), Value::Number(2.0)])];
    assert_eq!(
        unparse(&ast, &genotype).unwrap(),
        "(move to: [(list 1.5 2) (vec2 min: 0 max: 10)])"
    );
}

#[test]
fn genotype_length_must_match() {
    let ast = parse("(+ [1] [2])");
    assert_eq!(
        unparse(&ast, &[Value::Number(1.0)]),
        Err(UnparseError::MissingGene { index: 1 })
    );
    let three = [Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)];
    assert_eq!(
        unparse(&ast, &three),
        Err(UnparseError::UnusedGenes { used: 2, len: 3 })
    );
}

#[test]
fn values_without_syntax_are_rejected() {
    let ast = parse("(+ [1])");
    let error = unparse(&ast, &[Value::Undefined]).unwrap_err();
    assert_eq!(
        error,
        UnparseError::Unrepresentable {
            index: 0,
            type_name: "undefined"
        }
    );
    assert_eq!(
        error.to_string(),
        "gene 0 holds a undefined, which cannot be written as source"
    );
}

#[test]
fn float_without_decimals_stays_float() {
    let ast = parse("(+ 2. 1)");
    assert_eq!(unparse(&ast, &[]).unwrap(), "(+ 2. 1)");
}

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        (0i64..1000).prop_map(|n| n.to_string()),
        (-50i64..50, 0u32..100).prop_map(|(whole, frac)| format!("{whole}.{frac:02}")),
        prop::sample::select(vec!["a", "foo", "col/rgb", "+"]).prop_map(str::to_owned),
        (0i64..100).prop_map(|n| format!("[{n}]")),
        (0i64..100).prop_map(|n| format!("[{n} (int min: 0 max: 100)]")),
        (0u32..100).prop_map(|n| format!("[0.{n:02} (scalar)]")),
        (0i64..100, 0i64..10).prop_map(|(n, lo)| format!("[{n} (int min: [{lo}] max: 100)]")),
    ]
}

fn script() -> impl Strategy<Value = String> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|items| format!("({})", items.join(" ")))
    })
}

proptest! {
    #[test]
    fn authored_genotype_round_trips(source in script()) {
        let plain = parse(&source);
        prop_assert_eq!(unparse(&plain, &authored(&plain)).unwrap(), source.clone());
        prop_assert_eq!(round_trip(&source), source);
    }
}
