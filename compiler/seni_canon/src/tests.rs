#![allow(clippy::unwrap_used, reason = "tests compile known-good input")]

use super::*;
use pretty_assertions::assert_eq;
use seni_ir::{Atom, SpecialForm};
use seni_lexer::tokenize;
use seni_parse::parse;

fn compile_str(source: &str) -> CompiledProgram {
    compile(&parse(tokenize(source).unwrap()).unwrap())
}

fn render(source: &str) -> Vec<String> {
    compile_str(source)
        .forms
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn bare_call() {
    assert_eq!(render("(go)"), vec!["(go)"]);
}

#[test]
fn positional_call() {
    assert_eq!(render("(+ 3 4)"), vec!["(+ 3 4)"]);
}

#[test]
fn named_call_folds_arguments() {
    assert_eq!(
        render("(circle x: 1 y: (+ 2 3))"),
        vec!["(circle {x: 1 y: (+ 2 3)})"]
    );
}

#[test]
fn function_definition_shape() {
    let program = compile_str("(define (add x: 0 y: 0) (+ x y))");
    assert_eq!(
        program.forms[0].to_string(),
        "(define (add {x: 0 y: 0}) (+ x y))"
    );
    assert!(matches!(
        program.forms[0],
        Form::Special(SpecialForm::Define, _)
    ));
}

#[test]
fn bare_argument_map() {
    assert_eq!(render("(a: 1 b: 2)"), vec!["{a: 1 b: 2}"]);
}

#[test]
fn strings_are_not_names() {
    let program = compile_str(r#"(print "hello" hello)"#);
    assert_eq!(
        program.forms[0],
        Form::Special(
            SpecialForm::Print,
            vec![
                Form::Str("hello".into()),
                Form::Name(seni_ir::Name::new("hello"))
            ]
        )
    );
}

#[test]
fn special_forms_resolve() {
    let program = compile_str("(if true 1 2) (loop (i from: 0 to: 3) (print i))");
    assert!(matches!(program.forms[0], Form::Special(SpecialForm::If, _)));
    assert_eq!(
        program.forms[1].to_string(),
        "(loop (i {from: 0 to: 3}) (print i))"
    );
}

#[test]
fn quote_abbreviation_compiles_to_quote() {
    let program = compile_str("'(a b)");
    assert_eq!(program.forms[0].to_string(), "(quote (a b))");
}

#[test]
fn gene_with_generator() {
    let program = compile_str("(+ 3 [4 (int min: 0 max: 8)])");
    assert_eq!(program.forms[0].to_string(), "(+ 3 <gene 0>)");
    assert_eq!(program.genes.len(), 1);
    let gene = &program.genes[0];
    assert_eq!(gene.initial_value, Atom::Number(4.0));
    assert_eq!(gene.compiled_ast.len(), 1);
    assert_eq!(gene.compiled_ast[0].to_string(), "(int {min: 0 max: 8})");
}

#[test]
fn gene_without_generator_uses_identity() {
    let program = compile_str("(+ 2 [1])");
    assert_eq!(
        program.genes[0].compiled_ast[0].to_string(),
        "(identity {value: 1})"
    );
}

#[test]
fn name_gene_identity_is_quoted() {
    let program = compile_str("(fill [linear])");
    assert_eq!(program.genes[0].initial_value, Atom::Symbol("linear".into()));
    assert_eq!(
        program.genes[0].compiled_ast[0].to_string(),
        "(identity {value: (quote linear)})"
    );
}

#[test]
fn genes_in_pre_order() {
    let program = compile_str("(f [1] (g [2] [3]) [4])");
    let initial: Vec<Atom> = program
        .genes
        .iter()
        .map(|gene| gene.initial_value.clone())
        .collect();
    assert_eq!(
        initial,
        vec![
            Atom::Number(1.0),
            Atom::Number(2.0),
            Atom::Number(3.0),
            Atom::Number(4.0)
        ]
    );
    assert_eq!(program.forms[0].to_string(), "(f <gene 0> (g <gene 1> <gene 2>) <gene 3>)");
}

#[test]
fn brackets_inside_generators_are_constants() {
    let program = compile_str("(f [5 (int min: [1] max: 9)])");
    assert_eq!(program.genes.len(), 1);
    assert_eq!(
        program.genes[0].compiled_ast[0].to_string(),
        "(int {min: 1 max: 9})"
    );
}

#[test]
fn multi_gene_list() {
    let program = compile_str("(define f [(list 1 2) map (select from: (list 1 2 3 4))])");
    assert_eq!(program.genes.len(), 2);
    assert_eq!(
        program.forms[0].to_string(),
        "(define f (list <gene 0> <gene 1>))"
    );
    for gene in &program.genes {
        assert_eq!(
            gene.compiled_ast[0].to_string(),
            "(select {from: (list 1 2 3 4)})"
        );
    }
}

#[test]
fn odd_arguments_warn_and_continue() {
    let program = compile_str("(circle x: 1 y:)");
    assert_eq!(program.forms[0].to_string(), "(circle {x: 1})");
    assert_eq!(program.warnings.len(), 1);
    assert_eq!(program.warnings[0].kind, CompileWarningKind::OddArgumentCount);
}

#[test]
fn non_label_pairs_are_skipped() {
    let program = compile_str("(circle x: 1 2 3)");
    assert_eq!(program.forms[0].to_string(), "(circle {x: 1})");
    assert_eq!(
        program.warnings[0].kind,
        CompileWarningKind::ExpectedLabel(seni_ir::NodeKind::Int)
    );
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn script() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            (0i32..100).prop_map(|n| n.to_string()),
            (0i32..100).prop_map(|n| format!("[{n}]")),
            (0i32..100).prop_map(|n| format!("[{n} (int min: 0 max: 100)]")),
            Just("x".to_owned()),
            Just("r: 2".to_owned()),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop::collection::vec(inner, 1..4).prop_map(|items| format!("(f {})", items.join(" ")))
        })
    }

    proptest! {
        #[test]
        fn compile_is_deterministic(source in script()) {
            let ast = parse(tokenize(&source).unwrap()).unwrap();
            prop_assert_eq!(compile(&ast), compile(&ast));
        }

        #[test]
        fn one_gene_per_bracket(source in script()) {
            let ast = parse(tokenize(&source).unwrap()).unwrap();
            prop_assert_eq!(compile(&ast).genes.len(), seni_ir::gene_count(&ast));
        }
    }
}
