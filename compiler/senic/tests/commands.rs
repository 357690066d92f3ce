//! CLI command handler tests.

#![allow(clippy::unwrap_used, reason = "tests unwrap freely")]

use pretty_assertions::assert_eq;
use senic::commands::{generation, run_script, traits_json, unparse_with_seed, Breeding};
use senic::init_tracing;
use seni_eval::Value;

const SCRIPT: &str = "(loop (i from: 0 to: [2 (int min: 1 max: 4)]) (print i))";

#[test]
fn run_prints_loop_output() {
    init_tracing("warn");
    let rendering = run_script(SCRIPT, None).unwrap();
    assert_eq!(rendering.output, vec!["0".to_owned(), "1".to_owned()]);
    assert_eq!(rendering.value, Value::TRUE);
    assert_eq!(rendering.error, None);
}

#[test]
fn run_with_seed_is_repeatable() {
    let first = run_script(SCRIPT, Some(5)).unwrap();
    let second = run_script(SCRIPT, Some(5)).unwrap();
    assert_eq!(first, second);
    assert!((1..=3).contains(&first.output.len()));
}

#[test]
fn traits_are_json() {
    let json = traits_json(SCRIPT).unwrap();
    let traits: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(traits.as_array().unwrap().len(), 1);
}

fn first_generation(population_size: usize, seed: u64) -> Breeding {
    Breeding {
        population_size,
        generations: 0,
        mutation_rate: 0.1,
        seed,
    }
}

#[test]
fn generation_unparses_each_member() {
    let scripts = generation(SCRIPT, first_generation(3, 11)).unwrap();
    assert_eq!(scripts.len(), 3);
    assert_eq!(scripts[0], SCRIPT);
    for script in &scripts {
        assert!(script.starts_with("(loop (i from: 0 to: ["));
    }
}

#[test]
fn unparse_with_seed_matches_generation_member() {
    let scripts = generation(SCRIPT, first_generation(2, 11)).unwrap();
    assert_eq!(unparse_with_seed(SCRIPT, 12).unwrap(), scripts[1]);
}

#[test]
fn breeding_keeps_parents_and_population_size() {
    let breeding = Breeding {
        generations: 2,
        ..first_generation(4, 3)
    };
    let scripts = generation(SCRIPT, breeding).unwrap();
    assert_eq!(scripts.len(), 4);
    assert_eq!(scripts[0], SCRIPT);
}

#[test]
fn structural_errors_surface() {
    let error = run_script("(+ 1 ]", None).unwrap_err();
    assert_eq!(error.to_string(), "mismatched closing square brackets");
}
