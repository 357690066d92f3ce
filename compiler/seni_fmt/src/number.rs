//! Number formatting for gene values.

use seni_ir::{Literal, Node};

/// Most decimals written for a value replacing an integer literal.
const MAX_INT_DECIMALS: usize = 3;

/// Whole numbers at or beyond this size do not lex as integers.
const INT_LIMIT: f64 = i64::MAX as f64;

/// Format `value` to replace the literal of `node`.
///
/// A float literal keeps the number of decimals it was written with (at
/// least one, so it still reads back as a float). Anything else prints
/// whole numbers without a fraction and other values with up to three
/// decimals.
pub fn format_number(node: &Node, value: f64) -> String {
    match node.value {
        Some(Literal::Float { decimals, .. }) => format!("{value:.*}", decimals.max(1)),
        _ => format_plain(value),
    }
}

/// Format `value` without reference to a source literal.
///
/// Whole numbers too large for an integer literal are written as floats.
/// Non-finite values have no source syntax; they are written as Rust
/// displays them.
pub fn format_plain(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    if value.fract() == 0.0 {
        if value.abs() >= INT_LIMIT {
            return format!("{value:.1}");
        }
        return format!("{value}");
    }
    let fixed = format!("{value:.*}", MAX_INT_DECIMALS);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_owned(),
        other => other.to_owned(),
    }
}
