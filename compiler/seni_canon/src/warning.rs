//! Non-fatal compiler diagnostics.

use seni_ir::{NodeKind, Span};
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompileWarning {
    pub kind: CompileWarningKind,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CompileWarningKind {
    /// A named-argument list whose last label has no value.
    OddArgumentCount,
    /// Something other than a label where a label was expected.
    ExpectedLabel(NodeKind),
    /// A label outside of an argument list.
    StrayLabel(String),
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CompileWarningKind::OddArgumentCount => f.write_str(
                "odd number of nodes: expected a function name followed by label/value pairs",
            ),
            CompileWarningKind::ExpectedLabel(found) => {
                write!(f, "expected a label, found {found:?}")
            }
            CompileWarningKind::StrayLabel(label) => {
                write!(f, "label '{label}:' is not part of an argument list")
            }
        }
    }
}
