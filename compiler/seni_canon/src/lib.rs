//! Compiler: front AST to evaluation forms.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Lex → Parse → **Compile** → seni_eval / seni_genetic
//! ```
//!
//! # What Happens During Compilation
//!
//! 1. **Call shapes**: `(f a: 1 b: 2)` becomes `f` applied to one argument
//!    map; `(f 1 2)` stays positional; a list starting with a label is a
//!    bare argument map.
//! 2. **Special forms**: heads such as `if`, `define` or `loop` are resolved
//!    into [`SpecialForm`](seni_ir::SpecialForm) so evaluation never looks
//!    them up by name.
//! 3. **Genes**: every bracketed literal is appended to the gene table in
//!    depth-first pre-order and replaced by a gene reference. A bracket with
//!    no generator gets `(identity value: literal)`.
//!
//! Malformed argument lists do not stop compilation. They are reported as
//! [`CompileWarning`]s (and logged) and the offending pairs are skipped.

mod lower;
mod warning;

use seni_ir::{Form, Gene, Node};

pub use warning::{CompileWarning, CompileWarningKind};

/// Output of one compilation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompiledProgram {
    pub forms: Vec<Form>,
    pub genes: Vec<Gene>,
    pub warnings: Vec<CompileWarning>,
}

/// Compile a front AST.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile(ast: &[Node]) -> CompiledProgram {
    let mut lowerer = lower::Lowerer::new();
    let forms = lowerer.lower_program(ast);
    let program = lowerer.finish(forms);
    tracing::debug!(
        forms = program.forms.len(),
        genes = program.genes.len(),
        warnings = program.warnings.len(),
        "compiled"
    );
    program
}

#[cfg(test)]
mod tests;
