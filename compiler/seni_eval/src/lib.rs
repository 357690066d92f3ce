//! Seni Eval - tree-walking interpreter for compiled Seni-script.
//!
//! # Architecture
//!
//! - [`Environment`]: persistent chain of immutable scopes
//! - [`Interpreter`]: evaluates [`seni_ir::Form`]s, resolving gene
//!   references against an optional genotype
//! - [`NativeBinding`]: how embedders register native functions over their
//!   own context (a canvas, a PRNG)
//! - print handlers: where `print` and `log` output goes

mod builtins;
mod environment;
pub mod errors;
mod interpreter;
mod native;
mod print_handler;
mod value;

pub use builtins::builtin_environment;
pub use environment::{Binding, Environment};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Evaluation, Interpreter};
pub use native::{make_base_environment, ClassicFn, NamedFn, NativeBinding, NativeFn, NativeFunction};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, tracing_handler, BufferPrintHandler,
    PrintHandlerImpl, SharedPrintHandler,
};
pub use value::{Boolean, Closure, NamedArgs, Value};
