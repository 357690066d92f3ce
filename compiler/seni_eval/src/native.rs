//! Native functions and their registration.
//!
//! An embedder (a renderer, the gene generator) describes each native as a
//! [`NativeBinding`]: a name, documentation, default arguments and a factory.
//! The factory runs once per fresh context (a canvas, a seeded PRNG) and
//! returns the function closed over that context, in one of the two calling
//! conventions.

use seni_ir::Name;
use std::fmt;
use std::sync::Arc;

use crate::{builtins, Environment, EvalResult, Interpreter, NamedArgs, Value};

/// Positional ("classic") native: receives evaluated arguments in order.
pub type ClassicFn = Arc<dyn Fn(&Interpreter<'_>, &[Value]) -> EvalResult + Send + Sync>;

/// Named-parameter native: receives one argument map, defaults already merged in.
pub type NamedFn = Arc<dyn Fn(&Interpreter<'_>, &NamedArgs) -> EvalResult + Send + Sync>;

#[derive(Clone)]
pub enum NativeFn {
    Classic(ClassicFn),
    Named(NamedFn),
}

impl NativeFn {
    pub fn classic(
        f: impl Fn(&Interpreter<'_>, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        NativeFn::Classic(Arc::new(f))
    }

    pub fn named(
        f: impl Fn(&Interpreter<'_>, &NamedArgs) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        NativeFn::Named(Arc::new(f))
    }
}

/// A native function bound into an environment.
pub struct NativeFunction {
    pub name: Name,
    pub doc: String,
    pub defaults: NamedArgs,
    pub func: NativeFn,
}

impl NativeFunction {
    #[inline]
    pub fn is_classic(&self) -> bool {
        matches!(self.func, NativeFn::Classic(_))
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let convention = if self.is_classic() { "classic" } else { "named" };
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("convention", &convention)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// Registration record for a native function over context `C`.
pub struct NativeBinding<C> {
    pub name: &'static str,
    pub doc: &'static str,
    pub defaults: NamedArgs,
    pub factory: fn(&C) -> NativeFn,
}

impl<C> NativeBinding<C> {
    pub fn new(name: &'static str, doc: &'static str, factory: fn(&C) -> NativeFn) -> Self {
        NativeBinding {
            name,
            doc,
            defaults: NamedArgs::new(),
            factory,
        }
    }

    #[must_use]
    pub fn with_default(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.defaults = self.defaults.with(name, value);
        self
    }

    /// Run the factory for `context`.
    pub fn instantiate(&self, context: &C) -> Value {
        Value::Native(Arc::new(NativeFunction {
            name: Name::new(self.name),
            doc: self.doc.to_owned(),
            defaults: self.defaults.clone(),
            func: (self.factory)(context),
        }))
    }
}

/// The built-in functions plus `bindings` instantiated for `context`.
///
/// Special forms are not part of the environment; the compiler resolves them.
pub fn make_base_environment<C>(context: &C, bindings: &[NativeBinding<C>]) -> Environment {
    let base = builtins::builtin_environment();
    if bindings.is_empty() {
        return base;
    }
    base.extend(
        bindings
            .iter()
            .map(|binding| (Name::new(binding.name), binding.instantiate(context))),
    )
}
