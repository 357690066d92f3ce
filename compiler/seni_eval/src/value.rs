//! Runtime values.

use seni_ir::{Form, Name};
use std::fmt;
use std::sync::Arc;

use crate::errors::{wrong_arg_type, EvalError};
use crate::native::NativeFunction;
use crate::Environment;

/// The language's boolean, written `#t` / `#f`.
///
/// Kept distinct from `bool` so equality and comparison work over `Value`
/// uniformly.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Boolean {
    True,
    False,
}

impl Boolean {
    #[inline]
    pub fn is_true(self) -> bool {
        self == Boolean::True
    }
}

impl From<bool> for Boolean {
    #[inline]
    fn from(value: bool) -> Self {
        if value {
            Boolean::True
        } else {
            Boolean::False
        }
    }
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boolean::True => f.write_str("#t"),
            Boolean::False => f.write_str("#f"),
        }
    }
}

/// A runtime value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Result of a missing `else` branch, an empty body or a zero-iteration loop.
    #[default]
    Undefined,
    Number(f64),
    Boolean(Boolean),
    Str(String),
    /// A quoted symbol.
    Name(Name),
    List(Vec<Value>),
    /// A quoted argument map, or the arguments received by a named-parameter function.
    Map(NamedArgs),
    Closure(Arc<Closure>),
    Native(Arc<NativeFunction>),
}

impl Value {
    pub const TRUE: Value = Value::Boolean(Boolean::True);
    pub const FALSE: Value = Value::Boolean(Boolean::False);

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Str(_) => "string",
            Value::Name(_) => "name",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Closure(_) => "function",
            Value::Native(_) => "native function",
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True only for `#t`.
    #[inline]
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Boolean(Boolean::True))
    }

    /// Text of a string or quoted name.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            Value::Name(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::Native(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Name(a), Value::Name(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Arc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(Boolean::from(value))
    }
}

impl From<seni_ir::Atom> for Value {
    fn from(atom: seni_ir::Atom) -> Self {
        match atom {
            seni_ir::Atom::Number(n) => Value::Number(n),
            seni_ir::Atom::Boolean(b) => Value::from(b),
            seni_ir::Atom::Str(text) => Value::Str(text),
            seni_ir::Atom::Symbol(name) => Value::Name(name),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Str(text) => f.write_str(text),
            Value::Name(name) => write!(f, "{name}"),
            Value::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Value::Map(args) => write!(f, "{args}"),
            Value::Closure(closure) => write!(f, "<fn {}>", closure.name),
            Value::Native(native) => write!(f, "<native {}>", native.name),
        }
    }
}

/// A function defined by `fn` (or `define` with a name form).
pub struct Closure {
    pub name: Name,
    /// Parameters with their values, evaluated once at definition time.
    pub defaults: NamedArgs,
    pub body: Arc<[Form]>,
    /// Environment at definition time.
    pub env: Environment,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.name)
            .field("defaults", &self.defaults)
            .field("body", &self.body.len())
            .finish_non_exhaustive()
    }
}

/// Arguments of a named-parameter call, in the order written.
///
/// Later entries with the same name replace earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NamedArgs(Vec<(Name, Value)>);

impl NamedArgs {
    pub fn new() -> Self {
        NamedArgs(Vec::new())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, value)| value)
    }

    pub fn insert(&mut self, name: Name, value: Value) {
        if let Some(slot) = self.0.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(Name::new(name), value.into());
        self
    }

    /// A required numeric argument.
    pub fn number(&self, function: &str, name: &str) -> Result<f64, EvalError> {
        self.get(name)
            .and_then(Value::as_number)
            .ok_or_else(|| wrong_arg_type(function, name, "number"))
    }

    /// `defaults` overlaid with `self`.
    #[must_use]
    pub fn merged_over(&self, defaults: &NamedArgs) -> NamedArgs {
        let mut merged = defaults.clone();
        for (name, value) in &self.0 {
            merged.insert(name.clone(), value.clone());
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.0.iter().map(|(name, value)| (name, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Name, Value)> for NamedArgs {
    fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
        let mut args = NamedArgs::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}

impl fmt::Display for NamedArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests;
