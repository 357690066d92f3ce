//! Persistent environment.
//!
//! An environment is a chain of immutable scopes. [`Environment::set`] never
//! touches an existing scope: it returns a new environment whose innermost
//! scope holds the new binding and whose outer chain is shared. Closures keep
//! the environment they were defined in, so bindings made later in sibling
//! scopes are invisible to them.

use rustc_hash::FxHashMap;
use seni_ir::Name;
use std::fmt;
use std::sync::Arc;

use crate::Value;

#[derive(Clone, Debug)]
pub struct Binding {
    pub value: Value,
}

struct Scope {
    bindings: FxHashMap<Name, Binding>,
    outer: Option<Arc<Scope>>,
}

/// Handle to the innermost scope of a chain. Cloning is a pointer copy.
#[derive(Clone, Default)]
pub struct Environment {
    innermost: Option<Arc<Scope>>,
}

impl Environment {
    /// An environment with no bindings.
    pub fn new() -> Self {
        Environment { innermost: None }
    }

    /// Look `name` up, innermost scope first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let mut scope = self.innermost.as_deref();
        while let Some(current) = scope {
            if let Some(binding) = current.bindings.get(name) {
                return Some(&binding.value);
            }
            scope = current.outer.as_deref();
        }
        None
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// A new environment with `name` bound to `value`, shadowing any outer binding.
    #[must_use]
    pub fn set(&self, name: Name, value: Value) -> Environment {
        let mut bindings = FxHashMap::default();
        bindings.insert(name, Binding { value });
        self.push_scope(bindings)
    }

    /// A new environment with all of `bindings` in one new scope.
    #[must_use]
    pub fn extend(&self, bindings: impl IntoIterator<Item = (Name, Value)>) -> Environment {
        let bindings = bindings
            .into_iter()
            .map(|(name, value)| (name, Binding { value }))
            .collect();
        self.push_scope(bindings)
    }

    fn push_scope(&self, bindings: FxHashMap<Name, Binding>) -> Environment {
        Environment {
            innermost: Some(Arc::new(Scope {
                bindings,
                outer: self.innermost.clone(),
            })),
        }
    }

    /// Number of scopes in the chain.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self.innermost.as_deref();
        while let Some(current) = scope {
            depth += 1;
            scope = current.outer.as_deref();
        }
        depth
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .finish()
    }
}

impl Drop for Scope {
    // Unlink long chains iteratively instead of recursing once per scope.
    fn drop(&mut self) {
        let mut outer = self.outer.take();
        while let Some(scope) = outer {
            match Arc::try_unwrap(scope) {
                Ok(mut scope) => outer = scope.outer.take(),
                Err(_) => break,
            }
        }
    }
}
