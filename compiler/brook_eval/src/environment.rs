//! Variable scoping for template rendering.
//!
//! Uses a scope stack (not cloning) for efficient scope management. The
//! bottom scope holds the host's model values and lives for the whole
//! render; `for` iterations push a scope per iteration.

use rustc_hash::FxHashMap;

use brook_value::Value;

/// A single scope containing variable bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` in this scope, replacing any existing binding here.
    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Stack of scopes, innermost last.
///
/// Never empty: the global scope cannot be popped.
#[derive(Clone, Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::new()],
        }
    }

    /// Number of scopes on the stack, including the global scope.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Pop the innermost scope. The global scope stays.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind `name` in the innermost scope.
    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.current_mut().define(name, value);
    }

    /// Look `name` up from the innermost scope outwards.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains(name))
    }

    /// Assign to the nearest scope that already binds `name`, or bind it in
    /// the innermost scope when no scope does.
    ///
    /// Returns `true` when an existing binding was overwritten.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(scope) = self.scopes.iter_mut().rev().find(|s| s.contains(name)) {
            scope.define(name, value);
            true
        } else {
            self.define(name, value);
            false
        }
    }

    fn current_mut(&mut self) -> &mut Scope {
        // `scopes` always holds the global scope.
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
