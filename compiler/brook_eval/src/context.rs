//! The mutable state a template renders against.

use rustc_hash::FxHashMap;

use brook_ir::Expression;
use brook_value::{Culture, Value};

use crate::exec::evaluate;
use crate::{
    CancellationToken, Environment, FilterRegistry, MemberAccessStrategy, SharedMutableRegistry,
    SharedRegistry,
};

/// Rendering context: variables, registries, culture and cancellation.
///
/// A context belongs to one render at a time. It can be reused for a second
/// render, in which case values assigned by the first are still visible.
/// Registries are shared handles, so many contexts (on many threads) can
/// render with the same member accessors and filters.
#[derive(Debug)]
pub struct TemplateContext {
    env: Environment,
    counters: FxHashMap<String, i64>,
    member_access: SharedMutableRegistry<MemberAccessStrategy>,
    filters: SharedRegistry<FilterRegistry>,
    culture: Culture,
    cancellation: CancellationToken,
}

impl TemplateContext {
    /// A context with the default member access strategy, the standard
    /// filters and the invariant culture.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> TemplateContextBuilder {
        TemplateContextBuilder::new()
    }

    /// Bind `name` in the current scope. Before a render starts this is the
    /// global scope that holds the model.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.env.define(name, value.into());
    }

    /// Look a variable up from the innermost scope outwards.
    pub fn get_value(&self, name: &str) -> Option<Value> {
        self.env.lookup(name).cloned()
    }

    /// Assignment semantics: update the nearest existing binding, or bind in
    /// the current scope.
    pub fn assign(&mut self, name: &str, value: Value) {
        self.env.assign(name, value);
    }

    /// Bind `name` in the innermost scope only.
    pub(crate) fn define(&mut self, name: &str, value: Value) {
        self.env.define(name, value);
    }

    pub fn enter_child_scope(&mut self) {
        self.env.push_scope();
    }

    pub fn release_scope(&mut self) {
        self.env.pop_scope();
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Evaluate an expression against the current scopes.
    pub fn evaluate(&self, expr: &Expression) -> Value {
        evaluate(expr, self)
    }

    /// Resolve `value.name` through the member access strategy.
    pub fn resolve_member(&self, value: &Value, name: &str) -> Value {
        let members = self.member_access.read();
        value.get_value(name, &*members)
    }

    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    pub fn set_culture(&mut self, culture: Culture) {
        self.culture = culture;
    }

    /// Builder-style culture override.
    #[must_use]
    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    pub fn member_access(&self) -> &SharedMutableRegistry<MemberAccessStrategy> {
        &self.member_access
    }

    pub fn filters(&self) -> &SharedRegistry<FilterRegistry> {
        &self.filters
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// `increment`: return the counter's current value, then add one.
    pub(crate) fn increment(&mut self, name: &str) -> i64 {
        let counter = self.counters.entry(name.to_string()).or_insert(0);
        let current = *counter;
        *counter = counter.saturating_add(1);
        current
    }

    /// `decrement`: subtract one, then return the new value.
    pub(crate) fn decrement(&mut self, name: &str) -> i64 {
        let counter = self.counters.entry(name.to_string()).or_insert(0);
        *counter = counter.saturating_sub(1);
        *counter
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`TemplateContext`].
///
/// Anything left unset gets its default: a fresh member access strategy, the
/// standard filters, the invariant culture and an uncancelled token.
#[derive(Default)]
pub struct TemplateContextBuilder {
    env: Option<Environment>,
    member_access: Option<SharedMutableRegistry<MemberAccessStrategy>>,
    filters: Option<SharedRegistry<FilterRegistry>>,
    culture: Option<Culture>,
    cancellation: Option<CancellationToken>,
    values: Vec<(String, Value)>,
}

impl TemplateContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing environment instead of an empty one.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Share a member access strategy with other contexts.
    #[must_use]
    pub fn member_access(mut self, registry: SharedMutableRegistry<MemberAccessStrategy>) -> Self {
        self.member_access = Some(registry);
        self
    }

    #[must_use]
    pub fn filters(mut self, registry: SharedRegistry<FilterRegistry>) -> Self {
        self.filters = Some(registry);
        self
    }

    #[must_use]
    pub fn culture(mut self, culture: Culture) -> Self {
        self.culture = Some(culture);
        self
    }

    /// Use a token the host keeps a clone of, so it can cancel the render.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Seed a global value.
    #[must_use]
    pub fn value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> TemplateContext {
        let mut ctx = TemplateContext {
            env: self.env.unwrap_or_default(),
            counters: FxHashMap::default(),
            member_access: self
                .member_access
                .unwrap_or_else(|| SharedMutableRegistry::new(MemberAccessStrategy::new())),
            filters: self
                .filters
                .unwrap_or_else(|| SharedRegistry::new(FilterRegistry::with_defaults())),
            culture: self.culture.unwrap_or_default(),
            cancellation: self.cancellation.unwrap_or_default(),
        };
        for (name, value) in self.values {
            ctx.set_value(name, value);
        }
        ctx
    }
}
