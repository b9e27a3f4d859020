//! Named value transformations applied with `input | name: args`.
//!
//! Filters see the evaluated input and arguments plus the context they run
//! in, and always produce a value. A filter that does not understand its
//! input passes it through or returns `Nil`; nothing here fails.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::TemplateContext;
use brook_value::Value;

/// A filter implementation.
pub type FilterFn = fn(Value, &[Value], &TemplateContext) -> Value;

/// Filters available to a render, looked up by name.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: FxHashMap<String, FilterFn>,
}

impl FilterRegistry {
    /// A registry with no filters at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the standard filter set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("size", size);
        registry.register("upcase", upcase);
        registry.register("downcase", downcase);
        registry.register("append", append);
        registry.register("prepend", prepend);
        registry.register("join", join);
        registry.register("first", first);
        registry.register("last", last);
        registry.register("default", default);
        registry.register("plus", plus);
        registry.register("minus", minus);
        registry
    }

    /// Add or replace a filter.
    pub fn register(&mut self, name: impl Into<String>, filter: FilterFn) {
        self.filters.insert(name.into(), filter);
    }

    pub fn get(&self, name: &str) -> Option<FilterFn> {
        self.filters.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Apply `name` to `input`. Unknown filters return the input unchanged.
    pub fn apply(
        &self,
        name: &str,
        input: Value,
        arguments: &[Value],
        ctx: &TemplateContext,
    ) -> Value {
        match self.get(name) {
            Some(filter) => filter(input, arguments, ctx),
            None => {
                tracing::trace!(filter = name, "unknown filter, passing input through");
                input
            }
        }
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FilterRegistry").field("filters", &names).finish()
    }
}

fn argument(arguments: &[Value], position: usize) -> Value {
    arguments.get(position).cloned().unwrap_or_default()
}

fn size(input: Value, _: &[Value], _: &TemplateContext) -> Value {
    Value::from(input.size().unwrap_or(0))
}

fn upcase(input: Value, _: &[Value], _: &TemplateContext) -> Value {
    Value::string(input.to_string_value().to_uppercase())
}

fn downcase(input: Value, _: &[Value], _: &TemplateContext) -> Value {
    Value::string(input.to_string_value().to_lowercase())
}

fn append(input: Value, arguments: &[Value], _: &TemplateContext) -> Value {
    let mut text = input.to_string_value();
    text.push_str(&argument(arguments, 0).to_string_value());
    Value::string(text)
}

fn prepend(input: Value, arguments: &[Value], _: &TemplateContext) -> Value {
    let mut text = argument(arguments, 0).to_string_value();
    text.push_str(&input.to_string_value());
    Value::string(text)
}

/// Join the elements with a separator, `" "` when none is given.
fn join(input: Value, arguments: &[Value], _: &TemplateContext) -> Value {
    let separator = match arguments.first() {
        Some(value) => value.to_string_value(),
        None => " ".to_string(),
    };
    let parts: Vec<String> = input.enumerate().map(|v| v.to_string_value()).collect();
    Value::string(parts.join(&separator))
}

fn first(input: Value, _: &[Value], _: &TemplateContext) -> Value {
    input.enumerate().next().unwrap_or_default()
}

fn last(input: Value, _: &[Value], _: &TemplateContext) -> Value {
    input.enumerate().last().unwrap_or_default()
}

/// The argument when the input is nil, false or empty.
fn default(input: Value, arguments: &[Value], _: &TemplateContext) -> Value {
    let is_empty = input.size() == Some(0) && !matches!(input, Value::Object(_));
    if input.to_boolean() && !is_empty {
        input
    } else {
        argument(arguments, 0)
    }
}

fn plus(input: Value, arguments: &[Value], _: &TemplateContext) -> Value {
    Value::Number(input.to_number() + argument(arguments, 0).to_number())
}

fn minus(input: Value, arguments: &[Value], _: &TemplateContext) -> Value {
    Value::Number(input.to_number() - argument(arguments, 0).to_number())
}

#[cfg(test)]
mod tests;
