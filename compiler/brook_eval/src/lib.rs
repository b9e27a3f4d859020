//! Brook Eval - Interpreter and render pipeline for Brook templates.
//!
//! This crate walks a `brook_ir` statement tree against a
//! [`TemplateContext`] and writes the produced text to a [`TextSink`].
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Environment`: variable scoping with a scope stack
//! - `MemberAccessStrategy`: per-type member resolution for host objects
//! - `FilterRegistry`: named value transformations (`x | upcase`)
//! - `Interpreter`: the statement executor, returning a [`Completion`]
//!   signal that loops use for `break`/`continue`
//! - `render`: the entry point that drives a whole template
//!
//! # Failure Model
//!
//! Template logic never fails: missing variables, missing members and
//! ill-typed operands all evaluate to `Value::Nil` or a default. The only
//! error a render can report is a failed write to the output sink.
//! Cancellation is an outcome, not an error.

mod cancel;
mod context;
mod environment;
mod errors;
pub mod exec;
mod filters;
mod member_access;
mod operators;
mod output;
mod render;
mod shared;
mod stack;

pub use brook_value::{Culture, Value};
pub use cancel::CancellationToken;
pub use context::{TemplateContext, TemplateContextBuilder};
pub use environment::{Environment, Scope};
pub use errors::{RenderError, RenderOutcome};
pub use exec::{Completion, ExecResult, Interpreter, ScopedInterpreter};
pub use filters::{FilterFn, FilterRegistry};
pub use member_access::{MemberAccessStrategy, MemberAccessor, MemberSource};
pub use operators::{compare_values, evaluate_binary};
pub use output::{encode_html, IoSink, TextEncoder, TextSink};
pub use render::{render, Rendered, Template};
pub use shared::{SharedMutableRegistry, SharedRegistry};
pub use stack::ensure_sufficient_stack;
