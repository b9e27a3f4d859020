//! Brook IR - Syntax tree for Brook templates.
//!
//! The tree is produced by an external parser and consumed read-only by
//! `brook_eval`. Nothing in this crate evaluates anything; it only fixes the
//! shape of the input contract.
//!
//! # Layout
//!
//! - [`Expression`] and [`Segment`]: values, member chains, ranges, operators, filters
//! - [`Statement`]: text, output, assignment, control flow
//! - [`BinaryOp`]: the operator set understood by the evaluator
//!
//! # Serialization
//!
//! With the `serde` feature every node derives `Serialize`/`Deserialize`, so
//! a parser running in another process can hand over trees as data.

mod expr;
mod operators;
mod stmt;

pub use expr::{Expression, Literal, Segment};
pub use operators::BinaryOp;
pub use stmt::{ElseIf, ForStatement, Statement, When};
