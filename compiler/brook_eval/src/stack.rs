//! Native stack growth for nested templates.
//!
//! Every `if` body, loop body and captured block is executed by a recursive
//! call, and so is every operand of a filter chain or binary expression.
//! [`Interpreter::execute`](crate::Interpreter::execute) and
//! [`evaluate`](crate::exec::evaluate) both enter through
//! [`ensure_sufficient_stack`], so template depth is limited by memory
//! rather than by the thread's stack size.

/// Headroom that must remain before one more statement or expression runs.
#[cfg(not(target_arch = "wasm32"))]
const MIN_REMAINING: usize = 128 * 1024;

/// Size of each segment allocated once the headroom is used up.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment if fewer than
/// `MIN_REMAINING` bytes are left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(MIN_REMAINING, SEGMENT_SIZE, f)
}

/// The wasm runtime owns the stack; templates run on it directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
