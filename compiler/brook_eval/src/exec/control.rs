//! Loop control: completion signals and the `for` statement.

use brook_ir::{Expression, ForStatement};
use brook_value::{Indexable, Value};

use super::{evaluate, ExecResult, Interpreter};

/// How a statement or statement list finished.
///
/// `Break` and `Continue` travel outwards until the nearest enclosing loop
/// absorbs them. `Cancelled` travels all the way to the render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    Completed,
    Break,
    Continue,
    Cancelled,
}

impl Completion {
    pub fn is_cancelled(self) -> bool {
        matches!(self, Completion::Cancelled)
    }
}

/// The `forloop` object visible inside a loop body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ForLoop {
    length: usize,
    index0: usize,
}

impl ForLoop {
    const KEYS: [&'static str; 7] = [
        "length", "index", "index0", "rindex", "rindex0", "first", "last",
    ];

    /// Metadata for the zero-based iteration `index0` of `length`.
    pub fn new(index0: usize, length: usize) -> Self {
        ForLoop { length, index0 }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// One-based position.
    pub fn index(&self) -> usize {
        self.index0 + 1
    }

    pub fn index0(&self) -> usize {
        self.index0
    }

    /// One-based position counted from the end.
    pub fn rindex(&self) -> usize {
        self.length - self.index0
    }

    pub fn rindex0(&self) -> usize {
        self.length - self.index()
    }

    pub fn is_first(&self) -> bool {
        self.index0 == 0
    }

    pub fn is_last(&self) -> bool {
        self.index() == self.length
    }
}

impl Indexable for ForLoop {
    fn count(&self) -> usize {
        Self::KEYS.len()
    }

    fn keys(&self) -> Vec<String> {
        Self::KEYS.iter().map(ToString::to_string).collect()
    }

    fn try_get_value(&self, key: &str) -> Option<Value> {
        let value = match key {
            "length" => Value::from(self.length()),
            "index" => Value::from(self.index()),
            "index0" => Value::from(self.index0()),
            "rindex" => Value::from(self.rindex()),
            "rindex0" => Value::from(self.rindex0()),
            "first" => Value::Boolean(self.is_first()),
            "last" => Value::Boolean(self.is_last()),
            _ => return None,
        };
        Some(value)
    }
}

/// Most integers a single range may produce, as a loop source or a value.
pub const MAX_RANGE_LEN: i64 = 1 << 20;

/// The integers `start..=end` as numbers. Empty when `start > end`.
///
/// Longer ranges stop after [`MAX_RANGE_LEN`] items.
pub fn range_values(start: i64, end: i64) -> Vec<Value> {
    match range_window(start, end, None, None) {
        Some((first, last)) => numbers_between(first, last),
        None => Vec::new(),
    }
}

/// The inclusive bounds left after applying `offset` and `limit` to
/// `start..=end`, or `None` when nothing is left.
///
/// Matches [`slice_sequence`] on the materialized range without building it,
/// and never yields more than [`MAX_RANGE_LEN`] items.
pub fn range_window(
    start: i64,
    end: i64,
    offset: Option<i64>,
    limit: Option<i64>,
) -> Option<(i64, i64)> {
    if start > end {
        return None;
    }
    let offset = match offset {
        None => 0,
        Some(n) if n < 0 => return None,
        Some(n) => i128::from(n),
    };
    let first = i128::from(start) + offset;
    let mut last = i128::from(end);
    if first > last {
        return None;
    }
    if let Some(limit) = limit {
        if limit <= 0 {
            return None;
        }
        last = last.min(first + i128::from(limit) - 1);
    }
    let capped = last.min(first + i128::from(MAX_RANGE_LEN) - 1);
    if capped < last {
        tracing::debug!(start, end, cap = MAX_RANGE_LEN, "range truncated");
    }
    Some((i64::try_from(first).ok()?, i64::try_from(capped).ok()?))
}

fn numbers_between(first: i64, last: i64) -> Vec<Value> {
    (first..=last).map(|n| Value::Number(n as f64)).collect()
}

/// Apply `offset`, then `limit`, then `reversed` to a materialized sequence.
///
/// A negative offset, or one at or past the end, leaves nothing. A negative
/// limit takes nothing; no limit takes everything that remains.
pub fn slice_sequence(
    items: Vec<Value>,
    offset: Option<i64>,
    limit: Option<i64>,
    reversed: bool,
) -> Vec<Value> {
    let start = match offset {
        None => 0,
        Some(n) if n < 0 => return Vec::new(),
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
    };
    if start >= items.len() {
        return Vec::new();
    }
    let mut remaining: Vec<Value> = items.into_iter().skip(start).collect();
    if let Some(limit) = limit {
        remaining.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
    }
    if reversed {
        remaining.reverse();
    }
    remaining
}

/// An evaluated loop source. Ranges stay as bounds until the window is known.
enum LoopSource {
    Range(i64, i64),
    Value(Value),
}

impl Interpreter<'_, '_> {
    pub(super) fn execute_for(&mut self, stmt: &ForStatement) -> ExecResult {
        let items = self.loop_items(stmt);
        let length = items.len();
        tracing::trace!(
            variable = %stmt.variable,
            length,
            reversed = stmt.reversed,
            "entering for loop"
        );

        if items.is_empty() {
            return match &stmt.else_branch {
                Some(else_branch) => self.execute_block(else_branch),
                None => Ok(Completion::Completed),
            };
        }

        for (index0, item) in items.into_iter().enumerate() {
            if self.ctx.is_cancelled() {
                return Ok(Completion::Cancelled);
            }
            let mut scoped = self.scoped();
            scoped.ctx.define(&stmt.variable, item);
            scoped
                .ctx
                .define("forloop", Value::dictionary(ForLoop::new(index0, length)));
            match scoped.execute_block(&stmt.body)? {
                Completion::Completed | Completion::Continue => {}
                Completion::Break => break,
                Completion::Cancelled => return Ok(Completion::Cancelled),
            }
        }
        Ok(Completion::Completed)
    }

    /// Evaluate the source, then `offset`, then `limit`, each exactly once,
    /// and produce the items the loop visits in order.
    fn loop_items(&self, stmt: &ForStatement) -> Vec<Value> {
        let source = match &stmt.source {
            Expression::Range { start, end } => LoopSource::Range(
                evaluate(start, self.ctx).to_integer(),
                evaluate(end, self.ctx).to_integer(),
            ),
            source => LoopSource::Value(evaluate(source, self.ctx)),
        };
        let offset = stmt
            .offset
            .as_ref()
            .map(|expr| evaluate(expr, self.ctx).to_integer());
        let limit = stmt
            .limit
            .as_ref()
            .map(|expr| evaluate(expr, self.ctx).to_integer());
        tracing::trace!(?offset, ?limit, "loop window");

        match source {
            LoopSource::Range(start, end) => {
                let Some((first, last)) = range_window(start, end, offset, limit) else {
                    return Vec::new();
                };
                let mut items = numbers_between(first, last);
                if stmt.reversed {
                    items.reverse();
                }
                items
            }
            LoopSource::Value(value) => {
                slice_sequence(value.enumerate().collect(), offset, limit, stmt.reversed)
            }
        }
    }
}
