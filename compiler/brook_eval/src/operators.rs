//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch. Every operator yields a Boolean; operands of
//! the wrong shape compare as `false` instead of failing.

use std::cmp::Ordering;

use brook_ir::BinaryOp;
use brook_value::Value;

/// Apply `op` to two evaluated operands.
///
/// `and`/`or` are accepted here for completeness; the expression evaluator
/// short-circuits them before the right operand is evaluated.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> Value {
    let result = match op {
        BinaryOp::Eq => left.equals(right),
        BinaryOp::NotEq => !left.equals(right),
        BinaryOp::Lt => compare_values(left, right) == Some(Ordering::Less),
        BinaryOp::LtEq => matches!(
            compare_values(left, right),
            Some(Ordering::Less | Ordering::Equal)
        ),
        BinaryOp::Gt => compare_values(left, right) == Some(Ordering::Greater),
        BinaryOp::GtEq => matches!(
            compare_values(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        BinaryOp::And => left.to_boolean() && right.to_boolean(),
        BinaryOp::Or => left.to_boolean() || right.to_boolean(),
        BinaryOp::Contains => left.contains(right),
        BinaryOp::StartsWith => starts_with(left, right),
        BinaryOp::EndsWith => ends_with(left, right),
    };
    Value::Boolean(result)
}

/// Ordering between two values, if they are comparable.
///
/// Numbers compare numerically and strings ordinally. Everything else,
/// including a number against a numeric string, is unordered.
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}

fn starts_with(left: &Value, right: &Value) -> bool {
    match left {
        Value::String(s) => s.starts_with(right.to_string_value().as_str()),
        Value::Array(items) => items.first().is_some_and(|first| first.equals(right)),
        _ => false,
    }
}

fn ends_with(left: &Value, right: &Value) -> bool {
    match left {
        Value::String(s) => s.ends_with(right.to_string_value().as_str()),
        Value::Array(items) => items.last().is_some_and(|last| last.equals(right)),
        _ => false,
    }
}
