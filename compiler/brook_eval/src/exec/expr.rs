//! Expression evaluation.
//!
//! Total: every expression produces a value. Missing variables and members
//! are `Nil`, and a `Nil` in the middle of a member chain stops the chain.

use brook_ir::{BinaryOp, Expression, Literal, Segment};
use brook_value::Value;

use super::control::range_values;
use crate::operators::evaluate_binary;
use crate::stack::ensure_sufficient_stack;
use crate::TemplateContext;

/// Evaluate `expr` against the scopes and registries of `ctx`.
pub fn evaluate(expr: &Expression, ctx: &TemplateContext) -> Value {
    ensure_sufficient_stack(|| evaluate_inner(expr, ctx))
}

pub fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::string(s.as_str()),
    }
}

fn evaluate_inner(expr: &Expression, ctx: &TemplateContext) -> Value {
    match expr {
        Expression::Literal(literal) => literal_value(literal),
        Expression::Member(segments) => evaluate_member(segments, ctx),
        Expression::Range { start, end } => {
            let start = evaluate(start, ctx).to_integer();
            let end = evaluate(end, ctx).to_integer();
            Value::array(range_values(start, end))
        }
        Expression::Binary { op, left, right } => evaluate_binary_expr(*op, left, right, ctx),
        Expression::Filter {
            input,
            name,
            arguments,
        } => {
            let input = evaluate(input, ctx);
            let arguments: Vec<Value> = arguments.iter().map(|arg| evaluate(arg, ctx)).collect();
            ctx.filters().apply(name, input, &arguments, ctx)
        }
    }
}

fn evaluate_binary_expr(
    op: BinaryOp,
    left: &Expression,
    right: &Expression,
    ctx: &TemplateContext,
) -> Value {
    let left = evaluate(left, ctx);
    match op {
        BinaryOp::And if !left.to_boolean() => Value::Boolean(false),
        BinaryOp::Or if left.to_boolean() => Value::Boolean(true),
        _ => evaluate_binary(op, &left, &evaluate(right, ctx)),
    }
}

fn evaluate_member(segments: &[Segment], ctx: &TemplateContext) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        return Value::Nil;
    };
    let mut current = match head {
        Segment::Identifier(name) => ctx.get_value(name),
        // `["a b"]` at the head names a variable.
        Segment::Index(key) => ctx.get_value(&evaluate(key, ctx).to_string_value()),
    }
    .unwrap_or_default();

    for segment in rest {
        if current.is_nil() {
            return Value::Nil;
        }
        current = match segment {
            Segment::Identifier(name) => ctx.resolve_member(&current, name),
            Segment::Index(key) => current.get_index(&evaluate(key, ctx)),
        };
    }
    current
}

#[cfg(test)]
mod tests;
