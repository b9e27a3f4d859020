use super::*;
use brook_value::ValueMap;
use pretty_assertions::assert_eq;

use crate::exec::MAX_RANGE_LEN;

fn context() -> TemplateContext {
    let product = ValueMap::from_iter([("title", Value::from("Kettle")), ("price", Value::from(20))]);
    TemplateContext::builder()
        .value("name", "brook")
        .value("items", vec![10, 20, 30])
        .value("product", product)
        .build()
}

#[test]
fn test_literals() {
    let ctx = context();
    assert_eq!(evaluate(&Expression::number(1.5), &ctx), Value::Number(1.5));
    assert_eq!(evaluate(&Expression::string("a"), &ctx), Value::string("a"));
    assert_eq!(evaluate(&Expression::boolean(true), &ctx), Value::Boolean(true));
    assert!(evaluate(&Expression::nil(), &ctx).is_nil());
}

#[test]
fn test_member_paths() {
    let ctx = context();
    assert_eq!(evaluate(&Expression::path("name"), &ctx), Value::string("brook"));
    assert_eq!(
        evaluate(&Expression::path("product.title"), &ctx),
        Value::string("Kettle")
    );
    assert_eq!(evaluate(&Expression::path("items.size"), &ctx), Value::Number(3.0));
    assert_eq!(evaluate(&Expression::path("items.last"), &ctx), Value::Number(30.0));
    assert_eq!(evaluate(&Expression::path("items.1"), &ctx), Value::Number(20.0));
    assert!(evaluate(&Expression::path("missing"), &ctx).is_nil());
    assert!(evaluate(&Expression::path("missing.deeper.still"), &ctx).is_nil());
    assert!(evaluate(&Expression::path("product.title.nope"), &ctx).is_nil());
}

#[test]
fn test_index_segments() {
    let ctx = context();
    let second = Expression::Member(vec![
        Segment::identifier("items"),
        Segment::Index(Expression::number(1.0)),
    ]);
    assert_eq!(evaluate(&second, &ctx), Value::Number(20.0));

    let by_key = Expression::Member(vec![
        Segment::identifier("product"),
        Segment::Index(Expression::string("price")),
    ]);
    assert_eq!(evaluate(&by_key, &ctx), Value::Number(20.0));

    let variable_by_name = Expression::Member(vec![Segment::Index(Expression::string("name"))]);
    assert_eq!(evaluate(&variable_by_name, &ctx), Value::string("brook"));

    assert!(evaluate(&Expression::Member(Vec::new()), &ctx).is_nil());
}

#[test]
fn test_range_expression() {
    let ctx = context();
    let range = Expression::range(Expression::number(1.0), Expression::path("items.size"));
    assert_eq!(evaluate(&range, &ctx), Value::from(vec![1, 2, 3]));

    let truncated = Expression::range(Expression::string("1.9"), Expression::number(2.2));
    assert_eq!(evaluate(&truncated, &ctx), Value::from(vec![1, 2]));

    let huge = Expression::range(Expression::number(1.0), Expression::number(1e18));
    let size = Expression::filter(huge, "size", vec![]);
    assert_eq!(evaluate(&size, &ctx), Value::from(MAX_RANGE_LEN));
}

#[test]
fn test_logical_short_circuit() {
    let ctx = context();
    let missing_and = Expression::binary(
        BinaryOp::And,
        Expression::path("missing"),
        Expression::boolean(true),
    );
    assert_eq!(evaluate(&missing_and, &ctx), Value::Boolean(false));

    let name_or = Expression::binary(BinaryOp::Or, Expression::path("name"), Expression::nil());
    assert_eq!(evaluate(&name_or, &ctx), Value::Boolean(true));

    let contains = Expression::binary(
        BinaryOp::Contains,
        Expression::path("items"),
        Expression::number(20.0),
    );
    assert_eq!(evaluate(&contains, &ctx), Value::Boolean(true));
}

#[test]
fn test_filters_chain() {
    let ctx = context();
    let expr = Expression::filter(
        Expression::filter(Expression::path("name"), "upcase", vec![]),
        "append",
        vec![Expression::string("!")],
    );
    assert_eq!(evaluate(&expr, &ctx), Value::string("BROOK!"));

    let unknown = Expression::filter(Expression::path("name"), "sparkle", vec![]);
    assert_eq!(evaluate(&unknown, &ctx), Value::string("brook"));
}
