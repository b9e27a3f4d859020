use super::*;
use brook_value::ValueMap;
use pretty_assertions::assert_eq;

fn apply(name: &str, input: impl Into<Value>, arguments: &[Value]) -> Value {
    let ctx = TemplateContext::new();
    FilterRegistry::with_defaults().apply(name, input.into(), arguments, &ctx)
}

#[test]
fn test_unknown_filter_returns_input() {
    assert_eq!(apply("no_such_filter", "abc", &[]), Value::string("abc"));
    let ctx = TemplateContext::new();
    let empty = FilterRegistry::new();
    assert_eq!(empty.apply("upcase", Value::from("a"), &[], &ctx), Value::string("a"));
}

#[test]
fn test_string_filters() {
    assert_eq!(apply("upcase", "Hello", &[]), Value::string("HELLO"));
    assert_eq!(apply("downcase", "Hello", &[]), Value::string("hello"));
    assert_eq!(
        apply("append", "Hello", &[Value::from("!")]),
        Value::string("Hello!")
    );
    assert_eq!(
        apply("prepend", "world", &[Value::from("hello ")]),
        Value::string("hello world")
    );
    assert_eq!(apply("append", 1, &[]), Value::string("1"));
}

#[test]
fn test_size() {
    assert_eq!(apply("size", "abc", &[]), Value::Number(3.0));
    assert_eq!(apply("size", vec![1, 2], &[]), Value::Number(2.0));
    assert_eq!(apply("size", Value::Nil, &[]), Value::Number(0.0));
}

#[test]
fn test_collection_filters() {
    let items = Value::from(vec![1, 2, 3]);
    assert_eq!(
        apply("join", items.clone(), &[Value::from(", ")]),
        Value::string("1, 2, 3")
    );
    assert_eq!(apply("join", items.clone(), &[]), Value::string("1 2 3"));
    assert_eq!(apply("first", items.clone(), &[]), Value::Number(1.0));
    assert_eq!(apply("last", items, &[]), Value::Number(3.0));
    assert!(apply("first", Value::from(Vec::<i32>::new()), &[]).is_nil());
}

#[test]
fn test_default() {
    let fallback = [Value::from("none")];
    assert_eq!(apply("default", Value::Nil, &fallback), Value::string("none"));
    assert_eq!(apply("default", false, &fallback), Value::string("none"));
    assert_eq!(apply("default", "", &fallback), Value::string("none"));
    assert_eq!(
        apply("default", Value::dictionary(ValueMap::new()), &fallback),
        Value::string("none")
    );
    assert_eq!(apply("default", 0, &fallback), Value::Number(0.0));
    assert_eq!(apply("default", "set", &fallback), Value::string("set"));
}

#[test]
fn test_arithmetic() {
    assert_eq!(apply("plus", 2, &[Value::from(3)]), Value::Number(5.0));
    assert_eq!(apply("plus", "2", &[Value::from("0.5")]), Value::Number(2.5));
    assert_eq!(apply("minus", 2, &[Value::from(3)]), Value::Number(-1.0));
    assert_eq!(apply("minus", 2, &[]), Value::Number(2.0));
}

#[test]
fn test_custom_filter() {
    fn shout(input: Value, _: &[Value], _: &TemplateContext) -> Value {
        Value::string(format!("{}!", input.to_string_value()))
    }

    let mut registry = FilterRegistry::with_defaults();
    registry.register("shout", shout);
    assert!(registry.contains("shout"));

    let ctx = TemplateContext::new();
    assert_eq!(
        registry.apply("shout", Value::from("hey"), &[], &ctx),
        Value::string("hey!")
    );
}
