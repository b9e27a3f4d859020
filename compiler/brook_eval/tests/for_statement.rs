//! `for` loop behavior, driven through the public interpreter API.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};

use brook_eval::{
    render, CancellationToken, Completion, FilterFn, FilterRegistry, Interpreter, RenderOutcome,
    SharedRegistry, TemplateContext, TextEncoder,
};
use brook_ir::{Expression, ForStatement, Statement};
use brook_value::Value;
use pretty_assertions::assert_eq;

fn items_context() -> TemplateContext {
    let mut ctx = TemplateContext::new();
    ctx.set_value("items", vec![1, 2, 3]);
    ctx
}

fn range(start: f64, end: f64) -> Expression {
    Expression::range(Expression::number(start), Expression::number(end))
}

/// Execute a single statement the way an embedding host would.
fn execute(statement: &Statement, ctx: &mut TemplateContext) -> (String, Completion) {
    let mut output = String::new();
    let completion = Interpreter::new(ctx, &mut output, TextEncoder::Html)
        .execute(statement)
        .unwrap();
    (output, completion)
}

fn output(path: &str) -> Statement {
    Statement::output(Expression::path(path))
}

#[test]
fn loops_over_a_range() {
    let stmt = Statement::for_loop(ForStatement::new(
        "i",
        range(1.0, 3.0),
        vec![Statement::text("x")],
    ));
    let (text, completion) = execute(&stmt, &mut TemplateContext::new());
    assert_eq!(text, "xxx");
    assert_eq!(completion, Completion::Completed);
}

#[test]
fn loops_over_an_array() {
    let stmt = Statement::for_loop(ForStatement::new(
        "i",
        Expression::path("items"),
        vec![Statement::text("x")],
    ));
    assert_eq!(execute(&stmt, &mut items_context()).0, "xxx");
}

#[test]
fn break_stops_the_loop() {
    let stmt = Statement::for_loop(ForStatement::new(
        "i",
        Expression::path("items"),
        vec![Statement::text("x"), Statement::Break, Statement::text("y")],
    ));
    let (text, completion) = execute(&stmt, &mut items_context());
    assert_eq!(text, "x");
    assert_eq!(completion, Completion::Completed);
}

#[test]
fn continue_skips_the_rest_of_the_iteration() {
    let stmt = Statement::for_loop(ForStatement::new(
        "i",
        Expression::path("items"),
        vec![Statement::text("x"), Statement::Continue, Statement::text("y")],
    ));
    let (text, completion) = execute(&stmt, &mut items_context());
    assert_eq!(text, "xxx");
    assert_eq!(completion, Completion::Completed);
}

#[test]
fn break_inside_a_conditional_stops_the_loop() {
    let body = vec![
        output("i"),
        Statement::if_then(
            Expression::binary(
                brook_ir::BinaryOp::Eq,
                Expression::path("i"),
                Expression::number(2.0),
            ),
            vec![Statement::Break],
        ),
    ];
    let stmt = Statement::for_loop(ForStatement::new("i", Expression::path("items"), body));
    assert_eq!(execute(&stmt, &mut items_context()).0, "12");
}

#[test]
fn applies_limit_offset_and_reversed() {
    let stmt = Statement::for_loop(
        ForStatement::new("i", range(1.0, 5.0), vec![output("i")])
            .limit(Expression::number(3.0))
            .offset(Expression::number(2.0))
            .reversed(true),
    );
    assert_eq!(execute(&stmt, &mut TemplateContext::new()).0, "543");
}

#[test]
fn provides_forloop_metadata() {
    let body = [
        "forloop.length",
        "forloop.index",
        "forloop.index0",
        "forloop.rindex",
        "forloop.rindex0",
        "forloop.first",
        "forloop.last",
    ]
    .into_iter()
    .map(output)
    .collect();
    let stmt = Statement::for_loop(ForStatement::new("i", Expression::path("items"), body));
    assert_eq!(
        execute(&stmt, &mut items_context()).0,
        "31023truefalse32112falsefalse33201falsetrue"
    );
}

#[test]
fn assignment_to_an_outer_variable_persists() {
    let statements = vec![
        Statement::assign("a", Expression::string("Original Value")),
        Statement::for_loop(ForStatement::new(
            "i",
            range(1.0, 2.0),
            vec![Statement::assign("a", Expression::string("New Value"))],
        )),
    ];
    let mut ctx = TemplateContext::new();
    let mut sink = String::new();
    render(&statements, &mut ctx, &mut sink, TextEncoder::Html).unwrap();

    let mut rendered = String::new();
    render(&[output("a")], &mut ctx, &mut rendered, TextEncoder::Html).unwrap();
    assert_eq!(rendered, "New Value");
}

#[test]
fn loop_variable_and_body_locals_do_not_leak() {
    let stmt = Statement::for_loop(ForStatement::new(
        "item",
        Expression::path("items"),
        vec![Statement::assign("seen", Expression::path("item"))],
    ));
    let mut ctx = items_context();
    execute(&stmt, &mut ctx);
    assert_eq!(ctx.get_value("item"), None);
    assert_eq!(ctx.get_value("forloop"), None);
    assert_eq!(ctx.get_value("seen"), None);
    assert_eq!(ctx.environment().depth(), 1);
}

#[test]
fn loop_variable_shadows_and_restores_outer_binding() {
    let mut ctx = items_context();
    ctx.set_value("i", "outer");
    let statements = vec![
        Statement::for_loop(ForStatement::new(
            "i",
            Expression::path("items"),
            vec![output("i")],
        )),
        output("i"),
    ];
    let mut sink = String::new();
    render(&statements, &mut ctx, &mut sink, TextEncoder::Html).unwrap();
    assert_eq!(sink, "123outer");
}

#[test]
fn else_branch_runs_once_for_an_empty_source() {
    let stmt = Statement::for_loop(
        ForStatement::new("i", Expression::path("nothing"), vec![Statement::text("x")])
            .else_branch(vec![Statement::text("empty")]),
    );
    assert_eq!(execute(&stmt, &mut TemplateContext::new()).0, "empty");
}

#[test]
fn else_branch_runs_when_slicing_leaves_nothing() {
    let stmt = Statement::for_loop(
        ForStatement::new("i", Expression::path("items"), vec![Statement::text("x")])
            .offset(Expression::number(5.0))
            .else_branch(vec![Statement::text("empty")]),
    );
    assert_eq!(execute(&stmt, &mut items_context()).0, "empty");
}

#[test]
fn empty_source_without_else_renders_nothing() {
    let stmt = Statement::for_loop(ForStatement::new(
        "i",
        range(3.0, 1.0),
        vec![Statement::text("x")],
    ));
    assert_eq!(execute(&stmt, &mut TemplateContext::new()).0, "");
}

/// Context with `filter` registered as `counted`.
fn counting_context(filter: FilterFn) -> TemplateContext {
    let mut filters = FilterRegistry::with_defaults();
    filters.register("counted", filter);
    TemplateContext::builder()
        .filters(SharedRegistry::new(filters))
        .value("items", vec![1, 2, 3])
        .build()
}

fn counted(value: f64) -> Expression {
    Expression::filter(Expression::number(value), "counted", vec![])
}

#[test]
fn options_are_evaluated_once_for_an_empty_source() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    fn count(input: Value, _: &[Value], _: &TemplateContext) -> Value {
        CALLS.fetch_add(1, Ordering::SeqCst);
        input
    }

    let stmt = Statement::for_loop(
        ForStatement::new("i", Expression::path("nothing"), vec![Statement::text("x")])
            .offset(counted(0.0))
            .limit(counted(-1.0))
            .else_branch(vec![Statement::text("none")]),
    );
    let mut ctx = counting_context(count);
    assert_eq!(execute(&stmt, &mut ctx).0, "none");
    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
}

#[test]
fn options_are_evaluated_once_per_loop_entry() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    fn count(input: Value, _: &[Value], _: &TemplateContext) -> Value {
        CALLS.fetch_add(1, Ordering::SeqCst);
        input
    }

    let inner = Statement::for_loop(
        ForStatement::new("j", Expression::path("items"), vec![output("j")])
            .offset(counted(1.0))
            .limit(counted(5.0)),
    );
    let outer = Statement::for_loop(ForStatement::new(
        "i",
        range(1.0, 2.0),
        vec![inner, Statement::text(";")],
    ));
    let mut ctx = counting_context(count);
    assert_eq!(execute(&outer, &mut ctx).0, "23;23;");
    // offset and limit once for each of the two inner loop entries
    assert_eq!(CALLS.load(Ordering::SeqCst), 4);
}

#[test]
fn huge_range_with_limit_renders_only_the_window() {
    let stmt = Statement::for_loop(
        ForStatement::new("i", range(1.0, 1e18), vec![output("i")]).limit(Expression::number(2.0)),
    );
    assert_eq!(execute(&stmt, &mut TemplateContext::new()).0, "12");
}

#[test]
fn huge_range_with_offset_and_reversed() {
    let stmt = Statement::for_loop(
        ForStatement::new("i", range(-1e18, 1e18), vec![output("i"), Statement::text(",")])
            .offset(Expression::number(1e18))
            .limit(Expression::number(3.0))
            .reversed(true),
    );
    assert_eq!(execute(&stmt, &mut TemplateContext::new()).0, "2,1,0,");
}

#[test]
fn range_bounds_are_evaluated_once() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    fn count(input: Value, _: &[Value], _: &TemplateContext) -> Value {
        CALLS.fetch_add(1, Ordering::SeqCst);
        input
    }

    let stmt = Statement::for_loop(ForStatement::new(
        "i",
        Expression::range(counted(1.0), counted(3.0)),
        vec![output("i")],
    ));
    let mut ctx = counting_context(count);
    assert_eq!(execute(&stmt, &mut ctx).0, "123");
    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
}

#[test]
fn dictionary_source_yields_key_value_pairs() {
    let mut ctx = TemplateContext::new();
    ctx.set_value(
        "settings",
        brook_value::ValueMap::from_iter([("theme", "dark"), ("lang", "en")]),
    );
    let body = vec![
        Statement::output(Expression::Member(vec![
            brook_ir::Segment::identifier("pair"),
            brook_ir::Segment::Index(Expression::number(0.0)),
        ])),
        Statement::text("="),
        Statement::output(Expression::path("pair.last")),
        Statement::text(";"),
    ];
    let stmt = Statement::for_loop(ForStatement::new("pair", Expression::path("settings"), body));
    assert_eq!(execute(&stmt, &mut ctx).0, "theme=dark;lang=en;");
}

#[test]
fn scalar_source_is_an_empty_sequence() {
    let mut ctx = TemplateContext::new();
    ctx.set_value("count", 3);
    let stmt = Statement::for_loop(ForStatement::new(
        "i",
        Expression::path("count"),
        vec![Statement::text("x")],
    ));
    assert_eq!(execute(&stmt, &mut ctx).0, "");
}

#[test]
fn nested_loops_absorb_their_own_break() {
    let inner = Statement::for_loop(ForStatement::new(
        "j",
        range(1.0, 3.0),
        vec![output("j"), Statement::Break],
    ));
    let outer = Statement::for_loop(ForStatement::new(
        "i",
        range(1.0, 2.0),
        vec![output("i"), inner, Statement::text(",")],
    ));
    assert_eq!(execute(&outer, &mut TemplateContext::new()).0, "11,21,");
}

#[test]
fn cancelled_before_render_runs_nothing() {
    let token = CancellationToken::new();
    let mut ctx = TemplateContext::builder()
        .value("items", vec![1, 2, 3])
        .cancellation(token.clone())
        .build();
    token.cancel();
    let stmt = Statement::for_loop(ForStatement::new(
        "i",
        Expression::path("items"),
        vec![output("i")],
    ));
    let mut sink = String::new();
    let outcome = render(&[stmt], &mut ctx, &mut sink, TextEncoder::Html).unwrap();
    assert_eq!(outcome, RenderOutcome::Cancelled);
    assert_eq!(sink, "");
    assert_eq!(ctx.environment().depth(), 1);
}

#[test]
fn cancellation_stops_between_iterations() {
    fn cancel(input: Value, _: &[Value], ctx: &TemplateContext) -> Value {
        ctx.cancellation_token().cancel();
        input
    }

    let mut filters = FilterRegistry::with_defaults();
    filters.register("cancel", cancel);
    let mut ctx = TemplateContext::builder()
        .filters(SharedRegistry::new(filters))
        .value("items", vec![1, 2, 3])
        .build();
    // The output is the last statement of the body, so only the check at
    // the top of the next iteration can observe the token.
    let stmt = Statement::for_loop(ForStatement::new(
        "i",
        Expression::path("items"),
        vec![Statement::output(Expression::filter(
            Expression::path("i"),
            "cancel",
            vec![],
        ))],
    ));
    let mut sink = String::new();
    let statements = [stmt, Statement::text("after")];
    let outcome = render(&statements, &mut ctx, &mut sink, TextEncoder::Html).unwrap();
    assert_eq!(outcome, RenderOutcome::Cancelled);
    assert_eq!(sink, "1");
    assert_eq!(ctx.environment().depth(), 1);
}

#[test]
fn loop_values_are_plain_numbers() {
    let stmt = Statement::for_loop(ForStatement::new(
        "i",
        range(1.0, 2.0),
        vec![Statement::assign("last", Expression::path("i"))],
    ));
    let mut ctx = TemplateContext::new();
    ctx.set_value("last", Value::Nil);
    execute(&stmt, &mut ctx);
    assert_eq!(ctx.get_value("last"), Some(Value::Number(2.0)));
}
