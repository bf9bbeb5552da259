//! Branch helpers, failure-handler tagging, the exception bridge and assertions

use std::cell::Cell;

use failwise::{
    assert_nil, assert_not_empty, assert_number, assert_some, assert_with, attempt, attempt_call,
    fail, failure_data, failure_message, if_let_failed, if_let_ok, invoke_else, is_failed,
    mark_as_handler, try_fn, when_let_ok, ElseBranch, Value,
};

#[test]
fn if_let_ok_calls_exactly_one_branch() {
    let label = if_let_ok(3, |_| "ok", |_| "failed");
    assert_eq!(label, "ok");

    let label = if_let_ok(fail((), "x"), |_| "ok", |_| "failed");
    assert_eq!(label, "failed");

    let label = if_let_failed(fail((), "x"), |e| failure_message(&e), |_| String::new());
    assert_eq!(label, "x");
}

#[test]
fn when_let_ok_passes_failures_through() {
    let failure = fail(1, "nope");
    let out = when_let_ok(failure.clone(), |_| "unreachable");
    assert_eq!(out, Value::from(failure));

    let out = when_let_ok(4, |v| v.get::<i32>().map(|n| n * n));
    assert_eq!(out, Value::from(16));
}

#[test]
fn attempt_only_handles_failures() {
    let calls = Cell::new(0);
    let handler = |e: Value| {
        calls.set(calls.get() + 1);
        format!("handled {}", failure_message(&e))
    };
    assert_eq!(attempt(handler, "fine"), Value::from("fine"));
    assert_eq!(calls.get(), 0);
    assert_eq!(attempt(handler, fail((), "bad")), Value::from("handled bad"));
    assert_eq!(calls.get(), 1);
}

#[test]
fn invoke_else_distinguishes_handlers_from_values() {
    let failed: Value = fail("data", "broken").into();

    let handler = mark_as_handler(|e| failure_data(&e));
    assert!(handler.is_handler());
    assert_eq!(invoke_else(handler, failed.clone()), Value::from("data"));

    let fallback = ElseBranch::fallback(0);
    assert!(!fallback.is_handler());
    assert_eq!(invoke_else(fallback, failed), Value::from(0));
}

#[test]
fn attempt_call_passes_values_through() {
    let failure = fail((), "explicit");
    assert_eq!(attempt_call(|| failure.clone()), Value::from(failure.clone()));
    assert_eq!(attempt_call(|| "plain"), Value::from("plain"));
}

#[test]
fn attempt_call_converts_panics() {
    let out = attempt_call(|| -> Value { panic!("exploded at {}", 3) });
    assert!(is_failed(&out));
    assert_eq!(failure_message(&out), "exploded at 3");
}

#[test]
fn try_fn_wraps_a_function() {
    let parse = try_fn(|s: &str| -> i32 { s.parse().expect("digits only") });
    assert_eq!(parse("12"), Value::from(12));

    let parse = try_fn(|s: &str| -> i32 { s.parse().expect("digits only") });
    let out = parse("twelve");
    assert!(is_failed(&out));
    assert!(failure_message(&out).starts_with("digits only"));
}

#[test]
fn assert_with_returns_value_or_failure() {
    let ok = assert_with(|v| v.get::<i32>().is_some_and(|n| *n > 0), 5, "must be positive");
    assert_eq!(ok, Value::from(5));

    let failed = assert_with(|v| v.get::<i32>().is_some_and(|n| *n > 0), -5, "must be positive");
    assert!(is_failed(&failed));
    assert_eq!(failure_message(&failed), "must be positive");
    assert!(failure_data(&failed).is_nil());
}

#[test]
fn assertion_specializations() {
    assert!(is_failed(&assert_some(Value::nil(), "missing")));
    assert!(!is_failed(&assert_some(0, "missing")));

    assert!(!is_failed(&assert_nil(Value::nil(), "expected nothing")));
    assert!(is_failed(&assert_nil("x", "expected nothing")));

    assert!(!is_failed(&assert_not_empty("abc", "empty")));
    assert!(is_failed(&assert_not_empty("", "empty")));
    assert!(is_failed(&assert_not_empty(Value::nil(), "empty")));
    assert!(is_failed(&assert_not_empty(Vec::<Value>::new(), "empty")));
    assert!(!is_failed(&assert_not_empty(vec![Value::nil()], "empty")));

    assert!(!is_failed(&assert_number(2.5, "nan")));
    assert!(!is_failed(&assert_number(7_u8, "nan")));
    assert!(is_failed(&assert_number("7", "nan")));
}
