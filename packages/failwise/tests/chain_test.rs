//! Binding chains: ordering, laziness, short-circuit and failure branches

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use failwise::{
    attempt_all, fail, failure_message, is_failed, mark_as_handler, try_all, Chain, ElseBranch,
    Exception, ExceptionKind, Failure, LoggingTransformer, Result, Value,
};

fn concat(scope: &failwise::Scope) -> Result<String> {
    Ok(format!(
        "{}{}",
        scope.require::<String>("x")?,
        scope.require::<String>("y")?
    ))
}

#[test]
fn all_bindings_ok_evaluates_body() {
    LoggingTransformer::init_test();

    let chain = Chain::new().bind("x", |_| "a").bind("y", |_| "b");
    let out = attempt_all(chain, concat, None);
    assert_eq!(out, Value::from("ab"));
}

#[test]
fn later_bindings_see_earlier_names() {
    let out = Chain::new()
        .bind("base", |_| 20)
        .bind("double", |s| s.get::<i32>("base").map(|b| b * 2))
        .bind("sum", |s| {
            Some(s.get::<i32>("base")? + s.get::<i32>("double")?)
        })
        .evaluate(|s| s.value("sum").cloned());
    assert_eq!(out, Value::from(60));
}

#[test]
fn first_failure_short_circuits_remaining_bindings() {
    let side_effects = Cell::new(0);
    let body_runs = Cell::new(0);

    let chain = Chain::new()
        .bind("x", |_| fail((), "boom"))
        .bind("y", |_| {
            side_effects.set(side_effects.get() + 1);
            "never"
        });
    let out = attempt_all(
        chain,
        |_| {
            body_runs.set(body_runs.get() + 1);
            Value::nil()
        },
        None,
    );

    assert_eq!(out, Value::from(Failure::message_only("boom")));
    assert_eq!(side_effects.get(), 0);
    assert_eq!(body_runs.get(), 0);
}

#[test]
fn each_binding_runs_exactly_once() {
    let calls = Cell::new(0);
    let out = Chain::new()
        .bind("a", |_| {
            calls.set(calls.get() + 1);
            1
        })
        .bind("b", |_| {
            calls.set(calls.get() + 1);
            2
        })
        .evaluate(|_| "done");
    assert_eq!(out, Value::from("done"));
    assert_eq!(calls.get(), 2);
}

#[test]
fn handler_receives_the_failure() {
    let chain = Chain::new().bind("x", |_| fail((), "boom"));
    let out = attempt_all(
        chain,
        |s| s.value("x").cloned(),
        Some(mark_as_handler(|e| failure_message(&e))),
    );
    assert_eq!(out, Value::from("boom"));
}

#[test]
fn fallback_value_is_returned_verbatim() {
    let chain = Chain::new().bind("x", |_| fail((), "boom"));
    let out = attempt_all(
        chain,
        |s| s.value("x").cloned(),
        Some(ElseBranch::fallback("fallback")),
    );
    assert_eq!(out, Value::from("fallback"));
}

#[test]
fn failure_branch_also_covers_a_failed_body() {
    let out = Chain::new()
        .bind("x", |_| 1)
        .or_else(mark_as_handler(|e| format!("body said {}", failure_message(&e))))
        .evaluate(|_| fail((), "no"));
    assert_eq!(out, Value::from("body said no"));
}

#[test]
fn failure_branch_is_skipped_when_ok() {
    let handled = Cell::new(false);
    let out = Chain::new()
        .bind("x", |_| 1)
        .or_else(mark_as_handler(|e| {
            handled.set(true);
            e
        }))
        .evaluate(|s| s.value("x").cloned());
    assert_eq!(out, Value::from(1));
    assert!(!handled.get());
}

#[test]
fn failed_body_without_branch_is_returned_unchanged() {
    let out = Chain::new().bind("x", |_| 1).evaluate(|_| fail(3, "late"));
    assert_eq!(out, Value::from(fail(3, "late")));
}

#[test]
fn zero_bindings_evaluate_the_body_directly() {
    let chain = Chain::new();
    assert!(chain.is_empty());
    let out = attempt_all(chain, |s| s.len(), None);
    assert_eq!(out, Value::from(0_usize));
}

#[test]
fn nil_bindings_do_not_short_circuit() {
    let out = Chain::new()
        .bind("maybe", |_| None::<i32>)
        .bind("next", |_| "reached")
        .evaluate(|s| s.value("next").cloned());
    assert_eq!(out, Value::from("reached"));
}

#[test]
fn rebinding_a_name_shadows_it() {
    let out = Chain::new()
        .bind("v", |_| 1)
        .bind("v", |s| s.get::<i32>("v").map(|v| v + 1))
        .evaluate(|s| s.value("v").cloned());
    assert_eq!(out, Value::from(2));
}

#[test]
fn body_errors_become_failed_values() {
    let out = Chain::new()
        .bind("x", |_| 5)
        .evaluate(|s| s.require::<String>("x").map(Clone::clone));
    assert!(is_failed(&out));
    assert!(failure_message(&out).starts_with("binding `x` is a i32"));
}

#[test]
fn attempt_all_lets_binding_panics_propagate() {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        Chain::new()
            .bind("x", |_| -> i32 { panic!("programming error") })
            .evaluate(|s| s.value("x").cloned())
    }));
    assert!(result.is_err());
}

#[test]
fn try_all_traps_binding_panics() {
    let after = Cell::new(0);
    let chain = Chain::new()
        .bind("x", |_| -> i32 { panic!("bad") })
        .bind("y", |_| {
            after.set(after.get() + 1);
            0
        });
    let out = try_all(chain, |s| s.value("x").cloned(), None);

    assert!(is_failed(&out));
    assert_eq!(failure_message(&out), "bad");
    let exception = out.get::<Exception>().expect("exception datum");
    assert_eq!(exception.kind(), ExceptionKind::Panic);
    assert_eq!(after.get(), 0);
}

#[test]
fn try_all_keeps_raised_exception_data() {
    let chain = Chain::new().bind("x", |_| -> i32 {
        Exception::with_data("invalid port", 70_000_u32).raise()
    });
    let out = try_all(chain, |_| "unreachable", Some(mark_as_handler(|e| e)));
    assert_eq!(failwise::failure_data(&out), Value::from(70_000_u32));
}

#[test]
fn try_all_does_not_wrap_the_body() {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        try_all(Chain::new().bind("x", |_| 1), |_| -> i32 { panic!("in body") }, None)
    }));
    assert!(result.is_err());
}

#[test]
fn try_all_returns_explicit_failures_unchanged() {
    let chain = Chain::new().bind("x", |_| fail("ctx", "explicit"));
    let out = try_all(chain, |_| "unreachable", None);
    assert_eq!(out, Value::from(fail("ctx", "explicit")));
}

fn port_from(raw: &str) -> anyhow::Result<u16> {
    let port: u16 = raw.parse()?;
    anyhow::ensure!(port != 0, "port must be non-zero");
    Ok(port)
}

#[test]
fn anyhow_bindings_short_circuit_on_err() {
    let out = Chain::new()
        .bind("port", |_| port_from("8080"))
        .evaluate(|s| s.get::<u16>("port").copied());
    assert_eq!(out, Value::from(8080_u16));

    let body_ran = Cell::new(false);
    let out = Chain::new()
        .bind("port", |_| port_from("0"))
        .evaluate(|_| body_ran.set(true));
    assert!(is_failed(&out));
    assert_eq!(failure_message(&out), "port must be non-zero");
    assert!(!body_ran.get());
}
