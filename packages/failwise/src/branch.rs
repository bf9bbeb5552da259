//! Branching on a single classified value

use crate::classify::is_failed;
use crate::value::Value;

/// Call `ok` or `failed` depending on how `value` classifies
pub fn if_let_ok<T>(
    value: impl Into<Value>,
    ok: impl FnOnce(Value) -> T,
    failed: impl FnOnce(Value) -> T,
) -> T {
    let value = value.into();
    if is_failed(&value) {
        failed(value)
    } else {
        ok(value)
    }
}

/// Call `ok` when `value` is ok; a failure is returned as is
pub fn when_let_ok<V: Into<Value>>(
    value: impl Into<Value>,
    ok: impl FnOnce(Value) -> V,
) -> Value {
    if_let_ok(value, |v| -> Value { ok(v).into() }, |failed| failed)
}

/// Call `failed` or `ok` depending on how `value` classifies
pub fn if_let_failed<T>(
    value: impl Into<Value>,
    failed: impl FnOnce(Value) -> T,
    ok: impl FnOnce(Value) -> T,
) -> T {
    if_let_ok(value, ok, failed)
}

/// Call `failed` when `value` is a failure; an ok value is returned as is
///
/// ```
/// use failwise::{fail, failure_message, when_let_failed, Value};
///
/// let logged = when_let_failed(fail((), "disk full"), |e| {
///     format!("error: {}", failure_message(&e))
/// });
/// assert_eq!(logged, Value::from("error: disk full"));
/// assert_eq!(when_let_failed(3, |_| "unreachable"), Value::from(3));
/// ```
pub fn when_let_failed<V: Into<Value>>(
    value: impl Into<Value>,
    failed: impl FnOnce(Value) -> V,
) -> Value {
    if_let_ok(value, |ok| ok, |e| -> Value { failed(e).into() })
}

/// Apply `handler` to `value` only when it is a failure
pub fn attempt<V: Into<Value>>(
    handler: impl FnOnce(Value) -> V,
    value: impl Into<Value>,
) -> Value {
    when_let_failed(value, handler)
}
