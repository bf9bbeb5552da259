//! Predicate-to-failure adapters

use crate::failure::fail;
use crate::value::Value;

/// `value` when `predicate` holds for it, otherwise a failure with `message`
pub fn assert_with<P>(predicate: P, value: impl Into<Value>, message: impl Into<String>) -> Value
where
    P: FnOnce(&Value) -> bool,
{
    let value = value.into();
    if predicate(&value) {
        value
    } else {
        fail(Value::nil(), message).into()
    }
}

/// Fails on nil
pub fn assert_some(value: impl Into<Value>, message: impl Into<String>) -> Value {
    assert_with(|v| !v.is_nil(), value, message)
}

/// Fails on anything but nil
pub fn assert_nil(value: impl Into<Value>, message: impl Into<String>) -> Value {
    assert_with(Value::is_nil, value, message)
}

/// Fails on nil, empty strings, empty lists and values without a length
pub fn assert_not_empty(value: impl Into<Value>, message: impl Into<String>) -> Value {
    assert_with(|v| v.len().is_some_and(|len| len > 0), value, message)
}

/// Fails on anything but a primitive number
pub fn assert_number(value: impl Into<Value>, message: impl Into<String>) -> Value {
    assert_with(Value::is_number, value, message)
}
