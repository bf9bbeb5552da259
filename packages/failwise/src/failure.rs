//! Explicit failure values

use std::fmt;

use crate::value::{Datum, Value};

/// A failed result carrying a payload and a message
///
/// Failures are immutable once built. Cloning shares the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    data: Value,
    message: String,
}

impl Failure {
    /// Build a failure from a payload and a message
    pub fn new(data: impl Into<Value>, message: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            message: message.into(),
        }
    }

    /// Build a failure with a nil payload
    pub fn message_only(message: impl Into<String>) -> Self {
        Self::new(Value::nil(), message)
    }

    /// The payload, nil when none was given
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// The message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Split into payload and message
    #[must_use]
    pub fn into_parts(self) -> (Value, String) {
        (self.data, self.message)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Datum for Failure {
    fn render(&self) -> String {
        self.message.clone()
    }
}

impl From<Failure> for Value {
    fn from(failure: Failure) -> Self {
        Value::new(failure)
    }
}

/// Build a [`Failure`]
///
/// See [`fail!`](crate::fail!) for a formatted message.
pub fn fail(data: impl Into<Value>, message: impl Into<String>) -> Failure {
    Failure::new(data, message)
}

/// Build a [`Failure`] whose message is formatted with `format!` syntax
///
/// ```
/// use failwise::{fail, failure_message};
///
/// let failure = fail!((), "missing {} in {}", "id", "request");
/// assert_eq!(failure.message(), "missing id in request");
/// assert_eq!(failure_message(&failure.into()), "missing id in request");
/// ```
#[macro_export]
macro_rules! fail {
    ($data:expr, $fmt:literal $(,)?) => {
        $crate::fail($data, format!($fmt))
    };
    ($data:expr, $fmt:literal, $($arg:tt)*) => {
        $crate::fail($data, format!($fmt, $($arg)*))
    };
}
