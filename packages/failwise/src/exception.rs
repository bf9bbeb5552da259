//! Native exceptions as values
//!
//! An [`Exception`] is what a Rust panic or a `std::error::Error` becomes once
//! it enters the value universe. It always classifies as failed.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::failure::Failure;
use crate::value::{Datum, Value};

/// Where an exception came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionKind {
    /// A panic caught by the exception bridge
    Panic,
    /// An error value
    Error,
}

/// A captured panic or error
#[derive(Debug, Clone)]
pub struct Exception {
    kind: ExceptionKind,
    message: String,
    data: Value,
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl Exception {
    /// Capture an error; its `Display` output becomes the message
    pub fn from_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            kind: ExceptionKind::Error,
            message: error.to_string(),
            data: Value::nil(),
            source: Some(Arc::new(error)),
        }
    }

    /// Capture an already boxed error
    ///
    /// Accepts anything that boxes into a thread-safe error, which covers
    /// `anyhow::Error` as well as every `std::error::Error`.
    pub fn from_boxed(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        let error: Box<dyn std::error::Error + Send + Sync> = error.into();
        Self {
            kind: ExceptionKind::Error,
            message: error.to_string(),
            data: Value::nil(),
            source: Some(Arc::from(error)),
        }
    }

    /// An exception carrying a structured payload
    ///
    /// The payload is reported as the failure data when classified.
    pub fn with_data(message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            kind: ExceptionKind::Error,
            message: message.into(),
            data: data.into(),
            source: None,
        }
    }

    /// Convert a payload returned by `catch_unwind`
    ///
    /// String payloads become the message. An `Exception` payload (see
    /// [`raise`](Self::raise)) is kept whole, and a `Failure` payload keeps
    /// its data and message.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<Exception>() {
            Ok(exception) => return *exception,
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<Failure>() {
            Ok(failure) => {
                let (data, message) = failure.into_parts();
                return Self::panic(message, data);
            }
            Err(payload) => payload,
        };
        let message = match payload.downcast::<&'static str>() {
            Ok(s) => (*s).to_string(),
            Err(payload) => match payload.downcast::<String>() {
                Ok(s) => *s,
                Err(_) => "Box<dyn Any>".to_string(),
            },
        };
        Self::panic(message, Value::nil())
    }

    fn panic(message: String, data: Value) -> Self {
        Self {
            kind: ExceptionKind::Panic,
            message,
            data,
            source: None,
        }
    }

    /// Panic with this exception as the payload
    ///
    /// The exception bridge recovers it unchanged, data included.
    pub fn raise(self) -> ! {
        std::panic::panic_any(self)
    }

    /// Origin of the exception
    #[must_use]
    pub fn kind(&self) -> ExceptionKind {
        self.kind
    }

    /// The message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The structured payload, nil when none was attached
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// The captured error, if this came from one
    #[must_use]
    pub fn source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

/// Exceptions compare by origin, message and payload.
impl PartialEq for Exception {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message && self.data == other.data
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Datum for Exception {
    fn render(&self) -> String {
        self.message.clone()
    }
}

impl From<anyhow::Error> for Exception {
    fn from(error: anyhow::Error) -> Self {
        Self::from_boxed(error)
    }
}

impl From<failwise_common::Error> for Exception {
    fn from(error: failwise_common::Error) -> Self {
        Self::from_error(error)
    }
}

impl From<Exception> for Value {
    fn from(exception: Exception) -> Self {
        Value::new(exception)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_keep_their_message() {
        let e = Exception::from_panic(Box::new("static"));
        assert_eq!(e.message(), "static");
        assert_eq!(e.kind(), ExceptionKind::Panic);

        let e = Exception::from_panic(Box::new(String::from("owned")));
        assert_eq!(e.message(), "owned");

        let e = Exception::from_panic(Box::new(17_u8));
        assert_eq!(e.message(), "Box<dyn Any>");
        assert!(e.data().is_nil());
    }

    #[test]
    fn raised_exception_round_trips_through_panic_payload() {
        let raised = Exception::with_data("bad input", 3);
        let e = Exception::from_panic(Box::new(raised.clone()));
        assert_eq!(e, raised);
        assert_eq!(e.data(), &Value::from(3));
    }
}
