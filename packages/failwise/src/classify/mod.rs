//! Classification of values as ok or failed
//!
//! Dispatch order:
//! 1. nil is ok, with message `"nil"`
//! 2. a [`Failure`] is failed, with its own data and message
//! 3. an [`Exception`] is failed, with its message and optional payload
//! 4. a type present in the [`Registry`] uses its [`Classification`]
//! 5. anything else is ok, with its string conversion as message
//!
//! Classification never panics and never fails.

mod registry;

pub use registry::{Classification, Registry, Rule};

use crate::exception::Exception;
use crate::failure::Failure;
use crate::value::{Datum, Value};

/// A type that knows whether its own values are failures
///
/// Implementing the trait is not enough: the type must also be registered
/// with [`Registry::register`] (or [`register`]) to take part in dispatch.
///
/// ```
/// use failwise::{is_failed, register, Datum, HasFailed, Value};
///
/// #[derive(Debug, PartialEq)]
/// enum Lookup {
///     Hit(u32),
///     Miss,
/// }
///
/// impl Datum for Lookup {}
///
/// impl HasFailed for Lookup {
///     fn is_failed(&self) -> bool {
///         matches!(self, Lookup::Miss)
///     }
/// }
///
/// register::<Lookup>();
/// assert!(is_failed(&Value::new(Lookup::Miss)));
/// assert!(!is_failed(&Value::new(Lookup::Hit(7))));
/// ```
pub trait HasFailed: Datum {
    /// Whether this value is a failure
    fn is_failed(&self) -> bool;

    /// Message reported for this value
    fn failure_message(&self) -> String {
        self.render()
    }

    /// Payload reported for this value
    fn failure_data(&self) -> Value {
        Value::nil()
    }
}

/// Full classification of one value
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Whether the value is a failure
    pub failed: bool,
    /// Failure message, or the string conversion of an ok value
    pub message: String,
    /// Failure payload, nil when absent
    pub data: Value,
}

impl Verdict {
    fn ok(message: String) -> Self {
        Self {
            failed: false,
            message,
            data: Value::nil(),
        }
    }

    /// Whether the value is ok
    #[must_use]
    pub fn is_ok(&self) -> bool {
        !self.failed
    }
}

impl Registry {
    /// Classify a value against this registry
    #[must_use]
    pub fn classify(&self, value: &Value) -> Verdict {
        let Some(datum) = value.as_any() else {
            return Verdict::ok("nil".to_string());
        };
        if let Some(failure) = datum.downcast_ref::<Failure>() {
            return Verdict {
                failed: true,
                message: failure.message().to_string(),
                data: failure.data().clone(),
            };
        }
        if let Some(exception) = datum.downcast_ref::<Exception>() {
            return Verdict {
                failed: true,
                message: exception.message().to_string(),
                data: exception.data().clone(),
            };
        }
        match self.lookup(datum.type_id()) {
            Some(classification) => Verdict {
                failed: classification.is_failed(datum),
                message: classification
                    .message(datum)
                    .unwrap_or_else(|| value.render()),
                data: classification.data(datum),
            },
            None => Verdict::ok(value.render()),
        }
    }

    /// Whether a value is failed according to this registry
    ///
    /// Cheaper than [`classify`](Self::classify): no message is built.
    #[must_use]
    pub fn is_failed(&self, value: &Value) -> bool {
        let Some(datum) = value.as_any() else {
            return false;
        };
        if datum.is::<Failure>() || datum.is::<Exception>() {
            return true;
        }
        self.lookup(datum.type_id())
            .is_some_and(|classification| classification.is_failed(datum))
    }
}

/// Classify a value against the global registry
#[must_use]
pub fn classify(value: &Value) -> Verdict {
    Registry::global().classify(value)
}

/// Whether a value is a failure
#[must_use]
pub fn is_failed(value: &Value) -> bool {
    Registry::global().is_failed(value)
}

/// Whether a value is not a failure
#[must_use]
pub fn is_ok(value: &Value) -> bool {
    !is_failed(value)
}

/// Payload of a failure; nil for ok values and payload-less failures
#[must_use]
pub fn failure_data(value: &Value) -> Value {
    classify(value).data
}

/// Message of a failure, or the string conversion of an ok value
#[must_use]
pub fn failure_message(value: &Value) -> String {
    classify(value).message
}

/// Register a self-classifying type with the global registry
///
/// Returns `true` when an earlier classification was replaced.
pub fn register<T: HasFailed>() -> bool {
    Registry::global().register::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Gauge(bool);

    impl Datum for Gauge {}

    impl HasFailed for Gauge {
        fn is_failed(&self) -> bool {
            self.0
        }

        fn failure_data(&self) -> Value {
            Value::from("gauge")
        }
    }

    #[test]
    fn unregistered_types_default_to_ok() {
        let registry = Registry::new();
        let verdict = registry.classify(&Value::new(Gauge(true)));
        assert!(verdict.is_ok());
        assert_eq!(verdict.message, "Gauge(true)");
        assert!(verdict.data.is_nil());
    }

    #[test]
    fn local_registration_does_not_leak_into_other_registries() {
        let registry = Registry::new();
        assert!(!registry.register::<Gauge>());

        let failed = registry.classify(&Value::new(Gauge(true)));
        assert!(failed.failed);
        assert_eq!(failed.data, Value::from("gauge"));
        assert!(!registry.classify(&Value::new(Gauge(false))).failed);

        assert!(!Registry::new().is_failed(&Value::new(Gauge(true))));
    }

    #[test]
    fn builtin_failures_win_over_registry_entries() {
        let registry = Registry::new();
        registry.register_rule(Rule::new(|_: &Failure| false));
        assert!(registry.is_failed(&Failure::message_only("still failed").into()));
    }
}
