//! Type registry for open classification
//!
//! Maps a runtime type identity to a [`Classification`]. Types not present
//! fall through to the default ok verdict.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use dashmap::DashMap;
use failwise_common::LoggingTransformer;
use once_cell::sync::Lazy;

use super::HasFailed;
use crate::value::Value;

/// Classification of one runtime type
///
/// Implementations receive the datum as `&dyn Any` and may assume it has the
/// type they were registered for.
pub trait Classification: Send + Sync {
    /// Whether the datum is a failure
    fn is_failed(&self, datum: &dyn Any) -> bool;

    /// Failure message; `None` falls back to the datum's string conversion
    fn message(&self, datum: &dyn Any) -> Option<String>;

    /// Failure payload
    fn data(&self, datum: &dyn Any) -> Value;
}

struct Native<T>(PhantomData<fn() -> T>);

impl<T: HasFailed> Classification for Native<T> {
    fn is_failed(&self, datum: &dyn Any) -> bool {
        datum.downcast_ref::<T>().is_some_and(HasFailed::is_failed)
    }

    fn message(&self, datum: &dyn Any) -> Option<String> {
        datum.downcast_ref::<T>().map(HasFailed::failure_message)
    }

    fn data(&self, datum: &dyn Any) -> Value {
        datum
            .downcast_ref::<T>()
            .map(HasFailed::failure_data)
            .unwrap_or_default()
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Extract<T, R> = Box<dyn Fn(&T) -> R + Send + Sync>;

/// Closure-built classification for types the caller does not own
///
/// ```
/// use failwise::{Datum, Registry, Rule, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct HttpStatus(u16);
/// impl Datum for HttpStatus {}
///
/// let registry = Registry::new();
/// registry.register_rule(
///     Rule::new(|s: &HttpStatus| s.0 >= 400).with_message(|s| format!("HTTP {}", s.0)),
/// );
///
/// let verdict = registry.classify(&Value::new(HttpStatus(503)));
/// assert!(verdict.failed);
/// assert_eq!(verdict.message, "HTTP 503");
/// ```
pub struct Rule<T> {
    failed: Predicate<T>,
    message: Option<Extract<T, String>>,
    data: Option<Extract<T, Value>>,
}

impl<T: Any> Rule<T> {
    /// Classify with a failure predicate
    pub fn new<F>(failed: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            failed: Box::new(failed),
            message: None,
            data: None,
        }
    }

    /// Derive the message from the datum
    #[must_use]
    pub fn with_message<F>(mut self, message: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.message = Some(Box::new(message));
        self
    }

    /// Derive the failure payload from the datum
    #[must_use]
    pub fn with_data<F, V>(mut self, data: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        let extract: Extract<T, Value> = Box::new(move |datum: &T| -> Value { data(datum).into() });
        self.data = Some(extract);
        self
    }
}

impl<T: Any> Classification for Rule<T> {
    fn is_failed(&self, datum: &dyn Any) -> bool {
        datum.downcast_ref::<T>().is_some_and(|t| (self.failed)(t))
    }

    fn message(&self, datum: &dyn Any) -> Option<String> {
        let datum = datum.downcast_ref::<T>()?;
        self.message.as_ref().map(|message| message(datum))
    }

    fn data(&self, datum: &dyn Any) -> Value {
        match (datum.downcast_ref::<T>(), &self.data) {
            (Some(datum), Some(data)) => data(datum),
            _ => Value::nil(),
        }
    }
}

struct Entry {
    type_name: &'static str,
    classification: Arc<dyn Classification>,
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Mapping from runtime type identity to classification
#[derive(Default)]
pub struct Registry {
    entries: DashMap<TypeId, Entry>,
}

impl Registry {
    /// An empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry consulted by [`is_failed`](super::is_failed)
    /// and the evaluators
    #[must_use]
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register a type that describes its own verdict
    ///
    /// Returns `true` when an earlier classification was replaced.
    pub fn register<T: HasFailed>(&self) -> bool {
        self.register_with::<T>(Native::<T>(PhantomData))
    }

    /// Register a closure-built rule
    pub fn register_rule<T: Any>(&self, rule: Rule<T>) -> bool {
        self.register_with::<T>(rule)
    }

    /// Register any classification for `T`
    pub fn register_with<T: Any>(&self, classification: impl Classification + 'static) -> bool {
        let type_name = type_name::<T>();
        let replaced = self
            .entries
            .insert(
                TypeId::of::<T>(),
                Entry {
                    type_name,
                    classification: Arc::new(classification),
                },
            )
            .is_some();
        LoggingTransformer::log_registration(type_name, replaced);
        replaced
    }

    /// Remove the classification for `T`
    ///
    /// Returns `true` when one was registered.
    pub fn unregister<T: Any>(&self) -> bool {
        let existed = self.entries.remove(&TypeId::of::<T>()).is_some();
        LoggingTransformer::log_unregistration(type_name::<T>(), existed);
        existed
    }

    /// Whether `T` has a classification
    #[must_use]
    pub fn is_registered<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no type is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the registered types, in no particular order
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.type_name).collect()
    }

    /// The classification for a type, cloned out so no shard lock is held
    /// while caller code runs
    pub(crate) fn lookup(&self, id: TypeId) -> Option<Arc<dyn Classification>> {
        self.entries
            .get(&id)
            .map(|entry| Arc::clone(&entry.classification))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.type_names())
            .finish()
    }
}
