//! Failure branches: fixed fallback values and tagged handler functions

use std::fmt;

use crate::value::Value;

/// A function that receives the failed value
pub struct Handler<'a>(Box<dyn FnOnce(Value) -> Value + 'a>);

impl<'a> Handler<'a> {
    /// Wrap a function as a handler
    pub fn new<F, V>(handler: F) -> Self
    where
        F: FnOnce(Value) -> V + 'a,
        V: Into<Value>,
    {
        Self(Box::new(move |failed: Value| -> Value { handler(failed).into() }))
    }

    /// Call the handler with a failed value
    pub fn call(self, failed: Value) -> Value {
        (self.0)(failed)
    }
}

impl fmt::Debug for Handler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// What an evaluator returns in place of a failed result
#[derive(Debug)]
pub enum ElseBranch<'a> {
    /// Returned verbatim; the failure is discarded
    Fallback(Value),
    /// Called with the failure; its return value is the result
    Handler(Handler<'a>),
}

impl ElseBranch<'_> {
    /// A fixed fallback value
    pub fn fallback(value: impl Into<Value>) -> Self {
        Self::Fallback(value.into())
    }

    /// Whether this branch carries the handler tag
    #[must_use]
    pub fn is_handler(&self) -> bool {
        matches!(self, Self::Handler(_))
    }
}

impl From<Value> for ElseBranch<'_> {
    fn from(value: Value) -> Self {
        Self::Fallback(value)
    }
}

impl<'a> From<Handler<'a>> for ElseBranch<'a> {
    fn from(handler: Handler<'a>) -> Self {
        Self::Handler(handler)
    }
}

/// Tag a function as a failure handler
///
/// Without the tag a function could not be told apart from a fallback value
/// at the same call site.
pub fn mark_as_handler<'a, F, V>(handler: F) -> ElseBranch<'a>
where
    F: FnOnce(Value) -> V + 'a,
    V: Into<Value>,
{
    ElseBranch::Handler(Handler::new(handler))
}

/// Alias of [`mark_as_handler`] that reads well at the call site
///
/// ```
/// use failwise::{attempt_all, fail, failure_message, when_failed, Chain};
///
/// let chain = Chain::new().bind("x", |_| fail((), "boom"));
/// let out = attempt_all(chain, |s| s.value("x").cloned(), Some(when_failed(|e| failure_message(&e))));
/// assert_eq!(out.get::<String>().map(String::as_str), Some("boom"));
/// ```
pub fn when_failed<'a, F, V>(handler: F) -> ElseBranch<'a>
where
    F: FnOnce(Value) -> V + 'a,
    V: Into<Value>,
{
    mark_as_handler(handler)
}

/// Resolve a failure branch against a failed value
///
/// A handler is called with the failure; a fallback is returned unchanged.
pub fn invoke_else(branch: ElseBranch<'_>, failed: Value) -> Value {
    match branch {
        ElseBranch::Handler(handler) => handler.call(failed),
        ElseBranch::Fallback(value) => value,
    }
}
