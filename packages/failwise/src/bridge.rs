//! Exception bridge
//!
//! Runs caller code and turns an unwinding panic into a failed [`Exception`]
//! value.
//!
//! Only unwinding panics are recoverable. Stack exhaustion, allocation
//! failure, a panic raised while already panicking, and any build with
//! `panic = "abort"` terminate the process before this module sees anything.
//! The default panic hook still prints the panic message to stderr.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use failwise_common::{on_trapped_panic, LoggingTransformer};

use crate::exception::Exception;
use crate::failure::Failure;
use crate::value::Value;

fn payload_type(payload: &(dyn Any + Send)) -> &'static str {
    if payload.is::<&'static str>() {
        "&str"
    } else if payload.is::<String>() {
        "String"
    } else if payload.is::<Exception>() {
        "Exception"
    } else if payload.is::<Failure>() {
        "Failure"
    } else {
        "unknown"
    }
}

/// Run `thunk`, converting a panic into a failed value
///
/// A thunk that returns normally has its value passed through unchanged,
/// including values that are themselves failures.
///
/// ```
/// use failwise::{attempt_call, failure_message, is_failed};
///
/// let ok = attempt_call(|| 41 + 1);
/// assert_eq!(ok.get::<i32>(), Some(&42));
///
/// let trapped = attempt_call(|| -> i32 { panic!("bad") });
/// assert!(is_failed(&trapped));
/// assert_eq!(failure_message(&trapped), "bad");
/// ```
pub fn attempt_call<F, V>(thunk: F) -> Value
where
    F: FnOnce() -> V,
    V: Into<Value>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| thunk().into())) {
        Ok(value) => value,
        Err(payload) => {
            LoggingTransformer::log_trapped_panic(payload_type(&*payload));
            let exception = Exception::from_panic(payload);
            on_trapped_panic(exception.message());
            exception.into()
        }
    }
}

/// Wrap a one-argument function so that panics become failed values
pub fn try_fn<'a, A, F, V>(f: F) -> impl FnOnce(A) -> Value + 'a
where
    F: FnOnce(A) -> V + 'a,
    V: Into<Value>,
    A: 'a,
{
    move |arg| attempt_call(move || f(arg))
}
