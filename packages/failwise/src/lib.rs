//! # Failwise - Failure-Aware Sequencing
//!
//! Chain operations that may fail, stopping at the first failure, without
//! relying on panics for control flow.
//!
//! ## Classification
//!
//! Any [`Value`] classifies as ok or failed:
//! - nil is ok
//! - a [`Failure`] built with [`fail`] or [`fail!`] is failed
//! - an [`Exception`] (a trapped panic or a captured error) is failed
//! - types registered in the [`Registry`] classify themselves
//! - everything else is ok
//!
//! ## Sequencing
//!
//! - [`attempt_all`] / [`Chain`] - Evaluate named bindings in order, short-circuiting
//! - [`try_all`] - Same, with panics in bindings trapped as failures
//! - [`ok_thread`] / [`ok_thread_last`] - Thread a value through steps
//! - [`as_ok_thread`] - Thread a value through steps under a name
//! - [`mark_as_handler`] - Tag a function as the failure branch
//!
//! ## Example
//!
//! ```
//! use failwise::{attempt_all, fail, failure_message, mark_as_handler, Chain, Value};
//!
//! let parsed = Chain::new()
//!     .bind("raw", |_| "42")
//!     .bind("n", |s| match s.get::<String>("raw").map(|r| r.parse::<i32>()) {
//!         Some(Ok(n)) => Value::from(n),
//!         _ => fail((), "not a number").into(),
//!     });
//! let out = attempt_all(parsed, |s| s.get::<i32>("n").map(|n| n * 2), None);
//! assert_eq!(out.get::<i32>(), Some(&84));
//!
//! let broken = Chain::new().bind("n", |_| fail((), "not a number"));
//! let out = attempt_all(
//!     broken,
//!     |s| s.value("n").cloned(),
//!     Some(mark_as_handler(|e| format!("recovered: {}", failure_message(&e)))),
//! );
//! assert_eq!(out, Value::from("recovered: not a number"));
//! ```

#![forbid(unsafe_code)]

mod assertions;
mod branch;
mod bridge;
mod chain;
mod classify;
mod exception;
mod failure;
mod handler;
mod scope;
mod thread;
mod value;

pub use assertions::{assert_nil, assert_not_empty, assert_number, assert_some, assert_with};
pub use branch::{attempt, if_let_failed, if_let_ok, when_let_failed, when_let_ok};
pub use bridge::{attempt_call, try_fn};
pub use chain::{attempt_all, try_all, Chain};
pub use classify::{
    classify, failure_data, failure_message, is_failed, is_ok, register, Classification,
    HasFailed, Registry, Rule, Verdict,
};
pub use exception::{Exception, ExceptionKind};
pub use failure::{fail, Failure};
pub use handler::{invoke_else, mark_as_handler, when_failed, ElseBranch, Handler};
pub use scope::Scope;
#[allow(deprecated)]
pub use thread::{
    as_ok_thread, attempt_thread, attempt_thread_last, ok_thread, ok_thread_last, Scoped, Step,
};
pub use value::{Datum, Value};

// Shared error and logging types
pub use failwise_common::{Error, ErrorKind, LoggingTransformer, Result};
