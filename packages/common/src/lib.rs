//! Common infrastructure shared by the failwise crates
//!
//! This crate provides functionality used across the workspace:
//! - Error handling with context propagation
//! - Logging bootstrap and structured log helpers
//! - Tracing hooks fired by the evaluators

pub mod error;
pub mod handlers;

pub use error::*;
pub use handlers::{on_binding, on_short_circuit, on_trapped_panic};
