//! Error handling with context propagation
//!
//! Provides the workspace error type:
//! - Error chaining and context preservation
//! - Backtrace capture and display
//! - Structured error kinds with thiserror

pub mod constructors;
pub mod display;
pub mod logging;
pub mod macros;
pub mod types;

pub use logging::LoggingTransformer;
pub use types::{Error, ErrorKind, Result};
