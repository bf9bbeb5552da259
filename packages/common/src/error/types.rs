//! Core error types and definitions

use std::sync::Arc;
use thiserror::Error;

/// Core error type with context propagation support
#[derive(Debug, Clone)]
pub struct Error {
    /// The actual error
    pub(super) inner: Arc<ErrorInner>,
}

#[derive(Debug)]
pub(super) struct ErrorInner {
    /// The error kind
    pub kind: ErrorKind,
    /// Optional error context
    pub context: Option<String>,
    /// Optional source error
    pub source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    /// Backtrace captured at error creation
    #[cfg(feature = "full-backtrace")]
    pub backtrace: backtrace::Backtrace,
}

/// Different kinds of errors that can occur
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A name was looked up that no binding introduced
    #[error("unbound name `{0}`")]
    UnboundName(String),

    /// A bound value did not have the requested type
    #[error("binding `{name}` is a {found}, not a {expected}")]
    TypeMismatch {
        /// Binding name
        name: String,
        /// Requested type
        expected: &'static str,
        /// Type actually stored
        found: &'static str,
    },
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
