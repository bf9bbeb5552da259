//! Error constructors and methods

use super::types::{Error, ErrorInner, ErrorKind};
use std::fmt;
use std::sync::Arc;

impl Error {
    /// Create a new error with the given kind
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            inner: Arc::new(ErrorInner {
                kind,
                context: None,
                source: None,
                #[cfg(feature = "full-backtrace")]
                backtrace: backtrace::Backtrace::new(),
            }),
        }
    }

    /// Create an error with a source error
    #[must_use]
    pub fn with_source<E>(kind: ErrorKind, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ErrorInner {
                kind,
                context: None,
                source: Some(Arc::new(source)),
                #[cfg(feature = "full-backtrace")]
                backtrace: backtrace::Backtrace::new(),
            }),
        }
    }

    /// Add context to this error
    ///
    /// New context is prepended; the source and backtrace are kept.
    #[must_use]
    pub fn context<C: fmt::Display>(self, context: C) -> Self {
        let context = match &self.inner.context {
            Some(existing) => format!("{context}: {existing}"),
            None => context.to_string(),
        };
        Self {
            inner: Arc::new(ErrorInner {
                kind: self.inner.kind.clone(),
                context: Some(context),
                source: self.inner.source.clone(),
                #[cfg(feature = "full-backtrace")]
                backtrace: self.inner.backtrace.clone(),
            }),
        }
    }

    /// Get the error kind
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }

    /// Get the error context if any
    #[must_use]
    pub fn get_context(&self) -> Option<&str> {
        self.inner.context.as_deref()
    }

    /// Get the backtrace
    #[cfg(feature = "full-backtrace")]
    #[must_use]
    pub fn backtrace(&self) -> &backtrace::Backtrace {
        &self.inner.backtrace
    }

    /// Create an unbound name error
    pub fn unbound_name<S: Into<String>>(name: S) -> Self {
        Self::new(ErrorKind::UnboundName(name.into()))
    }

    /// Create a type mismatch error for a binding
    pub fn type_mismatch<S: Into<String>>(
        name: S,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            name: name.into(),
            expected,
            found,
        })
    }
}
