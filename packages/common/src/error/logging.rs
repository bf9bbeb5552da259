//! Structured logging infrastructure
//!
//! Provides env_logger-based logging integrated with the standard log crate.
//! `tracing` is built with its `log` feature, so the evaluator hooks in
//! [`crate::handlers`] land here too when no subscriber is installed.

use log::{debug, info, warn};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Short-circuits and registry changes
    /// - `RUST_LOG=trace` - Every binding as it is evaluated
    /// - `RUST_LOG=failwise=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            // Another logger may already be installed by the host application.
            let _ = env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .try_init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Use this in test modules to avoid initialization conflicts
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a classification registered for a runtime type
    pub fn log_registration(type_name: &str, replaced: bool) {
        if replaced {
            warn!("Classification for {type_name} replaced");
        } else {
            debug!("Classification registered for {type_name}");
        }
    }

    /// Log a classification removed from the registry
    pub fn log_unregistration(type_name: &str, existed: bool) {
        if existed {
            debug!("Classification removed for {type_name}");
        } else {
            debug!("No classification to remove for {type_name}");
        }
    }

    /// Log a panic converted into a failed value
    ///
    /// Only the payload type is logged; messages may carry caller data.
    pub fn log_trapped_panic(payload_type: &str) {
        warn!("Panic trapped as failure (payload_type: {payload_type})");
    }
}
