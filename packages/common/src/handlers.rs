//! Tracing hooks fired by the evaluators and threading combinators
//!
//! These functions are the single place where control-flow decisions are
//! reported, so every chain logs the same way.

/// A binding or step is about to run
pub fn on_binding(chain: &str, name: &str, index: usize) {
    tracing::trace!(chain, name, index, "evaluating binding");
}

/// A chain stopped at a failed binding or step
pub fn on_short_circuit(chain: &str, name: &str, index: usize, message: &str) {
    tracing::debug!(chain, name, index, failure = message, "short-circuit on failed value");
}

/// A panic was caught by the exception bridge
pub fn on_trapped_panic(message: &str) {
    tracing::warn!(payload = message, "panic converted into failed value");
}
