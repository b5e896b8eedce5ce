//! Injectable diagnostic sink.
//!
//! The cache logs exactly one thing: the inconsistency-recovery path. The
//! sink is a constructor-injected capability rather than a global logger so
//! the core has no process-wide mutable state and can be tested without a
//! logging framework present. Diagnostics are advisory only; their presence
//! or absence never changes observable cache behavior.

use std::fmt;

/// Severity attached to a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warn => f.write_str("WARN"),
            Severity::Error => f.write_str("ERROR"),
        }
    }
}

/// Capability accepting a severity and message.
///
/// `Send` is required so caches can be handed to the mutex-serialized wrapper.
pub trait DiagnosticSink: Send {
    fn log(&self, severity: Severity, message: &str);
}

/// Default sink: forwards to the `tracing` ecosystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Warn => tracing::warn!(target: "softcache", "{message}"),
            Severity::Error => tracing::error!(target: "softcache", "{message}"),
        }
    }
}

/// Sink that discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn log(&self, _severity: Severity, _message: &str) {}
}
