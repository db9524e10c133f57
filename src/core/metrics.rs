//! Running counters for dispatched critical events

use crate::core::severity::Severity;
use std::sync::atomic::{AtomicU64, Ordering};

/// Error and warning counters, incremented once per dispatched critical
/// event and cleared by `Logger::reset`.
#[derive(Debug)]
pub struct LoggerMetrics {
    error_count: AtomicU64,
    warning_count: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            error_count: AtomicU64::new(0),
            warning_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn warning_count(&self) -> u64 {
        self.warning_count.load(Ordering::Relaxed)
    }

    /// Record a dispatched critical event. Non-critical severities are a
    /// no-op.
    #[inline]
    pub fn record(&self, severity: Severity) {
        match severity {
            Severity::Error => {
                self.error_count.fetch_add(1, Ordering::Relaxed);
            }
            Severity::Warn => {
                self.warning_count.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    /// Reset both counters to zero.
    pub fn reset(&self) {
        self.error_count.store(0, Ordering::Relaxed);
        self.warning_count.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            error_count: AtomicU64::new(self.error_count()),
            warning_count: AtomicU64::new(self.warning_count()),
        }
    }
}
