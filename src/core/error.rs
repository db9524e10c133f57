//! Error types for the logger system
//!
//! A single structured error enum covers all three failure taxonomies:
//! configuration errors, singleton misuse, and intentional log-triggered
//! termination (`Abort`). Callers distinguish them by variant, and the
//! `Abort` variant carries an optional upstream cause chain.

use crate::core::severity::Severity;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Accessor called on a singleton that has been destroyed or never created
    #[error("Singleton not initialized: {component}")]
    NotInitialized { component: String },

    /// A second appender of an already-registered concrete type
    #[error("Duplicate appender type: {kind}")]
    DuplicateAppender { kind: String },

    /// A log event candidate failed validation
    #[error("Invalid log event: {message}")]
    InvalidEvent { message: String },

    /// JSON error from the loosely-typed event candidate path
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Intentional termination raised after dispatching a qualifying
    /// critical event under the EXIT action. The message is the
    /// layout-formatted event.
    #[error("{message}")]
    Abort {
        message: String,
        severity: Severity,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a not-initialized error
    pub fn not_initialized(component: impl Into<String>) -> Self {
        LoggerError::NotInitialized {
            component: component.into(),
        }
    }

    /// Create a duplicate appender error
    pub fn duplicate_appender(kind: impl Into<String>) -> Self {
        LoggerError::DuplicateAppender { kind: kind.into() }
    }

    /// Create an invalid event error
    pub fn invalid_event(message: impl Into<String>) -> Self {
        LoggerError::InvalidEvent {
            message: message.into(),
        }
    }

    /// Create an abort error with no upstream cause
    pub fn abort(message: impl Into<String>, severity: Severity) -> Self {
        LoggerError::Abort {
            message: message.into(),
            severity,
            source: None,
        }
    }

    /// Create an abort error wrapping the fault that triggered it
    pub fn abort_with_cause(
        message: impl Into<String>,
        severity: Severity,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        LoggerError::Abort {
            message: message.into(),
            severity,
            source: Some(cause.into()),
        }
    }

    /// Whether this is an intentional log-triggered termination
    pub fn is_abort(&self) -> bool {
        matches!(self, LoggerError::Abort { .. })
    }

    /// Walk the cause chain and return the first ancestor that is not a
    /// framework error, unwrapping internal wrapping to expose the true
    /// root fault. Returns the error itself when the chain never leaves
    /// the framework.
    pub fn root_cause(&self) -> &(dyn std::error::Error + 'static) {
        let mut current: &(dyn std::error::Error + 'static) = self;
        while let Some(next) = current.source() {
            if next.downcast_ref::<LoggerError>().is_none() {
                return next;
            }
            current = next;
        }
        self
    }
}
