//! Core logger types and traits

pub mod error;
pub mod fields;
pub mod layout;
pub mod lifecycle;
pub mod log_event;
pub mod logger;
pub mod metrics;
pub mod severity;
pub mod util;

pub use error::{LoggerError, Result};
pub use fields::{FieldCallback, FieldValue, LogFields, RESERVED_KEYS};
pub use layout::{format_short, format_standard, Formatter, Layout};
pub use lifecycle::Lifecycle;
pub use log_event::{EventFactory, LogEvent};
pub use logger::{LogService, Logger, LoggerState, DEFAULT_ACTION, DEFAULT_LEVEL};
pub use metrics::LoggerMetrics;
pub use severity::{Action, Severity};
pub use util::format_timestamp;
