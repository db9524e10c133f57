//! # Sheet Logger System
//!
//! A structured logging framework for synchronous, single-invocation
//! scripting hosts, with console and worksheet-cell output targets.
//!
//! ## Features
//!
//! - **Explicit Lifecycle**: Singletons are lazily created, first-call-wins
//!   configured, and individually destroyable through one injectable service
//! - **Multiple Appenders**: Console and cell appenders sharing one layout
//! - **Log-Then-Abort**: Critical events can terminate the host script via a
//!   typed abort error carrying the formatted message and its cause chain
//! - **Easy to Use**: Simple and intuitive API
//!
//! ```
//! use sheet_logger_system::prelude::*;
//!
//! let logging = LogService::new();
//! let logger = logging
//!     .logger(Some(Severity::Info), Some(Action::Continue))
//!     .unwrap();
//! logger.info("script started").unwrap();
//! assert!(!logger.has_errors());
//! ```

pub mod appenders;
pub mod core;

pub mod prelude {
    pub use crate::appenders::{
        Appender, AppenderCore, AppenderKind, CellAppender, ConsoleAppender, DispatchConfig,
        RangeSink, VerticalAlignment,
    };
    pub use crate::core::{
        Action, EventFactory, FieldValue, Formatter, Layout, Lifecycle, LogEvent, LogFields,
        LogService, Logger, LoggerError, LoggerMetrics, LoggerState, Result, Severity,
    };
}

pub use crate::appenders::{
    Appender, AppenderCore, AppenderKind, CellAppender, ConsoleAppender, DispatchConfig, RangeSink,
    VerticalAlignment,
};
pub use crate::core::{
    format_short, format_standard, format_timestamp, Action, EventFactory, FieldCallback,
    FieldValue, Formatter, Layout, Lifecycle, LogEvent, LogFields, LogService, Logger, LoggerError,
    LoggerMetrics, LoggerState, Result, Severity, DEFAULT_ACTION, DEFAULT_LEVEL, RESERVED_KEYS,
};
