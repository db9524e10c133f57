//! Logger coordinator and the injectable log service
//!
//! `LogService` is the explicit root object that replaces ambient global
//! state: it owns the shared dispatch configuration, the appender singleton
//! slots, and the logger singleton slot. `Logger` evaluates severity against
//! the configured level, fans events out to the appender set, tracks
//! critical events, and decides whether to abort the host script.

use crate::appenders::base::{Appender, AppenderKind, DispatchConfig};
use crate::appenders::cell::{CellAppender, RangeSink};
use crate::appenders::console::ConsoleAppender;
use crate::core::error::{LoggerError, Result};
use crate::core::fields::LogFields;
use crate::core::layout::Layout;
use crate::core::lifecycle::Lifecycle;
use crate::core::log_event::{EventFactory, LogEvent};
use crate::core::metrics::LoggerMetrics;
use crate::core::severity::{Action, Severity};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_LEVEL: Severity = Severity::Warn;
pub const DEFAULT_ACTION: Action = Action::Exit;

/// Serializable snapshot of the logger's observable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerState {
    pub level: String,
    pub action: String,
    pub error_count: u64,
    pub warning_count: u64,
    pub critical_events: Vec<String>,
}

pub struct Logger {
    level: Severity,
    action: Action,
    appenders: RwLock<Vec<Arc<dyn Appender>>>,
    metrics: LoggerMetrics,
    history: RwLock<Vec<LogEvent>>,
    config: Arc<DispatchConfig>,
    console_slot: Arc<Lifecycle<ConsoleAppender>>,
}

impl Logger {
    pub(crate) fn create(
        level: Option<Severity>,
        action: Option<Action>,
        config: Arc<DispatchConfig>,
        console_slot: Arc<Lifecycle<ConsoleAppender>>,
    ) -> Self {
        Self {
            level: level.unwrap_or(DEFAULT_LEVEL),
            action: action.unwrap_or(DEFAULT_ACTION),
            appenders: RwLock::new(Vec::new()),
            metrics: LoggerMetrics::new(),
            history: RwLock::new(Vec::new()),
            config,
            console_slot,
        }
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Log one occurrence at the given severity.
    ///
    /// Events outside the configured verbosity are dropped entirely: no
    /// appender call, no counter change, no history entry, no abort. A
    /// qualifying critical event under the EXIT action dispatches first and
    /// then returns `Err(LoggerError::Abort)` carrying the layout-formatted
    /// message; already-written appender state is final.
    pub fn log(&self, severity: Severity, message: &str, fields: Option<LogFields>) -> Result<()> {
        if !severity.is_event_severity() {
            return Err(LoggerError::config(
                "Logger",
                "OFF is not a loggable severity",
            ));
        }
        if self.level == Severity::Off || severity > self.level {
            return Ok(());
        }

        self.ensure_appender()?;

        let factory = self.config.active_factory();
        let event = factory(severity, message, fields)?;
        self.dispatch(event)
    }

    #[inline]
    pub fn error(&self, message: &str) -> Result<()> {
        self.log(Severity::Error, message, None)
    }

    #[inline]
    pub fn warn(&self, message: &str) -> Result<()> {
        self.log(Severity::Warn, message, None)
    }

    #[inline]
    pub fn info(&self, message: &str) -> Result<()> {
        self.log(Severity::Info, message, None)
    }

    #[inline]
    pub fn trace(&self, message: &str) -> Result<()> {
        self.log(Severity::Trace, message, None)
    }

    pub fn error_with_fields(&self, message: &str, fields: LogFields) -> Result<()> {
        self.log(Severity::Error, message, Some(fields))
    }

    pub fn warn_with_fields(&self, message: &str, fields: LogFields) -> Result<()> {
        self.log(Severity::Warn, message, Some(fields))
    }

    pub fn info_with_fields(&self, message: &str, fields: LogFields) -> Result<()> {
        self.log(Severity::Info, message, Some(fields))
    }

    pub fn trace_with_fields(&self, message: &str, fields: LogFields) -> Result<()> {
        self.log(Severity::Trace, message, Some(fields))
    }

    /// Lazily register the service console appender when the set is empty.
    fn ensure_appender(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        if appenders.is_empty() {
            let console = self
                .console_slot
                .get_or_create(|| Ok(ConsoleAppender::new(Arc::clone(&self.config))))?;
            appenders.push(console);
        }
        Ok(())
    }

    /// Fan the event out, record it when critical, then apply the action.
    fn dispatch(&self, event: LogEvent) -> Result<()> {
        {
            let appenders = self.appenders.read();
            for appender in appenders.iter() {
                // Every sink sees identical content.
                appender.log_event(event.clone())?;
            }
        }

        let severity = event.severity();
        if severity.is_critical() {
            self.metrics.record(severity);
            self.history.write().push(event.clone());
        }

        // ERROR always raises under EXIT; WARN raises under EXIT only when
        // the configured level is at least WARN. INFO and TRACE never raise.
        let should_raise = match severity {
            Severity::Error => self.action == Action::Exit,
            Severity::Warn => self.action == Action::Exit && self.level >= Severity::Warn,
            _ => false,
        };
        if should_raise {
            let rendered = self.config.active_layout().format(&event)?;
            return Err(LoggerError::abort(rendered, severity));
        }
        Ok(())
    }

    /// Register an appender; at most one instance per concrete type.
    pub fn add_appender(&self, appender: Arc<dyn Appender>) -> Result<()> {
        let mut appenders = self.appenders.write();
        if appenders.iter().any(|a| a.kind() == appender.kind()) {
            return Err(LoggerError::duplicate_appender(appender.kind().to_str()));
        }
        appenders.push(appender);
        Ok(())
    }

    /// Remove the appender of the given kind. Returns whether one was
    /// removed.
    pub fn remove_appender(&self, kind: AppenderKind) -> bool {
        let mut appenders = self.appenders.write();
        let before = appenders.len();
        appenders.retain(|a| a.kind() != kind);
        appenders.len() != before
    }

    /// Replace the whole appender set atomically, under the same
    /// one-per-kind constraint. The existing set is untouched on failure.
    pub fn set_appenders(&self, replacement: Vec<Arc<dyn Appender>>) -> Result<()> {
        let mut seen: Vec<AppenderKind> = Vec::new();
        for appender in &replacement {
            if seen.contains(&appender.kind()) {
                return Err(LoggerError::duplicate_appender(appender.kind().to_str()));
            }
            seen.push(appender.kind());
        }
        *self.appenders.write() = replacement;
        Ok(())
    }

    pub fn appenders(&self) -> Vec<Arc<dyn Appender>> {
        self.appenders.read().clone()
    }

    pub fn appender_kinds(&self) -> Vec<AppenderKind> {
        self.appenders.read().iter().map(|a| a.kind()).collect()
    }

    pub fn err_count(&self) -> u64 {
        self.metrics.error_count()
    }

    pub fn warn_count(&self) -> u64 {
        self.metrics.warning_count()
    }

    pub fn has_errors(&self) -> bool {
        self.err_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warn_count() > 0
    }

    pub fn has_messages(&self) -> bool {
        self.has_errors() || self.has_warnings()
    }

    /// Every dispatched ERROR and WARN event, in dispatch order.
    pub fn critical_events(&self) -> Vec<LogEvent> {
        self.history.read().clone()
    }

    /// Clear counters and critical history. Appenders, layout, and
    /// configuration are untouched.
    pub fn reset(&self) {
        self.metrics.reset();
        self.history.write().clear();
    }

    /// Snapshot of level, action, counters, and rendered critical history.
    pub fn export_state(&self) -> LoggerState {
        LoggerState {
            level: self.level.to_str().to_string(),
            action: self.action.to_str().to_string(),
            error_count: self.err_count(),
            warning_count: self.warn_count(),
            critical_events: self
                .history
                .read()
                .iter()
                .map(|event| event.to_string())
                .collect(),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<&str> = self
            .appenders
            .read()
            .iter()
            .map(|a| a.kind().to_str())
            .collect();
        write!(
            f,
            "Logger(level={}, action={}, appenders=[{}], errors={}, warnings={})",
            self.level,
            self.action,
            kinds.join(", "),
            self.err_count(),
            self.warn_count()
        )
    }
}

/// The injectable service holding all process-wide logging state.
///
/// The host entry point creates one `LogService` and passes it around;
/// every singleton (logger, console appender, cell appender) and every
/// shared slot (layout, event factory) lives here, created lazily with
/// first-successful-call-wins semantics and destroyable individually.
pub struct LogService {
    config: Arc<DispatchConfig>,
    console: Arc<Lifecycle<ConsoleAppender>>,
    cell: Lifecycle<CellAppender>,
    logger: Lifecycle<Logger>,
}

impl LogService {
    pub fn new() -> Self {
        Self {
            config: Arc::new(DispatchConfig::new()),
            console: Arc::new(Lifecycle::new("ConsoleAppender")),
            cell: Lifecycle::new("CellAppender"),
            logger: Lifecycle::new("Logger"),
        }
    }

    /// Get or lazily create the logger. When already configured, the
    /// arguments are ignored and the existing instance is returned.
    pub fn logger(&self, level: Option<Severity>, action: Option<Action>) -> Result<Arc<Logger>> {
        self.logger.get_or_create(|| {
            Ok(Logger::create(
                level,
                action,
                Arc::clone(&self.config),
                Arc::clone(&self.console),
            ))
        })
    }

    /// Accessor form: fails with a not-initialized error after a destroy.
    pub fn active_logger(&self) -> Result<Arc<Logger>> {
        self.logger.get()
    }

    pub fn is_logger_initialized(&self) -> bool {
        self.logger.is_initialized()
    }

    /// Destroy the logger singleton. Appender singletons and the shared
    /// layout/factory slots survive.
    pub fn clear_logger(&self) {
        self.logger.clear();
    }

    /// Logging convenience that lazily initializes the logger with default
    /// level and action, unlike the accessors.
    pub fn log(&self, severity: Severity, message: &str, fields: Option<LogFields>) -> Result<()> {
        self.logger(None, None)?.log(severity, message, fields)
    }

    #[inline]
    pub fn error(&self, message: &str) -> Result<()> {
        self.log(Severity::Error, message, None)
    }

    #[inline]
    pub fn warn(&self, message: &str) -> Result<()> {
        self.log(Severity::Warn, message, None)
    }

    #[inline]
    pub fn info(&self, message: &str) -> Result<()> {
        self.log(Severity::Info, message, None)
    }

    #[inline]
    pub fn trace(&self, message: &str) -> Result<()> {
        self.log(Severity::Trace, message, None)
    }

    /// Get or lazily create the console appender singleton.
    pub fn console_appender(&self) -> Result<Arc<ConsoleAppender>> {
        self.console
            .get_or_create(|| Ok(ConsoleAppender::new(Arc::clone(&self.config))))
    }

    pub fn active_console_appender(&self) -> Result<Arc<ConsoleAppender>> {
        self.console.get()
    }

    pub fn clear_console_appender(&self) {
        self.console.clear();
    }

    /// Get or create the cell appender singleton. First caller wins: once
    /// created, later calls return the original instance and their cell and
    /// color arguments are ignored.
    pub fn cell_appender(
        &self,
        sink: Arc<dyn RangeSink>,
        colors: Option<HashMap<Severity, String>>,
    ) -> Result<Arc<CellAppender>> {
        self.cell
            .get_or_create(|| CellAppender::new(Arc::clone(&self.config), sink, colors))
    }

    pub fn active_cell_appender(&self) -> Result<Arc<CellAppender>> {
        self.cell.get()
    }

    pub fn clear_cell_appender(&self) {
        self.cell.clear();
    }

    /// Install the shared layout; a no-op returning `false` when one is
    /// already installed.
    pub fn set_layout(&self, layout: Layout) -> bool {
        self.config.set_layout(layout)
    }

    pub fn clear_layout(&self) {
        self.config.clear_layout();
    }

    /// Install the shared event-factory override after probe verification;
    /// a no-op returning `Ok(false)` when one is already installed.
    pub fn set_event_factory(&self, factory: EventFactory) -> Result<bool> {
        self.config.set_event_factory(factory)
    }

    pub fn clear_event_factory(&self) {
        self.config.clear_event_factory();
    }

    pub fn dispatch_config(&self) -> &Arc<DispatchConfig> {
        &self.config
    }
}

impl Default for LogService {
    fn default() -> Self {
        Self::new()
    }
}
