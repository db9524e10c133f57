//! Appender base contract
//!
//! `DispatchConfig` is the state shared by every appender: the layout slot
//! and the event-factory override slot, both set-once-then-locked until an
//! explicit clear. `AppenderCore` is the per-instance plumbing, and the
//! `Appender` trait carries the shared dispatch behavior as default methods
//! over the subclass hooks.

use crate::core::error::{LoggerError, Result};
use crate::core::fields::LogFields;
use crate::core::layout::Layout;
use crate::core::log_event::{EventFactory, LogEvent};
use crate::core::severity::Severity;
use crate::core::util::verify_event_factory;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Concrete appender types; the logger allows at most one instance of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppenderKind {
    Console,
    Cell,
}

impl AppenderKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            AppenderKind::Console => "CONSOLE",
            AppenderKind::Cell => "CELL",
        }
    }
}

impl fmt::Display for AppenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Layout and event-factory state shared across all appenders.
///
/// Both slots follow first-successful-set-wins: a set call against an
/// occupied slot is a no-op that returns `false`, until `clear_*` empties
/// the slot again.
#[derive(Default)]
pub struct DispatchConfig {
    layout: RwLock<Option<Layout>>,
    factory: RwLock<Option<EventFactory>>,
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a layout unless one is already installed. Returns whether
    /// this call installed it.
    pub fn set_layout(&self, layout: Layout) -> bool {
        let mut slot = self.layout.write();
        if slot.is_some() {
            return false;
        }
        *slot = Some(layout);
        true
    }

    pub fn clear_layout(&self) {
        *self.layout.write() = None;
    }

    pub fn has_layout(&self) -> bool {
        self.layout.read().is_some()
    }

    /// The installed layout, or the built-in default when none is set.
    pub fn active_layout(&self) -> Layout {
        self.layout.read().clone().unwrap_or_default()
    }

    /// Install an event factory unless one is already installed. The factory
    /// is probe-verified before it can win the slot. Returns whether this
    /// call installed it.
    pub fn set_event_factory(&self, factory: EventFactory) -> Result<bool> {
        let mut slot = self.factory.write();
        if slot.is_some() {
            return Ok(false);
        }
        verify_event_factory(&factory)?;
        *slot = Some(factory);
        Ok(true)
    }

    pub fn clear_event_factory(&self) {
        *self.factory.write() = None;
    }

    pub fn has_event_factory(&self) -> bool {
        self.factory.read().is_some()
    }

    /// The installed factory override, or the default factory.
    pub fn active_factory(&self) -> EventFactory {
        self.factory
            .read()
            .clone()
            .unwrap_or_else(LogEvent::default_factory)
    }
}

/// Per-instance appender plumbing: the shared config reference and the
/// last-dispatched-event slot.
pub struct AppenderCore {
    config: Arc<DispatchConfig>,
    last_event: RwLock<Option<LogEvent>>,
}

impl AppenderCore {
    pub fn new(config: Arc<DispatchConfig>) -> Self {
        Self {
            config,
            last_event: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &Arc<DispatchConfig> {
        &self.config
    }

    pub fn last_event(&self) -> Option<LogEvent> {
        self.last_event.read().clone()
    }

    fn record_event(&self, event: LogEvent) {
        *self.last_event.write() = Some(event);
    }

    /// Base description shared by all appenders.
    pub fn describe(&self) -> String {
        let factory = if self.config.has_event_factory() {
            "custom"
        } else {
            "default"
        };
        let last = match self.last_event.read().as_ref() {
            Some(event) => event.to_string(),
            None => "<none>".to_string(),
        };
        format!(
            "layout={}, factory={}, last_event={}",
            self.config.active_layout().name(),
            factory,
            last
        )
    }
}

/// A named output sink.
///
/// Concrete appenders implement the hooks (`core`, `kind`, `send_event`,
/// `describe_suffix`); dispatch, event construction, and bookkeeping are the
/// default methods here so every sink behaves identically.
pub trait Appender: Send + Sync {
    fn core(&self) -> &AppenderCore;

    fn kind(&self) -> AppenderKind;

    /// Write one formatted event to the sink.
    fn send_event(&self, formatted: &str, event: &LogEvent) -> Result<()>;

    fn describe_suffix(&self) -> String {
        String::new()
    }

    /// Dispatch an already-built event: format through the shared layout,
    /// write, and only on success update the last-event pointer.
    fn log_event(&self, event: LogEvent) -> Result<()> {
        event.validate()?;
        let layout = self.core().config().active_layout();
        let formatted = layout.format(&event)?;
        self.send_event(&formatted, &event)?;
        self.core().record_event(event);
        Ok(())
    }

    /// The message call shape: build an event through the active factory and
    /// dispatch it.
    fn log(&self, severity: Severity, message: &str, fields: Option<LogFields>) -> Result<()> {
        if !severity.is_event_severity() {
            return Err(LoggerError::config(
                self.kind().to_str(),
                "OFF is not a loggable severity",
            ));
        }
        let factory = self.core().config().active_factory();
        let event = factory(severity, message, fields)?;
        self.log_event(event)
    }

    fn last_event(&self) -> Option<LogEvent> {
        self.core().last_event()
    }

    fn describe(&self) -> String {
        let suffix = self.describe_suffix();
        if suffix.is_empty() {
            format!("{} appender: {}", self.kind(), self.core().describe())
        } else {
            format!(
                "{} appender: {}, {}",
                self.kind(),
                self.core().describe(),
                suffix
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingAppender {
        core: AppenderCore,
        lines: RwLock<Vec<String>>,
        fail_next: RwLock<bool>,
    }

    impl RecordingAppender {
        fn new(config: Arc<DispatchConfig>) -> Self {
            Self {
                core: AppenderCore::new(config),
                lines: RwLock::new(Vec::new()),
                fail_next: RwLock::new(false),
            }
        }
    }

    impl Appender for RecordingAppender {
        fn core(&self) -> &AppenderCore {
            &self.core
        }

        fn kind(&self) -> AppenderKind {
            AppenderKind::Console
        }

        fn send_event(&self, formatted: &str, _event: &LogEvent) -> Result<()> {
            if *self.fail_next.read() {
                return Err(LoggerError::config("RecordingAppender", "sink rejected write"));
            }
            self.lines.write().push(formatted.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_layout_slot_first_set_wins() {
        let config = DispatchConfig::new();
        assert!(!config.has_layout());
        assert_eq!(config.active_layout().name(), "standard");

        assert!(config.set_layout(Layout::short()));
        assert!(!config.set_layout(Layout::standard()));
        assert_eq!(config.active_layout().name(), "short");

        config.clear_layout();
        assert!(config.set_layout(Layout::standard()));
        assert_eq!(config.active_layout().name(), "standard");
    }

    #[test]
    fn test_factory_slot_first_set_wins() {
        let config = DispatchConfig::new();
        let tagging: EventFactory = Arc::new(|severity, message, fields| {
            let event = LogEvent::new(severity, message)?;
            Ok(match fields {
                Some(fields) => event.with_fields(fields),
                None => event,
            })
        });

        assert!(config.set_event_factory(tagging.clone()).unwrap());
        assert!(!config.set_event_factory(tagging.clone()).unwrap());
        assert!(config.has_event_factory());

        config.clear_event_factory();
        assert!(!config.has_event_factory());
    }

    #[test]
    fn test_factory_slot_rejects_broken_factory() {
        let config = DispatchConfig::new();
        let broken: EventFactory =
            Arc::new(|_severity, message, _fields| LogEvent::new(Severity::Info, message));
        assert!(config.set_event_factory(broken).is_err());
        assert!(!config.has_event_factory());
    }

    #[test]
    fn test_log_message_shape_dispatches_and_records() {
        let config = Arc::new(DispatchConfig::new());
        config.set_layout(Layout::short());
        let appender = RecordingAppender::new(config);

        appender
            .log(Severity::Info, "ready", Some(LogFields::new().with_field("n", 1)))
            .unwrap();

        assert_eq!(appender.lines.read().as_slice(), ["[INFO] ready {n=1}"]);
        let last = appender.last_event().expect("recorded");
        assert_eq!(last.severity(), Severity::Info);
        assert_eq!(last.message(), "ready");
    }

    #[test]
    fn test_log_rejects_off_severity() {
        let appender = RecordingAppender::new(Arc::new(DispatchConfig::new()));
        let err = appender.log(Severity::Off, "ready", None).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(appender.last_event().is_none());
    }

    #[test]
    fn test_last_event_untouched_on_failed_dispatch() {
        let config = Arc::new(DispatchConfig::new());
        let appender = RecordingAppender::new(config);

        appender.log(Severity::Info, "first", None).unwrap();
        *appender.fail_next.write() = true;
        assert!(appender.log(Severity::Info, "second", None).is_err());

        assert_eq!(appender.last_event().unwrap().message(), "first");
    }

    #[test]
    fn test_describe_composition() {
        let config = Arc::new(DispatchConfig::new());
        let appender = RecordingAppender::new(config);
        let description = appender.describe();
        assert!(description.starts_with("CONSOLE appender: layout=standard"));
        assert!(description.contains("factory=default"));
        assert!(description.contains("last_event=<none>"));
    }
}
