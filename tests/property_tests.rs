//! Property-based tests for sheet_logger_system using proptest

use parking_lot::RwLock;
use proptest::prelude::*;
use sheet_logger_system::prelude::*;
use std::sync::Arc;

fn any_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Off),
        Just(Severity::Error),
        Just(Severity::Warn),
        Just(Severity::Info),
        Just(Severity::Trace),
    ]
}

fn any_event_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Error),
        Just(Severity::Warn),
        Just(Severity::Info),
        Just(Severity::Trace),
    ]
}

/// Counting sink used to observe how many events reach the appenders.
struct CountingAppender {
    core: AppenderCore,
    count: RwLock<usize>,
}

impl CountingAppender {
    fn new(config: Arc<DispatchConfig>) -> Arc<Self> {
        Arc::new(Self {
            core: AppenderCore::new(config),
            count: RwLock::new(0),
        })
    }

    fn count(&self) -> usize {
        *self.count.read()
    }
}

impl Appender for CountingAppender {
    fn core(&self) -> &AppenderCore {
        &self.core
    }

    fn kind(&self) -> AppenderKind {
        AppenderKind::Console
    }

    fn send_event(&self, _formatted: &str, _event: &LogEvent) -> Result<()> {
        *self.count.write() += 1;
        Ok(())
    }
}

// ============================================================================
// Severity Tests
// ============================================================================

proptest! {
    /// Severity string conversions roundtrip
    #[test]
    fn test_severity_str_roundtrip(severity in any_severity()) {
        let as_str = severity.to_str();
        let parsed: Severity = as_str.parse().unwrap();
        prop_assert_eq!(severity, parsed);
    }

    /// Severity parsing is case-insensitive
    #[test]
    fn test_severity_parse_case_insensitive(severity in any_severity()) {
        let lower: Severity = severity.to_str().to_lowercase().parse().unwrap();
        prop_assert_eq!(severity, lower);
    }

    /// Severity ordering is consistent with the numeric ordinal
    #[test]
    fn test_severity_ordering(a in any_severity(), b in any_severity()) {
        let va = a as u8;
        let vb = b as u8;

        prop_assert_eq!(a <= b, va <= vb);
        prop_assert_eq!(a < b, va < vb);
        prop_assert_eq!(a >= b, va >= vb);
        prop_assert_eq!(a > b, va > vb);
    }

    /// Display matches to_str
    #[test]
    fn test_severity_display(severity in any_severity()) {
        prop_assert_eq!(severity.to_string(), severity.to_str());
    }
}

// ============================================================================
// LogEvent Tests
// ============================================================================

proptest! {
    /// Construction accepts any non-blank message and preserves severity
    #[test]
    fn test_event_construction(
        severity in any_event_severity(),
        message in "[a-zA-Z0-9 .,!?_-]{1,100}",
    ) {
        prop_assume!(!message.trim().is_empty());
        let event = LogEvent::new(severity, message.as_str()).unwrap();
        prop_assert_eq!(event.severity(), severity);
        prop_assert_eq!(event.message(), message.as_str());
    }

    /// Sanitization removes every raw control character from the message
    #[test]
    fn test_event_message_sanitized(message in "[a-z \\n\\r\\t]{0,50}") {
        prop_assume!(!message.trim().is_empty());
        if let Ok(event) = LogEvent::new(Severity::Info, message.as_str()) {
            prop_assert!(!event.message().contains('\n'));
            prop_assert!(!event.message().contains('\r'));
            prop_assert!(!event.message().contains('\t'));
        }
    }

    /// Whitespace-only messages are always rejected
    #[test]
    fn test_blank_message_rejected(message in "[ \\t\\r\\n]{0,20}") {
        prop_assert!(LogEvent::new(Severity::Error, message.as_str()).is_err());
    }

    /// The short format always carries the severity tag and the message
    #[test]
    fn test_short_format_structure(
        severity in any_event_severity(),
        message in "[a-zA-Z0-9 ]{1,50}",
    ) {
        prop_assume!(!message.trim().is_empty());
        let event = LogEvent::new(severity, message.as_str()).unwrap();
        let rendered = Layout::short().format(&event).unwrap();
        let expected_prefix = format!("[{}] ", severity);
        prop_assert!(rendered.starts_with(&expected_prefix));
        prop_assert!(rendered.contains(message.as_str()));
    }
}

// ============================================================================
// Fields Tests
// ============================================================================

proptest! {
    /// Insertion order is preserved for distinct non-reserved keys
    #[test]
    fn test_fields_insertion_order(keys in prop::collection::vec("[a-z]{3,10}", 1..10)) {
        let mut unique: Vec<String> = Vec::new();
        for key in keys {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }

        let mut fields = LogFields::new();
        for (i, key) in unique.iter().enumerate() {
            fields.insert(key.as_str(), i as i64);
        }

        let observed: Vec<String> = fields.iter().map(|(k, _)| k.to_string()).collect();
        prop_assert_eq!(observed, unique);
    }

    /// Reserved keys never survive insertion, whatever the value
    #[test]
    fn test_reserved_keys_always_dropped(
        key in prop_oneof![
            Just("type"),
            Just("severity"),
            Just("message"),
            Just("timestamp"),
        ],
        value in "[a-z]{1,10}",
    ) {
        let fields = LogFields::new().with_field(key, value.as_str());
        prop_assert!(fields.is_empty());
        prop_assert!(fields.get(key).is_none());
    }
}

// ============================================================================
// Dispatch Law
// ============================================================================

proptest! {
    /// An event reaches the appenders iff the level is not OFF and the event
    /// severity does not exceed the configured level.
    #[test]
    fn test_dispatch_law(level in any_severity(), severity in any_event_severity()) {
        let service = LogService::new();
        let logger = service
            .logger(Some(level), Some(Action::Continue))
            .unwrap();
        let counting = CountingAppender::new(Arc::clone(service.dispatch_config()));
        logger.add_appender(counting.clone()).unwrap();

        logger.log(severity, "probe", None).unwrap();

        let expected = level != Severity::Off && severity <= level;
        prop_assert_eq!(counting.count() == 1, expected);
        // Critical events are counted exactly when they are dispatched.
        let counted = logger.err_count() + logger.warn_count();
        prop_assert_eq!(counted == 1, expected && severity.is_critical());
    }

    /// Under CONTINUE, no sequence of logging calls ever aborts, and the
    /// critical history length always equals the sum of both counters.
    #[test]
    fn test_continue_never_aborts(
        severities in prop::collection::vec(any_event_severity(), 1..20),
    ) {
        let service = LogService::new();
        let logger = service
            .logger(Some(Severity::Trace), Some(Action::Continue))
            .unwrap();
        let counting = CountingAppender::new(Arc::clone(service.dispatch_config()));
        logger.add_appender(counting).unwrap();

        for severity in &severities {
            prop_assert!(logger.log(*severity, "probe", None).is_ok());
        }

        let criticals = severities.iter().filter(|s| s.is_critical()).count() as u64;
        prop_assert_eq!(logger.err_count() + logger.warn_count(), criticals);
        prop_assert_eq!(logger.critical_events().len() as u64, criticals);
    }

    /// Under EXIT, ERROR always aborts and the abort message is exactly what
    /// the layout renders for the dispatched event.
    #[test]
    fn test_error_abort_message_matches_layout(level in any_event_severity()) {
        let service = LogService::new();
        let logger = service.logger(Some(level), Some(Action::Exit)).unwrap();
        let counting = CountingAppender::new(Arc::clone(service.dispatch_config()));
        logger.add_appender(counting.clone()).unwrap();

        let err = logger.error("unrecoverable").unwrap_err();
        prop_assert!(err.is_abort());

        let event = counting.last_event().unwrap();
        let rendered = service.dispatch_config().active_layout().format(&event).unwrap();
        prop_assert_eq!(err.to_string(), rendered);
    }
}
