//! Shared validation and formatting helpers

use crate::core::error::{LoggerError, Result};
use crate::core::log_event::EventFactory;
use crate::core::severity::Severity;
use chrono::{DateTime, Utc};

/// Message used when probing layouts and event factories.
pub(crate) const PROBE_MESSAGE: &str = "[log facility probe]";

/// The one shared timestamp rendering: `2025-01-08 10:30:45.123`
pub fn format_timestamp(datetime: &DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Probe a caller-supplied event factory with synthetic arguments and verify
/// it produces a consistent event for them. Rejecting broken factories here
/// keeps every later logging call on the happy path.
pub fn verify_event_factory(factory: &EventFactory) -> Result<()> {
    let event = factory(Severity::Trace, PROBE_MESSAGE, None).map_err(|e| {
        LoggerError::config(
            "EventFactory",
            format!("probe call failed: {}", e),
        )
    })?;

    if event.severity() != Severity::Trace {
        return Err(LoggerError::config(
            "EventFactory",
            format!(
                "probe event has severity {} instead of TRACE",
                event.severity()
            ),
        ));
    }
    if event.message() != PROBE_MESSAGE {
        return Err(LoggerError::config(
            "EventFactory",
            "probe event does not carry the probe message",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_event::LogEvent;
    use chrono::TimeZone;
    use std::sync::Arc;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123);
        assert_eq!(format_timestamp(&ts), "2025-01-08 10:30:45.123");
    }

    #[test]
    fn test_verify_factory_accepts_default_shape() {
        let factory: EventFactory = Arc::new(|severity, message, fields| {
            let event = LogEvent::new(severity, message)?;
            Ok(match fields {
                Some(fields) => event.with_fields(fields),
                None => event,
            })
        });
        assert!(verify_event_factory(&factory).is_ok());
    }

    #[test]
    fn test_verify_factory_rejects_severity_rewrite() {
        let factory: EventFactory =
            Arc::new(|_severity, message, _fields| LogEvent::new(Severity::Info, message));
        let err = verify_event_factory(&factory).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_verify_factory_rejects_message_rewrite() {
        let factory: EventFactory =
            Arc::new(|severity, _message, _fields| LogEvent::new(severity, "rewritten"));
        assert!(verify_event_factory(&factory).is_err());
    }

    #[test]
    fn test_verify_factory_rejects_failing_factory() {
        let factory: EventFactory = Arc::new(|_severity, _message, _fields| {
            Err(LoggerError::invalid_event("factory always fails"))
        });
        assert!(verify_event_factory(&factory).is_err());
    }
}
