//! Log event record
//!
//! A `LogEvent` is the immutable record of one logged occurrence. Every
//! constructor path validates, so a held event is always internally
//! consistent: a real event severity, a non-blank message, a well-formed
//! timestamp.

use crate::core::error::{LoggerError, Result};
use crate::core::fields::{FieldValue, LogFields};
use crate::core::severity::Severity;
use crate::core::util::format_timestamp;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Factory signature for building log events from the message call shape.
/// The logger and appenders route all event construction through the active
/// factory, which is this default or a verified caller override.
pub type EventFactory =
    Arc<dyn Fn(Severity, &str, Option<LogFields>) -> Result<LogEvent> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct LogEvent {
    severity: Severity,
    message: String,
    timestamp: DateTime<Utc>,
    fields: LogFields,
}

impl LogEvent {
    /// Sanitize the message to prevent log injection: newlines, carriage
    /// returns, and tabs become escape sequences.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(severity: Severity, message: impl Into<String>) -> Result<Self> {
        if !severity.is_event_severity() {
            return Err(LoggerError::invalid_event(
                "OFF is not a valid event severity",
            ));
        }
        let message = message.into();
        if message.trim().is_empty() {
            return Err(LoggerError::invalid_event("message must not be blank"));
        }
        Ok(Self {
            severity,
            message: Self::sanitize_message(&message),
            timestamp: Utc::now(),
            fields: LogFields::new(),
        })
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: LogFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn fields(&self) -> &LogFields {
        &self.fields
    }

    /// Re-check the construction invariants. Constructed events always pass;
    /// this guards layout formatting against events produced by a
    /// caller-supplied factory.
    pub fn validate(&self) -> Result<()> {
        if !self.severity.is_event_severity() {
            return Err(LoggerError::invalid_event(
                "OFF is not a valid event severity",
            ));
        }
        if self.message.trim().is_empty() {
            return Err(LoggerError::invalid_event("message must not be blank"));
        }
        Ok(())
    }

    /// Build an event from a loosely-typed JSON candidate.
    ///
    /// The candidate must be an object carrying a valid `severity` (the
    /// legacy `type` key is accepted), a non-blank `message`, and an
    /// optional RFC 3339 `timestamp`. Every other key becomes an extra
    /// field; only strings and finite numbers are accepted there — nested
    /// objects, arrays, booleans, and nulls are rejected at the boundary.
    pub fn from_value(candidate: serde_json::Value) -> Result<Self> {
        let obj = match candidate {
            serde_json::Value::Object(obj) => obj,
            other => {
                return Err(LoggerError::invalid_event(format!(
                    "candidate must be an object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let severity_raw = obj
            .get("severity")
            .or_else(|| obj.get("type"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| LoggerError::invalid_event("candidate is missing a severity"))?;
        let severity: Severity = severity_raw
            .parse()
            .map_err(LoggerError::invalid_event)?;

        let message = obj
            .get("message")
            .and_then(|v| v.as_str())
            .ok_or_else(|| LoggerError::invalid_event("candidate is missing a message"))?;

        let mut event = LogEvent::new(severity, message)?;

        if let Some(ts) = obj.get("timestamp") {
            let ts = ts
                .as_str()
                .ok_or_else(|| LoggerError::invalid_event("timestamp must be an RFC 3339 string"))?;
            let parsed = DateTime::parse_from_rfc3339(ts)
                .map_err(|e| LoggerError::invalid_event(format!("bad timestamp '{}': {}", ts, e)))?;
            event = event.with_timestamp(parsed.with_timezone(&Utc));
        }

        let mut fields = LogFields::new();
        for (key, value) in &obj {
            if matches!(key.as_str(), "severity" | "type" | "message" | "timestamp") {
                continue;
            }
            match value {
                serde_json::Value::String(s) => fields.insert(key.clone(), s.as_str()),
                serde_json::Value::Number(n) => {
                    let n = n.as_f64().filter(|f| f.is_finite()).ok_or_else(|| {
                        LoggerError::invalid_event(format!("field '{}' is not a finite number", key))
                    })?;
                    fields.insert(key.clone(), FieldValue::Num(n));
                }
                other => {
                    return Err(LoggerError::invalid_event(format!(
                        "field '{}' has unsupported {} value",
                        key,
                        json_kind(other)
                    )))
                }
            }
        }

        Ok(event.with_fields(fields))
    }

    /// The default event factory used when no override is installed.
    pub fn default_factory() -> EventFactory {
        Arc::new(|severity, message, fields| {
            let event = LogEvent::new(severity, message)?;
            Ok(match fields {
                Some(fields) => event.with_fields(fields),
                None => event,
            })
        })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            format_timestamp(&self.timestamp),
            self.severity,
            self.message
        )?;
        if !self.fields.is_empty() {
            write!(f, " {{{}}}", self.fields.format_fields())?;
        }
        Ok(())
    }
}
