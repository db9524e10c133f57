//! Layout: the formatting strategy shared by all appenders

use crate::core::error::{LoggerError, Result};
use crate::core::log_event::LogEvent;
use crate::core::severity::Severity;
use crate::core::util::{format_timestamp, PROBE_MESSAGE};
use std::fmt;
use std::sync::Arc;

/// Formatter function turning a log event into display text.
pub type Formatter = Arc<dyn Fn(&LogEvent) -> String + Send + Sync>;

/// The short built-in formatter: `[SEVERITY] message[ {fields}]`
pub fn format_short(event: &LogEvent) -> String {
    let mut out = format!("[{}] {}", event.severity(), event.message());
    if !event.fields().is_empty() {
        out.push_str(&format!(" {{{}}}", event.fields().format_fields()));
    }
    out
}

/// The default built-in formatter: short form prefixed with the timestamp.
pub fn format_standard(event: &LogEvent) -> String {
    format!(
        "{} {}",
        format_timestamp(&event.timestamp()),
        format_short(event)
    )
}

/// Wraps a single formatter function.
///
/// Construction probes the formatter with a synthetic valid event; a
/// formatter that produces a blank result is rejected before it can ever be
/// installed.
#[derive(Clone)]
pub struct Layout {
    formatter: Formatter,
    name: &'static str,
}

impl Layout {
    /// Create a layout from an optional custom formatter. `None` selects the
    /// default (standard) formatter.
    pub fn new(formatter: Option<Formatter>) -> Result<Self> {
        match formatter {
            None => Ok(Self::standard()),
            Some(formatter) => {
                let layout = Self {
                    formatter,
                    name: "custom",
                };
                layout.probe()?;
                Ok(layout)
            }
        }
    }

    /// The default layout: timestamp-prefixed short form.
    pub fn standard() -> Self {
        Self {
            formatter: Arc::new(format_standard),
            name: "standard",
        }
    }

    /// The short layout: severity and message only.
    pub fn short() -> Self {
        Self {
            formatter: Arc::new(format_short),
            name: "short",
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Probe with a synthetic valid event; the result must be non-blank.
    fn probe(&self) -> Result<()> {
        let event = LogEvent::new(Severity::Trace, PROBE_MESSAGE)?;
        if (self.formatter)(&event).trim().is_empty() {
            return Err(LoggerError::config(
                "Layout",
                "formatter returned an empty string for a valid event",
            ));
        }
        Ok(())
    }

    /// Re-validate the event and return the formatter's output.
    pub fn format(&self, event: &LogEvent) -> Result<String> {
        event.validate()?;
        let rendered = (self.formatter)(event);
        if rendered.trim().is_empty() {
            return Err(LoggerError::config(
                "Layout",
                format!("'{}' formatter returned an empty string", self.name),
            ));
        }
        Ok(rendered)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout").field("name", &self.name).finish()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layout({})", self.name)
    }
}
