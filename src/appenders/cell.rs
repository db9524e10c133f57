//! Cell appender implementation
//!
//! Writes formatted events into a single worksheet cell through the
//! `RangeSink` host seam, coloring the cell font by severity.

use crate::appenders::base::{Appender, AppenderCore, AppenderKind, DispatchConfig};
use crate::core::error::{LoggerError, Result};
use crate::core::log_event::LogEvent;
use crate::core::severity::Severity;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

impl fmt::Display for VerticalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerticalAlignment::Top => "Top",
            VerticalAlignment::Center => "Center",
            VerticalAlignment::Bottom => "Bottom",
        };
        write!(f, "{}", s)
    }
}

/// Host seam for the cell-writing API. Implementations are expected to make
/// writes observable immediately after the call returns; the crate's test
/// doubles are fully synchronous.
pub trait RangeSink: Send + Sync {
    fn address(&self) -> String;
    fn cell_count(&self) -> u32;
    fn set_value(&self, text: &str) -> Result<()>;
    fn set_font_color(&self, hex: &str) -> Result<()>;
    fn set_vertical_alignment(&self, alignment: VerticalAlignment) -> Result<()>;
}

const EVENT_SEVERITIES: [Severity; 4] = [
    Severity::Error,
    Severity::Warn,
    Severity::Info,
    Severity::Trace,
];

/// Normalize a color to `#rrggbb`. Accepts 6 hex digits with or without a
/// leading `#`.
fn normalize_hex(color: &str, severity: Severity) -> Result<String> {
    let digits = color.strip_prefix('#').unwrap_or(color);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LoggerError::config(
            "CellAppender",
            format!("invalid hex color '{}' for severity {}", color, severity),
        ));
    }
    Ok(format!("#{}", digits.to_ascii_lowercase()))
}

/// Appender that owns an immutable single-cell target and a per-severity
/// font color map, both fixed at first construction.
pub struct CellAppender {
    core: AppenderCore,
    sink: Arc<dyn RangeSink>,
    event_fonts: HashMap<Severity, String>,
}

impl CellAppender {
    /// Create a cell appender over a single-cell range. `colors` overrides
    /// the font color for the severities it names; the documented defaults
    /// fill the rest. A multi-cell range or a malformed color fails
    /// construction.
    pub fn new(
        config: Arc<DispatchConfig>,
        sink: Arc<dyn RangeSink>,
        colors: Option<HashMap<Severity, String>>,
    ) -> Result<Self> {
        let cells = sink.cell_count();
        if cells != 1 {
            return Err(LoggerError::config(
                "CellAppender",
                format!("range '{}' spans {} cells, expected 1", sink.address(), cells),
            ));
        }

        let overrides = colors.unwrap_or_default();
        if let Some(severity) = overrides.keys().find(|s| !s.is_event_severity()) {
            return Err(LoggerError::config(
                "CellAppender",
                format!("color map names non-event severity {}", severity),
            ));
        }

        let mut event_fonts = HashMap::new();
        for severity in EVENT_SEVERITIES {
            let color = match overrides.get(&severity) {
                Some(color) => normalize_hex(color, severity)?,
                None => severity.default_hex_color().to_string(),
            };
            event_fonts.insert(severity, color);
        }

        Ok(Self {
            core: AppenderCore::new(config),
            sink,
            event_fonts,
        })
    }

    /// The effective per-severity font color map.
    pub fn event_fonts(&self) -> &HashMap<Severity, String> {
        &self.event_fonts
    }

    pub fn address(&self) -> String {
        self.sink.address()
    }
}

impl fmt::Debug for CellAppender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellAppender")
            .field("event_fonts", &self.event_fonts)
            .finish_non_exhaustive()
    }
}

impl Appender for CellAppender {
    fn core(&self) -> &AppenderCore {
        &self.core
    }

    fn kind(&self) -> AppenderKind {
        AppenderKind::Cell
    }

    fn send_event(&self, formatted: &str, event: &LogEvent) -> Result<()> {
        self.sink.set_value(formatted)?;
        if let Some(color) = self.event_fonts.get(&event.severity()) {
            self.sink.set_font_color(color)?;
        }
        self.sink.set_vertical_alignment(VerticalAlignment::Top)
    }

    fn describe_suffix(&self) -> String {
        format!("cell={}", self.sink.address())
    }
}
