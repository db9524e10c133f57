//! Console appender implementation

use crate::appenders::base::{Appender, AppenderCore, AppenderKind, DispatchConfig};
use crate::core::error::Result;
use crate::core::log_event::LogEvent;
use crate::core::severity::Severity;
use colored::Colorize;
use std::sync::Arc;

/// Writes formatted events to the host console channel: ERROR to stderr,
/// everything else to stdout. No state beyond the shared core.
pub struct ConsoleAppender {
    core: AppenderCore,
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new(config: Arc<DispatchConfig>) -> Self {
        Self {
            core: AppenderCore::new(config),
            use_colors: true,
        }
    }

    pub fn with_colors(config: Arc<DispatchConfig>, use_colors: bool) -> Self {
        Self {
            core: AppenderCore::new(config),
            use_colors,
        }
    }

    fn render(&self, formatted: &str, severity: Severity) -> String {
        if self.use_colors {
            formatted.color(severity.color_code()).to_string()
        } else {
            formatted.to_string()
        }
    }
}

impl Appender for ConsoleAppender {
    fn core(&self) -> &AppenderCore {
        &self.core
    }

    fn kind(&self) -> AppenderKind {
        AppenderKind::Console
    }

    fn send_event(&self, formatted: &str, event: &LogEvent) -> Result<()> {
        let line = self.render(formatted, event.severity());
        match event.severity() {
            Severity::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        Ok(())
    }

    fn describe_suffix(&self) -> String {
        format!("colors={}", self.use_colors)
    }
}
