//! Severity and post-dispatch action definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered by ascending verbosity.
///
/// `Off` disables all logging and is never a valid event severity; the four
/// event severities are numbered starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Severity {
    Off = 0,
    Error = 1,
    #[default]
    Warn = 2,
    Info = 3,
    Trace = 4,
}

impl Severity {
    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Off => "OFF",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Trace => "TRACE",
        }
    }

    /// Whether this is a valid event severity (`Off` is configuration-only).
    pub fn is_event_severity(&self) -> bool {
        !matches!(self, Severity::Off)
    }

    /// Whether events of this severity are tracked in critical history.
    pub fn is_critical(&self) -> bool {
        matches!(self, Severity::Error | Severity::Warn)
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Off => BrightBlack,
            Severity::Error => Red,
            Severity::Warn => Yellow,
            Severity::Info => Green,
            Severity::Trace => BrightBlack,
        }
    }

    /// Default font color used by the cell appender when no override is given.
    pub fn default_hex_color(&self) -> &'static str {
        match self {
            Severity::Off => "#000000",
            Severity::Error => "#ff0000",
            Severity::Warn => "#895a16",
            Severity::Info => "#000000",
            Severity::Trace => "#666666",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" => Ok(Severity::Off),
            "ERROR" => Ok(Severity::Error),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "INFO" => Ok(Severity::Info),
            "TRACE" => Ok(Severity::Trace),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}

/// What the logger does after dispatching a qualifying critical event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Action {
    /// Log and proceed.
    Continue,
    /// Log and raise an abort error to unwind the host script.
    #[default]
    Exit,
}

impl Action {
    pub fn to_str(&self) -> &'static str {
        match self {
            Action::Continue => "CONTINUE",
            Action::Exit => "EXIT",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CONTINUE" => Ok(Action::Continue),
            "EXIT" => Ok(Action::Exit),
            _ => Err(format!("Invalid action: '{}'", s)),
        }
    }
}
