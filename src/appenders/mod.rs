//! Output appenders for the logging system
//!
//! - `base`: the shared appender contract and dispatch configuration
//! - `console`: writes to the host console channel
//! - `cell`: writes into a single worksheet cell through the `RangeSink` seam

pub mod base;
pub mod cell;
pub mod console;

pub use base::{Appender, AppenderCore, AppenderKind, DispatchConfig};
pub use cell::{CellAppender, RangeSink, VerticalAlignment};
pub use console::ConsoleAppender;
