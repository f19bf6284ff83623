//! Appender implementations

pub mod console;
pub mod rotating_file;

use crate::core::{error::Result, level::LogLevel, record::Record};

/// A log output destination with its own severity threshold.
pub trait Appender: Send {
    fn append(&mut self, record: &Record) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn threshold(&self) -> LogLevel;
    fn set_threshold(&mut self, level: LogLevel);
    fn name(&self) -> &str;
}

pub use console::ConsoleAppender;
pub use rotating_file::{RotatingFileAppender, RotationPolicy};
