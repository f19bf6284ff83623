//! Console appender implementation
//!
//! The rendering style is chosen once at construction: a `colored`-based
//! styled renderer when stderr is an interactive terminal, a raw ANSI
//! formatter otherwise. Where ANSI is unsupported the raw escapes may show
//! through; that degradation is accepted rather than dropping colour support.

use crate::appenders::Appender;
use crate::core::{format, LogLevel, Record, Result};
use chrono::Local;
use colored::Colorize;
use std::io::{self, IsTerminal, Write};

/// Rendering strategy for console output.
pub(crate) trait ConsoleStyle: Send {
    fn render(&self, record: &Record) -> String;
}

/// `colored`-based rendering: short timestamp, per-level emoji in place of a
/// level column, message tinted with the level colour.
struct StyledConsole;

impl ConsoleStyle for StyledConsole {
    fn render(&self, record: &Record) -> String {
        let timestamp = record
            .timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string();
        let message = match record.level {
            LogLevel::Critical => record.message.as_str().on_red().to_string(),
            level => record
                .message
                .as_str()
                .color(level.color_code())
                .to_string(),
        };
        let mut line = format!(
            "{} {} {}",
            timestamp.dimmed(),
            record.level.emoji(),
            message
        );
        if let Some(ref trace) = record.trace {
            line.push('\n');
            line.push_str(&trace.as_str().red().to_string());
        }
        line
    }
}

/// Raw ANSI fallback: full timestamp, coloured padded level column, emoji.
struct AnsiConsole;

impl ConsoleStyle for AnsiConsole {
    fn render(&self, record: &Record) -> String {
        format::coloured(record)
    }
}

fn detect_style() -> Box<dyn ConsoleStyle> {
    #[cfg(windows)]
    let _ = colored::control::set_virtual_terminal(true);

    if io::stderr().is_terminal() {
        Box::new(StyledConsole)
    } else {
        Box::new(AnsiConsole)
    }
}

pub struct ConsoleAppender {
    style: Box<dyn ConsoleStyle>,
    threshold: LogLevel,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            style: detect_style(),
            threshold: LogLevel::default(),
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, level: LogLevel) -> Self {
        self.threshold = level;
        self
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &Record) -> Result<()> {
        let rendered = self.style.render(record);
        // Best effort: a failing terminal must never crash the call site.
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", rendered);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stderr().flush()?;
        Ok(())
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn set_threshold(&mut self, level: LogLevel) {
        self.threshold = level;
    }

    fn name(&self) -> &str {
        "console"
    }
}
