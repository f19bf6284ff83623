//! Log record structure

use super::level::LogLevel;
use chrono::{DateTime, Utc};

/// A single log event. Built at the call site, consumed by formatters and
/// appenders, then discarded.
#[derive(Debug, Clone)]
pub struct Record {
    pub name: String,
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub pathname: String,
    pub lineno: u32,
    /// Rendered error chain or backtrace, when the record carries one.
    pub trace: Option<String>,
}

impl Record {
    pub fn new(name: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            timestamp: Utc::now(),
            message: message.into(),
            pathname: String::new(),
            lineno: 0,
            trace: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, pathname: &str, lineno: u32) -> Self {
        self.pathname = pathname.to_string();
        self.lineno = lineno;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_construction() {
        let record = Record::new("app", LogLevel::Info, "hello");
        assert_eq!(record.name, "app");
        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.message, "hello");
        assert!(record.trace.is_none());
        assert!(record.pathname.is_empty());
    }

    #[test]
    fn test_record_builders() {
        let record = Record::new("app", LogLevel::Error, "boom")
            .with_location("src/main.rs", 42)
            .with_trace("caused by: disk full");

        assert_eq!(record.pathname, "src/main.rs");
        assert_eq!(record.lineno, 42);
        assert_eq!(record.trace.as_deref(), Some("caused by: disk full"));
    }
}
