//! Property-based tests for formatters and threshold filtering

use applog::{Appender, LogLevel, OutputFormat, Record, Registry, Result};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;

const LEVELS: [LogLevel; 5] = [
    LogLevel::Debug,
    LogLevel::Info,
    LogLevel::Warning,
    LogLevel::Error,
    LogLevel::Critical,
];

struct MemoryAppender {
    messages: Arc<Mutex<Vec<String>>>,
    threshold: LogLevel,
}

impl Appender for MemoryAppender {
    fn append(&mut self, record: &Record) -> Result<()> {
        self.messages.lock().push(record.message.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn set_threshold(&mut self, level: LogLevel) {
        self.threshold = level;
    }

    fn name(&self) -> &str {
        "memory"
    }
}

proptest! {
    #[test]
    fn json_lines_always_parse(message in ".*", name in "[a-zA-Z][a-zA-Z0-9._-]{0,15}") {
        let record = Record::new(name.as_str(), LogLevel::Info, message.clone())
            .with_location("src/lib.rs", 1);
        let line = OutputFormat::Json.format(&record);

        prop_assert!(!line.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(parsed["message"].as_str().unwrap(), message.as_str());
        prop_assert_eq!(parsed["name"].as_str().unwrap(), name.as_str());
        for key in ["timestamp", "level", "name", "message", "pathname", "lineno"] {
            prop_assert!(parsed.get(key).is_some());
        }
    }

    #[test]
    fn json_trace_roundtrips(trace in ".+") {
        let record = Record::new("app", LogLevel::Error, "failed").with_trace(trace.clone());
        let line = OutputFormat::Json.format(&record);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(parsed["exc_info"].as_str().unwrap(), trace.as_str());
    }

    #[test]
    fn record_emitted_iff_at_or_above_threshold(
        record_idx in 0usize..5,
        threshold_idx in 0usize..5,
    ) {
        let level = LEVELS[record_idx];
        let threshold = LEVELS[threshold_idx];

        let messages = Arc::new(Mutex::new(Vec::new()));
        let registry = Arc::new(Registry::new());
        registry.add_appender(Box::new(MemoryAppender {
            messages: Arc::clone(&messages),
            threshold: LogLevel::Debug,
        }));
        registry.set_level(threshold);

        registry.logger("app").log(level, "probe");

        let emitted = !messages.lock().is_empty();
        prop_assert_eq!(emitted, level >= threshold);
    }

    #[test]
    fn text_lines_carry_level_name_and_message(
        message in "[^\\r\\n]{0,64}",
        record_idx in 0usize..5,
    ) {
        let level = LEVELS[record_idx];
        let record = Record::new("app", level, message.clone());
        let line = OutputFormat::Text.format(&record);

        prop_assert!(line.contains(level.to_str()));
        let separator = "app \u{bb} ";
        prop_assert!(line.contains(separator));
        prop_assert!(line.ends_with(message.as_str()));
    }
}
