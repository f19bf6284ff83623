//! Record formatters
//!
//! Pure functions from a [`Record`] to an output string. Two file-destined
//! formats (plain text and JSON lines) plus the ANSI-coloured console format.

use super::record::Record;
use chrono::Local;

/// Timestamp layout for human-readable output (local time).
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp layout for JSON lines (UTC, millisecond precision, trailing Z).
const JSON_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

const ANSI_RESET: &str = "\x1b[0m";

/// Output format for the file appender
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `2025-01-08 10:30:45 INFO     app » Request processed`
    #[default]
    Text,

    /// One JSON object per line, for machine processing
    Json,
}

impl OutputFormat {
    pub fn format(&self, record: &Record) -> String {
        match self {
            OutputFormat::Text => format_text(record),
            OutputFormat::Json => format_json(record),
        }
    }
}

fn format_text(record: &Record) -> String {
    let timestamp = record.timestamp.with_timezone(&Local).format(TIME_FORMAT);
    let mut line = format!(
        "{} {:<8} {} \u{bb} {}",
        timestamp,
        record.level.to_str(),
        record.name,
        record.message
    );
    if let Some(ref trace) = record.trace {
        line.push('\n');
        line.push_str(trace);
    }
    line
}

/// Every record serializes to a single valid JSON object, whatever the
/// message contains. Non-ASCII text passes through as UTF-8.
fn format_json(record: &Record) -> String {
    let mut data = serde_json::Map::new();
    data.insert(
        "timestamp".to_string(),
        serde_json::Value::String(record.timestamp.format(JSON_TIME_FORMAT).to_string()),
    );
    data.insert(
        "level".to_string(),
        serde_json::Value::String(record.level.to_str().to_string()),
    );
    data.insert(
        "name".to_string(),
        serde_json::Value::String(record.name.clone()),
    );
    data.insert(
        "message".to_string(),
        serde_json::Value::String(record.message.clone()),
    );
    data.insert(
        "pathname".to_string(),
        serde_json::Value::String(record.pathname.clone()),
    );
    data.insert(
        "lineno".to_string(),
        serde_json::Value::Number(record.lineno.into()),
    );
    if let Some(ref trace) = record.trace {
        data.insert(
            "exc_info".to_string(),
            serde_json::Value::String(trace.clone()),
        );
    }
    serde_json::Value::Object(data).to_string()
}

/// ANSI-coloured console line: `<timestamp> <coloured level> <emoji> <message>`.
/// The colour is reset right after the level column so it never bleeds into
/// subsequent output.
pub(crate) fn coloured(record: &Record) -> String {
    let timestamp = record.timestamp.with_timezone(&Local).format(TIME_FORMAT);
    let mut line = format!(
        "{} {}{:<8}{} {} {}",
        timestamp,
        record.level.ansi_code(),
        record.level.to_str(),
        ANSI_RESET,
        record.level.emoji(),
        record.message
    );
    if let Some(ref trace) = record.trace {
        line.push('\n');
        line.push_str(trace);
    }
    line
}

/// Render an error and its `source()` chain into a trace string.
pub fn render_error_chain(error: &dyn std::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str("\ncaused by: ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
