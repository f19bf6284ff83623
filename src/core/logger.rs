//! Named logger handles

use super::format::render_error_chain;
use super::level::LogLevel;
use super::record::Record;
use super::registry::Registry;
use std::panic::Location;
use std::sync::Arc;

/// A lightweight named handle into a [`Registry`].
///
/// Handles are cheap to create and clone; any number of them may share one
/// registry. Names follow the dotted-path convention (`"net.client"` is a
/// child of `"net"`); all handles share the root configuration.
#[derive(Clone)]
pub struct Logger {
    name: String,
    registry: Arc<Registry>,
}

impl Logger {
    pub(crate) fn new(name: impl Into<String>, registry: Arc<Registry>) -> Self {
        Self {
            name: name.into(),
            registry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Derive a child handle named `<self>.<name>`, bound to the same registry.
    pub fn child(&self, name: &str) -> Logger {
        Logger {
            name: format!("{}.{}", self.name, name),
            registry: Arc::clone(&self.registry),
        }
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if level < self.registry.level() {
            return;
        }
        let location = Location::caller();
        let record = Record::new(&self.name, level, message)
            .with_location(location.file(), location.line());
        self.registry.emit(&record);
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[track_caller]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }

    /// Emit an ERROR record carrying the rendered `source()` chain of `error`
    /// as its trace.
    #[track_caller]
    pub fn error_with(&self, message: impl Into<String>, error: &dyn std::error::Error) {
        if LogLevel::Error < self.registry.level() {
            return;
        }
        let location = Location::caller();
        let record = Record::new(&self.name, LogLevel::Error, message)
            .with_location(location.file(), location.line())
            .with_trace(render_error_chain(error));
        self.registry.emit(&record);
    }
}
