//! Process-wide logging registry and lifecycle
//!
//! One registry owns the configured appenders and the global severity
//! threshold. The process-wide instance is created lazily; initialization is
//! idempotent with first-writer-wins semantics: the first `init` call fixes
//! the appender configuration and level for the remainder of the process, and
//! later calls return without altering anything, even when invoked with
//! different arguments.

use super::error::Result;
use super::format::OutputFormat;
use super::level::LogLevel;
use super::logger::Logger;
use super::record::Record;
use crate::appenders::{Appender, ConsoleAppender, RotatingFileAppender, RotationPolicy};
use crate::{bridge, hook};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub(crate) const ROOT_NAME: &str = "root";

const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_FILE_NAME: &str = "app.log";

type SharedAppender = Arc<Mutex<Box<dyn Appender>>>;

/// Configuration for [`init`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InitConfig {
    /// Minimum severity to emit.
    pub level: LogLevel,
    /// Directory for file output, created if missing.
    pub log_dir: PathBuf,
    /// File name within `log_dir`.
    pub file_name: String,
    /// Emit JSON lines instead of plain text to the file appender.
    pub json_file: bool,
    /// Route records emitted through the `log` facade (e.g. warnings from
    /// dependencies) into this pipeline.
    pub capture_logs: bool,
    /// Retention and compression policy for rotated files.
    pub rotation: RotationPolicy,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            file_name: DEFAULT_FILE_NAME.to_string(),
            json_file: false,
            capture_logs: true,
            rotation: RotationPolicy::default(),
        }
    }
}

impl InitConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    #[must_use]
    pub fn with_json_file(mut self, json_file: bool) -> Self {
        self.json_file = json_file;
        self
    }

    #[must_use]
    pub fn with_capture_logs(mut self, capture_logs: bool) -> Self {
        self.capture_logs = capture_logs;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }
}

#[derive(Default)]
struct RegistryState {
    initialized: bool,
    level: LogLevel,
    appenders: Vec<SharedAppender>,
}

/// Registry owning the appender list and the global threshold.
///
/// The free functions in this module operate on the process-wide instance;
/// tests may construct standalone registries with their own appenders.
#[derive(Default)]
pub struct Registry {
    state: RwLock<RegistryState>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().initialized
    }

    pub fn level(&self) -> LogLevel {
        self.state.read().level
    }

    /// Configure appenders and threshold exactly once.
    ///
    /// Returns `Ok(true)` if this call performed the initialization and
    /// `Ok(false)` if the registry was already initialized (the configuration
    /// is left untouched in that case). Appender construction failures are
    /// fatal and leave the registry uninitialized.
    pub fn init(&self, config: &InitConfig) -> Result<bool> {
        let mut state = self.state.write();
        if state.initialized {
            return Ok(false);
        }

        let console = ConsoleAppender::new().with_threshold(config.level);

        let format = if config.json_file {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };
        let path = config.log_dir.join(&config.file_name);
        let file = RotatingFileAppender::with_policy(path, format, config.rotation.clone())?
            .with_threshold(config.level);

        state.appenders = vec![
            Arc::new(Mutex::new(Box::new(console) as Box<dyn Appender>)),
            Arc::new(Mutex::new(Box::new(file) as Box<dyn Appender>)),
        ];
        state.level = config.level;
        state.initialized = true;
        Ok(true)
    }

    /// Attach an additional appender. The appender list is append-only.
    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        let mut state = self.state.write();
        state.appenders.push(Arc::new(Mutex::new(appender)));
    }

    /// Update the global threshold and propagate it to every appender.
    pub fn set_level(&self, level: impl Into<LogLevel>) {
        let level = level.into();
        let appenders = {
            let mut state = self.state.write();
            state.level = level;
            state.appenders.clone()
        };
        for appender in &appenders {
            appender.lock().set_threshold(level);
        }
    }

    /// Route a record through every appender at or above its threshold.
    ///
    /// Appender failures are reported on stderr and never propagate: one
    /// broken destination must not prevent delivery to the others, nor crash
    /// the emitting call site.
    pub fn emit(&self, record: &Record) {
        let appenders = {
            let state = self.state.read();
            if record.level < state.level {
                return;
            }
            state.appenders.clone()
        };
        for appender in appenders {
            let mut guard = appender.lock();
            if record.level < guard.threshold() {
                continue;
            }
            if let Err(e) = guard.append(record) {
                eprintln!("[LOGGER ERROR] appender '{}' failed: {}", guard.name(), e);
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        let appenders = self.state.read().appenders.clone();
        for appender in appenders {
            appender.lock().flush()?;
        }
        Ok(())
    }

    /// Return a named handle bound to this registry. An empty name yields the
    /// root handle.
    pub fn logger(self: &Arc<Self>, name: &str) -> Logger {
        let name = if name.is_empty() { ROOT_NAME } else { name };
        Logger::new(name, Arc::clone(self))
    }

    /// Drop every appender and return to the uninitialized state, so a later
    /// `init` starts fresh. Intended for tests.
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.appenders.clear();
        state.level = LogLevel::default();
        state.initialized = false;
    }
}

static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();

pub(crate) fn global() -> &'static Arc<Registry> {
    GLOBAL.get_or_init(|| Arc::new(Registry::new()))
}

/// The process-wide registry, if it has been touched at all this process.
pub(crate) fn try_global() -> Option<&'static Arc<Registry>> {
    GLOBAL.get()
}

/// Initialize the process-wide registry exactly once.
///
/// The first call creates the log directory, attaches the console and
/// rotating-file appenders, sets the global threshold, installs the panic
/// hook, and (when `capture_logs`) bridges the `log` facade into the
/// pipeline. Subsequent calls return `Ok` without altering the
/// configuration, even when invoked with different arguments.
pub fn init(config: InitConfig) -> Result<()> {
    let registry = global();
    if registry.init(&config)? {
        hook::install();
        if config.capture_logs {
            bridge::install(config.level);
        }
    }
    Ok(())
}

/// Return a named handle bound to the process-wide registry, initializing it
/// with the default configuration first if nobody has.
///
/// If the implicit initialization fails (e.g. the default log directory
/// cannot be created), the failure is reported on stderr and the returned
/// handle emits to no destinations until a later [`init`] succeeds.
pub fn get_logger(name: &str) -> Logger {
    let registry = global();
    if !registry.is_initialized() {
        if let Err(e) = init(InitConfig::default()) {
            eprintln!("[LOGGER ERROR] implicit initialization failed: {}", e);
        }
    }
    registry.logger(name)
}

/// Change the global threshold. Accepts the enum or a case-insensitive name;
/// unrecognized names fall back to [`LogLevel::Info`].
pub fn set_level(level: impl Into<LogLevel>) {
    let level = level.into();
    global().set_level(level);
    log::set_max_level(level.to_level_filter());
}

/// Reset the process-wide registry to its uninitialized state. Intended for
/// test isolation; production code never needs this.
pub fn reset_for_tests() {
    global().reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = InitConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.file_name, "app.log");
        assert!(!config.json_file);
        assert!(config.capture_logs);
    }

    #[test]
    fn test_config_builders() {
        let config = InitConfig::new()
            .with_level(LogLevel::Debug)
            .with_log_dir("/tmp/logs")
            .with_file_name("svc.log")
            .with_json_file(true)
            .with_capture_logs(false);

        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(config.file_name, "svc.log");
        assert!(config.json_file);
        assert!(!config.capture_logs);
    }

    #[test]
    fn test_config_roundtrips_through_serde() {
        let config = InitConfig::new().with_level(LogLevel::Warning);
        let json = serde_json::to_string(&config).unwrap();
        let back: InitConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, LogLevel::Warning);
        assert_eq!(back.file_name, "app.log");
    }

    #[test]
    fn test_init_is_first_writer_wins() {
        let dir = tempdir().unwrap();
        let registry = Registry::new();

        let first = InitConfig::new()
            .with_log_dir(dir.path())
            .with_level(LogLevel::Debug);
        let second = InitConfig::new()
            .with_log_dir(dir.path())
            .with_level(LogLevel::Critical);

        assert!(registry.init(&first).unwrap());
        assert!(!registry.init(&second).unwrap());
        assert_eq!(registry.level(), LogLevel::Debug);
    }

    #[test]
    fn test_init_creates_log_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("var").join("log");
        let registry = Registry::new();

        registry
            .init(&InitConfig::new().with_log_dir(&nested))
            .unwrap();

        assert!(nested.is_dir());
        assert!(nested.join("app.log").exists());
    }

    #[test]
    fn test_init_failure_leaves_registry_uninitialized() {
        let dir = tempdir().unwrap();
        // A file where the log directory should be makes setup fail.
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, b"").unwrap();

        let registry = Registry::new();
        let result = registry.init(&InitConfig::new().with_log_dir(&blocked));

        assert!(result.is_err());
        assert!(!registry.is_initialized());
    }

    #[test]
    fn test_set_level_updates_global_threshold() {
        let registry = Registry::new();
        registry.set_level(LogLevel::Error);
        assert_eq!(registry.level(), LogLevel::Error);

        registry.set_level("warning");
        assert_eq!(registry.level(), LogLevel::Warning);
    }

    #[test]
    fn test_set_level_unknown_name_falls_back() {
        let registry = Registry::new();
        registry.set_level("chatty");
        assert_eq!(registry.level(), LogLevel::Info);
    }

    #[test]
    fn test_reset_returns_to_uninitialized() {
        let dir = tempdir().unwrap();
        let registry = Registry::new();
        registry
            .init(&InitConfig::new().with_log_dir(dir.path()))
            .unwrap();
        assert!(registry.is_initialized());

        registry.reset();
        assert!(!registry.is_initialized());
        assert_eq!(registry.level(), LogLevel::Info);
        // A second init succeeds after reset.
        assert!(registry
            .init(&InitConfig::new().with_log_dir(dir.path()))
            .unwrap());
    }

    #[test]
    fn test_root_logger_name() {
        let registry = Arc::new(Registry::new());
        assert_eq!(registry.logger("").name(), "root");
        assert_eq!(registry.logger("app").name(), "app");
    }
}
