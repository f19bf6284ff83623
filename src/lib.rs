//! # Applog
//!
//! Process-wide logging facility: one shared registry per process routing
//! records to a coloured console appender and a daily-rotating file appender.
//!
//! ## Features
//!
//! - **One-time initialization**: the first [`init`] call fixes the
//!   configuration for the process lifetime; later calls are no-ops
//! - **Two destinations**: styled console output on stderr and a file that
//!   rotates at local midnight, archived as `<name>.YYYY-MM-DD`
//! - **JSON or text file lines**: one parseable JSON object per line when
//!   `json_file` is set
//! - **Panic capture**: unhandled panics are logged as CRITICAL before the
//!   default handler runs
//! - **`log` facade capture**: records from dependencies flow into the same
//!   pipeline
//!
//! ```no_run
//! use applog::{get_logger, init, InitConfig, LogLevel};
//!
//! init(InitConfig::new().with_level(LogLevel::Debug))?;
//!
//! let log = get_logger("server");
//! log.info("listening");
//! log.warning("low disk space");
//! # Ok::<(), applog::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

mod bridge;
mod hook;

pub mod prelude {
    pub use crate::appenders::{Appender, ConsoleAppender, RotatingFileAppender, RotationPolicy};
    pub use crate::core::{
        get_logger, init, reset_for_tests, set_level, InitConfig, LogLevel, Logger, LoggerError,
        OutputFormat, Record, Registry, Result,
    };
}

pub use crate::appenders::{Appender, ConsoleAppender, RotatingFileAppender, RotationPolicy};
pub use crate::core::{
    get_logger, init, render_error_chain, reset_for_tests, set_level, InitConfig, LogLevel,
    Logger, LoggerError, OutputFormat, Record, Registry, Result,
};
