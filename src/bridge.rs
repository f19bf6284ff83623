//! `log` facade capture
//!
//! Routes records emitted through the `log` crate (warnings and errors from
//! dependencies, typically) into the process-wide registry, carrying the
//! facade target as the logger name.

use crate::core::level::LogLevel;
use crate::core::record::Record;
use crate::core::registry;

struct FacadeBridge;

static BRIDGE: FacadeBridge = FacadeBridge;

impl log::Log for FacadeBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        match registry::try_global() {
            Some(registry) => LogLevel::from(metadata.level()) >= registry.level(),
            None => false,
        }
    }

    fn log(&self, facade: &log::Record) {
        if let Some(registry) = registry::try_global() {
            let level = LogLevel::from(facade.level());
            let record = Record::new(facade.target(), level, facade.args().to_string())
                .with_location(facade.file().unwrap_or(""), facade.line().unwrap_or(0));
            registry.emit(&record);
        }
    }

    fn flush(&self) {
        if let Some(registry) = registry::try_global() {
            let _ = registry.flush();
        }
    }
}

/// Install the bridge as the facade's logger. Tolerates a facade logger that
/// is already set (the existing one keeps receiving records).
pub(crate) fn install(level: LogLevel) {
    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
}
