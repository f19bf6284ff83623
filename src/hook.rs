//! Panic capture
//!
//! Replaces the process panic hook with one that routes the panic through the
//! process-wide registry as a CRITICAL record before delegating to the
//! previously installed hook, so default diagnostics and termination
//! behavior are preserved.

use crate::core::level::LogLevel;
use crate::core::record::Record;
use crate::core::registry;
use std::any::Any;
use std::backtrace::Backtrace;
use std::panic;
use std::sync::Once;

static INSTALL: Once = Once::new();

pub(crate) fn install() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if let Some(registry) = registry::try_global() {
                let message = payload_message(info.payload());
                let mut record = Record::new(
                    registry::ROOT_NAME,
                    LogLevel::Critical,
                    format!("unhandled panic: {}", message),
                )
                .with_trace(Backtrace::force_capture().to_string());
                if let Some(location) = info.location() {
                    record = record.with_location(location.file(), location.line());
                }
                registry.emit(&record);
                let _ = registry.flush();
            }
            previous(info);
        }));
    });
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
