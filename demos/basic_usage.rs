//! Quick demonstration of the logging facility.
//!
//! Run with: cargo run --example basic_usage [-- --debug]

use applog::{get_logger, info, init, InitConfig, LogLevel};

fn main() -> applog::Result<()> {
    let debug = std::env::args().any(|arg| arg == "--debug");
    let level = if debug { LogLevel::Debug } else { LogLevel::Info };

    init(InitConfig::new().with_level(level))?;
    let log = get_logger("demo");

    log.debug("debug message");
    log.info("info message");
    log.warning("warning message");
    info!(log, "macro message with a value: {}", 42);

    if let Err(e) = "not a number".parse::<i32>() {
        log.error_with("oh no, cannot parse", &e);
    }

    Ok(())
}
