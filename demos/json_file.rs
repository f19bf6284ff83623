//! JSON-file mode: every line in logs/app.log is one JSON object.
//!
//! Run with: cargo run --example json_file

use applog::{get_logger, init, InitConfig, LogLevel, RotationPolicy};

fn main() -> applog::Result<()> {
    init(
        InitConfig::new()
            .with_level(LogLevel::Debug)
            .with_json_file(true)
            .with_rotation(RotationPolicy::new().with_max_backups(7)),
    )?;

    let log = get_logger("demo.json");
    log.info("structured record");
    log.child("worker").warning("child logger record");

    if let Err(e) = std::fs::read_to_string("does-not-exist.toml") {
        log.error_with("could not load configuration", &e);
    }

    Ok(())
}
