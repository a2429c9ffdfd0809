//! File logging. The terminal belongs to the UI, so nothing is logged to it.

use std::fs::{self, File};
use std::sync::Mutex;

use color_eyre::eyre::{WrapErr, eyre};
use mechwatch_config::Config;
use tracing_subscriber::filter::LevelFilter;

/// Install a subscriber appending to the log file at `level`.
///
/// Logging is skipped when the platform has no data directory.
pub fn init(level: &str) -> color_eyre::Result<()> {
    let level: LevelFilter = level
        .parse()
        .wrap_err_with(|| format!("Invalid log_level `{level}`"))?;

    let Some(path) = Config::log_path() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| eyre!(e))
}
