use std::{
    env,
    fs::{self, File, OpenOptions},
    path::PathBuf,
    str::FromStr,
    sync::Mutex,
};

use tracing::Level;
use tracing_subscriber::fmt;

/// Environment variable naming a log level, e.g. `RAPID_LOG=debug`.
pub const LOG_ENV: &str = "RAPID_LOG";

/// Send logs to a file, since the terminal belongs to the reader. Returns
/// the log path when logging is on.
pub fn init(verbose: bool) -> std::io::Result<Option<PathBuf>> {
    let level = match env::var(LOG_ENV).ok().and_then(|v| Level::from_str(&v).ok()) {
        Some(level) => level,
        None if verbose => Level::DEBUG,
        None => return Ok(None),
    };
    let Some(path) = reader_core::config::log_path() else {
        return Ok(None);
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    install(file, level)?;
    Ok(Some(path))
}

/// Install the global file subscriber; fails if one is already set.
fn install(file: File, level: Level) -> std::io::Result<()> {
    fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| std::io::Error::other(e.to_string()))
}
