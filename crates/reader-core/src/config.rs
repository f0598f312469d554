use std::path::PathBuf;

use directories::ProjectDirs;

pub const QUALIFIER: &str = "com";
pub const ORGANIZATION: &str = "rapid";
pub const APPLICATION: &str = "rapid";

pub const STATE_FILE: &str = "state.json";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_FILE: &str = "rapid.log";

pub fn config_root() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).map(|p| p.config_dir().to_path_buf())
}

pub fn state_path() -> Option<PathBuf> {
    config_root().map(|dir| dir.join(STATE_FILE))
}

pub fn config_path() -> Option<PathBuf> {
    config_root().map(|dir| dir.join(CONFIG_FILE))
}

pub fn log_path() -> Option<PathBuf> {
    config_root().map(|dir| dir.join(LOG_FILE))
}
