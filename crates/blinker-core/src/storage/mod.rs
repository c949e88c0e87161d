mod config;
mod settings;

pub use config::{Config, DefaultsConfig, LoggingConfig, NotificationsConfig, CONFIG_FILE};
pub use settings::{
    ConfigStore, MemorySettingsStore, SettingsStore, KEY_BREAK_TIME, KEY_VIBRATION_TIME,
    KEY_WORK_TIME,
};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Resolves the config directory without touching the filesystem.
///
/// `BLINKER_CONFIG_DIR` wins if set; otherwise `~/.config/blinker[-dev]/`
/// based on `BLINKER_ENV`. Set `BLINKER_ENV=dev` to use the development
/// directory.
pub fn config_dir() -> PathBuf {
    match std::env::var_os("BLINKER_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("BLINKER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("blinker-dev")
            } else {
                base_dir.join("blinker")
            }
        }
    }
}

/// Returns the config directory, creating it if needed.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
