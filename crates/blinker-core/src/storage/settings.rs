//! Key-value store for the durations pre-filled into the control surface.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::config::Config;
use crate::error::{ConfigError, Result};

pub const KEY_WORK_TIME: &str = "work_time";
pub const KEY_BREAK_TIME: &str = "break_time";
pub const KEY_VIBRATION_TIME: &str = "vibration_time";

/// Named integer values that survive process restarts.
pub trait SettingsStore: Send {
    /// `Ok(None)` when the key has never been stored.
    fn get_int(&self, key: &str) -> Result<Option<i64>>;

    fn put_int(&mut self, key: &str, value: i64) -> Result<()>;
}

/// Volatile store, for tests and embedders without a filesystem.
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    values: HashMap<String, i64>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.values.get(key).copied())
    }

    fn put_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by the `[defaults]` section of `config.toml`.
///
/// Every `put_int` rewrites the file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
}

impl ConfigStore {
    /// Open the config at its default location.
    pub fn open() -> Result<Self> {
        Self::open_at(&Config::path()?)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let config = Config::load_from(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn config_key(key: &str) -> String {
        format!("defaults.{key}")
    }
}

impl SettingsStore for ConfigStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>> {
        let Some(raw) = self.config.get(&Self::config_key(key)) else {
            return Ok(None);
        };
        let value = raw.parse::<i64>().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(value))
    }

    fn put_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.config.set(&Self::config_key(key), &value.to_string())?;
        self.config.save_to(&self.path)
    }
}
