//! TOML-based application configuration.
//!
//! Stores:
//! - The last durations the user started a cycle with (pre-fill defaults)
//! - Notification preferences (desktop notices, terminal-bell vibration)
//! - Default log filter
//!
//! Configuration is stored at `~/.config/blinker/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{config_dir, data_dir};
use crate::cycle::{CycleConfig, DEFAULT_BREAK_SECS, DEFAULT_VIBRATION_SECS, DEFAULT_WORK_SECS};
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE: &str = "config.toml";

/// Durations pre-filled into the control surface, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_work_time")]
    pub work_time: u64,
    #[serde(default = "default_break_time")]
    pub break_time: u64,
    #[serde(default = "default_vibration_time")]
    pub vibration_time: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Show phase-boundary notices as desktop notifications.
    #[serde(default = "default_true")]
    pub desktop: bool,
    /// Ring the terminal bell in place of a vibration motor.
    #[serde(default = "default_true")]
    pub bell: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter used when `BLINKER_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/blinker/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_work_time() -> u64 {
    DEFAULT_WORK_SECS
}
fn default_break_time() -> u64 {
    DEFAULT_BREAK_SECS
}
fn default_vibration_time() -> u64 {
    DEFAULT_VIBRATION_SECS
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            work_time: default_work_time(),
            break_time: default_break_time(),
            vibration_time: default_vibration_time(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            desktop: true,
            bell: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent) = parent {
            for part in parent.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;
        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(format!("{value:?}: {e}")))?,
            ),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<u64>()
                    .map_err(|e| invalid(format!("{value:?}: {e}")))?;
                serde_json::Value::Number(n.into())
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(invalid("cannot set a whole section".into()));
            }
            _ => serde_json::Value::String(value.into()),
        };
        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join(CONFIG_FILE))
    }

    /// Load from the default location, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match Self::read_from(path)? {
            Some(cfg) => Ok(cfg),
            None => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Read the default location without creating anything.
    /// `Ok(None)` when no config has been written yet.
    pub fn read() -> Result<Option<Self>> {
        Self::read_from(&config_dir().join(CONFIG_FILE))
    }

    /// Read `path` if it exists. Never writes.
    pub fn read_from(path: &Path) -> Result<Option<Self>> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(load_failed(e.to_string()).into()),
        };
        let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        cfg.validate()?;
        Ok(Some(cfg))
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the key's type, or the result fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Work and break defaults must stay positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("defaults.work_time", self.defaults.work_time),
            ("defaults.break_time", self.defaults.break_time),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: "must be positive".into(),
                });
            }
        }
        Ok(())
    }

    /// Persisted defaults as a cycle config.
    pub fn cycle(&self) -> CycleConfig {
        CycleConfig {
            work_secs: self.defaults.work_time,
            break_secs: self.defaults.break_time,
            vibration_secs: self.defaults.vibration_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.defaults.work_time, 1200);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let cfg: Config = toml::from_str(indoc! {r#"
            [defaults]
            work_time = 600

            [notifications]
            desktop = false
        "#})
        .unwrap();
        assert_eq!(cfg.defaults.work_time, 600);
        assert_eq!(cfg.defaults.break_time, 120);
        assert!(!cfg.notifications.desktop);
        assert!(cfg.notifications.bell);
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("defaults.work_time").as_deref(), Some("1200"));
        assert_eq!(cfg.get("notifications.bell").as_deref(), Some("true"));
        assert_eq!(cfg.get("logging.level").as_deref(), Some("warn"));
        assert!(cfg.get("defaults.missing").is_none());
        assert!(cfg.get("defaults").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("defaults.break_time", "300").unwrap();
        cfg.set("notifications.desktop", "false").unwrap();
        cfg.set("logging.level", "debug").unwrap();
        assert_eq!(cfg.defaults.break_time, 300);
        assert!(!cfg.notifications.desktop);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("defaults.nonexistent", "1").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
        assert!(cfg.set("nope.work_time", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("notifications.bell", "loud").is_err());
        assert!(cfg.set("defaults.work_time", "-5").is_err());
        assert!(cfg.set("defaults", "1").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_rejects_zero_work_time() {
        let mut cfg = Config::default();
        assert!(cfg.set("defaults.work_time", "0").is_err());
        assert!(cfg.set("defaults.vibration_time", "0").is_ok());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn read_from_missing_file_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        assert_eq!(Config::read_from(&path).unwrap(), None);
        assert!(!path.exists());
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn read_from_existing_file_returns_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let cfg = Config::read_from(&path).unwrap().unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.cycle(), CycleConfig::default());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut cfg = Config::default();
        cfg.set("defaults.vibration_time", "3").unwrap();
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.vibration_time, 3);
        assert_eq!(loaded.cycle().vibration_secs, 3);
    }

    #[test]
    fn load_from_malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "defaults = 3 = 4").unwrap();
        assert!(Config::load_from(&path).is_err());
        assert!(Config::read_from(&path).is_err());
    }
}
