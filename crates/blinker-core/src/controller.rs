//! Control surface: validate user input, remember it, drive the service.

use std::num::IntErrorKind;

use crate::cycle::{CycleConfig, DEFAULT_BREAK_SECS, DEFAULT_VIBRATION_SECS, DEFAULT_WORK_SECS};
use crate::error::{Result, ValidationError};
use crate::service::CycleService;
use crate::storage::{SettingsStore, KEY_BREAK_TIME, KEY_VIBRATION_TIME, KEY_WORK_TIME};

/// Parse a duration entered by the user into seconds.
///
/// Accepts a bare integer (seconds) or an integer with an `s`, `m` or `h`
/// suffix: `"90"`, `"90s"`, `"20m"`, `"1h"`.
///
/// # Errors
///
/// Empty, non-numeric, negative, and overflowing input are rejected.
pub fn parse_duration(field: &str, input: &str) -> Result<u64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }

    let (number, multiplier) = if let Some(n) = trimmed.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = trimmed.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = trimmed.strip_suffix('s') {
        (n, 1)
    } else {
        (trimmed, 1)
    };

    let value: i64 = number.trim().parse().map_err(|e: std::num::ParseIntError| {
        match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ValidationError::OutOfRange {
                field: field.to_string(),
                value: input.to_string(),
            },
            _ => ValidationError::NotANumber {
                field: field.to_string(),
                value: input.to_string(),
            },
        }
    })?;
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }

    (value as u64)
        .checked_mul(multiplier)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: field.to_string(),
            value: input.to_string(),
        })
}

/// Turn the three raw inputs into a cycle config.
///
/// Work and break must be positive; a zero vibration disables the
/// post-work pulse.
pub fn parse_cycle_input(
    work: &str,
    break_time: &str,
    vibration: &str,
) -> Result<CycleConfig, ValidationError> {
    let work_secs = parse_duration("work", work)?;
    let break_secs = parse_duration("break", break_time)?;
    let vibration_secs = parse_duration("vibration", vibration)?;
    CycleConfig::new(work_secs, break_secs, vibration_secs)
}

pub struct Controller<S: SettingsStore> {
    store: S,
    service: CycleService,
}

impl<S: SettingsStore> Controller<S> {
    pub fn new(store: S, service: CycleService) -> Self {
        Self { store, service }
    }

    pub fn service(&self) -> &CycleService {
        &self.service
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.service.is_running()
    }

    /// Values to pre-fill the surface with: the last ones started, or the
    /// built-in defaults.
    pub fn prefill(&self) -> Result<CycleConfig> {
        let read = |key: &str, fallback: u64| -> Result<u64> {
            match self.store.get_int(key)? {
                Some(value) if value >= 0 => Ok(value as u64),
                Some(value) => {
                    tracing::warn!(key, value, "ignoring negative stored duration");
                    Ok(fallback)
                }
                None => Ok(fallback),
            }
        };
        Ok(CycleConfig {
            work_secs: read(KEY_WORK_TIME, DEFAULT_WORK_SECS)?,
            break_secs: read(KEY_BREAK_TIME, DEFAULT_BREAK_SECS)?,
            vibration_secs: read(KEY_VIBRATION_TIME, DEFAULT_VIBRATION_SECS)?,
        })
    }

    /// Validate raw input, persist it, and (re)start the cycle.
    ///
    /// # Errors
    ///
    /// Invalid input is rejected before anything is persisted or started.
    pub async fn start(
        &mut self,
        work: &str,
        break_time: &str,
        vibration: &str,
    ) -> Result<CycleConfig, ValidationError> {
        let config = parse_cycle_input(work, break_time, vibration)?;
        self.start_with(config).await?;
        Ok(config)
    }

    /// Same as [`Controller::start`] for an already-typed config.
    pub async fn start_with(&mut self, config: CycleConfig) -> Result<(), ValidationError> {
        let config = CycleConfig::new(config.work_secs, config.break_secs, config.vibration_secs)?;
        if let Err(e) = self.persist(&config) {
            // The cycle still runs; only the next pre-fill is affected.
            tracing::warn!("failed to persist cycle defaults: {e}");
        }
        self.service.start(config).await;
        Ok(())
    }

    /// Halt the cycle and any feedback in progress.
    pub async fn stop(&mut self) -> bool {
        self.service.stop().await
    }

    fn persist(&mut self, config: &CycleConfig) -> Result<()> {
        for (key, value) in [
            (KEY_WORK_TIME, config.work_secs),
            (KEY_BREAK_TIME, config.break_secs),
            (KEY_VIBRATION_TIME, config.vibration_secs),
        ] {
            let value = i64::try_from(value).map_err(|_| ValidationError::OutOfRange {
                field: key.to_string(),
                value: value.to_string(),
            })?;
            self.store.put_int(key, value)?;
        }
        tracing::debug!(?config, "saved cycle defaults");
        Ok(())
    }
}
