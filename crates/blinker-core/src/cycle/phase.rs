use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Built-in work duration used when nothing has been persisted yet.
pub const DEFAULT_WORK_SECS: u64 = 20 * 60;
/// Built-in break duration used when nothing has been persisted yet.
pub const DEFAULT_BREAK_SECS: u64 = 2 * 60;
/// Built-in post-work vibration length used when nothing has been persisted yet.
pub const DEFAULT_VIBRATION_SECS: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    Working,
    OnBreak,
}

impl CyclePhase {
    /// The phase that follows this one.
    pub fn next(self) -> Self {
        match self {
            CyclePhase::Working => CyclePhase::OnBreak,
            CyclePhase::OnBreak => CyclePhase::Working,
        }
    }

    /// Prefix of the per-second status line.
    pub fn label(self) -> &'static str {
        match self {
            CyclePhase::Working => "Working",
            CyclePhase::OnBreak => "Break Rest",
        }
    }

    /// Status reported when the phase begins, before its first tick.
    pub fn entry_status(self) -> &'static str {
        match self {
            CyclePhase::Working => "Status: Working...",
            CyclePhase::OnBreak => "Status: Break Time...",
        }
    }
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CyclePhase::Working => f.write_str("working"),
            CyclePhase::OnBreak => f.write_str("on_break"),
        }
    }
}

/// Durations for one running cycle, all in seconds.
///
/// Immutable once handed to an engine. A new start command builds a new
/// config rather than mutating the running one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfig {
    pub work_secs: u64,
    pub break_secs: u64,
    /// Length of the pulse fired when work ends. Zero disables it.
    pub vibration_secs: u64,
}

impl CycleConfig {
    /// Build a validated config. Work and break must be positive.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotPositive`] when work or break is zero.
    pub fn new(work_secs: u64, break_secs: u64, vibration_secs: u64) -> Result<Self, ValidationError> {
        if work_secs == 0 {
            return Err(ValidationError::NotPositive {
                field: "work".into(),
                value: 0,
            });
        }
        if break_secs == 0 {
            return Err(ValidationError::NotPositive {
                field: "break".into(),
                value: 0,
            });
        }
        Ok(Self {
            work_secs,
            break_secs,
            vibration_secs,
        })
    }

    /// Duration of the given phase in seconds.
    pub fn phase_secs(&self, phase: CyclePhase) -> u64 {
        match phase {
            CyclePhase::Working => self.work_secs,
            CyclePhase::OnBreak => self.break_secs,
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            work_secs: DEFAULT_WORK_SECS,
            break_secs: DEFAULT_BREAK_SECS,
            vibration_secs: DEFAULT_VIBRATION_SECS,
        }
    }
}

/// Format seconds as `mm:ss`. Minutes are not wrapped at the hour.
pub fn format_remaining(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_alternate() {
        assert_eq!(CyclePhase::Working.next(), CyclePhase::OnBreak);
        assert_eq!(CyclePhase::OnBreak.next(), CyclePhase::Working);
    }

    #[test]
    fn config_rejects_zero_work_and_break() {
        assert!(matches!(
            CycleConfig::new(0, 5, 3),
            Err(ValidationError::NotPositive { ref field, .. }) if field == "work"
        ));
        assert!(matches!(
            CycleConfig::new(5, 0, 3),
            Err(ValidationError::NotPositive { ref field, .. }) if field == "break"
        ));
    }

    #[test]
    fn config_accepts_zero_vibration() {
        let cfg = CycleConfig::new(5, 5, 0).unwrap();
        assert_eq!(cfg.vibration_secs, 0);
        assert_eq!(cfg.phase_secs(CyclePhase::OnBreak), 5);
    }

    #[test]
    fn format_remaining_pads() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(65), "01:05");
        assert_eq!(format_remaining(20 * 60), "20:00");
        assert_eq!(format_remaining(90 * 60 + 1), "90:01");
    }

    #[test]
    fn default_config_matches_builtin_defaults() {
        let cfg = CycleConfig::default();
        assert_eq!(cfg.work_secs, 1200);
        assert_eq!(cfg.break_secs, 120);
        assert_eq!(cfg.vibration_secs, 20);
    }
}
