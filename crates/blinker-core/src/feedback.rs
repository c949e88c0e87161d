//! Vibration feedback fired at phase boundaries.
//!
//! Feedback is fire-and-forget: [`trigger`] hands the waveform to a
//! [`Vibrator`] and returns immediately, so the tick loop never waits on
//! the motor. A device without vibration support degrades to a notice.

use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::observer::StatusObserver;

/// "Back to work" waveform: initial delay, then vibrate/pause alternating.
///
/// Five 500 ms pulses separated by 500 ms pauses. Played once, never
/// repeated, not configurable.
pub const INTERVAL_PATTERN_MS: [u64; 10] = [0, 500, 500, 500, 500, 500, 500, 500, 500, 500];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VibrationFeedback {
    /// Single pulse when work ends.
    Continuous { duration_ms: u64 },
    /// Fixed pulse train when a break ends.
    Interval,
}

impl VibrationFeedback {
    /// Continuous pulse of `secs` seconds, or `None` if `secs` is zero.
    pub fn continuous_secs(secs: u64) -> Option<Self> {
        if secs == 0 {
            return None;
        }
        Some(Self::Continuous {
            duration_ms: secs.saturating_mul(1000),
        })
    }

    /// Waveform timings in milliseconds.
    ///
    /// Even indices are off-time, odd indices are on-time.
    pub fn waveform(&self) -> Vec<u64> {
        match self {
            Self::Continuous { duration_ms } => vec![0, *duration_ms],
            Self::Interval => INTERVAL_PATTERN_MS.to_vec(),
        }
    }

    /// Number of vibrate segments in the waveform.
    pub fn pulse_count(&self) -> usize {
        self.waveform().iter().skip(1).step_by(2).count()
    }

    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.waveform().iter().sum())
    }
}

/// Vibration capability of the host.
///
/// Implementations must not block: `vibrate` starts the waveform and
/// returns.
pub trait Vibrator: Send + Sync {
    /// Whether the host can vibrate at all.
    fn is_available(&self) -> bool;

    /// Start playing the feedback waveform.
    fn vibrate(&self, feedback: &VibrationFeedback);

    /// Best-effort stop of any waveform in progress.
    fn cancel(&self);
}

/// Fire `feedback` and show `notice`.
///
/// When no vibration capability exists the feedback is skipped and only
/// the notice is shown. Returns whether vibration was started.
pub fn trigger(
    vibrator: &dyn Vibrator,
    observer: &dyn StatusObserver,
    feedback: Option<&VibrationFeedback>,
    notice: &str,
) -> bool {
    let started = match feedback {
        None => {
            tracing::debug!("vibration duration is zero, skipping vibration");
            false
        }
        Some(_) if !vibrator.is_available() => {
            tracing::warn!("no vibrator available, showing notice only");
            false
        }
        Some(feedback) => {
            tracing::debug!(?feedback, "playing vibration feedback");
            vibrator.vibrate(feedback);
            true
        }
    };
    if !notice.is_empty() {
        observer.notice(notice);
    }
    started
}

/// A host with no vibration support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVibrator;

impl Vibrator for NoVibrator {
    fn is_available(&self) -> bool {
        false
    }

    fn vibrate(&self, _feedback: &VibrationFeedback) {}

    fn cancel(&self) {}
}

/// Desktop stand-in for a vibration motor: rings the terminal bell once
/// per on-segment of the waveform.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Default)]
pub struct BellVibrator {
    playing: Mutex<Option<JoinHandle<()>>>,
}

impl BellVibrator {
    pub fn new() -> Self {
        Self::default()
    }

    fn ring() {
        use std::io::Write;
        let mut err = std::io::stderr();
        let _ = err.write_all(b"\x07");
        let _ = err.flush();
    }
}

impl Vibrator for BellVibrator {
    fn is_available(&self) -> bool {
        tokio::runtime::Handle::try_current().is_ok()
    }

    fn vibrate(&self, feedback: &VibrationFeedback) {
        let waveform = feedback.waveform();
        let handle = tokio::spawn(async move {
            for (i, ms) in waveform.into_iter().enumerate() {
                if i % 2 == 1 {
                    Self::ring();
                }
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }
        });
        let mut playing = self.playing.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = playing.replace(handle) {
            previous.abort();
        }
    }

    fn cancel(&self) {
        let mut playing = self.playing.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = playing.take() {
            handle.abort();
        }
    }
}
