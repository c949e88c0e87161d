use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::CyclePhase;
use crate::feedback::VibrationFeedback;

/// Every state change of the cycle produces an Event.
/// The control surface renders them; `--json` prints them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CycleStarted {
        work_secs: u64,
        break_secs: u64,
        vibration_secs: u64,
        status: String,
        at: DateTime<Utc>,
    },
    /// One second elapsed inside a phase.
    Tick {
        phase: CyclePhase,
        remaining_secs: u64,
        status: String,
        at: DateTime<Utc>,
    },
    /// A phase ran out and the next one began.
    PhaseChanged {
        from: CyclePhase,
        to: CyclePhase,
        duration_secs: u64,
        /// `None` when the post-work pulse is disabled.
        feedback: Option<VibrationFeedback>,
        notice: String,
        status: String,
        at: DateTime<Utc>,
    },
    CycleStopped {
        phase: CyclePhase,
        remaining_secs: u64,
        cycles_completed: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Status line carried by the event, if any.
    pub fn status(&self) -> Option<&str> {
        match self {
            Event::CycleStarted { status, .. }
            | Event::Tick { status, .. }
            | Event::PhaseChanged { status, .. } => Some(status.as_str()),
            Event::CycleStopped { .. } => None,
        }
    }
}
