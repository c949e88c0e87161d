//! Work/break cycle state machine.
//!
//! The engine has no internal thread or clock. The caller invokes `tick()`
//! once per elapsed second; [`crate::service::CycleService`] does so from a
//! tokio interval, tests do so directly.
//!
//! ## State Transitions
//!
//! ```text
//! start -> Working --(remaining = 0, continuous pulse)--> OnBreak
//!          ^                                                |
//!          +-------(remaining = 0, interval pattern)--------+
//! ```
//!
//! There is no terminal state. Dropping the engine is the stop.
//!
//! ## Usage
//!
//! ```
//! use blinker_core::cycle::{CycleConfig, CycleEngine, CyclePhase};
//!
//! let (mut engine, _started) = CycleEngine::start(CycleConfig::new(1, 1, 0).unwrap());
//! engine.tick();
//! assert_eq!(engine.phase(), CyclePhase::OnBreak);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::phase::{format_remaining, CycleConfig, CyclePhase};
use crate::events::Event;
use crate::feedback::VibrationFeedback;

pub const BREAK_NOTICE: &str = "Break Time! Vibrating as configured.";
pub const BACK_TO_WORK_NOTICE: &str = "Rest over! Back to work.";

/// Read-only view of a running engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSnapshot {
    pub phase: CyclePhase,
    pub remaining_secs: u64,
    pub total_secs: u64,
    pub cycles_completed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleEngine {
    config: CycleConfig,
    phase: CyclePhase,
    remaining_secs: u64,
    /// Full work+break traversals finished so far.
    cycles_completed: u64,
}

impl CycleEngine {
    /// Create an engine already in `Working` with the full work duration.
    pub fn start(config: CycleConfig) -> (Self, Event) {
        let engine = Self {
            config,
            phase: CyclePhase::Working,
            remaining_secs: config.work_secs,
            cycles_completed: 0,
        };
        tracing::debug!(
            work_secs = config.work_secs,
            break_secs = config.break_secs,
            vibration_secs = config.vibration_secs,
            "starting work cycle"
        );
        let event = Event::CycleStarted {
            work_secs: config.work_secs,
            break_secs: config.break_secs,
            vibration_secs: config.vibration_secs,
            status: CyclePhase::Working.entry_status().to_string(),
            at: Utc::now(),
        };
        (engine, event)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    /// `"Working: mm:ss"` / `"Break Rest: mm:ss"`.
    pub fn status_line(&self) -> String {
        format!("{}: {}", self.phase.label(), format_remaining(self.remaining_secs))
    }

    pub fn snapshot(&self) -> CycleSnapshot {
        CycleSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            total_secs: self.config.phase_secs(self.phase),
            cycles_completed: self.cycles_completed,
        }
    }

    /// Event describing the engine being torn down in its current state.
    pub fn stopped_event(&self) -> Event {
        Event::CycleStopped {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            cycles_completed: self.cycles_completed,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance by one second.
    ///
    /// Returns `Event::Tick` while time remains in the phase, or
    /// `Event::PhaseChanged` when the phase ran out. A zero-length phase
    /// ends on the first tick.
    pub fn tick(&mut self) -> Event {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return Event::Tick {
                phase: self.phase,
                remaining_secs: self.remaining_secs,
                status: self.status_line(),
                at: Utc::now(),
            };
        }
        self.advance()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) -> Event {
        let from = self.phase;
        let to = from.next();
        let (feedback, notice) = match from {
            CyclePhase::Working => (
                VibrationFeedback::continuous_secs(self.config.vibration_secs),
                BREAK_NOTICE,
            ),
            CyclePhase::OnBreak => {
                self.cycles_completed += 1;
                (Some(VibrationFeedback::Interval), BACK_TO_WORK_NOTICE)
            }
        };
        self.phase = to;
        self.remaining_secs = self.config.phase_secs(to);
        tracing::debug!(%from, %to, duration_secs = self.remaining_secs, "phase finished");
        Event::PhaseChanged {
            from,
            to,
            duration_secs: self.remaining_secs,
            feedback,
            notice: notice.to_string(),
            status: to.entry_status().to_string(),
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(engine: &mut CycleEngine, secs: u64) -> Vec<Event> {
        (0..secs).map(|_| engine.tick()).collect()
    }

    fn transitions(events: &[Event]) -> Vec<(CyclePhase, CyclePhase)> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::PhaseChanged { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_enters_working_with_full_duration() {
        let (engine, event) = CycleEngine::start(CycleConfig::new(90, 30, 5).unwrap());
        assert_eq!(engine.phase(), CyclePhase::Working);
        assert_eq!(engine.remaining_secs(), 90);
        assert_eq!(engine.status_line(), "Working: 01:30");
        assert_eq!(event.status(), Some("Status: Working..."));
    }

    #[test]
    fn tick_reports_remaining_time() {
        let (mut engine, _) = CycleEngine::start(CycleConfig::new(3, 2, 1).unwrap());
        match engine.tick() {
            Event::Tick {
                phase,
                remaining_secs,
                status,
                ..
            } => {
                assert_eq!(phase, CyclePhase::Working);
                assert_eq!(remaining_secs, 2);
                assert_eq!(status, "Working: 00:02");
            }
            other => panic!("Expected Tick, got {other:?}"),
        }
    }

    #[test]
    fn one_one_zero_cycle() {
        let (mut engine, _) = CycleEngine::start(CycleConfig::new(1, 1, 0).unwrap());

        match engine.tick() {
            Event::PhaseChanged {
                from, to, feedback, notice, ..
            } => {
                assert_eq!((from, to), (CyclePhase::Working, CyclePhase::OnBreak));
                assert_eq!(feedback, None);
                assert_eq!(notice, BREAK_NOTICE);
            }
            other => panic!("Expected PhaseChanged, got {other:?}"),
        }

        match engine.tick() {
            Event::PhaseChanged { from, to, feedback, .. } => {
                assert_eq!((from, to), (CyclePhase::OnBreak, CyclePhase::Working));
                assert_eq!(feedback, Some(VibrationFeedback::Interval));
            }
            other => panic!("Expected PhaseChanged, got {other:?}"),
        }
        assert_eq!(engine.cycles_completed(), 1);
    }

    #[test]
    fn five_five_three_cycle() {
        let (mut engine, _) = CycleEngine::start(CycleConfig::new(5, 5, 3).unwrap());
        let first = run(&mut engine, 5);
        assert!(first[..4].iter().all(|e| matches!(e, Event::Tick { .. })));
        match &first[4] {
            Event::PhaseChanged { to, feedback, .. } => {
                assert_eq!(*to, CyclePhase::OnBreak);
                assert_eq!(
                    *feedback,
                    Some(VibrationFeedback::Continuous { duration_ms: 3000 })
                );
            }
            other => panic!("Expected PhaseChanged, got {other:?}"),
        }
        assert_eq!(engine.remaining_secs(), 5);

        let second = run(&mut engine, 5);
        match &second[4] {
            Event::PhaseChanged { to, feedback, .. } => {
                assert_eq!(*to, CyclePhase::Working);
                assert_eq!(*feedback, Some(VibrationFeedback::Interval));
            }
            other => panic!("Expected PhaseChanged, got {other:?}"),
        }
        assert_eq!(engine.remaining_secs(), 5);
    }

    #[test]
    fn zero_length_phase_ends_on_next_tick() {
        let cfg = CycleConfig {
            work_secs: 0,
            break_secs: 2,
            vibration_secs: 0,
        };
        let (mut engine, _) = CycleEngine::start(cfg);
        assert!(matches!(engine.tick(), Event::PhaseChanged { to: CyclePhase::OnBreak, .. }));
        assert!(matches!(engine.tick(), Event::Tick { .. }));
        assert!(matches!(engine.tick(), Event::PhaseChanged { to: CyclePhase::Working, .. }));
    }

    #[test]
    fn cycle_repeats_indefinitely() {
        let (mut engine, _) = CycleEngine::start(CycleConfig::new(2, 1, 1).unwrap());
        let events = run(&mut engine, 30);
        assert_eq!(transitions(&events).len(), 20);
        assert_eq!(engine.cycles_completed(), 10);
        assert_eq!(engine.phase(), CyclePhase::Working);
    }

    #[test]
    fn snapshot_tracks_progress() {
        let (mut engine, _) = CycleEngine::start(CycleConfig::new(4, 2, 0).unwrap());
        engine.tick();
        let snap = engine.snapshot();
        assert_eq!(snap.phase, CyclePhase::Working);
        assert_eq!(snap.remaining_secs, 3);
        assert_eq!(snap.total_secs, 4);
        assert_eq!(snap.cycles_completed, 0);
    }

    proptest! {
        #[test]
        fn one_full_cycle_transitions_exactly_twice(w in 1u64..120, b in 1u64..120, v in 0u64..30) {
            let (mut engine, _) = CycleEngine::start(CycleConfig::new(w, b, v).unwrap());
            let events = run(&mut engine, w + b);
            prop_assert_eq!(
                transitions(&events),
                vec![
                    (CyclePhase::Working, CyclePhase::OnBreak),
                    (CyclePhase::OnBreak, CyclePhase::Working),
                ]
            );
            let first_in_working = matches!(events[0], Event::Tick { phase: CyclePhase::Working, .. })
                || matches!(events[0], Event::PhaseChanged { from: CyclePhase::Working, .. });
            prop_assert!(first_in_working, "first tick must come from the work phase");
            prop_assert_eq!(engine.remaining_secs(), w);
        }
    }
}
