use std::sync::Mutex;

use crate::events::Event;

/// Receives everything the cycle reports.
///
/// Calls come from the ticking task and must return quickly.
pub trait StatusObserver: Send + Sync {
    /// Human-readable phase and remaining time, once per second.
    fn status(&self, text: &str);

    /// Short user-visible notice (phase boundary, missing vibrator, stop).
    fn notice(&self, text: &str);

    /// Every engine event, for structured consumers.
    fn event(&self, _event: &Event) {}
}

/// Observer that keeps everything it receives in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    statuses: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of per-second `Tick` events seen.
    pub fn tick_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Tick { .. }))
            .count()
    }
}

impl StatusObserver for RecordingObserver {
    fn status(&self, text: &str) {
        self.statuses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
    }

    fn notice(&self, text: &str) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
    }

    fn event(&self, event: &Event) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}
