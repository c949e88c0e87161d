mod engine;
mod phase;

pub use engine::{CycleEngine, CycleSnapshot, BACK_TO_WORK_NOTICE, BREAK_NOTICE};
pub use phase::{
    format_remaining, CycleConfig, CyclePhase, DEFAULT_BREAK_SECS, DEFAULT_VIBRATION_SECS,
    DEFAULT_WORK_SECS,
};
