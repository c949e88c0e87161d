//! # Blinker Core Library
//!
//! Core logic for Blinker, a work/break reminder that alternates a work
//! countdown with a break countdown and signals each boundary with a
//! distinct vibration. The CLI binary is a thin surface over this crate.
//!
//! ## Architecture
//!
//! - **Cycle Engine**: a tick-driven state machine (`Working` ⇄ `OnBreak`)
//!   with no clock of its own; the caller invokes `tick()` once a second
//! - **Cycle Service**: the single background task that ticks the engine
//!   and fans events out to the observer and the vibrator
//! - **Feedback**: the two vibration signals and the [`Vibrator`] seam
//! - **Storage**: TOML configuration and the key-value settings store
//!   holding the pre-fill defaults
//! - **Controller**: input validation and start/stop
//!
//! ## Key Components
//!
//! - [`CycleEngine`]: core state machine
//! - [`CycleService`]: owner of the phase timer
//! - [`Controller`]: control surface
//! - [`Config`]: application configuration management

pub mod controller;
pub mod cycle;
pub mod error;
pub mod events;
pub mod feedback;
pub mod observer;
pub mod service;
pub mod storage;

pub use controller::{parse_cycle_input, parse_duration, Controller};
pub use cycle::{CycleConfig, CycleEngine, CyclePhase, CycleSnapshot};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use feedback::{BellVibrator, NoVibrator, VibrationFeedback, Vibrator};
pub use observer::{RecordingObserver, StatusObserver};
pub use service::CycleService;
pub use storage::{Config, ConfigStore, MemorySettingsStore, SettingsStore};
