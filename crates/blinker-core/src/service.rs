//! Background driver for the cycle engine.
//!
//! Owns the single phase timer: one spawned tokio task that calls
//! [`CycleEngine::tick`] every [`TICK_INTERVAL`] and forwards the
//! resulting events to the observer and the vibrator. Starting again
//! replaces the task, so two countdowns never run at once.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::cycle::{CycleConfig, CycleEngine, CycleSnapshot};
use crate::events::Event;
use crate::feedback::{self, Vibrator};
use crate::observer::StatusObserver;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const STOPPED_NOTICE: &str = "Blinker stopped";

struct Running {
    task: JoinHandle<()>,
    engine: watch::Receiver<CycleEngine>,
}

pub struct CycleService {
    vibrator: Arc<dyn Vibrator>,
    observer: Arc<dyn StatusObserver>,
    running: Option<Running>,
}

impl CycleService {
    pub fn new(vibrator: Arc<dyn Vibrator>, observer: Arc<dyn StatusObserver>) -> Self {
        Self {
            vibrator,
            observer,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Latest view of the running engine, `None` when stopped.
    pub fn snapshot(&self) -> Option<CycleSnapshot> {
        self.running.as_ref().map(|r| r.engine.borrow().snapshot())
    }

    /// Begin a new cycle in `Working`.
    ///
    /// Any cycle already running is cancelled first, together with any
    /// vibration it left playing. Must be called within a tokio runtime.
    pub async fn start(&mut self, config: CycleConfig) {
        if self.halt().await.is_some() {
            tracing::info!("previous cycle cancelled before restart");
        }

        let (engine, started) = CycleEngine::start(config);
        dispatch(&*self.vibrator, &*self.observer, &started);

        let (tx, rx) = watch::channel(engine.clone());
        let task = tokio::spawn(run_ticks(
            engine,
            tx,
            Arc::clone(&self.vibrator),
            Arc::clone(&self.observer),
        ));
        self.running = Some(Running { task, engine: rx });
        tracing::info!(
            work_secs = config.work_secs,
            break_secs = config.break_secs,
            vibration_secs = config.vibration_secs,
            "cycle started"
        );
    }

    /// Stop the cycle and any vibration in progress.
    ///
    /// Returns `false` if nothing was running. Once this returns no further
    /// ticks are reported.
    pub async fn stop(&mut self) -> bool {
        let Some(engine) = self.halt().await else {
            return false;
        };
        let event = engine.stopped_event();
        self.observer.event(&event);
        self.observer.notice(STOPPED_NOTICE);
        tracing::info!(
            phase = %engine.phase(),
            cycles_completed = engine.cycles_completed(),
            "cycle stopped"
        );
        true
    }

    /// Cancel the ticking task and wait for it to wind down, returning the
    /// engine as it was last published.
    async fn halt(&mut self) -> Option<CycleEngine> {
        let running = self.running.take()?;
        running.task.abort();
        // Cancellation error expected; waiting makes sure no dispatch is in flight.
        let _ = running.task.await;
        self.vibrator.cancel();
        let engine = running.engine.borrow().clone();
        Some(engine)
    }
}

impl Drop for CycleService {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.task.abort();
            self.vibrator.cancel();
        }
    }
}

async fn run_ticks(
    mut engine: CycleEngine,
    tx: watch::Sender<CycleEngine>,
    vibrator: Arc<dyn Vibrator>,
    observer: Arc<dyn StatusObserver>,
) {
    // After a stall, resume with one tick instead of replaying the missed
    // seconds back to back, so a phase boundary is never fired in a burst.
    let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        let event = engine.tick();
        tx.send_replace(engine.clone());
        dispatch(&*vibrator, &*observer, &event);
    }
}

fn dispatch(vibrator: &dyn Vibrator, observer: &dyn StatusObserver, event: &Event) {
    observer.event(event);
    if let Event::PhaseChanged {
        feedback, notice, ..
    } = event
    {
        feedback::trigger(vibrator, observer, feedback.as_ref(), notice);
    }
    if let Some(status) = event.status() {
        observer.status(status);
    }
}
