//! Countdown ticker background task

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::{task::JoinHandle, time::{interval_at, Instant}};
use tracing::{debug, error, info};

use crate::{
    error::StateError,
    state::{AppState, TickOutcome},
};

/// Default tick period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owner of the single live countdown task
///
/// Every spawned task carries the generation it was started with. Starting or
/// stopping bumps the generation, so a superseded task can never apply a tick
/// even if it wakes up before its abort lands.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    generation: AtomicU64,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            generation: AtomicU64::new(0),
            handle: Mutex::new(None),
        }
    }

    /// Cancel any running task, then spawn a fresh one
    pub fn start(&self, state: Arc<AppState>) -> Result<u64, StateError> {
        let mut handle = self.handle.lock()
            .map_err(|_| StateError::LockPoisoned("ticker handle"))?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = handle.take() {
            previous.abort();
        }

        *handle = Some(tokio::spawn(ticker_task(state, generation, self.period)));
        debug!("Ticker started (generation {})", generation);
        Ok(generation)
    }

    /// Cancel the running task, if any
    pub fn stop(&self) -> Result<(), StateError> {
        let mut handle = self.handle.lock()
            .map_err(|_| StateError::LockPoisoned("ticker handle"))?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = handle.take() {
            previous.abort();
            debug!("Ticker stopped (generation {})", generation);
        }
        Ok(())
    }

    /// Whether `generation` belongs to the most recently started task
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

/// Decrement the current session once per period until stopped or superseded
pub async fn ticker_task(state: Arc<AppState>, generation: u64, period: Duration) {
    info!("Starting countdown ticker");

    // First tick lands one full period after start
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        match state.tick(generation) {
            Ok(TickOutcome::Ticked) => {}
            Ok(TickOutcome::Switched(event)) => {
                debug!("Ticker switched from {} to {}", event.finished, event.next);
            }
            Ok(TickOutcome::Stopped) => {
                info!("Countdown reached zero, ticker stopped");
                break;
            }
            Ok(TickOutcome::Superseded) => {
                debug!("Ticker generation {} superseded", generation);
                break;
            }
            Err(e) => {
                error!("Ticker failed to apply tick: {}", e);
                break;
            }
        }
    }
}
