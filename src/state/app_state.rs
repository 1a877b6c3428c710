//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Action, Preferences, RunStatus, TimerSnapshot, TimerState};
use crate::{
    config::{Config, Durations, ZeroPolicy},
    error::StateError,
    services::{Notifier, SessionFinished},
    tasks::Ticker,
    utils::format_uptime,
};

/// Result of applying one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second was taken off the current session
    Ticked,
    /// The session expired and the timer moved on to the next one
    Switched(SessionFinished),
    /// The session expired and ticking stopped
    Stopped,
    /// The tick came from a task that is no longer the live one
    Superseded,
}

/// Main application state shared by the HTTP handlers and the ticker
#[derive(Debug)]
pub struct AppState {
    /// Countdown store
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Display preferences
    pub preferences: Arc<Mutex<Preferences>>,
    /// What happens when the running session hits zero
    pub zero_policy: ZeroPolicy,
    /// Single owned countdown task
    pub ticker: Ticker,
    pub notifier: Arc<dyn Notifier>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for snapshot updates
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create the state described by a validated configuration
    pub fn new(config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        let timer = TimerState::new(config.work_seconds(), config.break_plan());
        let preferences = Preferences::new(config.dark_mode);
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::render(&timer, &preferences));

        Self {
            timer_state: Arc::new(Mutex::new(timer)),
            preferences: Arc::new(Mutex::new(preferences)),
            zero_policy: config.on_zero,
            ticker: Ticker::default(),
            notifier,
            start_time: Instant::now(),
            port: config.port,
            host: config.host.clone(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, TimerState>, StateError> {
        self.timer_state.lock()
            .map_err(|_| StateError::LockPoisoned("timer state"))
    }

    fn lock_preferences(&self) -> Result<MutexGuard<'_, Preferences>, StateError> {
        self.preferences.lock()
            .map_err(|_| StateError::LockPoisoned("preferences"))
    }

    /// Mutate the timer under its lock, then publish the new snapshot
    fn update_timer<F>(&self, action: &str, updater: F) -> Result<TimerSnapshot, StateError>
    where
        F: FnOnce(&mut TimerState) -> Result<Option<SessionFinished>, StateError>,
    {
        let mut timer = self.lock_timer()?;
        let event = updater(&mut timer)?;
        let snapshot = TimerSnapshot::render(&timer, &*self.lock_preferences()?);
        // Publish under the lock so snapshots go out in mutation order
        self.publish(snapshot.clone());
        drop(timer); // Release the lock before notifying anyone

        self.record_action(action);
        if let Some(event) = event {
            self.notifier.session_finished(event);
        }

        Ok(snapshot)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to send snapshot update: {}", e);
        }
    }

    /// Apply a reducer action without touching the ticker
    pub fn dispatch(&self, action: Action) -> Result<TimerSnapshot, StateError> {
        debug!("Dispatching {:?}", action);
        self.update_timer(action.name(), |timer| {
            Ok(timer.apply(action).map(|finished| SessionFinished {
                finished,
                next: timer.current,
                completed_work_sessions: timer.completed_work_sessions,
                switched: true,
            }))
        })
    }

    /// Stop ticking, then apply the action
    fn halt_and_dispatch(&self, action: Action) -> Result<TimerSnapshot, StateError> {
        self.update_timer(action.name(), |timer| {
            self.ticker.stop()?;
            timer.status = RunStatus::Idle;
            timer.apply(action);
            Ok(None)
        })
    }

    /// Run the current session, refilling it first if it has run out
    pub fn start(self: &Arc<Self>) -> Result<TimerSnapshot, StateError> {
        info!("Starting countdown");
        self.update_timer("start", |timer| {
            if timer.current_session().is_expired() {
                timer.reset();
            }
            self.ticker.start(Arc::clone(self))?;
            timer.status = RunStatus::Running;
            Ok(None)
        })
    }

    /// Continue from the remaining time; no-op while running or once the session has run out
    pub fn resume(self: &Arc<Self>) -> Result<TimerSnapshot, StateError> {
        self.update_timer("resume", |timer| {
            if timer.current_session().is_expired() {
                debug!("Nothing left to resume on {}", timer.current);
            } else if !timer.is_running() {
                info!("Resuming countdown at {}s", timer.current_session().time_left_seconds);
                self.ticker.start(Arc::clone(self))?;
                timer.status = RunStatus::Running;
            }
            Ok(None)
        })
    }

    /// Stop ticking and keep the remaining time
    pub fn stop(&self) -> Result<TimerSnapshot, StateError> {
        info!("Stopping countdown");
        self.update_timer("stop", |timer| {
            self.ticker.stop()?;
            timer.status = RunStatus::Idle;
            Ok(None)
        })
    }

    pub fn reset(&self) -> Result<TimerSnapshot, StateError> {
        self.halt_and_dispatch(Action::Reset)
    }

    pub fn restart(&self) -> Result<TimerSnapshot, StateError> {
        self.halt_and_dispatch(Action::Restart)
    }

    pub fn change_session(&self) -> Result<TimerSnapshot, StateError> {
        self.halt_and_dispatch(Action::ChangeSession)
    }

    /// Replace session lengths without interrupting the countdown
    pub fn set_durations(&self, durations: Durations) -> Result<TimerSnapshot, StateError> {
        info!("Setting durations: work={}min, short break={}min, long break={}min",
              durations.work, durations.short_break, durations.long_break);
        self.update_timer("set_durations", |timer| {
            let every = timer.break_plan.long_break_every;
            durations.validate(every)?;
            timer.set_durations(durations.work_seconds(), durations.break_plan(every));
            Ok(None)
        })
    }

    pub fn increment(&self, seconds: u64) -> Result<TimerSnapshot, StateError> {
        self.dispatch(Action::Increment(seconds))
    }

    pub fn decrement(&self, seconds: u64) -> Result<TimerSnapshot, StateError> {
        self.dispatch(Action::Decrement(seconds))
    }

    /// Apply one tick on behalf of the ticker task started with `generation`
    pub fn tick(&self, generation: u64) -> Result<TickOutcome, StateError> {
        let mut timer = self.lock_timer()?;
        if !self.ticker.is_current(generation) || !timer.is_running() {
            return Ok(TickOutcome::Superseded);
        }

        timer.decrement(1);

        let mut event = None;
        let outcome = if timer.current_session().is_expired() {
            match self.zero_policy {
                ZeroPolicy::Stop => {
                    timer.status = RunStatus::Idle;
                    event = Some(SessionFinished {
                        finished: timer.current,
                        next: timer.current.toggled(),
                        completed_work_sessions: timer.completed_work_sessions,
                        switched: false,
                    });
                    TickOutcome::Stopped
                }
                ZeroPolicy::AutoSwitch => {
                    let finished = timer.complete_session();
                    let switched = SessionFinished {
                        finished,
                        next: timer.current,
                        completed_work_sessions: timer.completed_work_sessions,
                        switched: true,
                    };
                    event = Some(switched);
                    TickOutcome::Switched(switched)
                }
            }
        } else {
            TickOutcome::Ticked
        };

        let snapshot = TimerSnapshot::render(&timer, &*self.lock_preferences()?);
        self.publish(snapshot);
        drop(timer);

        if let Some(event) = event {
            self.notifier.session_finished(event);
        }

        Ok(outcome)
    }

    /// Flip dark mode
    pub fn toggle_dark_mode(&self) -> Result<TimerSnapshot, StateError> {
        let enabled = self.lock_preferences()?.toggle_dark_mode();
        info!("Dark mode toggled to: {}", enabled);
        self.record_action("toggle_dark_mode");
        self.publish_current()
    }

    /// Set dark mode explicitly
    pub fn set_dark_mode(&self, enabled: bool) -> Result<TimerSnapshot, StateError> {
        self.lock_preferences()?.dark_mode = enabled;
        info!("Setting dark mode to: {}", enabled);
        self.record_action("set_dark_mode");
        self.publish_current()
    }

    fn publish_current(&self) -> Result<TimerSnapshot, StateError> {
        let timer = self.lock_timer()?;
        let snapshot = TimerSnapshot::render(&timer, &*self.lock_preferences()?);
        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    /// Render the current state
    pub fn snapshot(&self) -> Result<TimerSnapshot, StateError> {
        let timer = self.lock_timer()?;
        let preferences = self.lock_preferences()?;
        Ok(TimerSnapshot::render(&timer, &preferences))
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
