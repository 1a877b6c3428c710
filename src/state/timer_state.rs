//! Timer state structure and reducer

use serde::{Deserialize, Serialize};

use super::session::{SessionKind, SessionState, MAX_SESSION_SECONDS};

pub const DEFAULT_WORK_SECONDS: u64 = 1500;
pub const DEFAULT_SHORT_BREAK_SECONDS: u64 = 300;
pub const DEFAULT_LONG_BREAK_SECONDS: u64 = 900;
pub const DEFAULT_LONG_BREAK_EVERY: u32 = 3;

const WORK_NAME: &str = "work";
const SHORT_BREAK_NAME: &str = "short break";
const LONG_BREAK_NAME: &str = "long break";

/// Break lengths and how often the long one comes around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPlan {
    pub short_break_seconds: u64,
    pub long_break_seconds: u64,
    pub long_break_every: u32,
}

impl BreakPlan {
    /// Name and length of the break following the given number of completed work sessions
    fn break_after(&self, completed_work_sessions: u32) -> (&'static str, u64) {
        let every = self.long_break_every.max(1);
        if completed_work_sessions > 0 && completed_work_sessions % every == 0 {
            (LONG_BREAK_NAME, self.long_break_seconds)
        } else {
            (SHORT_BREAK_NAME, self.short_break_seconds)
        }
    }
}

impl Default for BreakPlan {
    fn default() -> Self {
        Self {
            short_break_seconds: DEFAULT_SHORT_BREAK_SECONDS,
            long_break_seconds: DEFAULT_LONG_BREAK_SECONDS,
            long_break_every: DEFAULT_LONG_BREAK_EVERY,
        }
    }
}

/// Whether the countdown is ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Idle,
    Running,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
        }
    }
}

/// Operations the store accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Increment(u64),
    Decrement(u64),
    Reset,
    ChangeSession,
    CompleteSession,
    Restart,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Increment(_) => "increment",
            Action::Decrement(_) => "decrement",
            Action::Reset => "reset",
            Action::ChangeSession => "change_session",
            Action::CompleteSession => "complete_session",
            Action::Restart => "restart",
        }
    }
}

/// The whole countdown: current session, both sessions and the cycle counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub current: SessionKind,
    pub work: SessionState,
    #[serde(rename = "break")]
    pub break_session: SessionState,
    pub completed_work_sessions: u32,
    pub status: RunStatus,
    pub break_plan: BreakPlan,
}

impl TimerState {
    pub fn new(work_seconds: u64, break_plan: BreakPlan) -> Self {
        let (break_name, break_seconds) = break_plan.break_after(0);
        Self {
            current: SessionKind::Work,
            work: SessionState::new(WORK_NAME, work_seconds),
            break_session: SessionState::new(break_name, break_seconds),
            completed_work_sessions: 0,
            status: RunStatus::Idle,
            break_plan,
        }
    }

    pub fn session(&self, kind: SessionKind) -> &SessionState {
        match kind {
            SessionKind::Work => &self.work,
            SessionKind::Break => &self.break_session,
        }
    }

    fn session_mut(&mut self, kind: SessionKind) -> &mut SessionState {
        match kind {
            SessionKind::Work => &mut self.work,
            SessionKind::Break => &mut self.break_session,
        }
    }

    pub fn current_session(&self) -> &SessionState {
        self.session(self.current)
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    /// Apply an action, returning the session kind that finished if the action completed one
    pub fn apply(&mut self, action: Action) -> Option<SessionKind> {
        match action {
            Action::Increment(seconds) => self.increment(seconds),
            Action::Decrement(seconds) => self.decrement(seconds),
            Action::Reset => self.reset(),
            Action::ChangeSession => self.change_session(),
            Action::CompleteSession => return Some(self.complete_session()),
            Action::Restart => self.restart(),
        }
        None
    }

    pub fn increment(&mut self, seconds: u64) {
        let current = self.current;
        self.session_mut(current).increment(seconds);
    }

    pub fn decrement(&mut self, seconds: u64) {
        let current = self.current;
        self.session_mut(current).decrement(seconds);
    }

    /// Refill the current session only
    pub fn reset(&mut self) {
        let current = self.current;
        self.session_mut(current).reset();
    }

    /// Toggle between work and break without touching remaining time
    pub fn change_session(&mut self) {
        self.current = self.current.toggled();
    }

    /// Finish the current session and move to a fresh next one
    pub fn complete_session(&mut self) -> SessionKind {
        let finished = self.current;
        match finished {
            SessionKind::Work => {
                self.completed_work_sessions = self.completed_work_sessions.saturating_add(1);
                let (name, seconds) = self.break_plan.break_after(self.completed_work_sessions);
                self.break_session.reconfigure(name, seconds);
            }
            SessionKind::Break => self.work.reset(),
        }
        self.current = finished.toggled();
        finished
    }

    /// Change session lengths; remaining times keep running and the new
    /// lengths apply from the next refill
    pub fn set_durations(&mut self, work_seconds: u64, break_plan: BreakPlan) {
        self.break_plan = break_plan;
        self.work.initial_time_seconds = work_seconds.min(MAX_SESSION_SECONDS);
        let (_, break_seconds) = self.break_plan.break_after(self.completed_work_sessions);
        self.break_session.initial_time_seconds = break_seconds.min(MAX_SESSION_SECONDS);
    }

    /// Back to the first work session of a fresh cycle
    pub fn restart(&mut self) {
        let (name, seconds) = self.break_plan.break_after(0);
        self.work.reset();
        self.break_session.reconfigure(name, seconds);
        self.completed_work_sessions = 0;
        self.current = SessionKind::Work;
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_SECONDS, BreakPlan::default())
    }
}
