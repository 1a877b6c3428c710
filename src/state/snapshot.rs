//! Serializable render of the timer

use serde::{Deserialize, Serialize};

use super::{Preferences, RunStatus, SessionKind, SessionState, TimerState};
use crate::utils::{clock_parts, format_clock};

/// Both sessions keyed by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sessions {
    pub work: SessionState,
    #[serde(rename = "break")]
    pub break_session: SessionState,
}

/// Everything a client needs to draw the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub current: SessionKind,
    pub label: String,
    pub minutes: String,
    pub seconds: String,
    pub display: String,
    pub status: RunStatus,
    pub time_left_seconds: u64,
    pub completed_work_sessions: u32,
    pub sessions: Sessions,
    pub dark_mode: bool,
    pub theme: String,
}

impl TimerSnapshot {
    pub fn render(timer: &TimerState, preferences: &Preferences) -> Self {
        let session = timer.current_session();
        let (minutes, seconds) = clock_parts(session.time_left_seconds);
        Self {
            current: timer.current,
            label: session.name.clone(),
            display: format_clock(session.time_left_seconds),
            minutes,
            seconds,
            status: timer.status,
            time_left_seconds: session.time_left_seconds,
            completed_work_sessions: timer.completed_work_sessions,
            sessions: Sessions {
                work: timer.work.clone(),
                break_session: timer.break_session.clone(),
            },
            dark_mode: preferences.dark_mode,
            theme: preferences.theme_class().to_string(),
        }
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::render(&TimerState::default(), &Preferences::default())
    }
}
