//! Session structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper clamp for any session's remaining time (one hour)
pub const MAX_SESSION_SECONDS: u64 = 3600;

/// Which phase of the cycle a session represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Work,
    Break,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::Break => "break",
        }
    }

    /// The other kind
    pub fn toggled(self) -> Self {
        match self {
            SessionKind::Work => SessionKind::Break,
            SessionKind::Break => SessionKind::Work,
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named timer phase with its own initial and remaining duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub name: String,
    pub initial_time_seconds: u64,
    pub time_left_seconds: u64,
}

impl SessionState {
    /// Create a full session; the initial time is clamped to one hour
    pub fn new(name: impl Into<String>, initial_time_seconds: u64) -> Self {
        let initial = initial_time_seconds.min(MAX_SESSION_SECONDS);
        Self {
            name: name.into(),
            initial_time_seconds: initial,
            time_left_seconds: initial,
        }
    }

    pub fn increment(&mut self, seconds: u64) {
        self.time_left_seconds = self
            .time_left_seconds
            .saturating_add(seconds)
            .min(MAX_SESSION_SECONDS);
    }

    pub fn decrement(&mut self, seconds: u64) {
        self.time_left_seconds = self.time_left_seconds.saturating_sub(seconds);
    }

    /// Refill to the initial time
    pub fn reset(&mut self) {
        self.time_left_seconds = self.initial_time_seconds;
    }

    /// Replace name and length, then refill
    pub fn reconfigure(&mut self, name: impl Into<String>, initial_time_seconds: u64) {
        *self = Self::new(name, initial_time_seconds);
    }

    pub fn is_expired(&self) -> bool {
        self.time_left_seconds == 0
    }
}
