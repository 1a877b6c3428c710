//! State management module
//!
//! This module contains the countdown store, UI preferences and the shared
//! application state wiring them to the ticker.

pub mod session;
pub mod timer_state;
pub mod preferences;
pub mod snapshot;
pub mod app_state;

// Re-export main types
pub use session::{SessionKind, SessionState, MAX_SESSION_SECONDS};
pub use timer_state::{Action, BreakPlan, RunStatus, TimerState};
pub use preferences::Preferences;
pub use snapshot::{Sessions, TimerSnapshot};
pub use app_state::{AppState, TickOutcome};
