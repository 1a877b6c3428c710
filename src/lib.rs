//! Pomodoro Timer - A state-managed HTTP server running a Pomodoro countdown
//!
//! This library provides the work/break session store, the single countdown
//! ticker driving it, and an HTTP surface exposing the controls.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, ZeroPolicy};
pub use error::{ConfigError, StateError};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
