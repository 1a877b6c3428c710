//! External collaborators module
//!
//! This module contains the notification hooks fired when a session ends.

pub mod notifier;

// Re-export main types
pub use notifier::{
    notifier_from_config, run_notify_command, CommandNotifier, LogNotifier, Notifier,
    SessionFinished,
};
