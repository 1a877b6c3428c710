//! Error types

/// Invalid startup configuration
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be between 1 and {max} minutes, got {value}")]
    DurationOutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("long break interval must be at least 1, got {0}")]
    LongBreakInterval(u32),
    #[error("notify command must not be empty")]
    EmptyNotifyCommand,
}

/// Failures while touching shared timer state
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to lock {0}: lock poisoned")]
    LockPoisoned(&'static str),
    #[error("invalid durations: {0}")]
    InvalidDurations(#[from] ConfigError),
}
