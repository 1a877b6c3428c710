//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::ZeroPolicy, state::TimerSnapshot};

/// Step used by the +/- controls when no amount is given
pub const DEFAULT_ADJUST_SECONDS: u64 = 300;

fn default_adjust_seconds() -> u64 {
    DEFAULT_ADJUST_SECONDS
}

/// Body for the increment/decrement endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdjustRequest {
    #[serde(default = "default_adjust_seconds")]
    pub seconds: u64,
}

impl Default for AdjustRequest {
    fn default() -> Self {
        Self { seconds: DEFAULT_ADJUST_SECONDS }
    }
}

/// Body for `PUT /dark-mode`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DarkModeRequest {
    pub enabled: bool,
}

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response whose status mirrors the timer's run status
    pub fn from_snapshot(message: impl Into<String>, timer: TimerSnapshot) -> Self {
        Self::new(timer.status.as_str().to_string(), message.into(), timer)
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub zero_policy: ZeroPolicy,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
