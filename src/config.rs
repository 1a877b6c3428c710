//! Configuration and CLI argument handling

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    state::{BreakPlan, MAX_SESSION_SECONDS},
};

/// What the ticker does once the running session reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroPolicy {
    /// Clamp at zero and stop ticking
    Stop,
    /// Finish the session, switch to the next one and keep ticking
    AutoSwitch,
}

/// Session lengths in whole minutes, settable at startup or at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub work: u64,
    pub short_break: u64,
    pub long_break: u64,
    /// Keeps the current cadence when absent
    #[serde(default)]
    pub long_break_every: Option<u32>,
}

impl Durations {
    /// Check every length fits a session and the cadence is positive
    pub fn validate(&self, current_long_break_every: u32) -> Result<(), ConfigError> {
        let max = MAX_SESSION_SECONDS / 60;
        for (field, value) in [
            ("work", self.work),
            ("short break", self.short_break),
            ("long break", self.long_break),
        ] {
            if value == 0 || value > max {
                return Err(ConfigError::DurationOutOfRange { field, value, max });
            }
        }

        let every = self.long_break_every.unwrap_or(current_long_break_every);
        if every == 0 {
            return Err(ConfigError::LongBreakInterval(every));
        }

        Ok(())
    }

    pub fn work_seconds(&self) -> u64 {
        self.work * 60
    }

    /// Break plan, falling back to the given cadence when none was supplied
    pub fn break_plan(&self, current_long_break_every: u32) -> BreakPlan {
        BreakPlan {
            short_break_seconds: self.short_break * 60,
            long_break_seconds: self.long_break * 60,
            long_break_every: self.long_break_every.unwrap_or(current_long_break_every),
        }
    }
}

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "pomodoro-timer")]
#[command(about = "A state-managed HTTP server running a Pomodoro countdown timer")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "25025")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Work session length in minutes
    #[arg(short, long, default_value = "25")]
    pub work: u64,

    /// Short break length in minutes
    #[arg(short, long, default_value = "5")]
    pub short_break: u64,

    /// Long break length in minutes
    #[arg(short, long, default_value = "15")]
    pub long_break: u64,

    /// Every Nth completed work session is followed by a long break
    #[arg(long, default_value = "3")]
    pub long_break_every: u32,

    /// Behaviour when the running session reaches zero
    #[arg(long, value_enum, default_value = "auto-switch")]
    pub on_zero: ZeroPolicy,

    /// Shell command executed whenever a session finishes
    #[arg(long)]
    pub notify_command: Option<String>,

    /// Start with dark mode enabled
    #[arg(long)]
    pub dark_mode: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 25025,
            host: "127.0.0.1".to_string(),
            work: 25,
            short_break: 5,
            long_break: 15,
            long_break_every: 3,
            on_zero: ZeroPolicy::AutoSwitch,
            notify_command: None,
            dark_mode: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Reject durations that cannot be represented by a session
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.durations().validate(self.long_break_every)?;

        if let Some(command) = &self.notify_command {
            if command.trim().is_empty() {
                return Err(ConfigError::EmptyNotifyCommand);
            }
        }

        Ok(())
    }

    /// Session lengths as given on the command line
    pub fn durations(&self) -> Durations {
        Durations {
            work: self.work,
            short_break: self.short_break,
            long_break: self.long_break,
            long_break_every: Some(self.long_break_every),
        }
    }

    /// Work session length in seconds
    pub fn work_seconds(&self) -> u64 {
        self.durations().work_seconds()
    }

    /// Break lengths and cadence derived from the CLI flags
    pub fn break_plan(&self) -> BreakPlan {
        self.durations().break_plan(self.long_break_every)
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
