//! Session-finished notifications

use std::{fmt::Debug, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::{config::Config, state::SessionKind};

/// Emitted whenever a running session reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFinished {
    pub finished: SessionKind,
    pub next: SessionKind,
    pub completed_work_sessions: u32,
    /// Whether the timer moved on to `next` by itself
    pub switched: bool,
}

impl SessionFinished {
    pub fn headline(&self) -> &'static str {
        match self.finished {
            SessionKind::Work => "It's time for a break!",
            SessionKind::Break => "Break is over, back to work!",
        }
    }
}

/// Receiver of session-finished events
///
/// Called with the timer lock released. Implementations must not block; spawn
/// anything slow onto the runtime.
pub trait Notifier: Send + Sync + Debug {
    fn session_finished(&self, event: SessionFinished);
}

/// Writes the event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn session_finished(&self, event: SessionFinished) {
        info!(
            finished = %event.finished,
            next = %event.next,
            completed = event.completed_work_sessions,
            "{}",
            event.headline()
        );
    }
}

/// Logs, then runs a shell command with the event in its environment
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    command: String,
}

impl CommandNotifier {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }
}

impl Notifier for CommandNotifier {
    fn session_finished(&self, event: SessionFinished) {
        LogNotifier.session_finished(event);

        let command = self.command.clone();
        tokio::spawn(async move {
            if let Err(e) = run_notify_command(&command, event).await {
                warn!("Notification command failed: {}", e);
            }
        });
    }
}

/// Run the configured notification command through `sh -c`
pub async fn run_notify_command(command: &str, event: SessionFinished) -> Result<(), String> {
    debug!("Running notification command: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .env("POMODORO_FINISHED", event.finished.as_str())
        .env("POMODORO_NEXT", event.next.as_str())
        .env("POMODORO_COMPLETED", event.completed_work_sessions.to_string())
        .env("POMODORO_MESSAGE", event.headline())
        .output()
        .await
        .map_err(|e| format!("Failed to execute notification command: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("notification command exited with {}: {}", output.status, stderr.trim()));
    }

    debug!("Notification command completed");
    Ok(())
}

/// Pick the notifier the configuration asks for
pub fn notifier_from_config(config: &Config) -> Arc<dyn Notifier> {
    match &config.notify_command {
        Some(command) => Arc::new(CommandNotifier::new(command.clone())),
        None => Arc::new(LogNotifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work_finished() -> SessionFinished {
        SessionFinished {
            finished: SessionKind::Work,
            next: SessionKind::Break,
            completed_work_sessions: 1,
            switched: true,
        }
    }

    #[test]
    fn headline_depends_on_finished_kind() {
        assert_eq!(work_finished().headline(), "It's time for a break!");
        let event = SessionFinished { finished: SessionKind::Break, next: SessionKind::Work, ..work_finished() };
        assert_eq!(event.headline(), "Break is over, back to work!");
    }

    #[tokio::test]
    async fn command_receives_event_environment() {
        let result = run_notify_command(
            r#"test "$POMODORO_FINISHED" = work && test "$POMODORO_NEXT" = break"#,
            work_finished(),
        )
        .await;
        assert!(result.is_ok(), "{:?}", result);
    }

    #[tokio::test]
    async fn failing_command_reports_error() {
        let result = run_notify_command("exit 3", work_finished()).await;
        assert!(result.is_err());
    }

    #[test]
    fn config_without_command_logs_only() {
        let notifier = notifier_from_config(&Config::default());
        assert!(format!("{:?}", notifier).contains("LogNotifier"));
    }
}
