//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info, warn};

use crate::{
    config::Durations,
    error::StateError,
    state::{AppState, TimerSnapshot},
};
use super::responses::{AdjustRequest, ApiResponse, DarkModeRequest, HealthResponse, StatusResponse};

/// Wrap a control result, logging failures
fn respond(
    result: Result<TimerSnapshot, StateError>,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(snapshot) => {
            info!("{} - {} left on {}", message, snapshot.display, snapshot.label);
            Ok(Json(ApiResponse::from_snapshot(message, snapshot)))
        }
        Err(StateError::InvalidDurations(e)) => {
            warn!("{} rejected: {}", message, e);
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(e) => {
            error!("{} failed: {}", message, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Read an adjust amount; only an empty body falls back to the default step
fn parse_adjust(body: &Bytes) -> Result<AdjustRequest, StatusCode> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AdjustRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected adjust body: {}", e);
        StatusCode::UNPROCESSABLE_ENTITY
    })
}

/// Handle POST /timer/start - Run the current session
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.start(), "Timer started")
}

/// Handle POST /timer/stop and /timer/pause - Stop ticking
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.stop(), "Timer stopped")
}

/// Handle POST /timer/resume - Continue from the remaining time
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.resume(), "Timer resumed")
}

/// Handle POST /timer/reset - Refill the current session
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.reset(), "Session reset")
}

/// Handle POST /timer/restart - Back to a fresh work session
pub async fn restart_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.restart(), "Timer restarted")
}

/// Handle POST /timer/change - Toggle work/break
pub async fn change_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.change_session(), "Session changed")
}

/// Handle POST /timer/increment - Add time to the current session
pub async fn increment_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, StatusCode> {
    let request = parse_adjust(&body)?;
    respond(state.increment(request.seconds), "Time added")
}

/// Handle POST /timer/decrement - Remove time from the current session
pub async fn decrement_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, StatusCode> {
    let request = parse_adjust(&body)?;
    respond(state.decrement(request.seconds), "Time removed")
}

/// Handle PUT /durations - Change session lengths, applied at the next refill
pub async fn set_durations_handler(
    State(state): State<Arc<AppState>>,
    Json(durations): Json<Durations>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.set_durations(durations), "Durations updated")
}

/// Handle POST /dark-mode/toggle
pub async fn toggle_dark_mode_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.toggle_dark_mode(), "Dark mode toggled")
}

/// Handle PUT /dark-mode
pub async fn set_dark_mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DarkModeRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.set_dark_mode(request.enabled), "Dark mode updated")
}

/// Handle GET /status - Return the timer and server information
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        zero_policy: state.zero_policy,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream a snapshot on every change, starting with the current one
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let rx = state.subscribe();

    let snapshots = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let snapshot = rx.borrow_and_update().clone();
        let event = Event::default().event("snapshot").json_data(&snapshot);
        Some((event, (rx, false)))
    });

    Sse::new(snapshots).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
