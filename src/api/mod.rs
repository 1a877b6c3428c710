//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer/start", post(start_handler))
        .route("/timer/stop", post(stop_handler))
        .route("/timer/pause", post(stop_handler))
        .route("/timer/resume", post(resume_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/timer/restart", post(restart_handler))
        .route("/timer/change", post(change_handler))
        .route("/timer/increment", post(increment_handler))
        .route("/timer/decrement", post(decrement_handler))
        .route("/durations", put(set_durations_handler))
        .route("/dark-mode", put(set_dark_mode_handler))
        .route("/dark-mode/toggle", post(toggle_dark_mode_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use futures::StreamExt;
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::{config::Config, services::LogNotifier, state::RunStatus};

    fn router() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(&Config::default(), Arc::new(LogNotifier)));
        (create_router(Arc::clone(&state)), state)
    }

    async fn call(router: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = router.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn status_renders_default_timer() {
        let (router, _) = router();
        let (status, body) = call(&router, Method::GET, "/status", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["display"], "25:00");
        assert_eq!(body["timer"]["minutes"], "25");
        assert_eq!(body["timer"]["seconds"], "00");
        assert_eq!(body["timer"]["label"], "work");
        assert_eq!(body["zero_policy"], "auto-switch");
    }

    #[tokio::test]
    async fn increment_and_decrement_use_body_or_default() {
        let (router, _) = router();

        let (status, body) = call(&router, Method::POST, "/timer/decrement", Some(r#"{"seconds":1435}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["display"], "01:05");

        let (_, body) = call(&router, Method::POST, "/timer/increment", None).await;
        assert_eq!(body["timer"]["time_left_seconds"], 365);

        let (_, body) = call(&router, Method::POST, "/timer/decrement", Some(r#"{"seconds":100000}"#)).await;
        assert_eq!(body["timer"]["display"], "00:00");
    }

    #[tokio::test]
    async fn malformed_adjust_bodies_are_rejected() {
        let (router, state) = router();

        for body in [r#"{"seconds":"abc"}"#, r#"{"seconds":-60}"#, r#"{"seconds":1.5}"#, "not json"] {
            let (status, _) = call(&router, Method::POST, "/timer/decrement", Some(body)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {body}");
            let (status, _) = call(&router, Method::POST, "/timer/increment", Some(body)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {body}");
        }

        assert_eq!(state.snapshot().unwrap().time_left_seconds, 1500);
    }

    #[tokio::test]
    async fn empty_adjust_body_uses_default_step() {
        let (router, _) = router();

        let (status, body) = call(&router, Method::POST, "/timer/decrement", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["time_left_seconds"], 1200);

        let (_, body) = call(&router, Method::POST, "/timer/decrement", Some("{}")).await;
        assert_eq!(body["timer"]["time_left_seconds"], 900);
    }

    #[tokio::test]
    async fn durations_update_next_refill() {
        let (router, _) = router();

        let (status, body) = call(
            &router,
            Method::PUT,
            "/durations",
            Some(r#"{"work":50,"short_break":10,"long_break":20}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["display"], "25:00");
        assert_eq!(body["timer"]["sessions"]["work"]["initial_time_seconds"], 3000);
        assert_eq!(body["timer"]["sessions"]["break"]["initial_time_seconds"], 600);

        let (_, body) = call(&router, Method::POST, "/timer/reset", None).await;
        assert_eq!(body["timer"]["display"], "50:00");
    }

    #[tokio::test]
    async fn invalid_durations_are_rejected() {
        let (router, state) = router();

        let (status, _) = call(
            &router,
            Method::PUT,
            "/durations",
            Some(r#"{"work":0,"short_break":5,"long_break":15}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = call(
            &router,
            Method::PUT,
            "/durations",
            Some(r#"{"work":25,"short_break":5,"long_break":15,"long_break_every":0}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = call(&router, Method::PUT, "/durations", Some(r#"{"work":"x"}"#)).await;
        assert!(status.is_client_error());

        assert_eq!(state.snapshot().unwrap().sessions.work.initial_time_seconds, 1500);
    }

    async fn next_event<S>(stream: &mut S) -> String
    where
        S: futures::Stream<Item = Result<axum::body::Bytes, axum::Error>> + Unpin,
    {
        let mut frame = String::new();
        while !frame.ends_with("\n\n") {
            let chunk = tokio::time::timeout(Duration::from_secs(5), stream.next())
                .await
                .expect("no event within timeout")
                .expect("stream ended")
                .unwrap();
            frame.push_str(std::str::from_utf8(&chunk).unwrap());
        }
        frame
    }

    #[tokio::test]
    async fn events_stream_current_then_changes() {
        let (router, _) = router();

        let request = Request::builder().uri("/events").body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");

        let mut stream = response.into_body().into_data_stream();

        let first = next_event(&mut stream).await;
        assert!(first.starts_with("event: snapshot\n"), "{first}");
        assert!(first.contains(r#""display":"25:00""#), "{first}");
        assert!(first.contains(r#""dark_mode":false"#), "{first}");

        call(&router, Method::POST, "/dark-mode/toggle", None).await;

        let second = next_event(&mut stream).await;
        assert!(second.starts_with("event: snapshot\n"), "{second}");
        assert!(second.contains(r#""dark_mode":true"#), "{second}");
    }

    #[tokio::test]
    async fn start_and_pause_report_status() {
        let (router, state) = router();

        let (status, body) = call(&router, Method::POST, "/timer/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["timer"]["status"], "running");

        let (_, body) = call(&router, Method::POST, "/timer/pause", None).await;
        assert_eq!(body["status"], "idle");
        assert_eq!(state.snapshot().unwrap().status, RunStatus::Idle);
    }

    #[tokio::test]
    async fn change_reset_restart() {
        let (router, _) = router();

        let (_, body) = call(&router, Method::POST, "/timer/change", None).await;
        assert_eq!(body["timer"]["current"], "break");
        assert_eq!(body["timer"]["display"], "05:00");

        call(&router, Method::POST, "/timer/decrement", Some(r#"{"seconds":60}"#)).await;
        let (_, body) = call(&router, Method::POST, "/timer/reset", None).await;
        assert_eq!(body["timer"]["display"], "05:00");

        let (_, body) = call(&router, Method::POST, "/timer/restart", None).await;
        assert_eq!(body["timer"]["current"], "work");
        assert_eq!(body["timer"]["display"], "25:00");
    }

    #[tokio::test]
    async fn dark_mode_toggle_and_set() {
        let (router, _) = router();

        let (_, body) = call(&router, Method::POST, "/dark-mode/toggle", None).await;
        assert_eq!(body["timer"]["dark_mode"], true);
        assert_eq!(body["timer"]["theme"], "dark-mode");

        let (status, body) = call(&router, Method::PUT, "/dark-mode", Some(r#"{"enabled":false}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["dark_mode"], false);
    }

    #[tokio::test]
    async fn dark_mode_set_requires_body() {
        let (router, _) = router();
        let (status, _) = call(&router, Method::PUT, "/dark-mode", Some(r#"{"enabled":"yes"}"#)).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn health_check() {
        let (router, _) = router();
        let (status, body) = call(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
