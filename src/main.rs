//! Pomodoro Timer - A state-managed HTTP server running a Pomodoro countdown
//!
//! This is the main entry point for the pomodoro-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::notifier_from_config,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    config.validate()?;

    info!("Starting pomodoro-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, work={}min, short break={}min, long break={}min every {} sessions, on zero={:?}",
          config.host, config.port, config.work, config.short_break,
          config.long_break, config.long_break_every, config.on_zero);

    // Create application state
    let state = Arc::new(AppState::new(&config, notifier_from_config(&config)));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start      - Run the current session");
    info!("  POST /timer/pause      - Stop ticking (alias: /timer/stop)");
    info!("  POST /timer/resume     - Continue from the remaining time");
    info!("  POST /timer/reset      - Refill the current session");
    info!("  POST /timer/restart    - Back to a fresh work session");
    info!("  POST /timer/change     - Toggle work/break");
    info!("  POST /timer/increment  - Add time (default 5 minutes)");
    info!("  POST /timer/decrement  - Remove time (default 5 minutes)");
    info!("  PUT  /durations        - Change session lengths");
    info!("  POST /dark-mode/toggle - Toggle dark mode");
    info!("  PUT  /dark-mode        - Set dark mode");
    info!("  GET  /status           - Current timer and server status");
    info!("  GET  /events           - Server-sent snapshot stream");
    info!("  GET  /health           - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.stop() {
        tracing::warn!("Failed to stop ticker: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
