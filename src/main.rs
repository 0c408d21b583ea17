//! Flash Timer - A visual countdown timer with an auto-restarting alarm
//!
//! This is the main entry point for the flash-timer server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use flash_timer::{
    api::create_router,
    api::responses::VERSION,
    config::Config,
    state::AppState,
    tasks::tick_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("flash_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting flash-timer server v{}", VERSION);
    info!("Configuration: host={}, port={}, duration={}s, tick={}ms, step={}s",
          config.host, config.port, config.base_duration_seconds(),
          config.tick_interval().as_millis(), config.step);

    // Create application state
    let state = Arc::new(AppState::new(&config));

    // Start the engine tick background task
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_task(tick_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start         - Start the countdown");
    info!("  POST /pause         - Pause the countdown");
    info!("  POST /toggle        - Start or pause");
    info!("  POST /reset         - Reset to base duration (cancels alarm)");
    info!("  POST /adjust        - Shift remaining time by delta_seconds");
    info!("  POST /up, /down     - Nudge by {}s", config.step);
    info!("  PUT  /base-duration - Change the base duration");
    info!("  GET  /status        - Current timer and server status");
    info!("  GET  /events        - Server-sent timer snapshots");
    info!("  GET  /health        - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
