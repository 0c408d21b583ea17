//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, error, warn};

use crate::{engine::TimerSnapshot, state::AppState};
use super::responses::{
    AdjustRequest, ApiResponse, BaseDurationRequest, HealthResponse, StatusResponse,
};

/// Turn the result of a state command into an HTTP response
fn respond(
    result: Result<TimerSnapshot, String>,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(snapshot) => Ok(Json(ApiResponse::new(message, snapshot))),
        Err(e) => {
            error!("{} failed: {}", message, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.start(), "Start")
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.pause(), "Pause")
}

/// Handle POST /toggle - Start or pause depending on the current phase
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.toggle(), "Toggle")
}

/// Handle POST /reset - Restore the base duration and cancel any alarm
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.reset(), "Reset")
}

/// Handle POST /adjust - Shift remaining time by a signed delta
pub async fn adjust_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdjustRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.adjust(request.delta_seconds), "Adjust")
}

/// Handle POST /up - Add one step
pub async fn up_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.nudge_up(), "Up")
}

/// Handle POST /down - Remove one step
pub async fn down_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.nudge_down(), "Down")
}

/// Handle PUT /base-duration - Change the duration used by reset and auto-restart
pub async fn base_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BaseDurationRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.set_base_duration(request.seconds), "Base duration update")
}

/// Handle GET /status - Return the current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        tick_interval_ms: u64::try_from(state.tick_interval.as_millis()).unwrap_or(u64::MAX),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream snapshots as Server-Sent Events
///
/// The current snapshot is sent immediately, then one event per change.
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Event stream subscriber connected");

    let mut rx = state.subscribe();
    let initial = rx.borrow_and_update().clone();

    let updates = stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let snapshot = rx.borrow_and_update().clone();
        Some((snapshot, rx))
    });

    let events = stream::once(async move { initial })
        .chain(updates)
        .filter_map(|snapshot| async move {
            match Event::default().event("timer").json_data(&snapshot) {
                Ok(event) => Some(Ok(event)),
                Err(e) => {
                    warn!("Failed to encode snapshot event: {}", e);
                    None
                }
            }
        });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
