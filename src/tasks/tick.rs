//! Engine tick background task

use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::state::AppState;

/// Background task that drives the engine's tick handler at a fixed cadence
///
/// Remaining time is derived from the engine's deadline, so a skipped or late
/// tick only delays the alarm edges; it never skews the countdown.
pub async fn tick_task(state: Arc<AppState>) {
    info!("Starting tick task every {}ms", state.tick_interval.as_millis());

    let mut ticker = interval(state.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        if let Err(e) = state.tick() {
            error!("Failed to tick timer engine: {}", e);
        }
    }
}
