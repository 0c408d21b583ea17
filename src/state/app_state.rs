//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    engine::{TickOutcome, TimerEngine, TimerSnapshot},
};

/// Main application state that owns the timer engine
///
/// Handlers and the tick task never touch the engine directly; every
/// mutation goes through a method here so that it is serialized by the lock
/// and followed by a snapshot notification.
#[derive(Debug)]
pub struct AppState {
    /// The countdown engine, guarded so commands and ticks never interleave
    pub engine: Arc<Mutex<TimerEngine>>,
    /// Cadence of the background tick task
    pub tick_interval: Duration,
    /// Seconds moved by the up/down nudges
    pub step_seconds: i64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel carrying the latest snapshot to subscribers
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState from the parsed configuration
    pub fn new(config: &Config) -> Self {
        let mut engine = TimerEngine::new(config.base_duration_seconds());
        if config.autostart {
            engine.start();
        }
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        Self {
            engine: Arc::new(Mutex::new(engine)),
            tick_interval: config.tick_interval(),
            step_seconds: config.step_seconds(),
            start_time: Instant::now(),
            port: config.port,
            host: config.host.clone(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply a command to the engine and notify snapshot subscribers
    ///
    /// The command returns whether it changed anything; ignored commands are
    /// still recorded as the last action.
    pub fn apply_command<F>(&self, action: &str, command: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut TimerEngine) -> bool,
    {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        let changed = command(&mut *engine);
        let snapshot = engine.snapshot();
        drop(engine); // Release the lock early

        if changed {
            info!("{} applied: mode={}, remaining={}", action, snapshot.mode, snapshot.display);
        } else {
            debug!("{} ignored while {}", action, snapshot.mode);
        }

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    /// Start the countdown
    pub fn start(&self) -> Result<TimerSnapshot, String> {
        self.apply_command("start", |engine| engine.start())
    }

    /// Pause the countdown
    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        self.apply_command("pause", |engine| engine.pause())
    }

    /// Start when paused, pause when running
    pub fn toggle(&self) -> Result<TimerSnapshot, String> {
        self.apply_command("toggle", |engine| engine.toggle_start())
    }

    /// Reset to the base duration, cancelling any alarm
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        self.apply_command("reset", |engine| {
            engine.reset();
            true
        })
    }

    /// Shift the remaining time by a signed number of seconds
    pub fn adjust(&self, delta_seconds: i64) -> Result<TimerSnapshot, String> {
        self.apply_command(&format!("adjust({:+})", delta_seconds), |engine| {
            engine.adjust(delta_seconds)
        })
    }

    /// Add one configured step
    pub fn nudge_up(&self) -> Result<TimerSnapshot, String> {
        self.adjust(self.step_seconds)
    }

    /// Remove one configured step
    pub fn nudge_down(&self) -> Result<TimerSnapshot, String> {
        self.adjust(self.step_seconds.saturating_neg())
    }

    /// Change the base duration used by later resets and auto-restarts
    pub fn set_base_duration(&self, seconds: i64) -> Result<TimerSnapshot, String> {
        self.apply_command("set-base-duration", |engine| {
            let stored = engine.set_base_duration(seconds);
            if i64::try_from(stored).ok() != Some(seconds) {
                warn!("Base duration {} out of range, clamped to {}", seconds, stored);
            }
            true
        })
    }

    /// Advance the engine to the current instant
    pub fn tick(&self) -> Result<TickOutcome, String> {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        let outcome = engine.tick();
        let snapshot = engine.snapshot();
        drop(engine);

        match outcome {
            TickOutcome::AlarmStarted => {
                info!("Countdown reached zero, alarm started");
            }
            TickOutcome::AutoRestarted => {
                info!("Alarm finished, restarting countdown from {}", snapshot.display);
            }
            TickOutcome::Idle => {}
        }

        self.publish(snapshot);
        Ok(outcome)
    }

    /// Get the current timer snapshot
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.engine.lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Publish a snapshot if it differs from the last one sent
    fn publish(&self, snapshot: TimerSnapshot) {
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
