//! Timer state structure and the bounds it lives within

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Upper bound for any remaining-time value (10 hours)
pub const MAX_SECONDS: u64 = 36_000;

/// Base duration used when nothing else is configured (5 minutes)
pub const DEFAULT_BASE_DURATION_SECONDS: u64 = 300;

/// How long the solid alarm stays up before the timer restarts itself
pub const ALARM_DURATION: Duration = Duration::from_secs(5);

/// Remaining time at or below which the display switches to its warning style
pub const LOW_TIME_THRESHOLD_SECONDS: u64 = 60;

/// Current phase of the timer together with the data that is authoritative in it
///
/// A deadline only exists while running and an alarm end only exists while
/// alarming, so the mode/field pairing can never go out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Paused { remaining_seconds: u64 },
    Running { deadline: Instant },
    Alarming { ends_at: Instant },
}

/// Data-free view of [`TimerMode`], suitable for display and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Paused,
    Running,
    Alarming,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Paused => "paused",
            TimerPhase::Running => "running",
            TimerPhase::Alarming => "alarming",
        }
    }
}

impl std::fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timer state owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    /// Duration restored on reset and on auto-restart after an alarm
    pub base_duration_seconds: u64,
    pub mode: TimerMode,
}

impl TimerState {
    /// Create a paused state holding the full base duration
    pub fn new(base_duration_seconds: u64) -> Self {
        let base_duration_seconds = clamp_base_duration(base_duration_seconds);
        Self {
            base_duration_seconds,
            mode: TimerMode::Paused {
                remaining_seconds: base_duration_seconds,
            },
        }
    }

    pub fn phase(&self) -> TimerPhase {
        match self.mode {
            TimerMode::Paused { .. } => TimerPhase::Paused,
            TimerMode::Running { .. } => TimerPhase::Running,
            TimerMode::Alarming { .. } => TimerPhase::Alarming,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.mode, TimerMode::Running { .. })
    }

    pub fn is_alarming(&self) -> bool {
        matches!(self.mode, TimerMode::Alarming { .. })
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DURATION_SECONDS)
    }
}

/// Clamp a signed second count into `0..=MAX_SECONDS`
pub fn clamp_seconds(seconds: i64) -> u64 {
    seconds.clamp(0, MAX_SECONDS as i64) as u64
}

/// Clamp a base duration into `1..=MAX_SECONDS`
///
/// A zero base would make every auto-restart alarm again on the next tick.
pub fn clamp_base_duration(seconds: u64) -> u64 {
    seconds.clamp(1, MAX_SECONDS)
}

/// Whole seconds in `duration`, rounded up
pub fn ceil_seconds(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}
