//! Derived display values: warning flags, clock formatting and snapshots

use serde::{Deserialize, Serialize};

use super::timer_state::{TimerPhase, LOW_TIME_THRESHOLD_SECONDS};

/// Visual flags derived from the phase and the remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayFlags {
    /// Solid full-screen alarm is showing
    pub is_alarming: bool,
    /// Pulsing flash overlay should be animating
    pub should_flash: bool,
    /// Digits should use the danger color
    pub is_low_time_color: bool,
}

impl DisplayFlags {
    pub fn compute(phase: TimerPhase, remaining_seconds: u64) -> Self {
        let is_alarming = phase == TimerPhase::Alarming;
        let low = remaining_seconds <= LOW_TIME_THRESHOLD_SECONDS;

        Self {
            is_alarming,
            should_flash: low && remaining_seconds > 0 && !is_alarming,
            is_low_time_color: low && !is_alarming,
        }
    }
}

/// Format seconds as `M:SS`, minutes unpadded
///
/// Negative input renders as `0:00`.
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Point-in-time view of the timer handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: TimerPhase,
    pub remaining_seconds: u64,
    /// `remaining_seconds` rendered with [`format_clock`]
    pub display: String,
    pub base_duration_seconds: u64,
    #[serde(flatten)]
    pub flags: DisplayFlags,
    /// Seconds until the alarm ends and the timer restarts, while alarming
    pub alarm_seconds_left: Option<u64>,
}
