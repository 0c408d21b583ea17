//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::engine::{timer_state::clamp_base_duration, DEFAULT_BASE_DURATION_SECONDS};

/// Fastest and slowest allowed tick cadence in milliseconds
///
/// Ticks slower than once a second make the zero crossing and the alarm end
/// visibly late.
pub const TICK_MS_RANGE: (u64, u64) = (10, 1000);

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "flash-timer")]
#[command(about = "A visual countdown timer with an auto-restarting alarm, controlled over HTTP")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Base countdown duration in seconds, restored on reset and after each alarm
    #[arg(short, long, default_value_t = DEFAULT_BASE_DURATION_SECONDS)]
    pub duration: u64,

    /// Interval between engine ticks in milliseconds
    #[arg(long, default_value = "100")]
    pub tick_ms: u64,

    /// Seconds added or removed by the /up and /down endpoints
    #[arg(long, default_value = "10")]
    pub step: u64,

    /// Start counting down immediately
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Base duration clamped into the engine's accepted range
    pub fn base_duration_seconds(&self) -> u64 {
        clamp_base_duration(self.duration)
    }

    /// Tick cadence clamped into [`TICK_MS_RANGE`]
    pub fn tick_interval(&self) -> Duration {
        let (min, max) = TICK_MS_RANGE;
        Duration::from_millis(self.tick_ms.clamp(min, max))
    }

    /// Nudge step as a signed delta
    pub fn step_seconds(&self) -> i64 {
        i64::try_from(self.step).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["flash-timer"]).unwrap();
        assert_eq!(config.port, 20554);
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.base_duration_seconds(), 300);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.step_seconds(), 10);
        assert!(!config.autostart);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::try_parse_from([
            "flash-timer",
            "--duration",
            "0",
            "--tick-ms",
            "5000",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.base_duration_seconds(), 1);
        assert_eq!(config.tick_interval(), Duration::from_millis(1000));
        assert_eq!(config.log_level(), "debug");
    }
}
