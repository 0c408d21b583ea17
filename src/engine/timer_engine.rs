//! Deadline-based countdown engine
//!
//! Remaining time is always derived from a stored deadline and the current
//! instant, never from counting ticks, so delayed or missed ticks cannot
//! introduce drift.

use std::time::{Duration, Instant};

use super::{
    clock::{Clock, SystemClock},
    display::{format_clock, DisplayFlags, TimerSnapshot},
    timer_state::{
        ceil_seconds, clamp_base_duration, clamp_seconds, TimerMode, TimerPhase, TimerState,
        ALARM_DURATION, MAX_SECONDS,
    },
};

/// State transition performed by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed
    Idle,
    /// The deadline passed and the solid alarm started
    AlarmStarted,
    /// The alarm ran its course and the countdown restarted from the base duration
    AutoRestarted,
}

/// Countdown state machine
///
/// Commands that make no sense in the current phase are silent no-ops; every
/// command reports whether it changed anything.
#[derive(Debug)]
pub struct TimerEngine<C = SystemClock> {
    state: TimerState,
    clock: C,
}

impl TimerEngine<SystemClock> {
    /// Create an engine reading the system clock
    pub fn new(base_duration_seconds: u64) -> Self {
        Self::with_clock(base_duration_seconds, SystemClock)
    }
}

impl<C: Clock> TimerEngine<C> {
    pub fn with_clock(base_duration_seconds: u64, clock: C) -> Self {
        Self {
            state: TimerState::new(base_duration_seconds),
            clock,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase()
    }

    pub fn base_duration_seconds(&self) -> u64 {
        self.state.base_duration_seconds
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Remaining seconds as of the clock's current instant
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_at(self.clock.now())
    }

    /// Remaining seconds as of `now`
    pub fn remaining_at(&self, now: Instant) -> u64 {
        match self.state.mode {
            TimerMode::Alarming { .. } => 0,
            TimerMode::Running { deadline } => {
                ceil_seconds(deadline.saturating_duration_since(now)).min(MAX_SECONDS)
            }
            TimerMode::Paused { remaining_seconds } => remaining_seconds,
        }
    }

    /// Seconds left of the solid alarm, if one is showing
    pub fn alarm_seconds_left(&self) -> Option<u64> {
        match self.state.mode {
            TimerMode::Alarming { ends_at } => Some(ceil_seconds(
                ends_at.saturating_duration_since(self.clock.now()),
            )),
            _ => None,
        }
    }

    pub fn flags(&self) -> DisplayFlags {
        DisplayFlags::compute(self.phase(), self.remaining_seconds())
    }

    pub fn is_alarming(&self) -> bool {
        self.state.is_alarming()
    }

    pub fn should_flash(&self) -> bool {
        self.flags().should_flash
    }

    pub fn is_low_time_color(&self) -> bool {
        self.flags().is_low_time_color
    }

    /// Capture everything the presentation layer needs at one instant
    pub fn snapshot(&self) -> TimerSnapshot {
        let now = self.clock.now();
        let phase = self.phase();
        let remaining_seconds = self.remaining_at(now);
        let alarm_seconds_left = match self.state.mode {
            TimerMode::Alarming { ends_at } => {
                Some(ceil_seconds(ends_at.saturating_duration_since(now)))
            }
            _ => None,
        };

        TimerSnapshot {
            mode: phase,
            remaining_seconds,
            display: format_clock(remaining_seconds as i64),
            base_duration_seconds: self.state.base_duration_seconds,
            flags: DisplayFlags::compute(phase, remaining_seconds),
            alarm_seconds_left,
        }
    }

    /// Begin counting down from the current remaining time
    pub fn start(&mut self) -> bool {
        match self.state.mode {
            TimerMode::Paused { remaining_seconds } => {
                let deadline = self.clock.now() + Duration::from_secs(remaining_seconds);
                self.state.mode = TimerMode::Running { deadline };
                true
            }
            TimerMode::Running { .. } | TimerMode::Alarming { .. } => false,
        }
    }

    /// Freeze the countdown at its current remaining time
    pub fn pause(&mut self) -> bool {
        match self.state.mode {
            TimerMode::Running { .. } => {
                let remaining_seconds = self.remaining_seconds();
                self.state.mode = TimerMode::Paused { remaining_seconds };
                true
            }
            TimerMode::Paused { .. } | TimerMode::Alarming { .. } => false,
        }
    }

    /// Pause when running, start otherwise
    pub fn toggle_start(&mut self) -> bool {
        if self.state.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Add `delta_seconds` (possibly negative) to the remaining time
    ///
    /// The result is clamped to `0..=MAX_SECONDS`. A running countdown keeps
    /// running with its deadline re-anchored to the new value.
    pub fn adjust(&mut self, delta_seconds: i64) -> bool {
        if self.state.is_alarming() {
            return false;
        }

        let now = self.clock.now();
        let current = self.remaining_at(now) as i64;
        let new_value = clamp_seconds(current.saturating_add(delta_seconds));

        self.state.mode = match self.state.mode {
            TimerMode::Running { .. } => TimerMode::Running {
                deadline: now + Duration::from_secs(new_value),
            },
            _ => TimerMode::Paused {
                remaining_seconds: new_value,
            },
        };
        true
    }

    /// Stop everything, cancel any alarm and restore the base duration
    pub fn reset(&mut self) {
        self.state.mode = TimerMode::Paused {
            remaining_seconds: self.state.base_duration_seconds,
        };
    }

    /// Change the duration used by the next reset or auto-restart
    ///
    /// Returns the value actually stored after clamping.
    pub fn set_base_duration(&mut self, seconds: i64) -> u64 {
        let stored = clamp_base_duration(clamp_seconds(seconds));
        self.state.base_duration_seconds = stored;
        stored
    }

    /// Advance the state machine using the engine's own clock
    pub fn tick(&mut self) -> TickOutcome {
        let now = self.clock.now();
        self.on_tick(now)
    }

    /// Advance the state machine to `now`
    pub fn on_tick(&mut self, now: Instant) -> TickOutcome {
        match self.state.mode {
            TimerMode::Alarming { ends_at } if now >= ends_at => {
                let base = self.state.base_duration_seconds;
                self.state.mode = TimerMode::Running {
                    deadline: now + Duration::from_secs(base),
                };
                TickOutcome::AutoRestarted
            }
            TimerMode::Running { deadline } if now >= deadline => {
                self.state.mode = TimerMode::Alarming {
                    ends_at: now + ALARM_DURATION,
                };
                TickOutcome::AlarmStarted
            }
            _ => TickOutcome::Idle,
        }
    }
}
