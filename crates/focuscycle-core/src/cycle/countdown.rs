//! Wall-clock countdown arithmetic.
//!
//! Elapsed time is always recomputed from the cycle's start date and a
//! caller-supplied "now", so the countdown survives process restarts
//! and never depends on how often anyone polled it.

use chrono::{DateTime, Utc};

use super::Cycle;

/// Whole seconds elapsed since `start`, clamped at zero.
///
/// A wall clock moved backwards must not produce a negative reading.
pub fn seconds_passed(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    now.signed_duration_since(start).num_seconds().max(0) as u64
}

/// A point-in-time reading of a cycle's countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub seconds_passed: u64,
    pub total_seconds: u64,
}

impl Countdown {
    /// Read the countdown for `cycle` as of `now`.
    pub fn of(cycle: &Cycle, now: DateTime<Utc>) -> Self {
        Self {
            seconds_passed: seconds_passed(cycle.start_date, now),
            total_seconds: cycle.total_seconds(),
        }
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.total_seconds.saturating_sub(self.seconds_passed)
    }

    /// True once elapsed time has strictly exceeded the planned length.
    /// At exactly the planned length the cycle is still running, so a
    /// 25-minute cycle displays 00:00 for one final second.
    pub fn is_overrun(&self) -> bool {
        self.seconds_passed > self.total_seconds
    }

    /// Elapsed seconds capped at the planned length, for recording a
    /// finished cycle without counting the overrun.
    pub fn clamped_seconds_passed(&self) -> u64 {
        self.seconds_passed.min(self.total_seconds)
    }

    pub fn minutes_display(&self) -> String {
        format!("{:02}", self.remaining_seconds() / 60)
    }

    pub fn seconds_display(&self) -> String {
        format!("{:02}", self.remaining_seconds() % 60)
    }

    /// "mm:ss" remaining.
    pub fn clock(&self) -> String {
        format!("{}:{}", self.minutes_display(), self.seconds_display())
    }
}
