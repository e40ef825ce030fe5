//! Cycle domain types: a single countdown session and its lifecycle.
//!
//! A cycle is created running and ends in exactly one of two terminal
//! states: finished (the countdown ran out) or interrupted (the user
//! stopped it early). Terminal states are recorded as timestamps on the
//! cycle itself, so status is derived rather than stored.

mod countdown;
mod store;

pub use countdown::{seconds_passed, Countdown};
pub use store::{reduce, CyclesAction, CyclesState};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Derived lifecycle status of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleStatus {
    Running,
    Finished,
    Interrupted,
}

impl CycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleStatus::Running => "running",
            CycleStatus::Finished => "finished",
            CycleStatus::Interrupted => "interrupted",
        }
    }
}

/// One countdown session.
///
/// `interrupted_date` and `finished_date` are mutually exclusive; the
/// store only ever sets one of them, and setting either is permanent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub id: String,
    pub task: String,
    pub minutes_amount: u32,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupted_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_date: Option<DateTime<Utc>>,
}

impl Cycle {
    /// Create a cycle starting now.
    pub fn new(task: impl Into<String>, minutes_amount: u32) -> Self {
        Self::starting_at(task, minutes_amount, Utc::now())
    }

    /// Create a cycle with an explicit start timestamp.
    ///
    /// The id embeds the start time so ids sort chronologically; the
    /// uuid suffix keeps them unique within the same second.
    pub fn starting_at(
        task: impl Into<String>,
        minutes_amount: u32,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("cycle-{}-{}", start_date.timestamp(), Uuid::new_v4()),
            task: task.into(),
            minutes_amount,
            start_date,
            interrupted_date: None,
            finished_date: None,
        }
    }

    /// Planned length in whole seconds.
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.minutes_amount).saturating_mul(60)
    }

    pub fn status(&self) -> CycleStatus {
        if self.finished_date.is_some() {
            CycleStatus::Finished
        } else if self.interrupted_date.is_some() {
            CycleStatus::Interrupted
        } else {
            CycleStatus::Running
        }
    }

    /// True while neither terminal date is set.
    pub fn is_running(&self) -> bool {
        self.interrupted_date.is_none() && self.finished_date.is_none()
    }
}

/// Allowed range for a cycle's length, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBounds {
    pub min_minutes: u32,
    pub max_minutes: u32,
}

impl Default for DurationBounds {
    fn default() -> Self {
        Self {
            min_minutes: 1,
            max_minutes: 60,
        }
    }
}

impl DurationBounds {
    pub fn contains(&self, minutes: u32) -> bool {
        minutes >= self.min_minutes && minutes <= self.max_minutes
    }
}

/// User input for starting a cycle, validated before a `Cycle` is minted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCycle {
    pub task: String,
    pub minutes_amount: u32,
}

impl NewCycle {
    pub fn validate(&self, bounds: &DurationBounds) -> Result<(), ValidationError> {
        if self.task.trim().is_empty() {
            return Err(ValidationError::EmptyTask);
        }
        if !bounds.contains(self.minutes_amount) {
            return Err(ValidationError::MinutesOutOfRange {
                minutes: self.minutes_amount,
                min: bounds.min_minutes,
                max: bounds.max_minutes,
            });
        }
        Ok(())
    }
}
