use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every lifecycle change produces an Event.
/// Frontends render them; `StateSnapshot` is the poll answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CycleStarted {
        cycle_id: String,
        task: String,
        minutes_amount: u32,
        at: DateTime<Utc>,
    },
    CycleInterrupted {
        cycle_id: String,
        task: String,
        at: DateTime<Utc>,
    },
    CycleFinished {
        cycle_id: String,
        task: String,
        at: DateTime<Utc>,
    },
    /// Full countdown reading for displays, valid whether or not a
    /// cycle is active. `title` is ready to copy into a window or
    /// terminal title.
    StateSnapshot {
        has_active_cycle: bool,
        seconds_passed: u64,
        remaining_seconds: u64,
        minutes_display: String,
        seconds_display: String,
        title: String,
        at: DateTime<Utc>,
    },
}
