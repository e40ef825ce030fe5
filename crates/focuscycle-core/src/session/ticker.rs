//! Async tick driver for a session controller.
//!
//! One-second ticks evaluated strictly in sequence; a missed deadline
//! delays the next tick rather than firing a burst of overlapping
//! evaluations. Elapsed time comes from wall-clock timestamps, so
//! delayed ticks lose nothing.

use tokio::sync::watch;
use tokio::time::{self, Duration, MissedTickBehavior};

use chrono::Utc;

use super::{SessionController, TickOutcome};

/// Fixed tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Why the tick loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerExit {
    /// The active cycle ran out and was stamped finished.
    Finished,
    /// No cycle was active (anymore); nothing left to tick.
    Idle,
    /// The stop signal fired or its sender went away.
    Canceled,
}

/// Drive `controller` until the cycle ends or `stop` signals.
///
/// Each tick first re-reads the persisted snapshot, so transitions
/// made by other invocations against the same database are observed.
/// `on_tick` runs after every evaluation, including the final one.
pub async fn run(
    controller: &mut SessionController,
    mut stop: watch::Receiver<bool>,
    mut on_tick: impl FnMut(&SessionController, &TickOutcome),
) -> TickerExit {
    let mut interval = time::interval(TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            changed = stop.changed() => {
                if changed.is_err() || *stop.borrow() {
                    return TickerExit::Canceled;
                }
            }
            _ = interval.tick() => {
                let now = Utc::now();
                controller.refresh(now);
                let outcome = controller.tick(now);
                on_tick(controller, &outcome);
                match outcome {
                    TickOutcome::Idle => return TickerExit::Idle,
                    TickOutcome::Finished { .. } => return TickerExit::Finished,
                    TickOutcome::Running(_) => {}
                }
            }
        }
    }
}
