//! Session orchestration over the cycle store.
//!
//! The controller is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically, or driving it through `ticker::run`.
//!
//! ## Cycle lifecycle
//!
//! ```text
//! (idle) -> Running -> (Finished | Interrupted) -> (idle)
//! ```
//!
//! Every state change is mirrored to the snapshot store. A write
//! failure leaves the in-memory state authoritative for this session;
//! a read failure at startup starts the session empty.

pub mod ticker;

pub use ticker::TickerExit;

use chrono::{DateTime, Utc};

use crate::cycle::{
    reduce, Countdown, Cycle, CyclesAction, CyclesState, DurationBounds, NewCycle,
};
use crate::error::SessionError;
use crate::events::Event;
use crate::storage::SnapshotStore;

/// What one tick observed.
#[derive(Debug, Clone)]
pub enum TickOutcome {
    /// No active cycle; the caller should stop ticking.
    Idle,
    /// The active cycle is still counting down.
    Running(Countdown),
    /// This tick crossed the planned length; the cycle was stamped
    /// finished and ticking for it should stop.
    Finished { countdown: Countdown, event: Event },
}

/// Orchestrates user intents and ticks into store transitions.
pub struct SessionController {
    state: CyclesState,
    snapshots: SnapshotStore,
    bounds: DurationBounds,
    /// Last elapsed reading published to observers. Reset on start,
    /// clamped to the planned length on finish.
    amount_seconds_passed: u64,
}

impl SessionController {
    /// Rehydrate the session from the snapshot store.
    pub fn load(snapshots: SnapshotStore, bounds: DurationBounds) -> Self {
        Self::load_at(snapshots, bounds, Utc::now())
    }

    /// Rehydrate with an explicit "now" for the first elapsed reading.
    pub fn load_at(snapshots: SnapshotStore, bounds: DurationBounds, now: DateTime<Utc>) -> Self {
        let state = snapshots.load();
        let mut controller = Self {
            state,
            snapshots,
            bounds,
            amount_seconds_passed: 0,
        };
        controller.sync_amount(now);
        controller
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &CyclesState {
        &self.state
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.state.cycles
    }

    pub fn active_cycle(&self) -> Option<&Cycle> {
        self.state.active_cycle()
    }

    pub fn has_active_cycle(&self) -> bool {
        self.state.has_active_cycle()
    }

    pub fn amount_seconds_passed(&self) -> u64 {
        self.amount_seconds_passed
    }

    pub fn bounds(&self) -> DurationBounds {
        self.bounds
    }

    /// Build a full state snapshot event.
    ///
    /// While a cycle runs the title is the remaining "mm:ss"; idle
    /// snapshots carry `idle_title` and a zeroed clock.
    pub fn snapshot_event(&self, idle_title: &str, now: DateTime<Utc>) -> Event {
        match self.state.active_cycle() {
            Some(active) => {
                let countdown = Countdown::of(active, now);
                Event::StateSnapshot {
                    has_active_cycle: true,
                    seconds_passed: countdown.seconds_passed,
                    remaining_seconds: countdown.remaining_seconds(),
                    minutes_display: countdown.minutes_display(),
                    seconds_display: countdown.seconds_display(),
                    title: countdown.clock(),
                    at: now,
                }
            }
            None => Event::StateSnapshot {
                has_active_cycle: false,
                seconds_passed: self.amount_seconds_passed,
                remaining_seconds: 0,
                minutes_display: "00".into(),
                seconds_display: "00".into(),
                title: idle_title.to_string(),
                at: now,
            },
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a new cycle now.
    pub fn start_cycle(&mut self, input: NewCycle) -> Result<Event, SessionError> {
        self.start_cycle_at(input, Utc::now())
    }

    /// Start a new cycle with an explicit start timestamp.
    ///
    /// The input is re-validated even though callers usually validate
    /// first; direct API use must not smuggle bad cycles into the store.
    pub fn start_cycle_at(
        &mut self,
        input: NewCycle,
        now: DateTime<Utc>,
    ) -> Result<Event, SessionError> {
        if self.state.has_active_cycle() {
            return Err(SessionError::CycleAlreadyActive);
        }
        input.validate(&self.bounds)?;

        let cycle = Cycle::starting_at(input.task, input.minutes_amount, now);
        let event = Event::CycleStarted {
            cycle_id: cycle.id.clone(),
            task: cycle.task.clone(),
            minutes_amount: cycle.minutes_amount,
            at: now,
        };
        self.apply(CyclesAction::AddNewCycle(cycle));
        self.amount_seconds_passed = 0;
        Ok(event)
    }

    /// Interrupt the active cycle now. Returns `None` if nothing runs.
    pub fn interrupt_cycle(&mut self) -> Option<Event> {
        self.interrupt_cycle_at(Utc::now())
    }

    /// Interrupt with an explicit timestamp.
    pub fn interrupt_cycle_at(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let (cycle_id, task) = {
            let active = self.state.active_cycle()?;
            (active.id.clone(), active.task.clone())
        };
        self.apply(CyclesAction::InterruptActiveCycle { at: now });
        Some(Event::CycleInterrupted { cycle_id, task, at: now })
    }

    /// Evaluate one tick at `now`.
    ///
    /// Elapsed time comes from the cycle's start date, never from
    /// counting ticks, so a suspended process catches up on its first
    /// tick after resuming. The first tick strictly past the planned
    /// length finishes the cycle and clamps the published elapsed
    /// reading to the total.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        let Some(active) = self.state.active_cycle() else {
            return TickOutcome::Idle;
        };
        let countdown = Countdown::of(active, now);
        if countdown.is_overrun() {
            let event = Event::CycleFinished {
                cycle_id: active.id.clone(),
                task: active.task.clone(),
                at: now,
            };
            self.apply(CyclesAction::MarkActiveCycleAsFinished { at: now });
            self.amount_seconds_passed = countdown.clamped_seconds_passed();
            TickOutcome::Finished { countdown, event }
        } else {
            self.amount_seconds_passed = countdown.seconds_passed;
            TickOutcome::Running(countdown)
        }
    }

    /// Re-read the persisted snapshot, adopting it when readable.
    ///
    /// Lets a long-lived watch loop observe transitions made by other
    /// invocations against the same database. On read failure the
    /// in-memory state stays authoritative.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        if let Ok(Some(state)) = self.snapshots.try_load() {
            self.state = state;
            self.sync_amount(now);
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply(&mut self, action: CyclesAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        if let Err(e) = self.snapshots.save(&self.state) {
            eprintln!("Warning: failed to persist cycle state: {e}");
        }
    }

    fn sync_amount(&mut self, now: DateTime<Utc>) {
        if let Some(active) = self.state.active_cycle() {
            self.amount_seconds_passed = Countdown::of(active, now).clamped_seconds_passed();
        }
    }
}
