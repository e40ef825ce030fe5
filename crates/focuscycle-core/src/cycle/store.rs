//! Cycle collection state and its pure transition function.
//!
//! All mutation goes through `reduce`, which is total: an action that
//! does not apply to the current state returns the state unchanged.
//! Timestamps ride on the actions so transitions stay deterministic
//! and replayable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cycle;

/// The whole persisted session: every cycle ever created plus a
/// pointer to the one currently counting down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclesState {
    pub cycles: Vec<Cycle>,
    pub active_cycle_id: Option<String>,
}

impl CyclesState {
    // ── Queries ──────────────────────────────────────────────────────

    /// The cycle currently counting down, if any.
    ///
    /// Activity is derived: the pointer must match AND the cycle must
    /// still be running. A pointer left on a finished cycle does not
    /// make it active.
    pub fn active_cycle(&self) -> Option<&Cycle> {
        let id = self.active_cycle_id.as_deref()?;
        self.cycles
            .iter()
            .find(|cycle| cycle.id == id && cycle.is_running())
    }

    pub fn has_active_cycle(&self) -> bool {
        self.active_cycle().is_some()
    }

    /// The cycle the pointer names, running or not.
    ///
    /// After a finish the pointer still names the finished cycle, and
    /// displays want to keep showing its task.
    pub fn referenced_cycle(&self) -> Option<&Cycle> {
        let id = self.active_cycle_id.as_deref()?;
        self.cycles.iter().find(|cycle| cycle.id == id)
    }
}

/// Transitions over `CyclesState`. Terminal transitions carry the
/// timestamp to stamp on the cycle.
#[derive(Debug, Clone)]
pub enum CyclesAction {
    /// Append a cycle and point the session at it.
    AddNewCycle(Cycle),
    /// Stamp the active cycle finished. The pointer is left in place
    /// so displays can keep naming the finished task.
    MarkActiveCycleAsFinished { at: DateTime<Utc> },
    /// Stamp the active cycle interrupted and clear the pointer.
    InterruptActiveCycle { at: DateTime<Utc> },
}

/// Apply one action. Unmatched actions (terminal transitions with no
/// active cycle) return the state unchanged.
pub fn reduce(mut state: CyclesState, action: CyclesAction) -> CyclesState {
    match action {
        CyclesAction::AddNewCycle(cycle) => {
            state.active_cycle_id = Some(cycle.id.clone());
            state.cycles.push(cycle);
            state
        }
        CyclesAction::MarkActiveCycleAsFinished { at } => {
            let Some(index) = active_index(&state) else {
                return state;
            };
            state.cycles[index].finished_date = Some(at);
            state
        }
        CyclesAction::InterruptActiveCycle { at } => {
            let Some(index) = active_index(&state) else {
                return state;
            };
            state.cycles[index].interrupted_date = Some(at);
            state.active_cycle_id = None;
            state
        }
    }
}

fn active_index(state: &CyclesState) -> Option<usize> {
    let id = state.active_cycle_id.as_deref()?;
    state
        .cycles
        .iter()
        .position(|cycle| cycle.id == id && cycle.is_running())
}
