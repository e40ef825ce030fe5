//! Versioned persistence of the cycle session state.
//!
//! The whole `CyclesState` is serialized to JSON and stored under one
//! versioned key. The version suffix makes stale layouts self-evicting:
//! after an incompatible change the new key reads empty and the session
//! starts fresh instead of failing to parse forever.

use crate::cycle::CyclesState;
use crate::error::CoreError;

use super::Database;

/// Storage slot for the session state. Bump the suffix when the
/// persisted layout changes incompatibly.
pub const CYCLES_STATE_KEY: &str = "focuscycle:cycles-state-1.0.0";

/// Reads and writes `CyclesState` through the kv store.
pub struct SnapshotStore {
    db: Database,
}

impl SnapshotStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Load the stored state, if the slot holds a parseable one.
    pub fn try_load(&self) -> Result<Option<CyclesState>, CoreError> {
        let Some(raw) = self.db.kv_get(CYCLES_STATE_KEY)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Load the stored state, falling back to an empty session when the
    /// slot is missing or unreadable.
    pub fn load(&self) -> CyclesState {
        self.try_load().ok().flatten().unwrap_or_default()
    }

    /// Persist the whole state, replacing the previous snapshot.
    pub fn save(&self, state: &CyclesState) -> Result<(), CoreError> {
        let raw = serde_json::to_string(state)?;
        self.db.kv_set(CYCLES_STATE_KEY, &raw)?;
        Ok(())
    }
}
