//! # Focuscycle Core Library
//!
//! Core business logic for the focuscycle countdown timer. All
//! operations are available through the library API; the CLI binary is
//! a thin layer over it.
//!
//! ## Architecture
//!
//! - **Cycle Store**: a pure reducer over the full session state; every
//!   transition produces a new state, invalid transitions degrade to
//!   no-ops
//! - **Countdown**: elapsed time recomputed from wall-clock timestamps
//!   on every tick, so accuracy survives suspends and restarts
//! - **Session Controller**: translates user intents and ticks into
//!   store transitions and mirrors each new state to storage
//! - **Storage**: SQLite-backed snapshot slot and TOML configuration
//!
//! ## Key Components
//!
//! - [`SessionController`]: orchestration entry point
//! - [`reduce`]: the cycle store transition function
//! - [`SnapshotStore`]: versioned state persistence
//! - [`Config`]: application configuration management

pub mod cycle;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;

pub use cycle::{
    reduce, Countdown, Cycle, CycleStatus, CyclesAction, CyclesState, DurationBounds, NewCycle,
};
pub use error::{ConfigError, CoreError, SessionError, StorageError, ValidationError};
pub use events::Event;
pub use session::{SessionController, TickOutcome, TickerExit};
pub use storage::{Config, Database, SnapshotStore};
