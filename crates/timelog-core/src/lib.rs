//! # Timelog Core Library
//!
//! Core business logic for timelog, a personal time tracker: start and stop
//! a single work-session timer, keep every finished session in a durable
//! log, and report daily/weekly totals plus progress toward a duration goal.
//!
//! The library is shell-agnostic. The CLI binary (and any other front end)
//! owns scheduling and display; the core only answers pure queries and
//! commits state changes.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a two-state wall-clock machine (`Idle`/`Running`).
//!   Elapsed time is recomputed from the anchor instant on every query, so
//!   correctness does not depend on any polling cadence.
//! - **Session Store**: SQLite-backed session log. Only finalized sessions
//!   are accepted; every mutation commits before returning.
//! - **Stats**: pure aggregation over a session snapshot -- daily total,
//!   weekly total with a configurable week-start day, and a clamped
//!   progress ratio.
//! - **Config**: TOML-based preferences (duration goal, week start).
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`SessionStore`]: Session persistence
//! - [`Session`]: One recorded interval of tracked time
//! - [`Config`]: Application configuration management

pub mod error;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError, TimerError, ValidationError};
pub use session::Session;
pub use storage::{Config, SessionStore, WeekStart};
pub use timer::{TimerEngine, TimerSnapshot, TimerState};
