//! Timer engine implementation.
//!
//! The timer engine is a wall-clock-based state machine. It has no internal
//! thread and stores nothing derived: elapsed time is recomputed from the
//! anchor instant whenever the caller asks.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start()?;
//! // Poll from the shell:
//! let elapsed = engine.elapsed(Utc::now());
//! let session = engine.stop()?; // caller persists this
//! ```
//!
//! The engine never touches storage. Persisting the session returned by
//! [`TimerEngine::stop`] is the caller's job.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimerError;
use crate::session::Session;

/// State of the single timer. At most one session is ever being tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Idle,
    Running { started_at: DateTime<Utc> },
}

/// Core timer engine.
///
/// Operates on caller-supplied instants -- no internal thread. The shell is
/// responsible for polling [`TimerEngine::elapsed`] periodically for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerEngine {
    #[serde(default)]
    state: TimerState,
}

/// Serializable status report for display shells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub running: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_secs: f64,
    pub goal_secs: f64,
    /// Elapsed time over goal, clamped to `[0, 1]`.
    pub progress: f64,
    pub at: DateTime<Utc>,
}

impl TimerEngine {
    /// Create an engine in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Elapsed time at `now`: `now - started_at` while running, zero while
    /// idle. Pure query; clamped to zero if `now` precedes the anchor.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        match self.state {
            TimerState::Idle => Duration::zero(),
            TimerState::Running { started_at } => (now - started_at).max(Duration::zero()),
        }
    }

    /// Build a full status snapshot at `now` against a goal in seconds.
    pub fn snapshot(&self, now: DateTime<Utc>, goal_secs: f64) -> TimerSnapshot {
        let elapsed_secs = self
            .elapsed(now)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        TimerSnapshot {
            running: self.is_running(),
            started_at: match self.state {
                TimerState::Running { started_at } => Some(started_at),
                TimerState::Idle => None,
            },
            elapsed_secs,
            goal_secs,
            progress: crate::stats::progress(elapsed_secs, goal_secs),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start tracking now.
    ///
    /// # Errors
    /// Returns [`TimerError::AlreadyRunning`] if a session is already being
    /// tracked; the original anchor is kept.
    pub fn start(&mut self) -> Result<(), TimerError> {
        self.start_at(Utc::now())
    }

    /// Start tracking, anchored at an explicit instant.
    pub fn start_at(&mut self, now: DateTime<Utc>) -> Result<(), TimerError> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running { started_at: now };
                Ok(())
            }
            TimerState::Running { started_at } => {
                Err(TimerError::AlreadyRunning { since: started_at })
            }
        }
    }

    /// Stop tracking now and return the finalized session.
    ///
    /// # Errors
    /// Returns [`TimerError::NotRunning`] if the timer is idle.
    pub fn stop(&mut self) -> Result<Session, TimerError> {
        self.stop_at(Utc::now())
    }

    /// Stop tracking at an explicit instant.
    ///
    /// The session duration is `now - started_at`, clamped to zero if the
    /// host clock is non-monotonic.
    pub fn stop_at(&mut self, now: DateTime<Utc>) -> Result<Session, TimerError> {
        match self.state {
            TimerState::Idle => Err(TimerError::NotRunning),
            TimerState::Running { started_at } => {
                self.state = TimerState::Idle;
                Ok(Session::finalized(started_at, now))
            }
        }
    }

    /// Drop any running session and return to `Idle` without producing a
    /// session record. Used by hard reset.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
    }
}
