//! Timer state machine.

mod engine;

pub use engine::{TimerEngine, TimerSnapshot, TimerState};
