mod config;
pub mod migrations;
pub mod store;

pub use config::{Config, GoalConfig, WeekConfig, WeekStart};
pub use store::SessionStore;

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/timelog[-dev]/` based on TIMELOG_ENV.
///
/// Set TIMELOG_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMELOG_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timelog-dev")
    } else {
        base_dir.join("timelog")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
