use chrono::Local;
use clap::Subcommand;
use timelog_core::storage::SessionStore;
use uuid::Uuid;

use crate::common::format_duration;

use super::timer::{load_engine, save_engine};

#[derive(Subcommand)]
pub enum LogAction {
    /// List recorded sessions
    List {
        /// Print sessions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete one session by id
    Delete {
        /// Session id (UUID)
        id: Uuid,
    },
    /// Hard reset: delete every session and reset the timer
    Clear,
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SessionStore::open()?;

    match action {
        LogAction::List { json } => {
            let sessions = store.all()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
                return Ok(());
            }
            for session in &sessions {
                let start = session.started_at.with_timezone(&Local);
                let end = session
                    .ended_at
                    .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {} -> {}  {}  {}",
                    start.format("%Y-%m-%d"),
                    start.format("%H:%M:%S"),
                    end,
                    format_duration(session.duration_secs.unwrap_or(0.0)),
                    session.id,
                );
            }
            let engine = load_engine(&store);
            if let timelog_core::TimerState::Running { started_at } = engine.state() {
                let start = started_at.with_timezone(&Local);
                println!(
                    "{}  {} -> (running)",
                    start.format("%Y-%m-%d"),
                    start.format("%H:%M:%S"),
                );
            }
        }
        LogAction::Delete { id } => {
            // Missing ids are a no-op by design; report which case we hit.
            if store.delete(id)? {
                println!("deleted {id}");
            } else {
                println!("no session with id {id}");
            }
        }
        LogAction::Clear => {
            let deleted = store.delete_all()?;
            let mut engine = load_engine(&store);
            engine.reset();
            save_engine(&store, &engine)?;
            println!("deleted {deleted} sessions");
        }
    }

    Ok(())
}
