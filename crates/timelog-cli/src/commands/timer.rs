use chrono::Utc;
use clap::Subcommand;
use timelog_core::storage::{Config, SessionStore};
use timelog_core::timer::TimerEngine;

const ENGINE_KEY: &str = "timer_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start tracking a new session
    Start,
    /// Stop tracking and persist the finished session
    Stop,
    /// Print the current timer state as JSON
    Status,
}

pub(crate) fn load_engine(store: &SessionStore) -> TimerEngine {
    if let Ok(Some(json)) = store.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<TimerEngine>(&json) {
            return engine;
        }
    }
    TimerEngine::new()
}

pub(crate) fn save_engine(
    store: &SessionStore,
    engine: &TimerEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    store.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SessionStore::open()?;
    let config = Config::load_or_default();
    let goal_secs = config.goal.duration_secs as f64;
    let mut engine = load_engine(&store);

    match action {
        TimerAction::Start => {
            engine.start()?;
            save_engine(&store, &engine)?;
            let snapshot = engine.snapshot(Utc::now(), goal_secs);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        TimerAction::Stop => {
            let session = engine.stop()?;
            // Persist the session before the engine state: if the insert
            // fails, the stored engine is still Running and nothing is lost.
            store.insert(&session)?;
            save_engine(&store, &engine)?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        TimerAction::Status => {
            let snapshot = engine.snapshot(Utc::now(), goal_secs);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}
