use chrono::Local;
use clap::Subcommand;
use serde::Serialize;
use timelog_core::stats;
use timelog_core::storage::{Config, SessionStore};

use crate::common::format_duration;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Total tracked today
    Today {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Total tracked this week
    Week {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct TotalReport {
    period: &'static str,
    total_secs: f64,
    total: String,
}

fn print_report(
    period: &'static str,
    total_secs: f64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = TotalReport {
        period,
        total_secs,
        total: format_duration(total_secs),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}: {}", period, report.total);
    }
    Ok(())
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SessionStore::open()?;
    let config = Config::load_or_default();
    let sessions = store.all()?;
    let now = Local::now();

    match action {
        StatsAction::Today { json } => {
            let total = stats::total_for_day(&sessions, now.date_naive(), &Local);
            print_report("today", total, json)?;
        }
        StatsAction::Week { json } => {
            let total =
                stats::total_for_week(&sessions, &now, config.week.starts_on.weekday());
            print_report("week", total, json)?;
        }
    }

    Ok(())
}
