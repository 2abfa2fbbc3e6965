//! Time-bucketed aggregation over the session log.
//!
//! Pure, stateless functions: each takes the sessions plus a caller-supplied
//! reference time, so results depend only on the arguments. Safe to call
//! concurrently. The calendar (which timezone, which weekday opens the week)
//! is a caller decision; the CLI passes the host-local zone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

use crate::session::Session;

/// Total tracked seconds for sessions started on `day` in timezone `tz`.
///
/// A session counts if its start falls in `[midnight(day), midnight(day) + 24h)`.
/// In-progress sessions (no duration yet) are skipped.
pub fn total_for_day<Tz: TimeZone>(sessions: &[Session], day: NaiveDate, tz: &Tz) -> f64 {
    let Some(start) = tz
        .from_local_datetime(&day.and_time(NaiveTime::MIN))
        .earliest()
    else {
        return 0.0;
    };
    let start = start.with_timezone(&Utc);
    let end = start + Duration::hours(24);

    sessions
        .iter()
        .filter(|s| s.started_at >= start && s.started_at < end)
        .filter_map(|s| s.duration_secs)
        .sum()
}

/// Total tracked seconds for the week containing `reference`.
///
/// The week opens at midnight of the most recent `week_start` day at or
/// before `reference`. There is deliberately no upper bound: sessions dated
/// after `reference` (clock skew, manual edits) still count.
pub fn total_for_week<Tz: TimeZone>(
    sessions: &[Session],
    reference: &DateTime<Tz>,
    week_start: Weekday,
) -> f64 {
    let days_back = (reference.weekday().num_days_from_monday() as i64
        - week_start.num_days_from_monday() as i64)
        .rem_euclid(7);
    let opening_day = reference.date_naive() - Duration::days(days_back);
    let Some(opening) = reference
        .timezone()
        .from_local_datetime(&opening_day.and_time(NaiveTime::MIN))
        .earliest()
    else {
        return 0.0;
    };
    let opening = opening.with_timezone(&Utc);

    sessions
        .iter()
        .filter(|s| s.started_at >= opening)
        .filter_map(|s| s.duration_secs)
        .sum()
}

/// Progress toward the duration goal, clamped to `[0, 1]`.
///
/// Returns `0.0` for a non-positive goal rather than dividing by zero.
pub fn progress(elapsed_secs: f64, goal_secs: f64) -> f64 {
    if goal_secs <= 0.0 {
        return 0.0;
    }
    (elapsed_secs / goal_secs).clamp(0.0, 1.0)
}
