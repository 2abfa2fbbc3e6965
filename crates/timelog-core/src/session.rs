//! The session entity: one recorded interval of tracked time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// One timed work interval.
///
/// A session is created open (no end time, no duration) when the timer
/// starts and finalized when it stops. Only finalized sessions may be
/// persisted; stored sessions are immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    /// Duration in seconds, equal to `ended_at - started_at` once finalized.
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

impl Session {
    /// Create an open (in-progress) session anchored at `started_at`.
    pub fn open(started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at,
            ended_at: None,
            duration_secs: None,
        }
    }

    /// Create a finalized session ending at `ended_at`.
    ///
    /// The duration is derived from the two instants and clamped to zero if
    /// the clock ran backwards between start and stop.
    pub fn finalized(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> Self {
        let secs = (ended_at - started_at)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Self {
            id: Uuid::new_v4(),
            started_at,
            ended_at: Some(ended_at),
            duration_secs: Some(secs),
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.ended_at.is_some() && self.duration_secs.is_some()
    }

    /// Check that the session is safe to persist.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the end time or duration is absent,
    /// or if the duration is negative.
    pub fn validate_finalized(&self) -> Result<(), ValidationError> {
        if self.ended_at.is_none() {
            return Err(ValidationError::MissingEndTime);
        }
        match self.duration_secs {
            None => Err(ValidationError::MissingDuration),
            Some(secs) if secs < 0.0 => Err(ValidationError::NegativeDuration { secs }),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn finalized_derives_duration() {
        let start = Utc.with_ymd_and_hms(2024, 10, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 10, 1, 9, 10, 0).unwrap();
        let session = Session::finalized(start, end);
        assert_eq!(session.duration_secs, Some(600.0));
        assert!(session.validate_finalized().is_ok());
    }

    #[test]
    fn finalized_clamps_backwards_clock_to_zero() {
        let start = Utc.with_ymd_and_hms(2024, 10, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 10, 1, 8, 59, 0).unwrap();
        let session = Session::finalized(start, end);
        assert_eq!(session.duration_secs, Some(0.0));
    }

    #[test]
    fn open_session_fails_validation() {
        let session = Session::open(Utc::now());
        assert!(!session.is_finalized());
        assert_eq!(
            session.validate_finalized(),
            Err(ValidationError::MissingEndTime)
        );
    }

    #[test]
    fn session_json_roundtrip() {
        let session = Session::finalized(Utc::now(), Utc::now());
        let json = serde_json::to_string(&session).unwrap();
        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, session);
    }
}
