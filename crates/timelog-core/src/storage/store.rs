//! SQLite-backed session log.
//!
//! The store is the sole owner of the durable session collection. It is
//! append-mostly: finalized sessions go in, are listed, and can be deleted
//! one at a time or wholesale by hard reset. There is no update operation;
//! persisted sessions are immutable.
//!
//! Every mutating call commits before returning. SQLite executes each
//! statement in its own transaction, so a successful return means the change
//! is on disk and a failure leaves the visible state untouched.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::error::{CoreError, StorageError};
use crate::session::Session;

use super::{data_dir, migrations};

/// SQLite database holding the session log and a small kv store.
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    /// Open the store at `~/.config/timelog/timelog.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("timelog.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        migrations::migrate(&conn)
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Append a finalized session.
    ///
    /// # Errors
    /// Returns a `Validation` error without touching the database if the
    /// session is still in progress, or a `Storage` error if the commit
    /// fails.
    pub fn insert(&self, session: &Session) -> Result<(), CoreError> {
        session.validate_finalized()?;
        self.conn
            .execute(
                "INSERT INTO sessions (id, started_at, ended_at, duration_secs)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    session.id.to_string(),
                    session.started_at.to_rfc3339(),
                    session.ended_at.map(|t| t.to_rfc3339()),
                    session.duration_secs,
                ],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// All stored sessions in insertion order.
    ///
    /// Returns an owned snapshot; later mutations do not affect it.
    pub fn all(&self) -> Result<Vec<Session>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, started_at, ended_at, duration_secs FROM sessions ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let started_at: String = row.get(1)?;
            let ended_at: Option<String> = row.get(2)?;
            Ok(Session {
                id: parse_uuid(&id, 0)?,
                started_at: parse_rfc3339(&started_at, 1)?,
                ended_at: match ended_at {
                    Some(s) => Some(parse_rfc3339(&s, 2)?),
                    None => None,
                },
                duration_secs: row.get(3)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
    }

    /// Delete one session by id.
    ///
    /// Deleting an id that is not present is a silent no-op; the returned
    /// flag reports whether a row was actually removed.
    pub fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let affected = self.conn.execute(
            "DELETE FROM sessions WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(affected > 0)
    }

    /// Delete every stored session (hard reset).
    ///
    /// A single statement, so the deletion is atomic: on failure the log is
    /// unchanged. Returns how many sessions were removed.
    pub fn delete_all(&self) -> Result<usize, StorageError> {
        let affected = self.conn.execute("DELETE FROM sessions", [])?;
        Ok(affected)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

fn parse_uuid(text: &str, column: usize) -> Result<Uuid, rusqlite::Error> {
    Uuid::parse_str(text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

fn parse_rfc3339(text: &str, column: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use chrono::{Duration, TimeZone};

    fn sample(h: u32, m: u32) -> Session {
        let start = Utc.with_ymd_and_hms(2024, 10, 1, h, m, 0).unwrap();
        Session::finalized(start, start + Duration::minutes(10))
    }

    #[test]
    fn insert_then_all_returns_the_session() {
        let store = SessionStore::open_memory().unwrap();
        let session = sample(9, 0);
        store.insert(&session).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all, vec![session]);
    }

    #[test]
    fn all_preserves_insertion_order() {
        let store = SessionStore::open_memory().unwrap();
        let first = sample(9, 0);
        let second = sample(8, 0); // earlier start, inserted later
        store.insert(&first).unwrap();
        store.insert(&second).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }

    #[test]
    fn all_returns_a_snapshot() {
        let store = SessionStore::open_memory().unwrap();
        store.insert(&sample(9, 0)).unwrap();
        let snapshot = store.all().unwrap();
        store.insert(&sample(10, 0)).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.all().unwrap().len(), 2);
    }

    #[test]
    fn insert_rejects_open_session_and_leaves_store_unchanged() {
        let store = SessionStore::open_memory().unwrap();
        let open = Session::open(Utc::now());

        let err = store.insert(&open).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MissingEndTime)
        ));
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn delete_removes_one_session() {
        let store = SessionStore::open_memory().unwrap();
        let keep = sample(9, 0);
        let gone = sample(10, 0);
        store.insert(&keep).unwrap();
        store.insert(&gone).unwrap();

        assert!(store.delete(gone.id).unwrap());
        let all = store.all().unwrap();
        assert_eq!(all, vec![keep]);
    }

    #[test]
    fn delete_of_missing_id_is_a_noop() {
        let store = SessionStore::open_memory().unwrap();
        store.insert(&sample(9, 0)).unwrap();

        assert!(!store.delete(Uuid::new_v4()).unwrap());
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn delete_all_empties_the_log() {
        let store = SessionStore::open_memory().unwrap();
        store.insert(&sample(9, 0)).unwrap();
        store.insert(&sample(10, 0)).unwrap();

        assert_eq!(store.delete_all().unwrap(), 2);
        assert!(store.all().unwrap().is_empty());

        // Idempotent on an empty log.
        assert_eq!(store.delete_all().unwrap(), 0);
    }

    #[test]
    fn kv_store() {
        let store = SessionStore::open_memory().unwrap();
        assert!(store.kv_get("engine").unwrap().is_none());
        store.kv_set("engine", "{}").unwrap();
        assert_eq!(store.kv_get("engine").unwrap().unwrap(), "{}");
        store.kv_set("engine", "{\"state\":\"idle\"}").unwrap();
        assert_eq!(
            store.kv_get("engine").unwrap().unwrap(),
            "{\"state\":\"idle\"}"
        );
    }

    #[test]
    fn sessions_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timelog.db");
        let session = sample(9, 0);

        {
            let store = SessionStore::open_at(&path).unwrap();
            store.insert(&session).unwrap();
        }

        let store = SessionStore::open_at(&path).unwrap();
        assert_eq!(store.all().unwrap(), vec![session]);
    }
}
