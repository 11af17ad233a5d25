//! SQLite-backed measurement store.
//!
//! One table, append-only: a row is written once per successful submission
//! and never updated or deleted. The handle owns the connection; it is
//! acquired in `open` and released when the store is dropped, so callers
//! pass the store around instead of sharing process-global state.

use crate::{BmiRecord, Error, Result, TrendPoint, UserSummary, TIMESTAMP_FORMAT};
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection};
use std::path::Path;

/// Owned handle to the measurement database
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open the store at the given path, creating the database file and
    /// its parent directory if absent
    ///
    /// The single `bmi_records` table is created on first open and never
    /// migrated afterwards.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;

        tracing::debug!("Opened record store at {:?}", path);
        Ok(store)
    }

    /// Open a store backed by an in-memory database (used by tests)
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS bmi_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                recorded_at TEXT NOT NULL,
                weight REAL NOT NULL,
                height REAL NOT NULL,
                bmi REAL NOT NULL
            )",
        )?;
        Ok(())
    }

    /// Append one measurement stamped with the current local time
    ///
    /// Returns the id the store assigned to the new record. Each insert
    /// commits on its own; there is nothing else to roll back with.
    pub fn append(&self, username: &str, weight_kg: f64, height_cm: f64, bmi: f64) -> Result<i64> {
        let recorded_at = Local::now()
            .naive_local()
            .format(TIMESTAMP_FORMAT)
            .to_string();

        self.conn.execute(
            "INSERT INTO bmi_records (username, recorded_at, weight, height, bmi)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![username, recorded_at, weight_kg, height_cm, bmi],
        )?;
        let id = self.conn.last_insert_rowid();

        tracing::debug!("Appended record {} for user {}", id, username);
        Ok(id)
    }

    /// BMI trend for one username, ascending by timestamp
    ///
    /// Username matching is exact: case-sensitive, no trimming. Returns an
    /// empty vec (not an error) when no records match. Records written in
    /// the same second keep their insert order via the id tiebreaker.
    pub fn history(&self, username: &str) -> Result<Vec<TrendPoint>> {
        let mut stmt = self.conn.prepare(
            "SELECT recorded_at, bmi FROM bmi_records
             WHERE username = ?1 ORDER BY recorded_at, id",
        )?;
        let rows = stmt.query_map(params![username], |row| {
            let recorded_at: String = row.get(0)?;
            let bmi: f64 = row.get(1)?;
            Ok((recorded_at, bmi))
        })?;

        let mut points = Vec::new();
        for row in rows {
            let (recorded_at, bmi) = row?;
            points.push(TrendPoint {
                recorded_at: parse_timestamp(&recorded_at)?,
                bmi,
            });
        }

        tracing::debug!("Read {} trend points for user {}", points.len(), username);
        Ok(points)
    }

    /// Full records for one username, in the same order as `history`
    pub fn records(&self, username: &str) -> Result<Vec<BmiRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, recorded_at, weight, height, bmi FROM bmi_records
             WHERE username = ?1 ORDER BY recorded_at, id",
        )?;
        let rows = stmt.query_map(params![username], |row| {
            let id: i64 = row.get(0)?;
            let username: String = row.get(1)?;
            let recorded_at: String = row.get(2)?;
            let weight_kg: f64 = row.get(3)?;
            let height_cm: f64 = row.get(4)?;
            let bmi: f64 = row.get(5)?;
            Ok((id, username, recorded_at, weight_kg, height_cm, bmi))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, username, recorded_at, weight_kg, height_cm, bmi) = row?;
            records.push(BmiRecord {
                id,
                username,
                recorded_at: parse_timestamp(&recorded_at)?,
                weight_kg,
                height_cm,
                bmi,
            });
        }
        Ok(records)
    }

    /// Known usernames with their record counts, sorted by username
    pub fn users(&self) -> Result<Vec<UserSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT username, COUNT(*) FROM bmi_records
             GROUP BY username ORDER BY username",
        )?;
        let rows = stmt.query_map([], |row| {
            let username: String = row.get(0)?;
            let records: i64 = row.get(1)?;
            Ok(UserSummary { username, records })
        })?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }
}

fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map_err(|e| Error::Other(format!("invalid timestamp '{}' in store: {}", text, e)))
}
