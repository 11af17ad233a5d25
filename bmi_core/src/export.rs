//! CSV export of one user's measurement history.
//!
//! Writes a fresh headered file per export; nothing is appended to or
//! overwritten in the store itself.

use crate::{BmiRecord, Error, RecordStore, Result, TIMESTAMP_FORMAT};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: i64,
    recorded_at: String,
    weight_kg: f64,
    height_cm: f64,
    bmi: f64,
    category: String,
}

impl From<&BmiRecord> for CsvRow {
    fn from(record: &BmiRecord) -> Self {
        CsvRow {
            id: record.id,
            recorded_at: record.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            weight_kg: record.weight_kg,
            height_cm: record.height_cm,
            bmi: record.bmi,
            category: record.category().to_string(),
        }
    }
}

/// Export all records for one username to a headered CSV file
///
/// This function:
/// 1. Reads the user's records from the store
/// 2. Errors without creating the file if there are none
/// 3. Writes one row per record, headers first
/// 4. Syncs the file to disk
/// 5. Returns the number of rows written
pub fn export_csv(store: &RecordStore, username: &str, path: &Path) -> Result<usize> {
    let records = store.records(username)?;

    // Checked before File::create so a failed export leaves nothing behind
    if records.is_empty() {
        return Err(Error::Export(format!("no records for user '{}'", username)));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    for record in &records {
        writer.serialize(CsvRow::from(record))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} records for user {} to {:?}", records.len(), username, path);

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_records() -> RecordStore {
        let store = RecordStore::open_in_memory().unwrap();
        store.append("alice", 70.0, 175.0, 22.86).unwrap();
        store.append("alice", 72.5, 175.0, 23.67).unwrap();
        store.append("bob", 95.0, 170.0, 32.87).unwrap();
        store
    }

    #[test]
    fn test_export_writes_headered_rows() {
        let store = store_with_records();
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("alice.csv");

        let count = export_csv(&store, "alice", &csv_path).unwrap();
        assert_eq!(count, 2);
        assert!(csv_path.exists());

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers,
            vec!["id", "recorded_at", "weight_kg", "height_cm", "bmi", "category"]
        );

        let rows: Vec<csv::StringRecord> =
            reader.into_records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][4], "22.86");
        assert_eq!(&rows[0][5], "Normal");
        assert_eq!(&rows[1][4], "23.67");
    }

    #[test]
    fn test_export_only_includes_requested_user() {
        let store = store_with_records();
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("bob.csv");

        let count = export_csv(&store, "bob", &csv_path).unwrap();
        assert_eq!(count, 1);

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        let rows: Vec<csv::StringRecord> =
            reader.into_records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][5], "Obese");
    }

    #[test]
    fn test_export_unknown_user_errors_and_leaves_no_file() {
        let store = store_with_records();
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("nobody.csv");

        let result = export_csv(&store, "nobody", &csv_path);
        assert!(matches!(result, Err(Error::Export(_))));
        assert!(!csv_path.exists());
    }

    #[test]
    fn test_export_creates_parent_directory() {
        let store = store_with_records();
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("exports").join("alice.csv");

        export_csv(&store, "alice", &csv_path).unwrap();
        assert!(csv_path.exists());
    }
}
