//! Local history store: a JSON file holding the signed-out user's history.
//!
//! The file is a single array, newest first, capped at [`LOCAL_HISTORY_LIMIT`].
//! Malformed entries are dropped on read. Write failures are logged and
//! otherwise ignored so they never block a result the user already has.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::models::HistoryRecord;

pub const LOCAL_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct LocalHistoryStore {
    path: PathBuf,
}

impl LocalHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all valid entries. Missing or corrupt storage reads as empty.
    pub fn get_history(&self) -> Vec<HistoryRecord> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        let entries: Vec<Value> = match serde_json::from_slice(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) | Err(_) => return Vec::new(),
        };

        entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<HistoryRecord>(entry).ok())
            .map(|mut record| {
                record.id = None;
                record
            })
            .collect()
    }

    /// Prepend `record`, evicting the oldest entries past the cap.
    pub fn add(&self, mut record: HistoryRecord) {
        record.id = None;
        let mut list = self.get_history();
        list.insert(0, record);
        list.truncate(LOCAL_HISTORY_LIMIT);
        self.write(&list);
    }

    /// Remove the entry at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&self, index: usize) {
        let mut list = self.get_history();
        if index >= list.len() {
            return;
        }
        list.remove(index);
        self.write(&list);
    }

    fn write(&self, list: &[HistoryRecord]) {
        let outcome = serde_json::to_vec(list)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent).map_err(|e| e.to_string())?;
                }
                fs::write(&self.path, bytes).map_err(|e| e.to_string())
            });

        if let Err(e) = outcome {
            tracing::warn!(path = %self.path.display(), "Failed to write local history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenerationResult, Style};
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn record(n: usize) -> HistoryRecord {
        HistoryRecord {
            id: None,
            topic: format!("topic {n}"),
            keywords: vec![format!("k{n}")],
            style: Style::Til,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(n as i64),
            result: Some(GenerationResult {
                title: format!("title {n}"),
                content: "body".to_string(),
                hashtags: vec![],
                meta_description: String::new(),
            }),
        }
    }

    #[test]
    fn test_round_trip_up_to_cap() {
        let dir = TempDir::new().unwrap();
        let store = LocalHistoryStore::new(dir.path().join("history.json"));

        for n in 0..LOCAL_HISTORY_LIMIT {
            store.add(record(n));
        }

        let expected: Vec<HistoryRecord> = (0..LOCAL_HISTORY_LIMIT).rev().map(record).collect();
        assert_eq!(store.get_history(), expected);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let dir = TempDir::new().unwrap();
        let store = LocalHistoryStore::new(dir.path().join("history.json"));

        for n in 0..=LOCAL_HISTORY_LIMIT {
            store.add(record(n));
        }

        let list = store.get_history();
        assert_eq!(list.len(), LOCAL_HISTORY_LIMIT);
        assert_eq!(list[0], record(LOCAL_HISTORY_LIMIT));
        assert_eq!(list[LOCAL_HISTORY_LIMIT - 1], record(1));
        assert!(!list.contains(&record(0)));
    }

    #[test]
    fn test_malformed_entries_are_filtered() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(
            &path,
            r#"[
                {"topic":"ok","keywords":[],"style":"tutorial","createdAt":"2024-01-01T00:00:00Z"},
                {"topic":"bad style","keywords":[],"style":"essay","createdAt":"2024-01-01T00:00:00Z"},
                {"topic":"bad result","keywords":[],"style":"til","createdAt":"2024-01-01T00:00:00Z","result":{"title":1}},
                {"keywords":[],"style":"til","createdAt":"2024-01-01T00:00:00Z"},
                "junk"
            ]"#,
        )
        .unwrap();

        let list = LocalHistoryStore::new(&path).get_history();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].topic, "ok");
        assert!(list[0].result.is_none());
    }

    #[test]
    fn test_corrupt_or_missing_storage_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        assert!(LocalHistoryStore::new(&path).get_history().is_empty());

        fs::write(&path, "{not json").unwrap();
        assert!(LocalHistoryStore::new(&path).get_history().is_empty());

        fs::write(&path, r#"{"topic":"object, not array"}"#).unwrap();
        assert!(LocalHistoryStore::new(&path).get_history().is_empty());
    }

    #[test]
    fn test_remove_at_position() {
        let dir = TempDir::new().unwrap();
        let store = LocalHistoryStore::new(dir.path().join("history.json"));
        for n in 0..3 {
            store.add(record(n));
        }

        store.remove_at(1);
        assert_eq!(store.get_history(), vec![record(2), record(0)]);

        store.remove_at(5);
        assert_eq!(store.get_history().len(), 2);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        // The store path is a directory, so every write fails.
        let store = LocalHistoryStore::new(dir.path());
        store.add(record(0));
        assert!(store.get_history().is_empty());
    }
}
