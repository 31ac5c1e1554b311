//! Record store: single JSON slot persistence
//!
//! All saved buildings live in one named slot (`buildings.json` in the data
//! folder) holding a JSON array of records. The store reads the slot once at
//! open and writes the whole slot back on every upsert, via a temp file and
//! rename so a failed write never leaves a half-written slot behind.
//!
//! An absent or corrupt slot deserializes to an empty store; malformed
//! persisted data is never fatal.

use crate::model::SavedBuilding;
use crate::Result;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Slot file name inside the data folder
pub const STORE_FILE_NAME: &str = "buildings.json";

/// Durable collection of saved buildings, keyed by record id
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<SavedBuilding>,
}

impl RecordStore {
    /// Open the store backed by the given slot file, loading whatever
    /// records the slot currently holds
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = Self::load_slot(&path);
        Self { path, records }
    }

    fn load_slot(path: &Path) -> Vec<SavedBuilding> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read record slot, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<SavedBuilding>>(&raw) {
            Ok(records) => {
                tracing::debug!(path = %path.display(), count = records.len(), "Loaded record slot");
                records
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Malformed record slot, starting empty");
                Vec::new()
            }
        }
    }

    /// All records, in insertion order
    pub fn list_all(&self) -> &[SavedBuilding] {
        &self.records
    }

    /// Look up one record by id
    pub fn get_by_id(&self, id: Uuid) -> Option<&SavedBuilding> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Insert or replace a record. An existing record with the same id is
    /// replaced in place, preserving its position; otherwise the record is
    /// appended. The slot on disk is fully rewritten before the in-memory
    /// view changes, so a write failure leaves the store untouched.
    pub fn upsert(&mut self, record: SavedBuilding) -> Result<()> {
        let mut next = self.records.clone();
        match next.iter().position(|r| r.id() == record.id()) {
            Some(index) => next[index] = record,
            None => next.push(record),
        }

        self.write_slot(&next)?;
        self.records = next;
        Ok(())
    }

    fn write_slot(&self, records: &[SavedBuilding]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "Record slot written");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisResult, BuildingDraft, RecommendationCategory};

    fn sample_record(name: &str, score: u8) -> SavedBuilding {
        let mut building = BuildingDraft::default();
        building.name = name.to_string();
        SavedBuilding {
            building,
            analysis: AnalysisResult {
                sustainability_score: score,
                recommendations: vec![RecommendationCategory {
                    category: "Energy Efficiency".to_string(),
                    items: vec!["Add solar".to_string()],
                }],
                summary: "Test record.".to_string(),
            },
        }
    }

    fn slot_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join(STORE_FILE_NAME)
    }

    #[test]
    fn missing_slot_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(slot_path(&dir));
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_slot_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = slot_path(&dir);
        std::fs::write(&path, "{not valid json").unwrap();

        let store = RecordStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn upsert_appends_then_replaces_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordStore::open(slot_path(&dir));

        let first = sample_record("First", 40);
        let second = sample_record("Second", 50);
        store.upsert(first.clone()).unwrap();
        store.upsert(second.clone()).unwrap();
        assert_eq!(store.len(), 2);

        // Replacing the first record keeps its position and leaves one
        // record per id
        let mut replacement = first.clone();
        replacement.building.name = "First, revised".to_string();
        replacement.analysis.sustainability_score = 90;
        store.upsert(replacement.clone()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.list_all()[0], replacement);
        assert_eq!(store.list_all()[1], second);
        assert_eq!(
            store.get_by_id(first.id()).unwrap().building.name,
            "First, revised"
        );
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = slot_path(&dir);

        let record = sample_record("Persistent", 66);
        {
            let mut store = RecordStore::open(&path);
            store.upsert(record.clone()).unwrap();
        }

        let reopened = RecordStore::open(&path);
        assert_eq!(reopened.list_all(), &[record]);
    }

    #[test]
    fn get_by_id_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(slot_path(&dir));
        assert!(store.get_by_id(uuid::Uuid::new_v4()).is_none());
    }
}
