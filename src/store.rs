use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use crate::error::MonitorError;

/// Durable record of the product ids that were already handled.
///
/// The file holds a plain JSON array of id strings. A missing or unreadable
/// file is the normal first-run state, not an error; failing to write it
/// back is fatal because the next run would re-notify everything.
pub struct SeenStore {
    path: PathBuf,
}

impl SeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Previously handled ids; empty when the file is absent or corrupt.
    pub fn load(&self) -> BTreeSet<String> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default()
    }

    /// Replace the file with `seen` as a sorted JSON array.
    pub fn save(&self, seen: &BTreeSet<String>) -> Result<(), MonitorError> {
        let data = serde_json::to_string(seen).map_err(|e| MonitorError::Persist {
            path: self.path.clone(),
            source: e.into(),
        })?;
        fs::write(&self.path, data).map_err(|e| MonitorError::Persist {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SeenStore {
        SeenStore::new(dir.path().join("nojima_seen.json"))
    }

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();

        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nojima_seen.json");

        fs::write(&path, "{not json").unwrap();
        assert!(store_in(&dir).load().is_empty());

        fs::write(&path, r#"{"wrong": "shape"}"#).unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn round_trips_ids() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let ids = set(&["200", "100", "300"]);

        store.save(&ids).unwrap();

        assert_eq!(store.load(), ids);
    }

    #[test]
    fn writes_a_sorted_array() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&set(&["9", "10", "1"])).unwrap();

        let raw = fs::read_to_string(dir.path().join("nojima_seen.json")).unwrap();
        assert_eq!(raw, r#"["1","10","9"]"#);
    }

    #[test]
    fn save_replaces_previous_content() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&set(&["1", "2", "3"])).unwrap();
        store.save(&set(&["2"])).unwrap();

        assert_eq!(store.load(), set(&["2"]));
    }

    #[test]
    fn unwritable_path_is_a_persist_error() {
        let dir = TempDir::new().unwrap();
        let store = SeenStore::new(dir.path());

        let err = store.save(&BTreeSet::new()).unwrap_err();
        assert!(matches!(err, MonitorError::Persist { .. }));
    }
}
