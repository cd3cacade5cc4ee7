// ABOUTME: Usage history persistence behind an injectable store trait.
// ABOUTME: File format is a bare JSON array of millisecond epoch timestamps.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

use crate::quota::UsageHistory;

use super::{Result, default_state_dir};

/// Read and append deployment timestamps.
///
/// Loads never mutate. A record call appends exactly one timestamp and
/// persists; callers invoke it only after a deployment finishes
/// successfully.
pub trait UsageStore: Send + Sync {
    fn load(&self) -> Result<UsageHistory>;
    fn record(&self, at: DateTime<Utc>) -> Result<()>;
}

/// Usage history stored in a JSON file.
#[derive(Debug, Clone)]
pub struct FileUsageStore {
    path: PathBuf,
}

impl FileUsageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional location under the state directory.
    pub fn at_default_location() -> Self {
        Self::new(default_state_dir().join("usage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UsageStore for FileUsageStore {
    fn load(&self) -> Result<UsageHistory> {
        if !self.path.exists() {
            return Ok(UsageHistory::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn record(&self, at: DateTime<Utc>) -> Result<()> {
        let mut history = self.load()?;
        history.record(at);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(&history)?)?;
        Ok(())
    }
}

/// In-memory usage store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryUsageStore {
    inner: Mutex<UsageHistory>,
}

impl MemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: UsageHistory) -> Self {
        Self {
            inner: Mutex::new(history),
        }
    }

    pub fn snapshot(&self) -> UsageHistory {
        self.inner.lock().clone()
    }
}

impl UsageStore for MemoryUsageStore {
    fn load(&self) -> Result<UsageHistory> {
        Ok(self.inner.lock().clone())
    }

    fn record(&self, at: DateTime<Utc>) -> Result<()> {
        self.inner.lock().record(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileUsageStore::new(dir.path().join("usage.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn record_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileUsageStore::new(dir.path().join("usage.json"));

        let first = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let second = DateTime::from_timestamp_millis(1_700_000_500_000).unwrap();
        store.record(first).unwrap();
        store.record(second).unwrap();

        let history = store.load().unwrap();
        assert_eq!(
            history.as_millis(),
            &[1_700_000_000_000, 1_700_000_500_000]
        );
    }

    #[test]
    fn file_format_is_bare_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usage.json");
        let store = FileUsageStore::new(&path);

        store
            .record(DateTime::from_timestamp_millis(42).unwrap())
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "[42]");
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usage.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileUsageStore::new(&path);
        assert!(store.load().is_err());
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryUsageStore::new();
        store.record(Utc::now()).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
