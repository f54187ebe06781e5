use std::fs;
use std::path::{Path, PathBuf};

use super::{CaseData, CaseRepository, MemoryRepository};
use crate::constants::SNAPSHOT_FILE;
use crate::error::CoreResult;
use crate::seed;

/// JSON file holding a full [`CaseData`] between runs
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot. A missing file yields the seed data; unreadable
    /// or unparsable files are errors.
    pub fn load(&self) -> CoreResult<CaseData> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let data: CaseData = serde_json::from_str(&contents)?;
                tracing::debug!(path = %self.path.display(), threads = data.threads.len(), "loaded snapshot");
                Ok(data)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no snapshot yet, using seed data");
                seed::case_data()
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, data: &CaseData) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "saved snapshot");
        Ok(())
    }

    pub fn open_repository(&self) -> CoreResult<MemoryRepository> {
        Ok(MemoryRepository::from_data(self.load()?))
    }

    pub fn persist(&self, repo: &dyn CaseRepository) -> CoreResult<()> {
        self.save(&repo.snapshot()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_falls_back_to_seed() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        assert!(!store.exists());
        let data = store.load().unwrap();
        assert_eq!(data.threads.len(), 3);
        assert_eq!(data.users.len(), 5);
    }

    #[test]
    fn test_round_trip_keeps_mutations() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested"));
        let repo = store.open_repository().unwrap();
        repo.record_view("thread-003").unwrap();
        store.persist(&repo).unwrap();
        assert!(store.exists());

        let reopened = store.open_repository().unwrap();
        assert_eq!(
            reopened.get_thread("thread-003").unwrap().view_count,
            repo.get_thread("thread-003").unwrap().view_count
        );
        assert_eq!(reopened.snapshot().unwrap(), repo.snapshot().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, CoreError::Corrupt(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_unreadable_path_is_transient() {
        let dir = tempdir().unwrap();
        // A directory where the file should be
        let store = SnapshotStore::new(dir.path());
        fs::create_dir(store.path()).unwrap();
        let err = store.load().unwrap_err();
        assert!(err.is_retryable());
    }
}
