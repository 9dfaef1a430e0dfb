//! JSON-file-backed DiaryRepository implementation.

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use tutor_core::diary::{DiaryEntry, DiaryRepository};
use tutor_core::error::{Result, TutorError};

use crate::paths::TutorPaths;

const DIARY_FILE: &str = "diary.json";

/// Persists the whole diary sequence as one JSON document under a fixed
/// file name.
///
/// The durable copy is replaced wholesale on every `save`, which is what
/// keeps it byte-identical to the store's in-memory sequence. A missing,
/// empty or unparseable file loads as an empty sequence: corrupt data is
/// "no data", never a fatal error.
pub struct JsonDiaryRepository {
    file_path: PathBuf,
}

impl JsonDiaryRepository {
    /// Creates a repository under the given base directory, creating the
    /// directory if needed. The diary lives at `<base_dir>/diary.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(|e| {
            TutorError::io(format!(
                "Failed to create diary directory at {:?}: {}",
                base_dir, e
            ))
        })?;
        Ok(Self {
            file_path: base_dir.join(DIARY_FILE),
        })
    }

    /// Creates a repository at the default per-user location
    /// (`<data_dir>/tutor/diary.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be
    /// determined or the directory cannot be created.
    pub fn default_location() -> Result<Self> {
        Self::new(TutorPaths::data_dir()?)
    }

    /// The file this repository reads and writes.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl DiaryRepository for JsonDiaryRepository {
    async fn load(&self) -> Result<Vec<DiaryEntry>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.file_path).map_err(|e| {
            TutorError::io(format!(
                "Failed to read diary file at {:?}: {}",
                self.file_path, e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<DiaryEntry>>(&content) {
            Ok(entries) => {
                debug!(count = entries.len(), path = ?self.file_path, "diary loaded");
                Ok(entries)
            }
            Err(err) => {
                warn!(path = ?self.file_path, error = %err, "diary file unparseable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, entries: &[DiaryEntry]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.file_path, json).map_err(|e| {
            TutorError::io(format!(
                "Failed to write diary file at {:?}: {}",
                self.file_path, e
            ))
        })?;
        debug!(count = entries.len(), path = ?self.file_path, "diary persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tutor_core::capture::CaptureKind;
    use tutor_core::diary::DiaryStore;
    use tutor_core::subject::Subject;

    fn entry(content: &str) -> DiaryEntry {
        DiaryEntry::pending(Subject::Math, CaptureKind::Voice, content)
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order_across_restart() {
        let dir = tempfile::tempdir().unwrap();
        let repository = Arc::new(JsonDiaryRepository::new(dir.path()).unwrap());

        let mut store = DiaryStore::new(repository.clone());
        store.append(entry("first")).await.unwrap();
        store.append(entry("second")).await.unwrap();
        store.append(entry("third")).await.unwrap();

        // Simulated restart: a fresh repository over the same directory
        let reopened = Arc::new(JsonDiaryRepository::new(dir.path()).unwrap());
        let restored = DiaryStore::load(reopened).await;
        let contents: Vec<&str> = restored
            .entries()
            .iter()
            .map(|e| e.content.as_str())
            .collect();
        assert_eq!(contents, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonDiaryRepository::new(dir.path()).unwrap();
        assert!(repository.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonDiaryRepository::new(dir.path()).unwrap();
        fs::write(repository.file_path(), "{ not json ]").unwrap();
        assert!(repository.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_removed_entries_stay_removed_after_reload() {
        let dir = tempfile::tempdir().unwrap();
        let repository = Arc::new(JsonDiaryRepository::new(dir.path()).unwrap());

        let mut store = DiaryStore::new(repository.clone());
        store.append(entry("keep")).await.unwrap();
        store.append(entry("drop")).await.unwrap();
        let drop_id = store.entries()[0].id.clone();
        store.remove(&drop_id).await.unwrap();

        let restored = DiaryStore::load(repository).await;
        assert_eq!(restored.entries().len(), 1);
        assert!(restored.entries().iter().all(|e| e.id != drop_id));
    }
}
