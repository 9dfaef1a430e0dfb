//! The diary store: ordered in-memory sequence with write-through
//! persistence.

use std::sync::Arc;
use tracing::{debug, warn};

use super::model::{DiaryEntry, local_timestamp, now_millis};
use super::repository::DiaryRepository;
use crate::error::Result;

/// The single source of truth for past sessions.
///
/// The sequence is ordered newest-first: entries are inserted at the head
/// and never reordered; removal by id preserves the relative order of the
/// rest. Every mutation re-serializes the full sequence to the repository
/// before returning, keeping the durable copy identical to the in-memory
/// one.
pub struct DiaryStore {
    entries: Vec<DiaryEntry>,
    repository: Arc<dyn DiaryRepository>,
}

impl DiaryStore {
    /// Creates an empty store over the given repository.
    pub fn new(repository: Arc<dyn DiaryRepository>) -> Self {
        Self {
            entries: Vec::new(),
            repository,
        }
    }

    /// Rehydrates the store from the repository.
    ///
    /// Called once at process start. Unreadable stored data is treated as
    /// "no data": the store comes up empty, never fails.
    pub async fn load(repository: Arc<dyn DiaryRepository>) -> Self {
        let entries = match repository.load().await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "diary storage unreadable, starting with an empty diary");
                Vec::new()
            }
        };
        debug!(count = entries.len(), "diary rehydrated");
        Self {
            entries,
            repository,
        }
    }

    /// The ordered sequence, newest-first.
    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an entry at the head, assigning id and timestamp if absent,
    /// and persists the new sequence before returning.
    ///
    /// Ids are time-derived; if the fresh id collides with an existing
    /// entry it is bumped until unique, keeping ids distinguishable even
    /// for same-millisecond appends.
    pub async fn append(&mut self, mut entry: DiaryEntry) -> Result<&DiaryEntry> {
        if entry.id.is_empty() {
            entry.id = now_millis().to_string();
        }
        if entry.created_at.is_empty() {
            entry.created_at = local_timestamp();
        }
        while self.entries.iter().any(|e| e.id == entry.id) {
            let bumped = entry.id.parse::<i64>().map(|n| n + 1).unwrap_or_else(|_| now_millis());
            entry.id = bumped.to_string();
        }

        self.entries.insert(0, entry);
        self.persist().await?;
        debug!(id = %self.entries[0].id, "diary entry appended");
        Ok(&self.entries[0])
    }

    /// Removes the entry with the given id, if present. Removing a
    /// nonexistent id is a no-op, not an error; nothing is re-persisted
    /// in that case.
    pub async fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            debug!(%id, "diary remove: id not present, no-op");
            return Ok(());
        }
        self.persist().await?;
        debug!(%id, "diary entry removed");
        Ok(())
    }

    /// Empties the store. User confirmation is the caller's concern.
    pub async fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.persist().await
    }

    async fn persist(&self) -> Result<()> {
        self.repository.save(&self.entries).await
    }
}
