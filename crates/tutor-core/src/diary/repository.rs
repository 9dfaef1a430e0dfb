//! Diary repository trait.
//!
//! Defines the interface for diary persistence operations.

use async_trait::async_trait;

use super::model::DiaryEntry;
use crate::error::Result;

/// An abstract repository for the durable diary sequence.
///
/// The store keeps the in-memory copy and the durable copy identical after
/// every mutation, so the contract is whole-sequence: `save` replaces the
/// stored sequence, `load` returns it in stored order.
///
/// # Implementation Notes
///
/// Implementations must treat missing or unreadable stored data as "no
/// data" and return an empty sequence from `load`, never a fatal error.
#[async_trait]
pub trait DiaryRepository: Send + Sync {
    /// Returns the entire stored sequence, newest-first.
    ///
    /// # Returns
    ///
    /// - `Ok(entries)`: The stored sequence, possibly empty
    /// - `Err(_)`: Storage could not be accessed at all
    async fn load(&self) -> Result<Vec<DiaryEntry>>;

    /// Replaces the stored sequence, flushing before returning.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The sequence is durable
    /// - `Err(_)`: The write failed
    async fn save(&self, entries: &[DiaryEntry]) -> Result<()>;
}
