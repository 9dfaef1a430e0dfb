//! Diary domain model.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::capture::CaptureKind;
use crate::subject::Subject;

/// A durable record of one past capture, independent of whether the agent
/// response succeeded.
///
/// Entries are immutable once created; the store only ever appends at the
/// head or removes by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Unique, time-derived identifier (Unix milliseconds). An empty id
    /// means "assign one on append".
    #[serde(default)]
    pub id: String,
    /// Category label; `Subject::Unknown` when none was selected.
    #[serde(default)]
    pub subject: Subject,
    pub kind: CaptureKind,
    /// Encoded image payload for `Image`, raw text for `Voice`.
    pub content: String,
    /// Localized timestamp string, fixed at creation.
    #[serde(default)]
    pub created_at: String,
}

impl DiaryEntry {
    /// Creates an entry whose id/timestamp will be assigned by the store.
    pub fn pending(subject: Subject, kind: CaptureKind, content: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            subject,
            kind,
            content: content.into(),
            created_at: String::new(),
        }
    }
}

/// Current wall clock in Unix milliseconds.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Localized human-readable timestamp for display in the diary.
pub(crate) fn local_timestamp() -> String {
    Local::now().format("%d/%m/%Y %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_leaves_assignment_to_the_store() {
        let entry = DiaryEntry::pending(Subject::Unknown, CaptureKind::Voice, "hello");
        assert!(entry.id.is_empty());
        assert!(entry.created_at.is_empty());
    }
}
