//! History entries and read-only history snapshots.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single viewed record: its id and when it was last viewed, in
/// milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub record_id: String,
    pub last_viewed: i64,
}

impl HistoryEntry {
    /// Create an entry from a record id and an epoch-millisecond timestamp.
    pub fn new<S: Into<String>>(record_id: S, last_viewed: i64) -> Self {
        HistoryEntry {
            record_id: record_id.into(),
            last_viewed,
        }
    }

    /// Create an entry from a UTC datetime.
    pub fn at<S: Into<String>>(record_id: S, last_viewed: DateTime<Utc>) -> Self {
        Self::new(record_id, last_viewed.timestamp_millis())
    }

    /// The timestamp as a UTC datetime, if it is representable.
    pub fn last_viewed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_viewed)
    }
}

/// An immutable, cheaply clonable snapshot of one user's history.
///
/// Entries keep the order they were supplied in (the store hands them out
/// most recent first). A snapshot never changes after construction, so it can
/// be shared by a comparator source and every comparator it produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserHistory {
    entries: Arc<[HistoryEntry]>,
}

impl UserHistory {
    /// Create a snapshot from entries.
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        UserHistory {
            entries: entries.into(),
        }
    }

    /// The entries in supplied order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last-viewed timestamp of a record, if present.
    pub fn last_viewed(&self, record_id: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|entry| entry.record_id == record_id)
            .map(|entry| entry.last_viewed)
    }
}

impl From<Vec<HistoryEntry>> for UserHistory {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        UserHistory::new(entries)
    }
}

impl FromIterator<HistoryEntry> for UserHistory {
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        UserHistory::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a UserHistory {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
