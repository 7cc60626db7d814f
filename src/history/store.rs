//! In-memory per-user history store.
//!
//! Each user's list is kept most recent first. Viewing a record already in
//! the list moves it to the front with its new timestamp and never expires
//! anything; viewing a new record pushes it to the front and drops the oldest
//! entries beyond `max_items`.

use ahash::AHashMap;
use log::debug;
use parking_lot::RwLock;

use crate::config::HistoryConfig;
use crate::error::{OrdoError, Result};
use crate::history::entry::{HistoryEntry, UserHistory};

/// Thread-safe history store keyed by user name.
#[derive(Debug)]
pub struct UserHistoryStore {
    max_items: usize,
    histories: RwLock<AHashMap<String, Vec<HistoryEntry>>>,
}

impl UserHistoryStore {
    /// Create a store keeping at most `max_items` entries per user.
    pub fn new(max_items: usize) -> Result<Self> {
        if max_items == 0 {
            return Err(OrdoError::config("history max_items must be at least 1"));
        }
        Ok(UserHistoryStore {
            max_items,
            histories: RwLock::new(AHashMap::new()),
        })
    }

    /// Create a store from configuration.
    pub fn with_config(config: &HistoryConfig) -> Result<Self> {
        Self::new(config.max_items)
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Record that `user` viewed `record_id` at `timestamp` (epoch millis).
    pub fn add_item(&self, user: &str, record_id: &str, timestamp: i64) {
        let mut histories = self.histories.write();
        let history = histories.entry(user.to_string()).or_default();
        let entry = HistoryEntry::new(record_id, timestamp);

        if let Some(pos) = history.iter().position(|e| e.record_id == record_id) {
            history.remove(pos);
            history.insert(0, entry);
            return;
        }

        history.insert(0, entry);
        if history.len() > self.max_items {
            history.truncate(self.max_items);
            debug!("evicted oldest history entry for user {user}");
        }
    }

    /// Snapshot of a user's history, most recent first. Unknown users have
    /// an empty history.
    pub fn history(&self, user: &str) -> UserHistory {
        self.histories
            .read()
            .get(user)
            .map(|entries| UserHistory::new(entries.clone()))
            .unwrap_or_default()
    }

    /// Drop all history for a user. Returns whether anything was removed.
    pub fn remove_history_for_user(&self, user: &str) -> bool {
        self.histories
            .write()
            .remove(user)
            .is_some_and(|entries| !entries.is_empty())
    }

    /// Number of users with recorded history.
    pub fn user_count(&self) -> usize {
        self.histories.read().len()
    }
}
