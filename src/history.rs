//! User interaction history.
//!
//! History is the external data source for recency ordering: an ordered list
//! of `(record id, last viewed)` pairs per user. Sorting never mutates it;
//! comparator sources are built from an immutable [`entry::UserHistory`]
//! snapshot taken from a [`store::UserHistoryStore`] (or supplied directly).

pub mod entry;
pub mod store;

pub use entry::{HistoryEntry, UserHistory};
pub use store::UserHistoryStore;
