//! # Ordo
//!
//! Custom result ordering for a segmented search index.
//!
//! ## Features
//!
//! - Slot-based top-N comparator protocol with a bottom fast path
//! - Sorting by comparing domain records rebuilt from raw documents
//! - Sorting by per-user "last viewed" history
//! - Multi-key sorts with per-key reverse order
//! - Bounded per-user history store

pub mod config;
pub mod document;
pub mod error;
pub mod history;
pub mod issue;
pub mod segment;
pub mod sort;

pub mod prelude {
    pub use crate::config::{CollectorConfig, HistoryConfig, IssueFieldConfig, SortConfig};
    pub use crate::document::document::{Document, DocumentBuilder};
    pub use crate::document::field_value::FieldValue;
    pub use crate::error::{OrdoError, Result};
    pub use crate::history::{HistoryEntry, UserHistory, UserHistoryStore};
    pub use crate::issue::{
        Issue, IssueFactory, IssueKeyComparator, PriorityComparator, UpdatedComparator,
    };
    pub use crate::segment::{DocId, MemorySegment, SegmentId, SegmentReader};
    pub use crate::sort::{
        DocumentSortComparatorSource, FieldComparator, FieldComparatorSource, MissingOrder,
        PlainComparator, RecordComparator, RecordComparatorAdapter, RecordFactory, SortField,
        SortedHit, TopFieldCollector, UserHistoryComparatorSource,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
