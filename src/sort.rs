//! Custom result ordering.
//!
//! Two comparator engines plug into the top-N comparator protocol defined in
//! [`comparator`]:
//!
//! - [`document_sort`] ranks by comparing domain records rebuilt from raw
//!   documents, for orders the index cannot express with indexed terms.
//! - [`history_sort`] ranks by a per-request external key: when the user
//!   last viewed each record.
//!
//! [`collector::TopFieldCollector`] drives either engine (or several, as
//! primary and tie-breaking sort keys) over a segment-by-segment scan.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use ordo::document::document::Document;
//! use ordo::history::{HistoryEntry, UserHistory};
//! use ordo::segment::{MemorySegment, SegmentReader};
//! use ordo::sort::{SortField, TopFieldCollector, UserHistoryComparatorSource};
//!
//! let segment: Arc<dyn SegmentReader> = Arc::new(MemorySegment::from_documents(vec![
//!     Document::builder().add_text("key", "HSP-1").build(),
//!     Document::builder().add_text("key", "HSP-2").build(),
//! ]));
//! let history: UserHistory = vec![HistoryEntry::new("HSP-1", 100), HistoryEntry::new("HSP-2", 200)].into();
//! let source = UserHistoryComparatorSource::for_field(history, "key");
//!
//! let mut collector = TopFieldCollector::new(&[SortField::new(Arc::new(source))], 10).unwrap();
//! collector.collect_segment(segment).unwrap();
//!
//! let hits = collector.results();
//! assert_eq!(hits[0].doc_id, 1);
//! assert_eq!(hits[1].doc_id, 0);
//! ```

pub mod adapter;
pub mod collector;
pub mod comparator;
pub mod document_sort;
pub mod history_sort;
pub mod lookup;
pub mod missing;
pub mod record;
pub mod value_cache;

pub use adapter::{RecordComparatorAdapter, RecordComparatorAdapterBuilder};
pub use collector::{SortedHit, TopFieldCollector};
pub use comparator::{FieldComparator, FieldComparatorSource, SortField};
pub use document_sort::{DocumentSortComparator, DocumentSortComparatorSource};
pub use history_sort::{UserHistoryComparator, UserHistoryComparatorSource};
pub use lookup::{DocIdLookup, FieldTermLookup};
pub use missing::MissingOrder;
pub use record::{PlainComparator, RecordComparator, RecordFactory};
pub use value_cache::ValueCache;
