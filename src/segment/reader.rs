//! Segment reader trait and segment identity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::document::document::Document;
use crate::error::Result;

/// Local document id within a single segment.
pub type DocId = u64;

static NEXT_SEGMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity token of a segment instance.
///
/// Two readers share an id only if they are views of the same segment
/// instance. Ids are never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(u64);

impl SegmentId {
    /// Allocate a fresh, process-unique segment id.
    pub fn allocate() -> Self {
        SegmentId(NEXT_SEGMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value of this id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "segment-{}", self.0)
    }
}

/// Read access to one immutable index segment.
pub trait SegmentReader: Send + Sync + fmt::Debug {
    /// Identity of this segment.
    fn id(&self) -> SegmentId;

    /// One past the largest doc id in the segment.
    fn max_doc(&self) -> DocId;

    /// Check if a document is deleted.
    fn is_deleted(&self, doc_id: DocId) -> bool;

    /// Get a document by local id. Deleted and out-of-range ids yield `None`.
    fn document(&self, doc_id: DocId) -> Result<Option<Document>>;

    /// Resolve the live document whose `field` was indexed with `term`.
    ///
    /// Returns `None` when no live document in this segment carries the term.
    fn doc_for_term(&self, field: &str, term: &str) -> Result<Option<DocId>>;

    /// Number of live documents in the segment.
    fn doc_count(&self) -> u64 {
        (0..self.max_doc()).filter(|&doc| !self.is_deleted(doc)).count() as u64
    }
}
