//! Index segments as seen by sort comparators.
//!
//! A segment is an immutable partition of the index. Comparators read raw
//! documents from it by local doc id and resolve record ids back to local doc
//! ids through [`reader::SegmentReader::doc_for_term`]. Every segment carries a
//! [`reader::SegmentId`] so per-segment caches can be keyed on identity.

pub mod memory;
pub mod reader;

pub use memory::{MemorySegment, MemorySegmentBuilder};
pub use reader::{DocId, SegmentId, SegmentReader};
