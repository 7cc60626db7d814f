//! The top-N comparator protocol.
//!
//! A [`FieldComparatorSource`] is a long-lived, stateless factory. For each
//! query the collector asks it for a [`FieldComparator`] sized to the number
//! of hits wanted; that comparator owns every piece of per-query state (slot
//! values, the bottom value, per-segment caches) and is dropped with the
//! query.
//!
//! Within one query calls arrive per segment as
//! `set_next_reader` → (`copy` | `compare_bottom`)* → `set_bottom`? → `compare`*.
//! Orderings follow `Ordering::Less` = "ranks first".

use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;

use crate::document::field_value::FieldValue;
use crate::error::Result;
use crate::segment::reader::{DocId, SegmentReader};

/// Per-query comparator over a fixed set of `num_hits` slots.
pub trait FieldComparator: Send + Debug {
    /// Switch to a new segment. Documents passed to later calls belong to it.
    fn set_next_reader(&mut self, segment: Arc<dyn SegmentReader>) -> Result<()>;

    /// Load the sort value of `doc` into `slot`.
    fn copy(&mut self, slot: usize, doc: DocId) -> Result<()>;

    /// Compare the values held in two slots.
    fn compare(&self, slot1: usize, slot2: usize) -> Ordering;

    /// Compare the bottom value against the value of `doc` in the current
    /// segment, as `bottom.cmp(doc)`. `Greater` means `doc` outranks the
    /// bottom and is competitive.
    fn compare_bottom(&self, doc: DocId) -> Result<Ordering>;

    /// Make the value in `slot` the bottom.
    fn set_bottom(&mut self, slot: usize);

    /// Sortable scalar for `slot`, for consumers that want to display it.
    ///
    /// Comparators that rank on rich records have no such scalar and return
    /// `None`.
    fn value(&self, _slot: usize) -> Option<FieldValue> {
        None
    }
}

/// Stateless factory producing one [`FieldComparator`] per query.
pub trait FieldComparatorSource: Send + Sync + Debug {
    /// Create a comparator for a query collecting at most `num_hits` hits.
    fn new_comparator(&self, num_hits: usize) -> Result<Box<dyn FieldComparator>>;
}

/// One sort key: a comparator source and its direction.
#[derive(Debug, Clone)]
pub struct SortField {
    pub source: Arc<dyn FieldComparatorSource>,
    /// Invert the comparator's ordering, missing-value placement included.
    pub reverse: bool,
}

impl SortField {
    pub fn new(source: Arc<dyn FieldComparatorSource>) -> Self {
        SortField {
            source,
            reverse: false,
        }
    }

    /// Sort on the same source in the opposite direction.
    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }
}
