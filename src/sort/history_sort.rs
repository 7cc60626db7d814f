//! Sorting by when the user last viewed each record.
//!
//! The ordering key does not live in the index: it comes from a
//! [`UserHistory`] snapshot supplied per request. For each segment the
//! comparator resolves every history entry to a local doc id once and keeps
//! the resulting `doc -> last viewed` map until the segment changes.
//!
//! Ordering is fixed: most recently viewed first. Missing-value policy:
//! [`MissingOrder::Last`], so documents the user never viewed rank after all
//! viewed ones and tie with each other.

use std::cmp::Ordering;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, trace};

use crate::config::HistoryConfig;
use crate::error::{OrdoError, Result};
use crate::history::entry::UserHistory;
use crate::segment::reader::{DocId, SegmentId, SegmentReader};
use crate::sort::comparator::{FieldComparator, FieldComparatorSource};
use crate::sort::lookup::{DocIdLookup, FieldTermLookup};
use crate::sort::missing::MissingOrder;
use crate::sort::value_cache::ValueCache;

/// Comparator source ordering documents by a user's view history.
#[derive(Debug, Clone)]
pub struct UserHistoryComparatorSource {
    history: UserHistory,
    lookup: Arc<dyn DocIdLookup>,
}

impl UserHistoryComparatorSource {
    pub fn new(history: UserHistory, lookup: Arc<dyn DocIdLookup>) -> Self {
        UserHistoryComparatorSource { history, lookup }
    }

    /// Resolve history record ids against the terms of `field`.
    pub fn for_field<S: Into<String>>(history: UserHistory, field: S) -> Self {
        Self::new(history, Arc::new(FieldTermLookup::new(field)))
    }

    pub fn with_config(history: UserHistory, config: &HistoryConfig) -> Self {
        Self::new(history, Arc::new(FieldTermLookup::with_config(config)))
    }

    pub fn history(&self) -> &UserHistory {
        &self.history
    }

    /// Create a concrete comparator without boxing it.
    pub fn comparator_for(&self, num_hits: usize) -> Result<UserHistoryComparator> {
        UserHistoryComparator::new(self.history.clone(), Arc::clone(&self.lookup), num_hits)
    }
}

impl FieldComparatorSource for UserHistoryComparatorSource {
    fn new_comparator(&self, num_hits: usize) -> Result<Box<dyn FieldComparator>> {
        debug!(
            "creating history comparator for {num_hits} hits over {} entries",
            self.history.len()
        );
        Ok(Box::new(self.comparator_for(num_hits)?))
    }
}

/// Last-viewed timestamps of one segment's documents.
#[derive(Debug)]
struct SegmentIndex {
    segment: SegmentId,
    last_viewed: AHashMap<DocId, i64>,
}

impl SegmentIndex {
    fn build(
        segment: &dyn SegmentReader,
        history: &UserHistory,
        lookup: &dyn DocIdLookup,
    ) -> Result<Self> {
        let mut last_viewed = AHashMap::with_capacity(history.len());
        for entry in history {
            match lookup.lookup(segment, &entry.record_id)? {
                Some(doc) => {
                    last_viewed
                        .entry(doc)
                        .and_modify(|t: &mut i64| *t = (*t).max(entry.last_viewed))
                        .or_insert(entry.last_viewed);
                }
                None => trace!("{} not found in {}", entry.record_id, segment.id()),
            }
        }
        Ok(SegmentIndex {
            segment: segment.id(),
            last_viewed,
        })
    }

    fn is_for(&self, segment: SegmentId) -> bool {
        self.segment == segment
    }

    fn get(&self, doc: DocId) -> Option<i64> {
        self.last_viewed.get(&doc).copied()
    }
}

/// Per-query comparator over last-viewed timestamps.
#[derive(Debug)]
pub struct UserHistoryComparator {
    history: UserHistory,
    lookup: Arc<dyn DocIdLookup>,
    values: ValueCache<i64>,
    bottom: Option<i64>,
    segment_index: Option<SegmentIndex>,
    rebuilds: usize,
}

impl UserHistoryComparator {
    pub const MISSING_ORDER: MissingOrder = MissingOrder::Last;

    pub fn new(history: UserHistory, lookup: Arc<dyn DocIdLookup>, num_hits: usize) -> Result<Self> {
        if num_hits == 0 {
            return Err(OrdoError::invalid_argument("num_hits must be at least 1"));
        }
        Ok(UserHistoryComparator {
            history,
            lookup,
            values: ValueCache::for_hits(num_hits),
            bottom: None,
            segment_index: None,
            rebuilds: 0,
        })
    }

    /// How many times a segment index has been built.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// Number of documents in the current segment that have a timestamp.
    pub fn segment_index_len(&self) -> usize {
        self.segment_index
            .as_ref()
            .map_or(0, |index| index.last_viewed.len())
    }

    /// The timestamp cached at `slot`, if any.
    pub fn timestamp(&self, slot: usize) -> Option<i64> {
        self.values.get(slot).copied()
    }

    fn compare_values(a: Option<&i64>, b: Option<&i64>) -> Ordering {
        Self::MISSING_ORDER.compare(a, b, |a, b| b.cmp(a))
    }

    fn doc_value(&self, doc: DocId) -> Result<Option<i64>> {
        let index = self.segment_index.as_ref().ok_or_else(|| {
            OrdoError::invalid_operation("set_next_reader must be called before reading documents")
        })?;
        Ok(index.get(doc))
    }
}

impl FieldComparator for UserHistoryComparator {
    fn set_next_reader(&mut self, segment: Arc<dyn SegmentReader>) -> Result<()> {
        if self
            .segment_index
            .as_ref()
            .is_some_and(|index| index.is_for(segment.id()))
        {
            return Ok(());
        }

        let index = SegmentIndex::build(segment.as_ref(), &self.history, self.lookup.as_ref())?;
        debug!(
            "built history index for {}: {} of {} entries resolved",
            segment.id(),
            index.last_viewed.len(),
            self.history.len()
        );
        self.segment_index = Some(index);
        self.rebuilds += 1;
        Ok(())
    }

    fn copy(&mut self, slot: usize, doc: DocId) -> Result<()> {
        let value = self.doc_value(doc)?;
        self.values.set(slot, value)
    }

    fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        Self::compare_values(self.values.get(slot1), self.values.get(slot2))
    }

    fn compare_bottom(&self, doc: DocId) -> Result<Ordering> {
        let value = self.doc_value(doc)?;
        Ok(Self::compare_values(self.bottom.as_ref(), value.as_ref()))
    }

    fn set_bottom(&mut self, slot: usize) {
        self.bottom = self.values.get(slot).copied();
    }
}
