//! Sorting by comparing fully rebuilt domain records.
//!
//! Rebuilding a record is far more expensive than reading an indexed scalar,
//! so records are rebuilt once per retained slot in [`FieldComparator::copy`]
//! and cached there. `compare_bottom` rebuilds the candidate transiently and
//! drops it again.
//!
//! Missing-value policy: [`MissingOrder::Last`] in the record comparator's
//! own (ascending) direction. A document that is deleted or absent from the
//! segment has no record and ranks after every document that has one.

use std::cmp::Ordering;
use std::sync::Arc;

use log::{debug, trace};

use crate::error::{OrdoError, Result};
use crate::segment::reader::{DocId, SegmentReader};
use crate::sort::adapter::RecordComparatorAdapter;
use crate::sort::comparator::{FieldComparator, FieldComparatorSource};
use crate::sort::missing::MissingOrder;
use crate::sort::record::{PlainComparator, RecordComparator, RecordFactory};
use crate::sort::value_cache::ValueCache;

/// Comparator source for record-comparing sorts.
#[derive(Debug)]
pub struct DocumentSortComparatorSource<C> {
    comparator: Arc<C>,
}

impl<C: RecordComparator + 'static> DocumentSortComparatorSource<C> {
    pub fn new(comparator: C) -> Self {
        DocumentSortComparatorSource {
            comparator: Arc::new(comparator),
        }
    }

    pub fn from_arc(comparator: Arc<C>) -> Self {
        DocumentSortComparatorSource { comparator }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Create a concrete comparator without boxing it.
    pub fn comparator_for(&self, num_hits: usize) -> Result<DocumentSortComparator<C>> {
        DocumentSortComparator::new(Arc::clone(&self.comparator), num_hits)
    }
}

impl<P, F> DocumentSortComparatorSource<RecordComparatorAdapter<P, F>>
where
    P: PlainComparator + 'static,
    P::Item: Clone + Send + Sync + std::fmt::Debug,
    F: RecordFactory<Output = P::Item> + 'static,
{
    /// Build a source over a plain comparator and a factory, either of which
    /// may be missing. A missing collaborator is a configuration error.
    pub fn from_parts(comparator: Option<P>, factory: Option<F>) -> Result<Self> {
        let mut builder = RecordComparatorAdapter::<P, F>::builder();
        if let Some(comparator) = comparator {
            builder = builder.comparator(comparator);
        }
        if let Some(factory) = factory {
            builder = builder.factory(factory);
        }
        Ok(Self::new(builder.build()?))
    }
}

impl<C> Clone for DocumentSortComparatorSource<C> {
    fn clone(&self) -> Self {
        DocumentSortComparatorSource {
            comparator: Arc::clone(&self.comparator),
        }
    }
}

impl<C: PartialEq> PartialEq for DocumentSortComparatorSource<C> {
    fn eq(&self, other: &Self) -> bool {
        *self.comparator == *other.comparator
    }
}

impl<C: RecordComparator + 'static> FieldComparatorSource for DocumentSortComparatorSource<C> {
    fn new_comparator(&self, num_hits: usize) -> Result<Box<dyn FieldComparator>> {
        debug!("creating document sort comparator for {num_hits} hits");
        Ok(Box::new(self.comparator_for(num_hits)?))
    }
}

/// Per-query comparator caching one rebuilt record per slot.
#[derive(Debug)]
pub struct DocumentSortComparator<C: RecordComparator> {
    comparator: Arc<C>,
    values: ValueCache<C::Record>,
    bottom: Option<C::Record>,
    segment: Option<Arc<dyn SegmentReader>>,
}

impl<C: RecordComparator> DocumentSortComparator<C> {
    pub fn new(comparator: Arc<C>, num_hits: usize) -> Result<Self> {
        if num_hits == 0 {
            return Err(OrdoError::invalid_argument("num_hits must be at least 1"));
        }
        Ok(DocumentSortComparator {
            comparator,
            values: ValueCache::for_hits(num_hits),
            bottom: None,
            segment: None,
        })
    }

    pub const MISSING_ORDER: MissingOrder = MissingOrder::Last;

    /// Number of slots the value cache can hold without growing.
    pub fn cache_capacity(&self) -> usize {
        self.values.capacity()
    }

    /// The record cached at `slot`, if any.
    pub fn record(&self, slot: usize) -> Option<&C::Record> {
        self.values.get(slot)
    }

    fn compare_values(&self, a: Option<&C::Record>, b: Option<&C::Record>) -> Ordering {
        Self::MISSING_ORDER.compare(a, b, |a, b| self.comparator.compare(a, b))
    }

    /// Rebuild the record for `doc` in the current segment.
    fn load(&self, doc: DocId) -> Result<Option<C::Record>> {
        let segment = self.segment.as_ref().ok_or_else(|| {
            OrdoError::invalid_operation("set_next_reader must be called before reading documents")
        })?;
        match segment.document(doc)? {
            Some(raw) => self.comparator.record_from_raw(&raw).map(Some),
            None => {
                trace!("doc {doc} not present in {}", segment.id());
                Ok(None)
            }
        }
    }
}

impl<C: RecordComparator> FieldComparator for DocumentSortComparator<C> {
    fn set_next_reader(&mut self, segment: Arc<dyn SegmentReader>) -> Result<()> {
        trace!("document sort comparator moving to {}", segment.id());
        self.segment = Some(segment);
        Ok(())
    }

    fn copy(&mut self, slot: usize, doc: DocId) -> Result<()> {
        let record = self.load(doc)?;
        self.values.set(slot, record)
    }

    fn compare(&self, slot1: usize, slot2: usize) -> Ordering {
        self.compare_values(self.values.get(slot1), self.values.get(slot2))
    }

    fn compare_bottom(&self, doc: DocId) -> Result<Ordering> {
        let candidate = self.load(doc)?;
        Ok(self.compare_values(self.bottom.as_ref(), candidate.as_ref()))
    }

    fn set_bottom(&mut self, slot: usize) {
        self.bottom = self.values.get(slot).cloned();
    }
}
