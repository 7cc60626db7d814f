//! Top-N collection driven by field comparators.
//!
//! The collector keeps at most `num_hits` documents in a binary heap whose
//! root is the worst retained document (the bottom). Each sort field owns a
//! [`FieldComparator`] holding the sort values per slot; the heap only stores
//! which slot belongs to which document. Once the heap is full a new document
//! is first checked with `compare_bottom` and only copied into a slot when it
//! beats the bottom.

use std::cmp::Ordering;
use std::sync::Arc;

use log::debug;

use crate::config::CollectorConfig;
use crate::error::{OrdoError, Result};
use crate::segment::reader::{DocId, SegmentId, SegmentReader};
use crate::sort::comparator::{FieldComparator, SortField};
use crate::sort::value_cache::INITIAL_SLOTS;

/// A retained document, identified by its segment and local doc id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortedHit {
    pub segment: SegmentId,
    pub doc_id: DocId,
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    slot: usize,
    /// Position of the segment in scan order; breaks ties with `doc_id`.
    segment_ord: usize,
    segment: SegmentId,
    doc_id: DocId,
}

#[derive(Debug)]
struct SortKey {
    comparator: Box<dyn FieldComparator>,
    reverse: bool,
}

impl SortKey {
    fn directed(&self, ordering: Ordering) -> Ordering {
        if self.reverse { ordering.reverse() } else { ordering }
    }
}

/// Collects the best `num_hits` documents under one or more sort fields.
#[derive(Debug)]
pub struct TopFieldCollector {
    num_hits: usize,
    keys: Vec<SortKey>,
    heap: Vec<HeapEntry>,
    segment: Option<Arc<dyn SegmentReader>>,
    segment_ord: usize,
    segments_seen: usize,
    total_hits: u64,
}

impl TopFieldCollector {
    /// Create a collector keeping `num_hits` documents. Later sort fields
    /// break ties of earlier ones; remaining ties go to the document scanned
    /// first.
    pub fn new(sort_fields: &[SortField], num_hits: usize) -> Result<Self> {
        if num_hits == 0 {
            return Err(OrdoError::invalid_argument("num_hits must be at least 1"));
        }
        if sort_fields.is_empty() {
            return Err(OrdoError::invalid_argument(
                "at least one sort field is required",
            ));
        }

        let keys = sort_fields
            .iter()
            .map(|field| {
                Ok(SortKey {
                    comparator: field.source.new_comparator(num_hits)?,
                    reverse: field.reverse,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TopFieldCollector {
            num_hits,
            keys,
            heap: Vec::with_capacity(num_hits.min(INITIAL_SLOTS)),
            segment: None,
            segment_ord: 0,
            segments_seen: 0,
            total_hits: 0,
        })
    }

    /// Create a collector sized by configuration.
    pub fn with_config(sort_fields: &[SortField], config: &CollectorConfig) -> Result<Self> {
        Self::new(sort_fields, config.default_num_hits)
    }

    /// Move on to the next segment of the scan.
    pub fn set_next_reader(&mut self, segment: Arc<dyn SegmentReader>) -> Result<()> {
        for key in &mut self.keys {
            key.comparator.set_next_reader(Arc::clone(&segment))?;
        }
        self.segment_ord = self.segments_seen;
        self.segments_seen += 1;
        self.segment = Some(segment);
        Ok(())
    }

    /// Offer a matching document of the current segment.
    ///
    /// Documents must be offered in ascending doc id order within a segment.
    pub fn collect(&mut self, doc_id: DocId) -> Result<()> {
        let segment = self
            .segment
            .as_ref()
            .ok_or_else(|| OrdoError::invalid_operation("collect called before set_next_reader"))?;
        if segment.is_deleted(doc_id) {
            return Ok(());
        }
        let entry = HeapEntry {
            slot: 0,
            segment_ord: self.segment_ord,
            segment: segment.id(),
            doc_id,
        };
        self.total_hits += 1;

        if self.heap.len() < self.num_hits {
            let slot = self.heap.len();
            for key in &mut self.keys {
                key.comparator.copy(slot, doc_id)?;
            }
            self.heap.push(HeapEntry { slot, ..entry });
            self.sift_up(self.heap.len() - 1);
            if self.heap.len() == self.num_hits {
                self.update_bottom();
            }
            return Ok(());
        }

        if self.compare_bottom(doc_id)? != Ordering::Greater {
            // Equal loses too: the bottom was scanned earlier.
            return Ok(());
        }

        let slot = self.heap[0].slot;
        for key in &mut self.keys {
            key.comparator.copy(slot, doc_id)?;
        }
        self.heap[0] = HeapEntry { slot, ..entry };
        self.sift_down(0);
        self.update_bottom();
        Ok(())
    }

    /// Collect every live document of `segment`.
    pub fn collect_segment(&mut self, segment: Arc<dyn SegmentReader>) -> Result<()> {
        let max_doc = segment.max_doc();
        self.set_next_reader(segment)?;
        for doc_id in 0..max_doc {
            self.collect(doc_id)?;
        }
        Ok(())
    }

    /// Number of documents offered (deleted ones excluded).
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    pub fn num_hits(&self) -> usize {
        self.num_hits
    }

    /// Number of documents currently retained.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Retained documents, best first.
    pub fn results(&self) -> Vec<SortedHit> {
        let mut entries = self.heap.clone();
        entries.sort_by(|a, b| self.compare_entries(a, b));
        debug!(
            "collected {} of {} hits across {} segments",
            entries.len(),
            self.total_hits,
            self.segments_seen
        );
        entries
            .into_iter()
            .map(|entry| SortedHit {
                segment: entry.segment,
                doc_id: entry.doc_id,
            })
            .collect()
    }

    fn compare_bottom(&self, doc_id: DocId) -> Result<Ordering> {
        for key in &self.keys {
            let ordering = key.directed(key.comparator.compare_bottom(doc_id)?);
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }
        Ok(Ordering::Equal)
    }

    fn compare_entries(&self, a: &HeapEntry, b: &HeapEntry) -> Ordering {
        self.keys
            .iter()
            .map(|key| key.directed(key.comparator.compare(a.slot, b.slot)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
            .then_with(|| (a.segment_ord, a.doc_id).cmp(&(b.segment_ord, b.doc_id)))
    }

    /// Whether the entry at `i` ranks after the entry at `j`.
    fn is_worse(&self, i: usize, j: usize) -> bool {
        self.compare_entries(&self.heap[i], &self.heap[j]) == Ordering::Greater
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.is_worse(i, parent) {
                break;
            }
            self.heap.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut worst = i;
            if left < len && self.is_worse(left, worst) {
                worst = left;
            }
            if right < len && self.is_worse(right, worst) {
                worst = right;
            }
            if worst == i {
                break;
            }
            self.heap.swap(i, worst);
            i = worst;
        }
    }

    fn update_bottom(&mut self) {
        let slot = self.heap[0].slot;
        for key in &mut self.keys {
            key.comparator.set_bottom(slot);
        }
    }
}
