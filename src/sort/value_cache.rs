//! Slot-indexed cache of sort values.

use crate::error::{OrdoError, Result};

/// Slots addressable before a cache sized for a query first grows.
pub const INITIAL_SLOTS: usize = 16;

/// A growable, slot-indexed cache of optional values.
///
/// The cache starts with `initial_len` addressable slots and grows on demand
/// up to `max_len` (the collector's `num_hits`). Growth at least doubles the
/// addressable length, is capped at `max_len`, and never disturbs stored
/// values.
#[derive(Debug, Clone)]
pub struct ValueCache<T> {
    values: Vec<Option<T>>,
    max_len: usize,
}

impl<T> ValueCache<T> {
    /// Create a cache with `initial_len` slots that may grow to `max_len`.
    pub fn new(initial_len: usize, max_len: usize) -> Self {
        let mut values = Vec::with_capacity(initial_len.min(max_len));
        values.resize_with(initial_len.min(max_len), || None);
        ValueCache { values, max_len }
    }

    /// Create a cache for a query keeping `num_hits` documents. Storage is
    /// allocated as slots are written, never for `num_hits` up front.
    pub fn for_hits(num_hits: usize) -> Self {
        Self::new(INITIAL_SLOTS, num_hits)
    }

    /// Number of slots addressable without growing.
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Largest number of slots this cache may hold.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Value stored at `slot`. Slots never written (or beyond capacity) are
    /// empty.
    pub fn get(&self, slot: usize) -> Option<&T> {
        self.values.get(slot).and_then(Option::as_ref)
    }

    /// Store `value` at `slot`, growing the cache if needed.
    pub fn set(&mut self, slot: usize, value: Option<T>) -> Result<()> {
        if slot >= self.max_len {
            return Err(OrdoError::invalid_argument(format!(
                "slot {slot} out of range for {} hits",
                self.max_len
            )));
        }
        if slot >= self.values.len() {
            self.grow_to(slot + 1);
        }
        self.values[slot] = value;
        Ok(())
    }

    /// Grow so at least `min_len` slots are addressable.
    ///
    /// Postcondition: every slot below the old capacity holds exactly what it
    /// held before, and the new capacity is `min(max(2 * old, min_len), max_len)`.
    fn grow_to(&mut self, min_len: usize) {
        let old_len = self.values.len();
        let new_len = (old_len * 2).max(min_len).max(1).min(self.max_len);
        self.values.resize_with(new_len, || None);
        debug_assert!(self.values.len() >= old_len);
    }
}
