//! Comparing domain records rebuilt from raw index documents.
//!
//! [`RecordComparator`] is the contract the direct-compare sort engine runs
//! on: a total order over domain records plus the function that rebuilds a
//! record from a raw [`Document`]. Existing plain comparators are lifted into
//! it with [`crate::sort::RecordComparatorAdapter`].

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::document::document::Document;
use crate::error::Result;

/// Total order over domain records together with record reconstruction.
///
/// `compare` must be antisymmetric (`compare(a, b) == compare(b, a).reverse()`)
/// and transitive. `record_from_raw` must be deterministic and free of side
/// effects; it fails with [`crate::error::OrdoError::Reconstruction`] only
/// when the raw document is structurally invalid.
pub trait RecordComparator: Send + Sync + Debug {
    type Record: Clone + Send + Sync + Debug;

    fn compare(&self, a: &Self::Record, b: &Self::Record) -> Ordering;

    fn record_from_raw(&self, raw: &Document) -> Result<Self::Record>;
}

/// A plain comparator over already-built domain values.
pub trait PlainComparator: Send + Sync + Debug {
    type Item;

    fn compare(&self, a: &Self::Item, b: &Self::Item) -> Ordering;
}

/// Rebuilds domain records from raw documents.
pub trait RecordFactory: Send + Sync + Debug {
    type Output;

    fn from_raw(&self, raw: &Document) -> Result<Self::Output>;
}
