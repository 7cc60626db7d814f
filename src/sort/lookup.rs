//! Resolving record ids to segment-local doc ids.

use std::fmt::Debug;

use crate::config::HistoryConfig;
use crate::error::Result;
use crate::segment::reader::{DocId, SegmentReader};

/// Reverse lookup from an external record id to a local doc id.
///
/// `Ok(None)` means the record is not in this segment (never indexed there,
/// or deleted). Errors are reserved for failures of the segment itself.
pub trait DocIdLookup: Send + Sync + Debug {
    fn lookup(&self, segment: &dyn SegmentReader, record_id: &str) -> Result<Option<DocId>>;
}

/// Looks record ids up as exact terms of one indexed field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldTermLookup {
    field: String,
}

impl FieldTermLookup {
    pub fn new<S: Into<String>>(field: S) -> Self {
        FieldTermLookup {
            field: field.into(),
        }
    }

    pub fn with_config(config: &HistoryConfig) -> Self {
        Self::new(config.id_field.clone())
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl DocIdLookup for FieldTermLookup {
    fn lookup(&self, segment: &dyn SegmentReader, record_id: &str) -> Result<Option<DocId>> {
        segment.doc_for_term(&self.field, record_id)
    }
}
