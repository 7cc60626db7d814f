//! In-memory segment implementation.
//!
//! `MemorySegment` keeps documents in a vector indexed by doc id and builds a
//! term index over every indexable field so record ids can be resolved back
//! to doc ids. It is immutable once built; deletions are recorded by the
//! builder before the segment is sealed.

use ahash::AHashMap;

use crate::document::document::Document;
use crate::error::Result;
use crate::segment::reader::{DocId, SegmentId, SegmentReader};

/// An immutable segment held entirely in memory.
#[derive(Debug)]
pub struct MemorySegment {
    id: SegmentId,
    documents: Vec<Document>,
    deleted: Vec<bool>,
    /// field -> term -> doc ids carrying that term, in ascending order.
    terms: AHashMap<String, AHashMap<String, Vec<DocId>>>,
}

impl MemorySegment {
    /// Create a builder for a new segment.
    pub fn builder() -> MemorySegmentBuilder {
        MemorySegmentBuilder::new()
    }

    /// Create a segment from documents, none of them deleted.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        MemorySegmentBuilder::new().add_documents(documents).build()
    }

    fn index_terms(documents: &[Document]) -> AHashMap<String, AHashMap<String, Vec<DocId>>> {
        let mut terms: AHashMap<String, AHashMap<String, Vec<DocId>>> = AHashMap::new();
        for (doc_id, doc) in documents.iter().enumerate() {
            for (field, value) in doc.fields() {
                if let Some(term) = value.term() {
                    terms
                        .entry(field.clone())
                        .or_default()
                        .entry(term)
                        .or_default()
                        .push(doc_id as DocId);
                }
            }
        }
        terms
    }
}

impl SegmentReader for MemorySegment {
    fn id(&self) -> SegmentId {
        self.id
    }

    fn max_doc(&self) -> DocId {
        self.documents.len() as DocId
    }

    fn is_deleted(&self, doc_id: DocId) -> bool {
        self.deleted.get(doc_id as usize).copied().unwrap_or(true)
    }

    fn document(&self, doc_id: DocId) -> Result<Option<Document>> {
        if self.is_deleted(doc_id) {
            return Ok(None);
        }
        Ok(self.documents.get(doc_id as usize).cloned())
    }

    fn doc_for_term(&self, field: &str, term: &str) -> Result<Option<DocId>> {
        let doc = self
            .terms
            .get(field)
            .and_then(|postings| postings.get(term))
            .and_then(|docs| docs.iter().copied().find(|&doc| !self.is_deleted(doc)));
        Ok(doc)
    }
}

/// Builder for [`MemorySegment`].
#[derive(Debug, Default)]
pub struct MemorySegmentBuilder {
    documents: Vec<Document>,
    deleted: Vec<bool>,
}

impl MemorySegmentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document; it receives the next doc id.
    pub fn add_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self.deleted.push(false);
        self
    }

    /// Append several documents in order.
    pub fn add_documents<I: IntoIterator<Item = Document>>(mut self, documents: I) -> Self {
        for document in documents {
            self = self.add_document(document);
        }
        self
    }

    /// Mark a previously added document as deleted. Unknown ids are ignored.
    pub fn delete_document(mut self, doc_id: DocId) -> Self {
        if let Some(flag) = self.deleted.get_mut(doc_id as usize) {
            *flag = true;
        }
        self
    }

    /// Seal the segment under a fresh identity.
    pub fn build(self) -> MemorySegment {
        let terms = MemorySegment::index_terms(&self.documents);
        MemorySegment {
            id: SegmentId::allocate(),
            documents: self.documents,
            deleted: self.deleted,
            terms,
        }
    }
}
