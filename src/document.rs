//! Raw index records.
//!
//! A [`document::Document`] is the flat, field-oriented shape a record has
//! inside an index segment. It carries only indexed values; rich domain
//! records (see [`crate::issue::Issue`]) are rebuilt from it on demand by a
//! [`crate::sort::RecordFactory`].
//!
//! # Examples
//!
//! ```
//! use ordo::document::document::Document;
//!
//! let doc = Document::builder()
//!     .add_text("key", "HSP-1")
//!     .add_integer("id", 10000)
//!     .add_integer("priority", 3)
//!     .build();
//!
//! assert_eq!(doc.len(), 3);
//! assert!(doc.has_field("key"));
//! ```

pub mod document;
pub mod field_value;
