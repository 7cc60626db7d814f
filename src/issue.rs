//! Issue records and ready-made issue orderings.
//!
//! An [`Issue`] is rebuilt from a raw index document by [`IssueFactory`]. The
//! comparators here are plain comparators over issues; wrap one together with
//! the factory in a [`crate::sort::RecordComparatorAdapter`] to sort search
//! results by it.
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//!
//! use ordo::document::document::Document;
//! use ordo::issue::{IssueFactory, IssueKeyComparator};
//! use ordo::sort::{PlainComparator, RecordFactory};
//!
//! let factory = IssueFactory::default();
//! let nine = factory
//!     .from_raw(&Document::builder().add_text("key", "ABC-9").add_integer("id", 9).build())
//!     .unwrap();
//! let ten = factory
//!     .from_raw(&Document::builder().add_text("key", "ABC-10").add_integer("id", 10).build())
//!     .unwrap();
//!
//! assert_eq!(IssueKeyComparator.compare(&nine, &ten), Ordering::Less);
//! ```

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::IssueFieldConfig;
use crate::document::document::Document;
use crate::document::field_value::FieldValue;
use crate::error::{OrdoError, Result};
use crate::sort::missing::MissingOrder;
use crate::sort::record::{PlainComparator, RecordFactory};

/// A tracked issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    /// Human-readable key such as `ABC-123`.
    pub key: String,
    /// Position in the priority scheme; lower ranks first.
    pub priority: Option<i64>,
    pub updated: Option<DateTime<Utc>>,
    pub summary: Option<String>,
}

impl Issue {
    pub fn new<S: Into<String>>(id: i64, key: S) -> Self {
        Issue {
            id,
            key: key.into(),
            priority: None,
            updated: None,
            summary: None,
        }
    }

    /// The project part of the key: everything before the last `-`, or the
    /// whole key when it has no `-`.
    pub fn project_key(&self) -> &str {
        split_key(&self.key).0
    }

    /// The numeric part of the key, if it has one.
    pub fn number(&self) -> Option<u64> {
        split_key(&self.key).1
    }
}

fn split_key(key: &str) -> (&str, Option<u64>) {
    match key.rsplit_once('-') {
        Some((project, number)) => match number.parse() {
            Ok(number) => (project, Some(number)),
            Err(_) => (project, None),
        },
        None => (key, None),
    }
}

/// Rebuilds [`Issue`]s from raw documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueFactory {
    fields: IssueFieldConfig,
}

impl IssueFactory {
    pub fn new(fields: IssueFieldConfig) -> Self {
        IssueFactory { fields }
    }

    pub fn fields(&self) -> &IssueFieldConfig {
        &self.fields
    }

    fn required<'a>(&self, raw: &'a Document, field: &str) -> Result<&'a FieldValue> {
        match raw.get_field(field) {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(OrdoError::reconstruction(format!(
                "issue document has no '{field}' field"
            ))),
        }
    }

    /// Read an optional field. Absent and null are `None`; a value that does
    /// not convert is an error.
    fn optional<'a, T>(
        &self,
        raw: &'a Document,
        field: &str,
        convert: impl FnOnce(&'a FieldValue) -> Option<T>,
    ) -> Result<Option<T>> {
        match raw.get_field(field) {
            None => Ok(None),
            Some(value) if value.is_null() => Ok(None),
            Some(value) => {
                let type_name = value.type_name();
                convert(value).map(Some).ok_or_else(|| {
                    OrdoError::reconstruction(format!(
                        "issue field '{field}' has unexpected type {type_name}"
                    ))
                })
            }
        }
    }
}

impl RecordFactory for IssueFactory {
    type Output = Issue;

    fn from_raw(&self, raw: &Document) -> Result<Issue> {
        let key_field = &self.fields.key_field;
        let key = self.required(raw, key_field)?.as_text().ok_or_else(|| {
            OrdoError::reconstruction(format!("issue field '{key_field}' is not text"))
        })?;
        if key.is_empty() {
            return Err(OrdoError::reconstruction("issue key is empty"));
        }

        let id_field = &self.fields.id_field;
        let id = self.required(raw, id_field)?.as_integer().ok_or_else(|| {
            OrdoError::reconstruction(format!("issue field '{id_field}' is not an integer"))
        })?;

        Ok(Issue {
            id,
            key: key.to_string(),
            priority: self.optional(raw, &self.fields.priority_field, FieldValue::as_integer)?,
            updated: self.optional(raw, &self.fields.updated_field, FieldValue::as_datetime)?,
            summary: self
                .optional(raw, &self.fields.summary_field, FieldValue::as_text)?
                .map(str::to_string),
        })
    }
}

/// Orders issues by project, then by issue number (`ABC-9` before `ABC-10`).
///
/// Keys without a number rank after numbered keys of the same project. Keys
/// that still tie (`ABC-01` and `ABC-1`) fall back to plain string order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IssueKeyComparator;

impl PlainComparator for IssueKeyComparator {
    type Item = Issue;

    fn compare(&self, a: &Issue, b: &Issue) -> Ordering {
        let (a_project, a_number) = split_key(&a.key);
        let (b_project, b_number) = split_key(&b.key);
        a_project
            .cmp(b_project)
            .then_with(|| {
                MissingOrder::Last.compare(a_number.as_ref(), b_number.as_ref(), |x, y| x.cmp(y))
            })
            .then_with(|| a.key.cmp(&b.key))
    }
}

/// Orders issues by priority sequence; issues without a priority go last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PriorityComparator;

impl PlainComparator for PriorityComparator {
    type Item = Issue;

    fn compare(&self, a: &Issue, b: &Issue) -> Ordering {
        MissingOrder::Last.compare(a.priority.as_ref(), b.priority.as_ref(), |x, y| x.cmp(y))
    }
}

/// Orders issues by last update, oldest first; never-updated issues go last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UpdatedComparator;

impl PlainComparator for UpdatedComparator {
    type Item = Issue;

    fn compare(&self, a: &Issue, b: &Issue) -> Ordering {
        MissingOrder::Last.compare(a.updated.as_ref(), b.updated.as_ref(), |x, y| x.cmp(y))
    }
}
