//! Field value types for documents.
//!
//! ```
//! use ordo::document::field_value::FieldValue;
//!
//! let text_value = FieldValue::Text("hello".to_string());
//! assert_eq!(text_value.as_text(), Some("hello"));
//!
//! let int_value = FieldValue::Integer(42);
//! assert_eq!(int_value.as_integer(), Some(42));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a value for a field in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// DateTime value
    DateTime(DateTime<Utc>),
    /// Null value
    Null,
}

impl FieldValue {
    /// Convert to text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to an integer.
    ///
    /// Text values holding a decimal integer are parsed, since identifiers
    /// are frequently indexed as keyword text.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Convert to a UTC datetime.
    ///
    /// Integer values are read as milliseconds since the Unix epoch and text
    /// values as RFC3339.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            FieldValue::Integer(ms) => DateTime::from_timestamp_millis(*ms),
            FieldValue::Text(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        }
    }

    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// The text a term index stores for this value, if it is indexable.
    pub fn term(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Get the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Null => "null",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_conversion() {
        assert_eq!(FieldValue::Integer(7).as_integer(), Some(7));
        assert_eq!(FieldValue::Text(" 12 ".to_string()).as_integer(), Some(12));
        assert_eq!(FieldValue::Text("HSP-1".to_string()).as_integer(), None);
        assert_eq!(FieldValue::Null.as_integer(), None);
    }

    #[test]
    fn test_datetime_conversion() {
        let dt = FieldValue::Integer(1_000).as_datetime().unwrap();
        assert_eq!(dt.timestamp_millis(), 1_000);

        let parsed = FieldValue::Text("2024-01-02T03:04:05Z".to_string())
            .as_datetime()
            .unwrap();
        assert_eq!(parsed.timestamp(), 1_704_164_645);

        assert!(FieldValue::Boolean(true).as_datetime().is_none());
    }

    #[test]
    fn test_term() {
        assert_eq!(FieldValue::from("HSP-1").term(), Some("HSP-1".to_string()));
        assert_eq!(FieldValue::from(10_i64).term(), Some("10".to_string()));
        assert_eq!(FieldValue::Float(1.5).term(), None);
        assert_eq!(FieldValue::Null.type_name(), "null");
    }
}
