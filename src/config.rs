//! Configuration for custom sort comparators.
//!
//! The configuration decides which indexed fields the domain factory reads,
//! which field the history comparator resolves record ids against, and how
//! large collectors and history lists may grow.
//!
//! # Examples
//!
//! ```
//! use ordo::config::SortConfig;
//!
//! let config = SortConfig::default();
//! assert_eq!(config.history.id_field, "key");
//! assert_eq!(config.history.max_items, 50);
//!
//! let custom = SortConfig::from_json_str(r#"{ "history": { "id_field": "issue_key" } }"#).unwrap();
//! assert_eq!(custom.history.id_field, "issue_key");
//! assert_eq!(custom.history.max_items, 50);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OrdoError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// User history settings.
    pub history: HistoryConfig,
    /// Collector settings.
    pub collector: CollectorConfig,
    /// Field names used to rebuild issues from raw documents.
    pub issue: IssueFieldConfig,
}

impl SortConfig {
    /// Parse a configuration from JSON. Missing sections take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SortConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Check the configuration for values no comparator can work with.
    pub fn validate(&self) -> Result<()> {
        if self.history.id_field.is_empty() {
            return Err(OrdoError::config("history.id_field must not be empty"));
        }
        if self.history.max_items == 0 {
            return Err(OrdoError::config("history.max_items must be at least 1"));
        }
        if self.collector.default_num_hits == 0 {
            return Err(OrdoError::config(
                "collector.default_num_hits must be at least 1",
            ));
        }
        for (name, value) in [
            ("issue.key_field", &self.issue.key_field),
            ("issue.id_field", &self.issue.id_field),
            ("issue.priority_field", &self.issue.priority_field),
            ("issue.updated_field", &self.issue.updated_field),
            ("issue.summary_field", &self.issue.summary_field),
        ] {
            if value.is_empty() {
                return Err(OrdoError::config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Settings for history-ordered sorting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Indexed field holding the record id that history entries refer to.
    pub id_field: String,
    /// Maximum number of entries kept per user.
    pub max_items: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            id_field: "key".to_string(),
            max_items: 50,
        }
    }
}

/// Settings for top-N collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Number of hits kept when the caller does not ask for a size.
    pub default_num_hits: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            default_num_hits: 50,
        }
    }
}

/// Indexed field names an [`crate::issue::Issue`] is rebuilt from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueFieldConfig {
    pub key_field: String,
    pub id_field: String,
    pub priority_field: String,
    pub updated_field: String,
    pub summary_field: String,
}

impl Default for IssueFieldConfig {
    fn default() -> Self {
        Self {
            key_field: "key".to_string(),
            id_field: "id".to_string(),
            priority_field: "priority".to_string(),
            updated_field: "updated".to_string(),
            summary_field: "summary".to_string(),
        }
    }
}
