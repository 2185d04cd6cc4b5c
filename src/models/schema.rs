//! Solution-level models

use super::table::Table;
use serde::{Deserialize, Serialize};

/// Publisher prefix used when the solution's publisher record is missing.
pub const DEFAULT_PUBLISHER_PREFIX: &str = "unknown";

/// A fetched solution with all of its tables.
///
/// Built once per fetch and handed to the caller; exporters only read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    pub unique_name: String,
    pub display_name: String,
    pub version: String,
    pub publisher_prefix: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn new(unique_name: impl Into<String>, tables: Vec<Table>) -> Self {
        let unique_name = unique_name.into();
        Self {
            display_name: unique_name.clone(),
            unique_name,
            version: String::new(),
            publisher_prefix: DEFAULT_PUBLISHER_PREFIX.to_string(),
            tables,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_publisher_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.publisher_prefix = prefix.into();
        self
    }

    pub fn table(&self, logical_name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.logical_name == logical_name)
    }
}

/// Entry returned when listing the solutions visible in an environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolutionSummary {
    pub unique_name: String,
    pub display_name: String,
    pub version: String,
}
