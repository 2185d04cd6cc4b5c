//! Table model

use super::attribute::Attribute;
use super::relationship::Relationship;
use serde::{Deserialize, Serialize};

/// Table type reported when the entity definition carries none.
pub const DEFAULT_TABLE_TYPE: &str = "Standard";

/// A schema entity. `logical_name` is its identity within a [`Schema`](super::Schema).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Table {
    pub logical_name: String,
    pub display_name: String,
    pub schema_name: String,
    pub primary_id_attribute: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_name_attribute: Option<String>,
    pub table_type: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Table {
    /// Create a table with no attributes or relationships.
    ///
    /// Display and schema names default to the logical name and the primary id
    /// to `{logical_name}id`, matching the vendor's naming convention.
    pub fn new(logical_name: impl Into<String>) -> Self {
        let logical_name = logical_name.into();
        Self {
            display_name: logical_name.clone(),
            schema_name: logical_name.clone(),
            primary_id_attribute: format!("{logical_name}id"),
            primary_name_attribute: None,
            table_type: DEFAULT_TABLE_TYPE.to_string(),
            attributes: Vec::new(),
            relationships: Vec::new(),
            logical_name,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.primary_id_attribute = attributes
            .iter()
            .find(|a| a.is_primary_id)
            .map(|a| a.logical_name.clone())
            .unwrap_or(self.primary_id_attribute);
        self.primary_name_attribute = attributes
            .iter()
            .find(|a| a.is_primary_name)
            .map(|a| a.logical_name.clone())
            .or(self.primary_name_attribute);
        self.attributes = attributes;
        self
    }

    pub fn with_relationships(mut self, relationships: Vec<Relationship>) -> Self {
        self.relationships = relationships;
        self
    }

    pub fn attribute(&self, logical_name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.logical_name == logical_name)
    }
}
