//! Attribute model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simplified attribute type.
///
/// Every vendor attribute type collapses into one of these variants; anything
/// unrecognised becomes [`AttributeType::String`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    #[default]
    String,
    Int,
    Decimal,
    Money,
    DateTime,
    Boolean,
    Lookup,
    Picklist,
    Guid,
}

impl AttributeType {
    /// Map a vendor attribute type name (e.g. `"Uniqueidentifier"`).
    ///
    /// Keys are case-sensitive.
    pub fn from_vendor(vendor_type: &str) -> Self {
        match vendor_type {
            "String" | "Memo" => AttributeType::String,
            "Integer" | "BigInt" => AttributeType::Int,
            "Decimal" | "Double" => AttributeType::Decimal,
            "Money" => AttributeType::Money,
            "DateTime" => AttributeType::DateTime,
            "Boolean" => AttributeType::Boolean,
            "Lookup" | "Customer" | "Owner" => AttributeType::Lookup,
            "Picklist" | "State" | "Status" => AttributeType::Picklist,
            "Uniqueidentifier" => AttributeType::Guid,
            _ => AttributeType::String,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Int => "int",
            AttributeType::Decimal => "decimal",
            AttributeType::Money => "money",
            AttributeType::DateTime => "datetime",
            AttributeType::Boolean => "boolean",
            AttributeType::Lookup => "lookup",
            AttributeType::Picklist => "picklist",
            AttributeType::Guid => "guid",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute model representing a typed field on a table
///
/// # Example
///
/// ```rust
/// use dataverse_erd::models::{Attribute, AttributeType};
///
/// let id = Attribute::new("accountid", AttributeType::Guid).primary_id();
/// assert!(id.is_primary_id);
/// assert_eq!(id.display_name, "accountid");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attribute {
    pub logical_name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(default)]
    pub is_primary_id: bool,
    #[serde(default)]
    pub is_primary_name: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl Attribute {
    /// Create an optional, non-key attribute whose display name is its logical name.
    pub fn new(logical_name: impl Into<String>, attribute_type: AttributeType) -> Self {
        let logical_name = logical_name.into();
        Self {
            display_name: logical_name.clone(),
            logical_name,
            attribute_type,
            is_primary_id: false,
            is_primary_name: false,
            is_required: false,
            max_length: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Mark as the table's primary id. Primary ids are always required.
    pub fn primary_id(mut self) -> Self {
        self.is_primary_id = true;
        self.is_required = true;
        self
    }

    pub fn primary_name(mut self) -> Self {
        self.is_primary_name = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Lookup attributes reference another table's primary id.
    pub fn is_foreign_key(&self) -> bool {
        self.attribute_type == AttributeType::Lookup
    }
}
