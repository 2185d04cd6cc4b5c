//! Relationship model

use serde::{Deserialize, Serialize};

/// Relationship kind, seen from the owning table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationshipType {
    /// Rows in `related_table` reference the owning table.
    OneToMany,
    /// The owning table references `related_table` through a lookup.
    ManyToOne,
    /// Both tables are linked through an intersect table.
    ManyToMany,
}

/// Relationship recorded on a table.
///
/// `lookup_attribute` is only set for one-to-many and many-to-one entries,
/// `intersect_table` only for many-to-many. Use the constructors to keep
/// that shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Relationship {
    pub schema_name: String,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
    pub related_table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersect_table: Option<String>,
}

impl Relationship {
    pub fn one_to_many(
        schema_name: impl Into<String>,
        related_table: impl Into<String>,
        lookup_attribute: Option<String>,
    ) -> Self {
        Self {
            schema_name: schema_name.into(),
            relationship_type: RelationshipType::OneToMany,
            related_table: related_table.into(),
            lookup_attribute,
            intersect_table: None,
        }
    }

    pub fn many_to_one(
        schema_name: impl Into<String>,
        related_table: impl Into<String>,
        lookup_attribute: Option<String>,
    ) -> Self {
        Self {
            schema_name: schema_name.into(),
            relationship_type: RelationshipType::ManyToOne,
            related_table: related_table.into(),
            lookup_attribute,
            intersect_table: None,
        }
    }

    pub fn many_to_many(
        schema_name: impl Into<String>,
        related_table: impl Into<String>,
        intersect_table: Option<String>,
    ) -> Self {
        Self {
            schema_name: schema_name.into(),
            relationship_type: RelationshipType::ManyToMany,
            related_table: related_table.into(),
            lookup_attribute: None,
            intersect_table,
        }
    }
}
