//! Typed decoding of metadata service responses
//!
//! Each response shape has its own record. Optional fields are resolved in one
//! place, through the `resolve`/`into_*` helpers below, using the named
//! defaults in this module and in [`crate::models`].

use serde::Deserialize;
use uuid::Uuid;

use crate::models::schema::DEFAULT_PUBLISHER_PREFIX;
use crate::models::table::DEFAULT_TABLE_TYPE;
use crate::models::{Attribute, AttributeType, SolutionSummary};

/// Version reported when a solution record carries none
pub const DEFAULT_SOLUTION_VERSION: &str = "0.0.0.0";

/// Required levels that make an attribute mandatory
pub const REQUIRED_LEVELS: &[&str] = &["ApplicationRequired", "SystemRequired"];

/// OData collection envelope: `{ "value": [...] }`
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// OData error envelope: `{ "error": { "code": "...", "message": "..." } }`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    /// Extract the upstream message from a response body, if it is an OData error.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|e| e.error.message)
            .filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct PublisherRecord {
    #[serde(default)]
    pub customizationprefix: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SolutionRecord {
    pub solutionid: Uuid,
    pub uniquename: String,
    #[serde(default)]
    pub friendlyname: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub publisherid: Option<PublisherRecord>,
}

impl SolutionRecord {
    pub fn display_name(&self) -> String {
        self.friendlyname
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.uniquename.clone())
    }

    pub fn version(&self) -> String {
        self.version
            .clone()
            .unwrap_or_else(|| DEFAULT_SOLUTION_VERSION.to_string())
    }

    pub fn publisher_prefix(&self) -> String {
        self.publisherid
            .as_ref()
            .and_then(|p| p.customizationprefix.clone())
            .unwrap_or_else(|| DEFAULT_PUBLISHER_PREFIX.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct SolutionListRecord {
    pub uniquename: String,
    #[serde(default)]
    pub friendlyname: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl From<SolutionListRecord> for SolutionSummary {
    fn from(record: SolutionListRecord) -> Self {
        SolutionSummary {
            display_name: record
                .friendlyname
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| record.uniquename.clone()),
            version: record
                .version
                .unwrap_or_else(|| DEFAULT_SOLUTION_VERSION.to_string()),
            unique_name: record.uniquename,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ComponentRecord {
    pub objectid: Uuid,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalizedLabel {
    #[serde(default)]
    pub label: Option<String>,
}

/// `DisplayName` metadata: only the user-localized label is used
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayLabel {
    #[serde(default)]
    pub user_localized_label: Option<LocalizedLabel>,
}

impl DisplayLabel {
    /// The localized label, or `fallback` when it is missing or empty.
    pub fn resolve(label: Option<&DisplayLabel>, fallback: &str) -> String {
        label
            .and_then(|l| l.user_localized_label.as_ref())
            .and_then(|l| l.label.clone())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagedValue {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityDefinitionRecord {
    pub logical_name: String,
    #[serde(default)]
    pub display_name: Option<DisplayLabel>,
    #[serde(default)]
    pub schema_name: Option<String>,
    pub primary_id_attribute: String,
    #[serde(default)]
    pub primary_name_attribute: Option<String>,
    #[serde(default)]
    pub table_type: Option<String>,
}

impl EntityDefinitionRecord {
    pub fn display_name(&self) -> String {
        DisplayLabel::resolve(self.display_name.as_ref(), &self.logical_name)
    }

    pub fn schema_name(&self) -> String {
        self.schema_name
            .clone()
            .unwrap_or_else(|| self.logical_name.clone())
    }

    pub fn table_type(&self) -> String {
        self.table_type
            .clone()
            .unwrap_or_else(|| DEFAULT_TABLE_TYPE.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeRecord {
    pub logical_name: String,
    #[serde(default)]
    pub display_name: Option<DisplayLabel>,
    #[serde(default)]
    pub attribute_type: Option<String>,
    #[serde(default)]
    pub is_primary_id: Option<bool>,
    #[serde(default)]
    pub is_primary_name: Option<bool>,
    #[serde(default)]
    pub required_level: Option<ManagedValue>,
    #[serde(default)]
    pub max_length: Option<u32>,
}

impl AttributeRecord {
    pub fn is_required(&self) -> bool {
        self.required_level
            .as_ref()
            .and_then(|r| r.value.as_deref())
            .is_some_and(|v| REQUIRED_LEVELS.contains(&v))
    }

    pub fn into_attribute(self) -> Attribute {
        Attribute {
            display_name: DisplayLabel::resolve(self.display_name.as_ref(), &self.logical_name),
            attribute_type: self
                .attribute_type
                .as_deref()
                .map(AttributeType::from_vendor)
                .unwrap_or_default(),
            is_primary_id: self.is_primary_id.unwrap_or(false),
            is_primary_name: self.is_primary_name.unwrap_or(false),
            is_required: self.is_required(),
            max_length: self.max_length,
            logical_name: self.logical_name,
        }
    }
}

/// One-to-many and many-to-one relationship metadata share this shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LookupRelationshipRecord {
    pub schema_name: String,
    pub referenced_entity: String,
    pub referencing_entity: String,
    #[serde(default)]
    pub referencing_attribute: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManyToManyRecord {
    pub schema_name: String,
    pub entity1_logical_name: String,
    pub entity2_logical_name: String,
    #[serde(default)]
    pub intersect_entity_name: Option<String>,
}
