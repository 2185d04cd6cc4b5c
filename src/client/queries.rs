//! OData request paths
//!
//! Every path is relative to [`ConnectionConfig::base_url`](super::ConnectionConfig::base_url).
//! String literals are escaped for OData (single quotes doubled) and then
//! percent-encoded, so a solution name cannot break out of its filter.

use uuid::Uuid;

/// `componenttype` value for tables (entities)
pub const COMPONENT_TYPE_ENTITY: u32 = 1;

/// Quote a value as an OData string literal, percent-encoded for a URL query.
pub fn odata_string_literal(value: &str) -> String {
    let escaped = value.replace('\'', "''");
    format!("'{}'", urlencoding::encode(&escaped))
}

/// Solution by unique name, with the publisher prefix expanded
pub fn solution_by_name(unique_name: &str) -> String {
    format!(
        "/solutions?$filter=uniquename eq {}&$select=solutionid,friendlyname,uniquename,_publisherid_value,version&$expand=publisherid($select=customizationprefix)",
        odata_string_literal(unique_name)
    )
}

/// Table components of a solution
pub fn solution_components(solution_id: Uuid) -> String {
    format!(
        "/solutioncomponents?$filter=_solutionid_value eq {solution_id} and componenttype eq {COMPONENT_TYPE_ENTITY}&$select=objectid"
    )
}

pub fn entity_definition(table_id: Uuid) -> String {
    format!(
        "/EntityDefinitions({table_id})?$select=LogicalName,DisplayName,SchemaName,PrimaryIdAttribute,PrimaryNameAttribute,TableType"
    )
}

pub fn entity_attributes(table_id: Uuid) -> String {
    format!(
        "/EntityDefinitions({table_id})/Attributes?$select=LogicalName,DisplayName,AttributeType,IsPrimaryId,IsPrimaryName,RequiredLevel"
    )
}

pub fn one_to_many_relationships(table_id: Uuid) -> String {
    format!(
        "/EntityDefinitions({table_id})/OneToManyRelationships?$select=SchemaName,ReferencedEntity,ReferencingEntity,ReferencingAttribute"
    )
}

pub fn many_to_one_relationships(table_id: Uuid) -> String {
    format!(
        "/EntityDefinitions({table_id})/ManyToOneRelationships?$select=SchemaName,ReferencedEntity,ReferencingEntity,ReferencingAttribute"
    )
}

pub fn many_to_many_relationships(table_id: Uuid) -> String {
    format!(
        "/EntityDefinitions({table_id})/ManyToManyRelationships?$select=SchemaName,Entity1LogicalName,Entity2LogicalName,IntersectEntityName"
    )
}

/// Visible solutions ordered by friendly name
pub fn visible_solutions() -> String {
    "/solutions?$select=uniquename,friendlyname,version&$filter=isvisible eq true&$orderby=friendlyname asc"
        .to_string()
}
