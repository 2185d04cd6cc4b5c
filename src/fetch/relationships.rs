//! Relationship filtering
//!
//! Relationship collections returned for an entity contain rows where the
//! entity sits on either side. Only the rows where it sits on the side named
//! by the collection are kept, and `related_table` always names the other
//! table.

use crate::client::wire::{LookupRelationshipRecord, ManyToManyRecord};
use crate::models::Relationship;

/// Keep rows where `logical_name` is the referenced (one) side.
pub fn one_to_many(records: Vec<LookupRelationshipRecord>, logical_name: &str) -> Vec<Relationship> {
    records
        .into_iter()
        .filter(|r| r.referenced_entity == logical_name)
        .map(|r| Relationship::one_to_many(r.schema_name, r.referencing_entity, r.referencing_attribute))
        .collect()
}

/// Keep rows where `logical_name` is the referencing (many) side.
pub fn many_to_one(records: Vec<LookupRelationshipRecord>, logical_name: &str) -> Vec<Relationship> {
    records
        .into_iter()
        .filter(|r| r.referencing_entity == logical_name)
        .map(|r| Relationship::many_to_one(r.schema_name, r.referenced_entity, r.referencing_attribute))
        .collect()
}

/// Keep rows where `logical_name` is either side.
///
/// A self-referencing row yields a single entry pointing back at the table.
pub fn many_to_many(records: Vec<ManyToManyRecord>, logical_name: &str) -> Vec<Relationship> {
    records
        .into_iter()
        .filter(|r| r.entity1_logical_name == logical_name || r.entity2_logical_name == logical_name)
        .map(|r| {
            let related = if r.entity1_logical_name == logical_name {
                r.entity2_logical_name
            } else {
                r.entity1_logical_name
            };
            Relationship::many_to_many(r.schema_name, related, r.intersect_entity_name)
        })
        .collect()
}
