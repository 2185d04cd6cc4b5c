//! Relationship edge canonicalization
//!
//! A one-to-many entry on table A and the mirrored many-to-one entry on
//! table B describe the same edge. Both map to one canonical key:
//! `(OneToMany, referenced, referencing, schema name)`. Many-to-many entries
//! map to `(ManyToMany, min(a, b), max(a, b), schema name)`.

use std::collections::BTreeMap;

use crate::models::{RelationshipType, Table};

/// Shape of a rendered edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKind {
    /// `from` is the referenced (one) side, `to` the referencing (many) side
    OneToMany,
    /// `from` and `to` are in name order
    ManyToMany,
}

/// One relationship line in a diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<'a> {
    pub kind: EdgeKind,
    pub from: &'a str,
    pub to: &'a str,
    pub schema_name: &'a str,
    pub lookup_attribute: Option<&'a str>,
    pub intersect_table: Option<&'a str>,
}

type EdgeKey<'a> = (EdgeKind, &'a str, &'a str, &'a str);

impl<'a> Edge<'a> {
    fn key(&self) -> EdgeKey<'a> {
        (self.kind, self.from, self.to, self.schema_name)
    }

    /// Fill optional details the first entry did not carry.
    fn merge(&mut self, other: &Edge<'a>) {
        if self.lookup_attribute.is_none() {
            self.lookup_attribute = other.lookup_attribute;
        }
        if self.intersect_table.is_none() {
            self.intersect_table = other.intersect_table;
        }
    }
}

/// Collect the deduplicated edges of a set of tables, ordered by canonical key.
///
/// Related tables are used by name and need not be among `tables`.
pub fn collect_edges<'a, I>(tables: I) -> Vec<Edge<'a>>
where
    I: IntoIterator<Item = &'a Table>,
{
    let mut edges: BTreeMap<EdgeKey<'a>, Edge<'a>> = BTreeMap::new();

    for table in tables {
        let owner = table.logical_name.as_str();
        for rel in &table.relationships {
            let related = rel.related_table.as_str();
            let (kind, from, to) = match rel.relationship_type {
                RelationshipType::OneToMany => (EdgeKind::OneToMany, owner, related),
                RelationshipType::ManyToOne => (EdgeKind::OneToMany, related, owner),
                RelationshipType::ManyToMany => {
                    let (a, b) = if owner <= related { (owner, related) } else { (related, owner) };
                    (EdgeKind::ManyToMany, a, b)
                }
            };
            let edge = Edge {
                kind,
                from,
                to,
                schema_name: rel.schema_name.as_str(),
                lookup_attribute: rel.lookup_attribute.as_deref(),
                intersect_table: rel.intersect_table.as_deref(),
            };
            edges
                .entry(edge.key())
                .and_modify(|existing| existing.merge(&edge))
                .or_insert(edge);
        }
    }

    edges.into_values().collect()
}
