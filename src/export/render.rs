//! Shared diagram traversal
//!
//! Every notation walks the schema the same way: header, one entity block per
//! table (sorted by logical name), then one line per canonical edge, then the
//! footer. A [`DiagramSyntax`] only decides how each piece is spelled.

use super::FormatConfig;
use super::edges::{Edge, collect_edges};
use super::identifier::sanitize_identifier;
use crate::models::{Attribute, AttributeType, Schema, Table};

/// Per-notation spelling of a diagram.
///
/// Identifiers passed to the hooks are already sanitized.
pub trait DiagramSyntax {
    /// Type token for an attribute type
    fn type_token(&self, attribute_type: AttributeType) -> &'static str;

    fn begin(&self, out: &mut String, schema: &Schema);

    /// `attributes` is the slice that will be emitted for this table.
    fn begin_entity(&self, out: &mut String, id: &str, table: &Table, attributes: &[Attribute]);

    fn attribute(&self, out: &mut String, attribute: &Attribute);

    fn end_entity(&self, out: &mut String, id: &str, table: &Table, attributes: &[Attribute]);

    fn edge(&self, out: &mut String, from: &str, to: &str, edge: &Edge<'_>);

    fn end(&self, out: &mut String);
}

/// Render a full document with `syntax`.
pub fn render_document(syntax: &dyn DiagramSyntax, schema: &Schema, config: &FormatConfig) -> String {
    let mut tables: Vec<&Table> = schema.tables.iter().collect();
    tables.sort_by(|a, b| a.logical_name.cmp(&b.logical_name));

    let mut out = String::new();
    syntax.begin(&mut out, schema);

    for table in &tables {
        let id = sanitize_identifier(&table.logical_name);
        out.push('\n');
        let attributes = visible_attributes(table, config);
        syntax.begin_entity(&mut out, &id, table, attributes);
        for attribute in attributes {
            syntax.attribute(&mut out, attribute);
        }
        syntax.end_entity(&mut out, &id, table, attributes);
    }

    if config.include_relationships {
        let edges = collect_edges(tables.iter().copied());
        if !edges.is_empty() {
            out.push('\n');
        }
        for edge in &edges {
            let from = sanitize_identifier(edge.from);
            let to = sanitize_identifier(edge.to);
            syntax.edge(&mut out, &from, &to, edge);
        }
    }

    syntax.end(&mut out);
    out
}

fn visible_attributes<'t>(table: &'t Table, config: &FormatConfig) -> &'t [Attribute] {
    if !config.include_attributes {
        return &[];
    }
    let limit = config
        .max_attributes
        .unwrap_or(usize::MAX)
        .min(table.attributes.len());
    &table.attributes[..limit]
}

/// One-line description of the solution used in document headers.
pub fn describe_schema(schema: &Schema) -> String {
    let mut text = format!("{} ({})", schema.display_name, schema.unique_name);
    if !schema.version.is_empty() {
        text.push_str(&format!(" v{}", schema.version));
    }
    text.push_str(&format!(", publisher: {}", schema.publisher_prefix));
    text.replace(['\n', '\r'], " ")
}

/// Label text for an edge: the schema name, plus the intersect table for
/// many-to-many edges.
pub fn edge_label(edge: &Edge<'_>, separator: &str) -> String {
    match edge.intersect_table {
        Some(intersect) => format!("{}{}via {}", edge.schema_name, separator, intersect),
        None => edge.schema_name.to_string(),
    }
}
