//! Graphviz DOT syntax with record-shaped nodes

use super::edges::{Edge, EdgeKind};
use super::identifier::{escape_dot_string, escape_record_field};
use super::render::{DiagramSyntax, describe_schema, edge_label};
use crate::models::{Attribute, AttributeType, Schema, Table};

pub struct GraphvizSyntax;

impl GraphvizSyntax {
    /// Node ids are always quoted so that keywords like `node` or `edge` stay ids.
    fn node_id(id: &str) -> String {
        format!("\"{}\"", escape_dot_string(id))
    }

    /// Arrow styling: the tail sits on `from`, the head on `to`.
    fn arrows(kind: EdgeKind) -> (&'static str, &'static str) {
        match kind {
            EdgeKind::OneToMany => ("tee", "crow"),
            EdgeKind::ManyToMany => ("crow", "crow"),
        }
    }
}

impl DiagramSyntax for GraphvizSyntax {
    fn type_token(&self, attribute_type: AttributeType) -> &'static str {
        match attribute_type {
            AttributeType::String => "nvarchar",
            AttributeType::Int => "int",
            AttributeType::Decimal => "decimal",
            AttributeType::Money => "money",
            AttributeType::DateTime => "datetime",
            AttributeType::Boolean => "bit",
            AttributeType::Lookup => "lookup",
            AttributeType::Picklist => "choice",
            AttributeType::Guid => "uniqueidentifier",
        }
    }

    fn begin(&self, out: &mut String, schema: &Schema) {
        out.push_str("digraph ERD {\n");
        out.push_str(&format!("    // {}\n", describe_schema(schema)));
        out.push_str("    graph [rankdir=LR, fontname=\"Helvetica\"];\n");
        out.push_str("    node [shape=record, fontname=\"Helvetica\", fontsize=10];\n");
        out.push_str("    edge [fontname=\"Helvetica\", fontsize=9];\n");
    }

    fn begin_entity(&self, out: &mut String, id: &str, table: &Table, _attributes: &[Attribute]) {
        out.push_str(&format!(
            "    {} [label=\"{{{}|",
            Self::node_id(id),
            escape_record_field(&table.display_name)
        ));
    }

    fn attribute(&self, out: &mut String, attribute: &Attribute) {
        let mut field = String::new();
        field.push_str(if attribute.is_required { "* " } else { "  " });
        field.push_str(&format!(
            "{} : {}",
            attribute.logical_name,
            self.type_token(attribute.attribute_type)
        ));
        if attribute.is_primary_id {
            field.push_str(" (PK)");
        }
        if attribute.is_foreign_key() {
            field.push_str(" (FK)");
        }
        if attribute.is_primary_name {
            field.push_str(" (PN)");
        }
        out.push_str(&escape_record_field(&field));
        out.push_str("\\l");
    }

    fn end_entity(&self, out: &mut String, _id: &str, _table: &Table, _attributes: &[Attribute]) {
        out.push_str("}\"];\n");
    }

    fn edge(&self, out: &mut String, from: &str, to: &str, edge: &Edge<'_>) {
        let (tail, head) = Self::arrows(edge.kind);
        out.push_str(&format!(
            "    {} -> {} [label=\"{}\", dir=both, arrowtail={}, arrowhead={}];\n",
            Self::node_id(from),
            Self::node_id(to),
            escape_dot_string(&edge_label(edge, "\n")),
            tail,
            head
        ));
    }

    fn end(&self, out: &mut String) {
        out.push_str("}\n");
    }
}
