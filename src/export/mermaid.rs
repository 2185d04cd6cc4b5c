//! Mermaid `erDiagram` syntax

use super::edges::{Edge, EdgeKind};
use super::identifier::{sanitize_identifier, unquote};
use super::render::{DiagramSyntax, describe_schema, edge_label};
use crate::models::{Attribute, AttributeType, Schema, Table};

pub struct MermaidSyntax;

impl MermaidSyntax {
    fn cardinality(kind: EdgeKind) -> &'static str {
        match kind {
            EdgeKind::OneToMany => "||--o{",
            EdgeKind::ManyToMany => "}o--o{",
        }
    }
}

impl DiagramSyntax for MermaidSyntax {
    fn type_token(&self, attribute_type: AttributeType) -> &'static str {
        match attribute_type {
            AttributeType::String => "string",
            AttributeType::Int => "int",
            AttributeType::Decimal => "decimal",
            AttributeType::Money => "money",
            AttributeType::DateTime => "datetime",
            AttributeType::Boolean => "boolean",
            AttributeType::Lookup => "lookup",
            AttributeType::Picklist => "choice",
            AttributeType::Guid => "uuid",
        }
    }

    fn begin(&self, out: &mut String, schema: &Schema) {
        out.push_str("erDiagram\n");
        out.push_str(&format!("    %% {}\n", describe_schema(schema)));
    }

    fn begin_entity(&self, out: &mut String, id: &str, _table: &Table, attributes: &[Attribute]) {
        if attributes.is_empty() {
            out.push_str(&format!("    {id}\n"));
        } else {
            out.push_str(&format!("    {id} {{\n"));
        }
    }

    fn attribute(&self, out: &mut String, attribute: &Attribute) {
        let mut line = format!(
            "        {} {}",
            self.type_token(attribute.attribute_type),
            sanitize_identifier(&attribute.logical_name)
        );

        let keys: Vec<&str> = [
            attribute.is_primary_id.then_some("PK"),
            attribute.is_foreign_key().then_some("FK"),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !keys.is_empty() {
            line.push(' ');
            line.push_str(&keys.join(", "));
        }

        let mut notes = Vec::new();
        if attribute.display_name != attribute.logical_name {
            notes.push(unquote(&attribute.display_name));
        }
        if attribute.is_primary_name {
            notes.push("primary name".to_string());
        }
        if attribute.is_required && !attribute.is_primary_id {
            notes.push("required".to_string());
        }
        if !notes.is_empty() {
            line.push_str(&format!(" \"{}\"", notes.join(", ")));
        }

        out.push_str(&line);
        out.push('\n');
    }

    fn end_entity(&self, out: &mut String, _id: &str, _table: &Table, attributes: &[Attribute]) {
        if !attributes.is_empty() {
            out.push_str("    }\n");
        }
    }

    fn edge(&self, out: &mut String, from: &str, to: &str, edge: &Edge<'_>) {
        out.push_str(&format!(
            "    {} {} {} : \"{}\"\n",
            from,
            Self::cardinality(edge.kind),
            to,
            unquote(&edge_label(edge, " "))
        ));
    }

    fn end(&self, _out: &mut String) {}
}
