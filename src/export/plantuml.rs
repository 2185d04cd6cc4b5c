//! PlantUML entity syntax (Information Engineering notation)

use super::edges::{Edge, EdgeKind};
use super::identifier::{sanitize_identifier, unquote};
use super::render::{DiagramSyntax, describe_schema, edge_label};
use crate::models::{Attribute, AttributeType, Schema, Table};

pub struct PlantUmlSyntax;

impl PlantUmlSyntax {
    fn cardinality(kind: EdgeKind) -> &'static str {
        match kind {
            EdgeKind::OneToMany => "||--o{",
            EdgeKind::ManyToMany => "}o--o{",
        }
    }
}

impl DiagramSyntax for PlantUmlSyntax {
    fn type_token(&self, attribute_type: AttributeType) -> &'static str {
        match attribute_type {
            AttributeType::String => "String",
            AttributeType::Int => "Integer",
            AttributeType::Decimal => "Decimal",
            AttributeType::Money => "Money",
            AttributeType::DateTime => "DateTime",
            AttributeType::Boolean => "Boolean",
            AttributeType::Lookup => "Lookup",
            AttributeType::Picklist => "Choice",
            AttributeType::Guid => "Guid",
        }
    }

    fn begin(&self, out: &mut String, schema: &Schema) {
        out.push_str(&format!(
            "@startuml {}\n",
            sanitize_identifier(&schema.unique_name)
        ));
        out.push_str(&format!("' {}\n", describe_schema(schema)));
        out.push_str("hide circle\n");
        out.push_str("skinparam linetype ortho\n");
    }

    fn begin_entity(&self, out: &mut String, id: &str, table: &Table, _attributes: &[Attribute]) {
        out.push_str(&format!(
            "entity \"{}\" as {} {{\n",
            unquote(&table.display_name),
            id
        ));
    }

    fn attribute(&self, out: &mut String, attribute: &Attribute) {
        let mut line = String::from("  ");
        if attribute.is_required {
            line.push_str("* ");
        }
        line.push_str(&format!(
            "{} : {}",
            attribute.logical_name,
            self.type_token(attribute.attribute_type)
        ));
        if attribute.is_primary_id {
            line.push_str(" <<PK>>");
        }
        if attribute.is_foreign_key() {
            line.push_str(" <<FK>>");
        }
        if attribute.is_primary_name {
            line.push_str(" <<PN>>");
        }
        out.push_str(&line);
        out.push('\n');
    }

    fn end_entity(&self, out: &mut String, _id: &str, _table: &Table, _attributes: &[Attribute]) {
        out.push_str("}\n");
    }

    fn edge(&self, out: &mut String, from: &str, to: &str, edge: &Edge<'_>) {
        out.push_str(&format!(
            "{} {} {} : {}\n",
            from,
            Self::cardinality(edge.kind),
            to,
            edge_label(edge, "\\n")
        ));
    }

    fn end(&self, out: &mut String) {
        out.push_str("@enduml\n");
    }
}
