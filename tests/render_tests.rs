//! Diagram rendering tests

use dataverse_erd::export::{DiagramExporter, DiagramFormat, FormatConfig, render};
use dataverse_erd::models::{Attribute, AttributeType, Relationship, Schema, Table};

fn account() -> Table {
    Table::new("account")
        .with_display_name("Account")
        .with_attributes(vec![
            Attribute::new("accountid", AttributeType::Guid).primary_id(),
            Attribute::new("name", AttributeType::String)
                .primary_name()
                .required(),
        ])
}

fn contact() -> Table {
    Table::new("contact")
        .with_display_name("Contact")
        .with_attributes(vec![
            Attribute::new("contactid", AttributeType::Guid).primary_id(),
            Attribute::new("fullname", AttributeType::String).primary_name(),
        ])
}

/// account 1 -- * contact, recorded on account only
fn customer_management() -> Schema {
    let account = account().with_relationships(vec![Relationship::one_to_many(
        "account_contact",
        "contact",
        Some("parentcustomerid".to_string()),
    )]);
    Schema::new("CustomerManagement", vec![account, contact()])
        .with_display_name("Customer Management")
        .with_version("1.0.0.0")
        .with_publisher_prefix("cm")
}

/// Both mirrored entries of the same relationship
fn mirrored() -> Schema {
    let account = account().with_relationships(vec![Relationship::one_to_many(
        "account_contact",
        "contact",
        None,
    )]);
    let contact = contact().with_relationships(vec![Relationship::many_to_one(
        "account_contact",
        "account",
        Some("parentcustomerid".to_string()),
    )]);
    Schema::new("CustomerManagement", vec![contact, account])
}

fn render_as(schema: &Schema, format: DiagramFormat) -> String {
    render(schema, &FormatConfig::new(format))
}

fn count_lines(text: &str, predicate: impl Fn(&str) -> bool) -> usize {
    text.lines().filter(|line| predicate(line)).count()
}

mod mermaid_tests {
    use super::*;

    #[test]
    fn test_customer_management_document() {
        let output = render_as(&customer_management(), DiagramFormat::Mermaid);
        let expected = "erDiagram
    %% Customer Management (CustomerManagement) v1.0.0.0, publisher: cm

    account {
        uuid accountid PK
        string name \"primary name, required\"
    }

    contact {
        uuid contactid PK
        string fullname \"primary name\"
    }

    account ||--o{ contact : \"account_contact\"
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_two_entity_blocks_one_edge() {
        let output = render_as(&customer_management(), DiagramFormat::Mermaid);
        assert_eq!(count_lines(&output, |l| l.ends_with(" {")), 2);
        assert_eq!(count_lines(&output, |l| l.contains("||--o{")), 1);
    }

    #[test]
    fn test_foreign_keys_and_display_names() {
        let table = Table::new("contact").with_attributes(vec![
            Attribute::new("parentcustomerid", AttributeType::Lookup)
                .with_display_name("Company \"Name\""),
            Attribute::new("birthdate", AttributeType::DateTime),
            Attribute::new("statuscode", AttributeType::Picklist).required(),
        ]);
        let output = render_as(&Schema::new("Demo", vec![table]), DiagramFormat::Mermaid);

        assert!(output.contains("        lookup parentcustomerid FK \"Company 'Name'\"\n"));
        assert!(output.contains("        datetime birthdate\n"));
        assert!(output.contains("        choice statuscode \"required\"\n"));
    }

    #[test]
    fn test_multiline_display_name_stays_on_one_line() {
        let table = Table::new("account").with_attributes(vec![
            Attribute::new("name", AttributeType::String).with_display_name("Account\r\nName"),
        ]);
        let output = render_as(&Schema::new("Demo", vec![table]), DiagramFormat::Mermaid);

        assert!(output.contains("        string name \"Account  Name\"\n"));
        assert!(!output.contains("\"Account\n"));
    }

    #[test]
    fn test_many_to_many_edge() {
        let account = account().with_relationships(vec![Relationship::many_to_many(
            "contact_account_favorites",
            "contact",
            Some("contactaccountfavorites".to_string()),
        )]);
        let contact = contact().with_relationships(vec![Relationship::many_to_many(
            "contact_account_favorites",
            "account",
            Some("contactaccountfavorites".to_string()),
        )]);
        let output = render_as(
            &Schema::new("Demo", vec![contact, account]),
            DiagramFormat::Mermaid,
        );

        assert_eq!(count_lines(&output, |l| l.contains("}o--o{")), 1);
        assert!(output.contains(
            "    account }o--o{ contact : \"contact_account_favorites via contactaccountfavorites\"\n"
        ));
    }
}

mod plantuml_tests {
    use super::*;

    #[test]
    fn test_customer_management_document() {
        let output = render_as(&customer_management(), DiagramFormat::PlantUml);
        let expected = "@startuml CustomerManagement
' Customer Management (CustomerManagement) v1.0.0.0, publisher: cm
hide circle
skinparam linetype ortho

entity \"Account\" as account {
  * accountid : Guid <<PK>>
  * name : String <<PN>>
}

entity \"Contact\" as contact {
  * contactid : Guid <<PK>>
  fullname : String <<PN>>
}

account ||--o{ contact : account_contact
@enduml
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_two_entities_one_arrow() {
        let output = render_as(&customer_management(), DiagramFormat::PlantUml);
        assert_eq!(count_lines(&output, |l| l.starts_with("entity ")), 2);
        assert_eq!(count_lines(&output, |l| l.contains("--")), 1);
    }

    #[test]
    fn test_multiline_table_display_name_stays_on_one_line() {
        let table = Table::new("account").with_display_name("Key\nAccount");
        let output = render_as(&Schema::new("Demo", vec![table]), DiagramFormat::PlantUml);

        assert!(output.contains("entity \"Key Account\" as account {\n"));
    }

    #[test]
    fn test_lookup_marked_as_foreign_key() {
        let table = Table::new("contact").with_attributes(vec![
            Attribute::new("accountid", AttributeType::Lookup),
            Attribute::new("creditlimit", AttributeType::Money),
        ]);
        let output = render_as(&Schema::new("Demo", vec![table]), DiagramFormat::PlantUml);

        assert!(output.contains("  accountid : Lookup <<FK>>\n"));
        assert!(output.contains("  creditlimit : Money\n"));
    }
}

mod graphviz_tests {
    use super::*;

    #[test]
    fn test_two_nodes_one_edge() {
        let output = render_as(&customer_management(), DiagramFormat::Graphviz);

        assert!(output.starts_with("digraph ERD {\n"));
        assert!(output.ends_with("}\n"));
        assert_eq!(count_lines(&output, |l| l.contains("[label=\"{")), 2);
        assert_eq!(count_lines(&output, |l| l.contains(" -> ")), 1);
        assert!(output.contains("    \"account\" -> \"contact\" [label=\"account_contact\""));
        assert!(output.contains("arrowtail=tee, arrowhead=crow"));
    }

    #[test]
    fn test_record_label_fields() {
        let output = render_as(&customer_management(), DiagramFormat::Graphviz);
        assert!(output.contains(
            "    \"account\" [label=\"{Account|* accountid : uniqueidentifier (PK)\\l* name : nvarchar (PN)\\l}\"];\n"
        ));
    }

    #[test]
    fn test_record_special_characters_are_escaped() {
        let table = Table::new("cm_order")
            .with_display_name("Order {Draft}")
            .with_attributes(vec![Attribute::new("total<net>", AttributeType::Decimal)]);
        let output = render_as(&Schema::new("Demo", vec![table]), DiagramFormat::Graphviz);

        assert!(output.contains("Order \\{Draft\\}|"));
        assert!(output.contains("total\\<net\\> : decimal"));
    }

    #[test]
    fn test_keyword_table_names_stay_nodes() {
        let node = Table::new("node").with_relationships(vec![Relationship::one_to_many(
            "node_edge",
            "edge",
            None,
        )]);
        let schema = Schema::new("Demo", vec![node, Table::new("edge"), Table::new("Graph")]);
        let output = render_as(&schema, DiagramFormat::Graphviz);

        assert!(output.contains("    \"node\" [label=\"{node|}\"];\n"));
        assert!(output.contains("    \"edge\" [label=\"{edge|}\"];\n"));
        assert!(output.contains("    \"Graph\" [label=\"{Graph|}\"];\n"));
        assert!(output.contains("    \"node\" -> \"edge\" [label=\"node_edge\""));
        // Only the three default-attribute lines of the header are unquoted
        assert_eq!(
            count_lines(&output, |l| l.starts_with("    node [")
                || l.starts_with("    edge [")
                || l.starts_with("    graph [")),
            3
        );
    }

    #[test]
    fn test_many_to_many_label_spans_two_lines() {
        let account = account().with_relationships(vec![Relationship::many_to_many(
            "contact_account_favorites",
            "contact",
            Some("contactaccountfavorites".to_string()),
        )]);
        let output = render_as(
            &Schema::new("Demo", vec![account, contact()]),
            DiagramFormat::Graphviz,
        );
        assert!(output.contains(
            "[label=\"contact_account_favorites\\nvia contactaccountfavorites\", dir=both, arrowtail=crow, arrowhead=crow]"
        ));
    }
}

mod shared_traversal_tests {
    use super::*;

    #[test]
    fn test_rendering_is_deterministic() {
        for format in DiagramFormat::ALL {
            let first = render_as(&customer_management(), format);
            let second = render_as(&customer_management(), format);
            assert_eq!(first, second, "{format} output differs between runs");
        }
    }

    #[test]
    fn test_table_order_does_not_change_output() {
        let forward = customer_management();
        let mut reversed = customer_management();
        reversed.tables.reverse();

        for format in DiagramFormat::ALL {
            assert_eq!(render_as(&forward, format), render_as(&reversed, format));
        }
    }

    #[test]
    fn test_mirrored_relationship_renders_once() {
        let schema = mirrored();
        assert_eq!(
            count_lines(&render_as(&schema, DiagramFormat::Mermaid), |l| l.contains("||--o{")),
            1
        );
        assert_eq!(
            count_lines(&render_as(&schema, DiagramFormat::PlantUml), |l| l.contains("||--o{")),
            1
        );
        assert_eq!(
            count_lines(&render_as(&schema, DiagramFormat::Graphviz), |l| l.contains(" -> ")),
            1
        );
    }

    #[test]
    fn test_table_without_relationships_still_rendered() {
        let schema = Schema::new("Demo", vec![account()]);
        let output = render_as(&schema, DiagramFormat::Mermaid);

        assert!(output.contains("    account {\n"));
        assert_eq!(count_lines(&output, |l| l.contains("--")), 0);
    }

    #[test]
    fn test_empty_schema_renders_valid_document() {
        let schema = Schema::new("Empty", Vec::new());

        assert_eq!(
            render_as(&schema, DiagramFormat::Mermaid),
            "erDiagram\n    %% Empty (Empty), publisher: unknown\n"
        );
        let plantuml = render_as(&schema, DiagramFormat::PlantUml);
        assert!(plantuml.starts_with("@startuml Empty\n"));
        assert!(plantuml.ends_with("@enduml\n"));
        assert!(!plantuml.contains("entity "));
        let graphviz = render_as(&schema, DiagramFormat::Graphviz);
        assert!(graphviz.ends_with("}\n"));
        assert!(!graphviz.contains("label="));
    }

    #[test]
    fn test_dangling_relationship_rendered_by_name() {
        let account = account().with_relationships(vec![Relationship::one_to_many(
            "account_cm_visit",
            "cm-visit",
            None,
        )]);
        let schema = Schema::new("Demo", vec![account]);

        let output = render_as(&schema, DiagramFormat::Mermaid);
        assert!(output.contains("    account ||--o{ cm_visit : \"account_cm_visit\"\n"));
        assert!(!output.contains("cm_visit {"));
    }

    #[test]
    fn test_identifiers_are_sanitized() {
        let table = Table::new("1st-table").with_attributes(vec![Attribute::new(
            "my field",
            AttributeType::Int,
        )]);
        let schema = Schema::new("Demo", vec![table]);

        assert!(render_as(&schema, DiagramFormat::Mermaid).contains("    _1st_table {\n        int my_field\n"));
        assert!(render_as(&schema, DiagramFormat::PlantUml).contains("as _1st_table {"));
        assert!(render_as(&schema, DiagramFormat::Graphviz).contains("    \"_1st_table\" [label="));
    }
}

mod format_config_tests {
    use super::*;

    #[test]
    fn test_attributes_can_be_left_out() {
        let config = FormatConfig::new(DiagramFormat::Mermaid).with_attributes(false);
        let output = render(&customer_management(), &config);

        assert!(output.contains("\n    account\n"));
        assert!(output.contains("\n    contact\n"));
        assert!(!output.contains("accountid"));
        assert_eq!(count_lines(&output, |l| l.contains("||--o{")), 1);
    }

    #[test]
    fn test_relationships_can_be_left_out() {
        for format in DiagramFormat::ALL {
            let config = FormatConfig::new(format).with_relationships(false);
            let output = render(&customer_management(), &config);
            assert!(!output.contains("account_contact"), "{format} still has the edge");
        }
    }

    #[test]
    fn test_max_attributes_truncates_in_source_order() {
        let config = FormatConfig::new(DiagramFormat::PlantUml).with_max_attributes(1);
        let output = render(&customer_management(), &config);

        assert!(output.contains("  * accountid : Guid <<PK>>\n"));
        assert!(!output.contains("name : String"));
        assert!(output.contains("  * contactid : Guid <<PK>>\n"));
        assert!(!output.contains("fullname"));
    }

    #[test]
    fn test_exporter_suggests_file_name() {
        let exporter = DiagramExporter::new(FormatConfig::new(DiagramFormat::Graphviz));
        let result = exporter.export(&customer_management());

        assert_eq!(result.format, DiagramFormat::Graphviz);
        assert_eq!(result.file_name, "CustomerManagement.dot");
        assert_eq!(result.content, exporter.render(&customer_management()));
    }
}
