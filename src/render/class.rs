//! PlantUML class diagram format output.

use super::{format_data_type, write_header};
use crate::config::RenderOptions;
use crate::model::Schema;
use crate::resolve::ResolvedRelationship;

/// Generate a PlantUML class diagram
pub fn to_class_diagram(
    schema: &Schema,
    relationships: &[ResolvedRelationship],
    options: &RenderOptions,
) -> String {
    let mut output = String::new();

    write_header(&mut output, schema, options);

    for table in schema.sorted_tables() {
        output.push_str(&format!(
            "class {} {{\n",
            table.entity_name(&options.default_schema)
        ));

        for col in table.columns_by_ordinal() {
            let visibility = if col.is_primary_key { '+' } else { '-' };
            if options.include_data_types {
                output.push_str(&format!(
                    "  {}{} : {}\n",
                    visibility,
                    col.name,
                    format_data_type(col)
                ));
            } else {
                output.push_str(&format!("  {}{}\n", visibility, col.name));
            }
        }

        output.push_str("}\n");
        output.push('\n');
    }

    if options.include_relationships {
        for rel in relationships {
            output.push_str(&format!("{} --> {}\n", rel.source_entity, rel.target_entity));
        }
    }

    output.push_str("@enduml\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, ColumnRef, Relationship, Table};
    use crate::resolve::{Cardinality, Optionality};
    use chrono::Utc;

    fn schema() -> Schema {
        let mut product = Table::new("sales", "Product");
        product.columns = vec![
            Column {
                name: "Price".to_string(),
                data_type: "money".to_string(),
                ordinal_position: 2,
                ..Default::default()
            },
            Column {
                name: "Id".to_string(),
                data_type: "int".to_string(),
                ordinal_position: 1,
                is_primary_key: true,
                ..Default::default()
            },
        ];
        let mut schema = Schema::new("Shop", Utc::now());
        schema.tables.push(product);
        schema
    }

    fn edge() -> ResolvedRelationship {
        ResolvedRelationship {
            relationship: Relationship {
                constraint_name: "FK_Product_Category".to_string(),
                source: ColumnRef::new("sales", "Product", "CategoryId"),
                target: ColumnRef::new("dbo", "Category", "Id"),
            },
            source_entity: "sales.Product".to_string(),
            target_entity: "Category".to_string(),
            cardinality: Cardinality::OneToMany,
            optionality: Optionality::Optional,
        }
    }

    #[test]
    fn test_class_block() {
        let output = to_class_diagram(&schema(), &[edge()], &RenderOptions::default());

        assert!(output.contains("class sales.Product {\n  +Id : INT\n  -Price : MONEY\n}\n"));
        assert!(output.ends_with("}\n\nsales.Product --> Category\n@enduml\n"));
        assert!(!output.contains("skinparam"));
    }

    #[test]
    fn test_without_types_or_relationships() {
        let options = RenderOptions {
            include_data_types: false,
            include_relationships: false,
            ..Default::default()
        };
        let output = to_class_diagram(&schema(), &[edge()], &options);

        assert!(output.contains("  +Id\n  -Price\n"));
        assert!(!output.contains("-->"));
    }
}
