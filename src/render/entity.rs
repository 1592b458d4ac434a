//! PlantUML entity-relationship format output.

use super::{format_data_type, single_line, write_header};
use crate::config::RenderOptions;
use crate::model::{Column, Schema, Table};
use crate::resolve::ResolvedRelationship;

const SKIN_PARAMS: &str = "skinparam linetype ortho
skinparam roundcorner 5
skinparam class {
    BackgroundColor LightBlue
    BorderColor DarkBlue
    ArrowColor DarkBlue
}

";

/// Generate a PlantUML entity-relationship diagram
pub fn to_entity_diagram(
    schema: &Schema,
    relationships: &[ResolvedRelationship],
    options: &RenderOptions,
) -> String {
    let mut output = String::new();

    write_header(&mut output, schema, options);
    output.push_str(SKIN_PARAMS);

    for table in schema.sorted_tables() {
        write_entity(&mut output, table, options);
    }

    if options.include_relationships {
        output.push('\n');
        output.push_str("' Relationships\n");
        for rel in relationships {
            output.push_str(&format!(
                "{} {} {} : {}\n",
                rel.target_entity,
                rel.cardinality.as_plantuml(rel.optionality),
                rel.source_entity,
                rel.label()
            ));
        }
    }

    output.push('\n');
    output.push_str("@enduml\n");
    output
}

fn write_entity(output: &mut String, table: &Table, options: &RenderOptions) {
    output.push_str(&format!(
        "entity \"{}\" {{\n",
        table.entity_name(&options.default_schema)
    ));

    if options.include_descriptions {
        if let Some(desc) = table.description.as_deref().filter(|d| !d.is_empty()) {
            output.push_str(&format!("  ' {}\n", single_line(desc)));
        }
    }

    let keys = table.key_columns();
    let others = table.non_key_columns();

    for col in &keys {
        output.push_str(&format!("  * {}\n", column_line(col, options)));
    }

    if !keys.is_empty() && !others.is_empty() {
        output.push_str("  --\n");
    }

    for col in &others {
        output.push_str(&format!("  {}\n", column_line(col, options)));
    }

    if options.include_indexes && table.indexes.iter().any(|i| !i.is_primary_key) {
        output.push_str("  --\n");
        output.push_str("  ' Indexes:\n");
        for index in table.indexes.iter().filter(|i| !i.is_primary_key) {
            let kind = if index.is_unique { "UNIQUE" } else { "INDEX" };
            output.push_str(&format!("  ' {}: {}\n", kind, index.columns.join(", ")));
        }
    }

    output.push_str("}\n");
    output.push('\n');
}

/// Column name, type, constraint tags and description
fn column_line(column: &Column, options: &RenderOptions) -> String {
    let mut line = column.name.clone();

    if options.include_data_types {
        line.push_str(" : ");
        line.push_str(&format_data_type(column));
    }

    if !column.is_nullable && !column.is_primary_key {
        line.push_str(" <<NOT NULL>>");
    }

    if column.is_identity {
        line.push_str(" <<IDENTITY>>");
    }

    if options.include_descriptions {
        if let Some(desc) = column.description.as_deref().filter(|d| !d.is_empty()) {
            line.push_str(&format!(" ' {}", single_line(desc)));
        }
    }

    line
}
