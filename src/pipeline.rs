//! End-to-end diagram generation: catalog rows in, PlantUML text out.

use crate::catalog::{build_schema, CatalogSnapshot, CatalogSource, SchemaScope};
use crate::config::RenderOptions;
use crate::filter::{filter_tables, FilterWarning};
use crate::model::Schema;
use crate::render::{render, DiagramStyle};
use crate::resolve::{resolve, ResolvedRelationship};
use chrono::{DateTime, Utc};

/// Counts reported after generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagramStats {
    pub tables: usize,
    pub columns: usize,
    pub relationships: usize,
}

/// Filtered model plus its resolved edges
#[derive(Debug)]
pub struct Model {
    pub schema: Schema,
    pub relationships: Vec<ResolvedRelationship>,
    pub warnings: Vec<FilterWarning>,
}

/// Generated diagram text with its warnings and stats
#[derive(Debug)]
pub struct Generated {
    pub text: String,
    pub warnings: Vec<FilterWarning>,
    pub stats: DiagramStats,
}

/// Filter scoped catalog rows, assemble the model and resolve edges.
///
/// `snapshot` tables must already be restricted to the schema scope and
/// sorted in catalog order (see [`CatalogSnapshot::scoped`]).
pub fn build_model(
    snapshot: CatalogSnapshot,
    options: &RenderOptions,
    generated_at: DateTime<Utc>,
) -> Model {
    let outcome = filter_tables(snapshot.tables, options);

    let schema = build_schema(
        &snapshot.database,
        outcome.tables,
        &snapshot.columns,
        &snapshot.indexes,
        &snapshot.foreign_keys,
        generated_at,
    );
    let relationships = resolve(&schema.relationships, &schema.tables, &options.default_schema);

    Model {
        schema,
        relationships,
        warnings: outcome.warnings,
    }
}

/// Render an already scoped snapshot
pub fn generate_from_snapshot(
    snapshot: CatalogSnapshot,
    options: &RenderOptions,
    style: DiagramStyle,
    generated_at: DateTime<Utc>,
) -> Generated {
    let model = build_model(snapshot, options, generated_at);
    let text = render(&model.schema, &model.relationships, options, style);

    let stats = DiagramStats {
        tables: model.schema.table_count(),
        columns: model.schema.column_count(),
        relationships: if options.include_relationships {
            model.relationships.len()
        } else {
            0
        },
    };

    Generated {
        text,
        warnings: model.warnings,
        stats,
    }
}

/// Load rows from a catalog source and render them
pub fn generate(
    source: &dyn CatalogSource,
    options: &RenderOptions,
    style: DiagramStyle,
    generated_at: DateTime<Utc>,
) -> anyhow::Result<Generated> {
    let snapshot = source.load(&SchemaScope::from_options(options))?;
    Ok(generate_from_snapshot(snapshot, options, style, generated_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnRow, ForeignKeyRow, TableRow};

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot {
            database: "Shop".to_string(),
            tables: vec![
                TableRow::new("dbo", "Customer"),
                TableRow::new("dbo", "Order"),
                TableRow::new("sys", "objects"),
            ],
            columns: vec![
                ColumnRow {
                    schema: "dbo".to_string(),
                    table: "Customer".to_string(),
                    name: "Id".to_string(),
                    data_type: "int".to_string(),
                    is_primary_key: true,
                    ordinal_position: 1,
                    ..Default::default()
                },
                ColumnRow {
                    schema: "dbo".to_string(),
                    table: "Order".to_string(),
                    name: "CustomerId".to_string(),
                    data_type: "int".to_string(),
                    nullable: true,
                    ordinal_position: 2,
                    ..Default::default()
                },
            ],
            indexes: vec![],
            foreign_keys: vec![ForeignKeyRow {
                constraint_name: "FK_Order_Customer".to_string(),
                source_schema: "dbo".to_string(),
                source_table: "Order".to_string(),
                source_column: "CustomerId".to_string(),
                target_schema: "dbo".to_string(),
                target_table: "Customer".to_string(),
                target_column: "Id".to_string(),
            }],
        }
    }

    #[test]
    fn test_generate_applies_schema_scope() {
        let options = RenderOptions::default();
        let generated = generate(
            &snapshot(),
            &options,
            DiagramStyle::EntityRelationship,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(generated.stats.tables, 2);
        assert_eq!(generated.stats.columns, 2);
        assert_eq!(generated.stats.relationships, 1);
        assert!(!generated.text.contains("objects"));
        assert!(generated.text.contains("Customer ||--o{ Order : Id\n"));
    }

    #[test]
    fn test_filtered_target_drops_edge() {
        let options = RenderOptions {
            exclude_tables: vec!["cust*".to_string()],
            ..Default::default()
        };
        let model = build_model(
            snapshot().scoped(&SchemaScope::from_options(&options)),
            &options,
            Utc::now(),
        );

        assert_eq!(model.schema.table_count(), 1);
        assert!(model.relationships.is_empty());
    }
}
