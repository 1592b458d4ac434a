//! Assembles catalog rows into the schema model.

use super::rows::{ColumnRow, ForeignKeyRow, IndexRow, TableRow};
use crate::model::{
    ident_cmp, ident_eq, ident_fold, Column, ColumnRef, Index, Relationship, Schema, Table,
};
use ahash::AHashMap;
use chrono::{DateTime, Utc};

fn table_key(schema: &str, name: &str) -> (String, String) {
    (ident_fold(schema), ident_fold(name))
}

fn to_column(row: &ColumnRow) -> Column {
    let references = match (&row.referenced_table, &row.referenced_column) {
        (Some(table), Some(column)) if row.is_foreign_key => Some(ColumnRef::new(
            row.referenced_schema
                .clone()
                .unwrap_or_else(|| row.schema.clone()),
            table.clone(),
            column.clone(),
        )),
        _ => None,
    };

    Column {
        name: row.name.clone(),
        data_type: row.data_type.clone(),
        max_length: row.max_length,
        precision: row.precision,
        scale: row.scale,
        numeric_precision: row.numeric_precision,
        numeric_scale: row.numeric_scale,
        is_nullable: row.nullable,
        is_primary_key: row.is_primary_key,
        is_identity: row.is_identity,
        ordinal_position: row.ordinal_position,
        references,
        description: row.description.clone(),
    }
}

fn to_index(row: &IndexRow) -> Index {
    Index {
        name: row.name.clone(),
        type_label: row.type_label.clone(),
        is_unique: row.is_unique,
        is_primary_key: row.is_primary_key,
        columns: row.columns.clone(),
    }
}

/// Convert foreign-key rows into model relationships, keeping input order
pub fn collect_relationships(rows: &[ForeignKeyRow]) -> Vec<Relationship> {
    rows.iter()
        .map(|fk| Relationship {
            constraint_name: fk.constraint_name.clone(),
            source: ColumnRef::new(&fk.source_schema, &fk.source_table, &fk.source_column),
            target: ColumnRef::new(&fk.target_schema, &fk.target_table, &fk.target_column),
        })
        .collect()
}

/// Build the schema model from already-filtered tables.
///
/// Columns and indexes are attached to their table by case-insensitive
/// (schema, name); rows for tables that did not survive filtering are
/// discarded, as are constraints with an endpoint outside the model.
/// Column-level references with no matching foreign-key row become
/// relationships of their own, after the foreign-key rows.
/// Table order is preserved, indexes are sorted by name.
pub fn build_schema(
    database_name: &str,
    tables: Vec<TableRow>,
    columns: &[ColumnRow],
    indexes: &[IndexRow],
    foreign_keys: &[ForeignKeyRow],
    generated_at: DateTime<Utc>,
) -> Schema {
    let mut schema = Schema::new(database_name, generated_at);
    let mut positions: AHashMap<(String, String), usize> = AHashMap::new();

    for row in tables {
        positions.insert(table_key(&row.schema, &row.name), schema.tables.len());
        let mut table = Table::new(row.schema, row.name);
        table.kind = row.kind;
        table.description = row.description;
        schema.tables.push(table);
    }

    for row in columns {
        if let Some(&pos) = positions.get(&table_key(&row.schema, &row.table)) {
            schema.tables[pos].columns.push(to_column(row));
        }
    }

    for row in indexes {
        if let Some(&pos) = positions.get(&table_key(&row.schema, &row.table)) {
            schema.tables[pos].indexes.push(to_index(row));
        }
    }

    for table in &mut schema.tables {
        table.indexes.sort_by(|a, b| ident_cmp(&a.name, &b.name));
    }

    let mut relationships = collect_relationships(foreign_keys);
    for table in &schema.tables {
        for column in &table.columns {
            if let Some(target) = &column.references {
                let covered = relationships.iter().any(|r| {
                    ident_eq(&r.source.schema, &table.schema)
                        && ident_eq(&r.source.table, &table.name)
                        && ident_eq(&r.source.column, &column.name)
                });
                if !covered {
                    relationships.push(Relationship {
                        constraint_name: format!("FK_{}_{}", table.name, column.name),
                        source: ColumnRef::new(&table.schema, &table.name, &column.name),
                        target: target.clone(),
                    });
                }
            }
        }
    }

    schema.relationships = relationships
        .into_iter()
        .filter(|r| {
            positions.contains_key(&table_key(&r.source.schema, &r.source.table))
                && positions.contains_key(&table_key(&r.target.schema, &r.target.table))
        })
        .collect();

    tracing::debug!(
        tables = schema.table_count(),
        columns = schema.column_count(),
        relationships = schema.relationships.len(),
        "built schema model"
    );
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(schema: &str, table: &str, name: &str, ordinal: i32) -> ColumnRow {
        ColumnRow {
            schema: schema.to_string(),
            table: table.to_string(),
            name: name.to_string(),
            data_type: "int".to_string(),
            ordinal_position: ordinal,
            ..Default::default()
        }
    }

    #[test]
    fn test_columns_attach_case_insensitively() {
        let schema = build_schema(
            "Shop",
            vec![TableRow::new("dbo", "Customer")],
            &[
                column("DBO", "customer", "Id", 1),
                column("dbo", "Customer", "Name", 2),
                column("dbo", "Dropped", "Id", 1),
            ],
            &[],
            &[],
            Utc::now(),
        );

        assert_eq!(schema.table_count(), 1);
        assert_eq!(schema.column_count(), 2);
        assert_eq!(schema.database_name, "Shop");
    }

    #[test]
    fn test_indexes_sorted_by_name() {
        let idx = |name: &str| IndexRow {
            schema: "dbo".to_string(),
            table: "T".to_string(),
            name: name.to_string(),
            columns: vec!["A".to_string()],
            ..Default::default()
        };
        let schema = build_schema(
            "db",
            vec![TableRow::new("dbo", "T")],
            &[],
            &[idx("IX_b"), idx("IX_a")],
            &[],
            Utc::now(),
        );

        let names: Vec<_> = schema.tables[0]
            .indexes
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["IX_a", "IX_b"]);
    }

    #[test]
    fn test_relationships_need_both_endpoints() {
        let fk = |name: &str, target: &str| ForeignKeyRow {
            constraint_name: name.to_string(),
            source_schema: "dbo".to_string(),
            source_table: "Order".to_string(),
            source_column: "CustomerId".to_string(),
            target_schema: "dbo".to_string(),
            target_table: target.to_string(),
            target_column: "Id".to_string(),
        };
        let schema = build_schema(
            "Shop",
            vec![TableRow::new("dbo", "Order"), TableRow::new("dbo", "Customer")],
            &[],
            &[],
            &[fk("FK_Order_Customer", "CUSTOMER"), fk("FK_Order_Shipper", "Shipper")],
            Utc::now(),
        );

        assert_eq!(schema.relationships.len(), 1);
        assert_eq!(schema.relationships[0].constraint_name, "FK_Order_Customer");
    }

    #[test]
    fn test_column_references_fill_missing_constraints() {
        let mut customer_ref = column("dbo", "Order", "CustomerId", 2);
        customer_ref.is_foreign_key = true;
        customer_ref.referenced_table = Some("Customer".to_string());
        customer_ref.referenced_column = Some("Id".to_string());
        let mut covered = column("dbo", "Order", "ShipperId", 3);
        covered.is_foreign_key = true;
        covered.referenced_table = Some("Shipper".to_string());
        covered.referenced_column = Some("Id".to_string());

        let shipper_fk = ForeignKeyRow {
            constraint_name: "FK_Order_Shipper".to_string(),
            source_schema: "dbo".to_string(),
            source_table: "Order".to_string(),
            source_column: "shipperid".to_string(),
            target_schema: "dbo".to_string(),
            target_table: "Shipper".to_string(),
            target_column: "Id".to_string(),
        };
        let schema = build_schema(
            "Shop",
            vec![
                TableRow::new("dbo", "Customer"),
                TableRow::new("dbo", "Order"),
                TableRow::new("dbo", "Shipper"),
            ],
            &[customer_ref, covered],
            &[],
            &[shipper_fk],
            Utc::now(),
        );

        let names: Vec<_> = schema
            .relationships
            .iter()
            .map(|r| r.constraint_name.as_str())
            .collect();
        assert_eq!(names, vec!["FK_Order_Shipper", "FK_Order_CustomerId"]);
        assert_eq!(schema.relationships[1].target.table, "Customer");
    }

    #[test]
    fn test_non_ascii_names_attach_case_insensitively() {
        let mut row = column("DBO", "ärzte", "Id", 1);
        row.is_primary_key = true;
        let schema = build_schema(
            "Klinik",
            vec![TableRow::new("dbo", "Ärzte")],
            &[row],
            &[],
            &[],
            Utc::now(),
        );
        assert_eq!(schema.column_count(), 1);
    }

    #[test]
    fn test_foreign_key_reference_on_column() {
        let mut row = column("dbo", "Order", "CustomerId", 2);
        row.is_foreign_key = true;
        row.referenced_table = Some("Customer".to_string());
        row.referenced_column = Some("Id".to_string());

        let col = to_column(&row);
        let target = col.references.unwrap();
        assert_eq!(target.schema, "dbo");
        assert_eq!(target.table, "Customer");
    }
}
