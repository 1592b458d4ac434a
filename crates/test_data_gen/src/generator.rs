//! Catalog snapshot generator.
//!
//! Produces deterministic, FK-consistent snapshots at various scales. Every
//! table has an `Id` identity primary key; child tables reference earlier
//! tables so the relationship graph is acyclic.

use crate::fake::FakeData;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};

/// Generation scale presets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// 20 tables
    Small,
    /// 200 tables
    Medium,
    /// 2,000 tables
    Large,
}

impl Scale {
    pub fn tables(&self) -> usize {
        match self {
            Scale::Small => 20,
            Scale::Medium => 200,
            Scale::Large => 2000,
        }
    }

    pub fn max_columns(&self) -> usize {
        match self {
            Scale::Small => 8,
            Scale::Medium => 15,
            Scale::Large => 25,
        }
    }
}

impl std::str::FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" | "s" => Ok(Scale::Small),
            "medium" | "m" => Ok(Scale::Medium),
            "large" | "l" => Ok(Scale::Large),
            _ => Err(format!(
                "Unknown scale: {}. Use small, medium, or large",
                s
            )),
        }
    }
}

/// Snapshot generator
pub struct Generator {
    fake: FakeData<ChaCha8Rng>,
    scale: Scale,
}

struct TableInfo {
    schema: &'static str,
    name: String,
}

impl Generator {
    pub fn new(seed: u64, scale: Scale) -> Self {
        Self {
            fake: FakeData::new(ChaCha8Rng::seed_from_u64(seed)),
            scale,
        }
    }

    /// Generate one snapshot document
    pub fn generate(&mut self) -> Value {
        let mut tables = Vec::new();
        let mut columns = Vec::new();
        let mut indexes = Vec::new();
        let mut foreign_keys = Vec::new();
        let mut infos: Vec<TableInfo> = Vec::new();

        for i in 0..self.scale.tables() {
            let info = TableInfo {
                schema: self.fake.schema(),
                name: self.fake.table_name(i),
            };

            let mut table = json!({ "schema": info.schema, "name": info.name });
            if self.fake.boolean(0.3) {
                table["description"] = json!(self.fake.description());
            }
            tables.push(table);

            columns.push(json!({
                "schema": info.schema,
                "table": info.name,
                "name": "Id",
                "dataType": "int",
                "isPrimaryKey": true,
                "isIdentity": true,
                "ordinalPosition": 1,
            }));
            indexes.push(json!({
                "schema": info.schema,
                "table": info.name,
                "name": format!("PK_{}", info.name),
                "typeLabel": "CLUSTERED",
                "isUnique": true,
                "isPrimaryKey": true,
                "columns": ["Id"],
            }));

            let mut ordinal = 2;

            // References to earlier tables
            if !infos.is_empty() && self.fake.boolean(0.7) {
                let refs = self.fake.int_range(1, 2.min(infos.len()));
                for r in 0..refs {
                    let parent = &infos[self.fake.int_range(0, infos.len() - 1)];
                    let column = format!("{}Id{}", parent.name, r + 1);
                    let nullable = self.fake.boolean(0.4);

                    columns.push(json!({
                        "schema": info.schema,
                        "table": info.name,
                        "name": column,
                        "dataType": "int",
                        "nullable": nullable,
                        "isForeignKey": true,
                        "referencedSchema": parent.schema,
                        "referencedTable": parent.name,
                        "referencedColumn": "Id",
                        "ordinalPosition": ordinal,
                    }));
                    foreign_keys.push(json!({
                        "constraintName": format!("FK_{}_{}_{}", info.name, parent.name, r + 1),
                        "sourceSchema": info.schema,
                        "sourceTable": info.name,
                        "sourceColumn": column,
                        "targetSchema": parent.schema,
                        "targetTable": parent.name,
                        "targetColumn": "Id",
                    }));

                    // A unique index makes the edge one-to-one
                    let unique = self.fake.boolean(0.15);
                    indexes.push(json!({
                        "schema": info.schema,
                        "table": info.name,
                        "name": format!("{}_{}_{}", if unique { "UX" } else { "IX" }, info.name, column),
                        "typeLabel": "NONCLUSTERED",
                        "isUnique": unique,
                        "isPrimaryKey": false,
                        "columns": [column],
                    }));
                    ordinal += 1;
                }
            }

            let extra = self.fake.int_range(1, self.scale.max_columns());
            for _ in 0..extra {
                let ty = self.fake.column_type();
                let mut column = json!({
                    "schema": info.schema,
                    "table": info.name,
                    "name": self.fake.column_name(ordinal as usize),
                    "dataType": ty.data_type,
                    "nullable": self.fake.boolean(0.5),
                    "ordinalPosition": ordinal,
                });
                if let Some(len) = ty.max_length {
                    column["maxLength"] = json!(len);
                }
                if let Some(p) = ty.numeric_precision {
                    column["numericPrecision"] = json!(p);
                }
                if let Some(s) = ty.numeric_scale {
                    column["numericScale"] = json!(s);
                }
                if self.fake.boolean(0.2) {
                    column["description"] = json!(self.fake.description());
                }
                columns.push(column);
                ordinal += 1;
            }

            infos.push(info);
        }

        // Noise the filters are expected to remove
        tables.push(json!({ "schema": "dbo", "name": "__EFMigrationsHistory" }));
        tables.push(json!({ "schema": "dbo", "name": "vActiveCustomers", "kind": "VIEW" }));
        tables.push(json!({ "schema": "sys", "name": "objects" }));

        json!({
            "database": "Generated",
            "tables": tables,
            "columns": columns,
            "indexes": indexes,
            "foreignKeys": foreign_keys,
        })
    }
}
