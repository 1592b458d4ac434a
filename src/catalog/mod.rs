//! Catalog rows and the sources that provide them.
//!
//! This module provides:
//! - Plain row types for tables, columns, indexes and foreign keys
//! - Catalog snapshots read from JSON/YAML files (optionally compressed)
//! - Schema-level allow/deny filtering, applied before name filters
//! - Assembly of rows into the [`Schema`](crate::model::Schema) model

mod builder;
mod compression;
mod rows;

pub use builder::{build_schema, collect_relationships};
pub use compression::Compression;
pub use rows::{ColumnRow, ForeignKeyRow, IndexRow, TableRow};

use crate::config::RenderOptions;
use crate::model::{ident_cmp, ident_eq, BASE_TABLE};
use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Everything the catalog reports for one database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub database: String,
    pub tables: Vec<TableRow>,
    pub columns: Vec<ColumnRow>,
    pub indexes: Vec<IndexRow>,
    pub foreign_keys: Vec<ForeignKeyRow>,
}

impl CatalogSnapshot {
    /// Restrict tables to base tables in scope, sorted by (schema, name)
    pub fn scoped(mut self, scope: &SchemaScope) -> Self {
        self.tables
            .retain(|t| ident_eq(&t.kind, BASE_TABLE) && scope.contains(&t.schema));
        self.tables.sort_by(|a, b| {
            ident_cmp(&a.schema, &b.schema).then_with(|| ident_cmp(&a.name, &b.name))
        });
        self
    }
}

/// Schema allow/deny lists
#[derive(Debug, Clone, Default)]
pub struct SchemaScope {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl SchemaScope {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    pub fn from_options(options: &RenderOptions) -> Self {
        Self::new(
            options.include_schemas.clone(),
            options.exclude_schemas.clone(),
        )
    }

    /// Check a schema name against both lists (case-insensitive)
    pub fn contains(&self, schema: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|s| ident_eq(s, schema)) {
            return false;
        }
        !self.exclude.iter().any(|s| ident_eq(s, schema))
    }
}

/// Something that can produce catalog rows for a schema scope
pub trait CatalogSource {
    /// Load rows, keeping only base tables whose schema is in scope.
    /// Tables come back sorted by (schema, name).
    fn load(&self, scope: &SchemaScope) -> anyhow::Result<CatalogSnapshot>;
}

impl CatalogSource for CatalogSnapshot {
    fn load(&self, scope: &SchemaScope) -> anyhow::Result<CatalogSnapshot> {
        Ok(self.clone().scoped(scope))
    }
}

/// Serialization format of a snapshot file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Detect the format from a (decompressed) file name; JSON by default
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("yaml" | "yml") => SnapshotFormat::Yaml,
            _ => SnapshotFormat::Json,
        }
    }
}

/// A catalog snapshot stored on disk
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole snapshot
    pub fn read(&self) -> anyhow::Result<CatalogSnapshot> {
        let compression = Compression::from_path(&self.path);
        let format = SnapshotFormat::from_path(&compression.strip_extension(&self.path));

        let file = File::open(&self.path)
            .with_context(|| format!("failed to open catalog snapshot: {}", self.path.display()))?;
        let mut reader = compression.wrap_reader(Box::new(file))?;
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .with_context(|| format!("failed to read catalog snapshot: {}", self.path.display()))?;

        let snapshot: CatalogSnapshot = match format {
            SnapshotFormat::Json => serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON snapshot: {}", self.path.display()))?,
            SnapshotFormat::Yaml => serde_yaml_ng::from_str(&content)
                .with_context(|| format!("invalid YAML snapshot: {}", self.path.display()))?,
        };

        tracing::info!(
            path = %self.path.display(),
            %compression,
            tables = snapshot.tables.len(),
            columns = snapshot.columns.len(),
            foreign_keys = snapshot.foreign_keys.len(),
            "loaded catalog snapshot"
        );
        Ok(snapshot)
    }
}

impl CatalogSource for SnapshotFile {
    fn load(&self, scope: &SchemaScope) -> anyhow::Result<CatalogSnapshot> {
        Ok(self.read()?.scoped(scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_include_and_exclude() {
        let scope = SchemaScope::new(vec!["dbo".into(), "Sales".into()], vec!["sales".into()]);
        assert!(scope.contains("DBO"));
        assert!(!scope.contains("sales")); // deny wins
        assert!(!scope.contains("hr"));

        let defaults = SchemaScope::from_options(&RenderOptions::default());
        assert!(defaults.contains("dbo"));
        assert!(!defaults.contains("sys"));
        assert!(!defaults.contains("information_schema"));
    }

    #[test]
    fn test_scoped_drops_views_and_sorts() {
        let mut view = TableRow::new("dbo", "vActiveUsers");
        view.kind = "VIEW".to_string();

        let snapshot = CatalogSnapshot {
            database: "Shop".to_string(),
            tables: vec![
                TableRow::new("sales", "Orders"),
                TableRow::new("dbo", "Users"),
                view,
                TableRow::new("sys", "objects"),
                TableRow::new("dbo", "accounts"),
            ],
            ..Default::default()
        };

        let scoped = snapshot
            .load(&SchemaScope::from_options(&RenderOptions::default()))
            .unwrap();
        let names: Vec<_> = scoped
            .tables
            .iter()
            .map(|t| format!("{}.{}", t.schema, t.name))
            .collect();
        assert_eq!(names, vec!["dbo.accounts", "dbo.Users", "sales.Orders"]);
    }

    #[test]
    fn test_snapshot_format() {
        assert_eq!(
            SnapshotFormat::from_path(Path::new("c.YML")),
            SnapshotFormat::Yaml
        );
        assert_eq!(
            SnapshotFormat::from_path(Path::new("c.json")),
            SnapshotFormat::Json
        );
    }
}
