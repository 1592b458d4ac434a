//! In-memory schema model for diagram generation.
//!
//! This module provides:
//! - Tables, columns and indexes assembled from catalog rows
//! - Raw foreign-key relationships between tables
//! - Entity naming shared by relationship resolution and rendering
//!
//! Values are built once by the catalog layer and treated as read-only
//! afterwards.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// Schema that renders without a qualifier (SQL Server's `dbo`)
pub const DEFAULT_SCHEMA: &str = "dbo";

/// Table kind reported by the catalog for ordinary tables
pub const BASE_TABLE: &str = "BASE TABLE";

/// Case folding shared by every identifier comparison and lookup key
pub fn ident_fold(name: &str) -> String {
    name.to_lowercase()
}

/// Case-insensitive identifier comparison used for all catalog lookups
pub fn ident_eq(a: &str, b: &str) -> bool {
    a == b || ident_fold(a) == ident_fold(b)
}

/// Total order over identifiers: case-insensitive first, then byte order
pub fn ident_cmp(a: &str, b: &str) -> Ordering {
    ident_fold(a)
        .cmp(&ident_fold(b))
        .then_with(|| a.cmp(b))
}

/// Rendered entity name for a table.
///
/// Tables in the default schema render bare, everything else is
/// schema-qualified. Relationship deduplication keys off this value, so
/// every component must go through this function.
pub fn entity_name(schema: &str, table: &str, default_schema: &str) -> String {
    if ident_eq(schema, default_schema) {
        table.to_string()
    } else {
        format!("{}.{}", schema, table)
    }
}

/// A (schema, table, column) triple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub schema: String,
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(
        schema: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.schema, self.table, self.column)
    }
}

/// Column definition within a table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Declared type name as reported by the catalog (e.g. `nvarchar`)
    pub data_type: String,
    /// Character length; -1 means MAX
    pub max_length: Option<i32>,
    /// Generic precision
    pub precision: Option<i32>,
    /// Generic scale
    pub scale: Option<i32>,
    /// Numeric-specific precision, preferred over `precision`
    pub numeric_precision: Option<i32>,
    /// Numeric-specific scale, preferred over `scale`
    pub numeric_scale: Option<i32>,
    pub is_nullable: bool,
    pub is_primary_key: bool,
    pub is_identity: bool,
    /// 1-based position in the table
    pub ordinal_position: i32,
    /// Referenced column when this column is part of a foreign key
    pub references: Option<ColumnRef>,
    pub description: Option<String>,
}

/// Index definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    /// Index name
    pub name: String,
    /// Catalog type label (CLUSTERED, NONCLUSTERED, ...)
    pub type_label: String,
    pub is_unique: bool,
    pub is_primary_key: bool,
    /// Member columns in key order
    pub columns: Vec<String>,
}

impl Index {
    /// True for a unique, non-PK index whose only member is `column`
    pub fn is_unique_on(&self, column: &str) -> bool {
        self.is_unique
            && !self.is_primary_key
            && self.columns.len() == 1
            && ident_eq(&self.columns[0], column)
    }
}

/// A table and everything attached to it
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub schema: String,
    pub name: String,
    pub kind: String,
    /// Columns in catalog order
    pub columns: Vec<Column>,
    /// Indexes sorted by name
    pub indexes: Vec<Index>,
    pub description: Option<String>,
}

impl Table {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            kind: BASE_TABLE.to_string(),
            columns: Vec::new(),
            indexes: Vec::new(),
            description: None,
        }
    }

    /// Identity check on (schema, name), case-insensitive
    pub fn is(&self, schema: &str, name: &str) -> bool {
        ident_eq(&self.schema, schema) && ident_eq(&self.name, name)
    }

    pub fn entity_name(&self, default_schema: &str) -> String {
        entity_name(&self.schema, &self.name, default_schema)
    }

    /// Get a column by name (case-insensitive)
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| ident_eq(&c.name, name))
    }

    /// All columns ordered by ordinal position
    pub fn columns_by_ordinal(&self) -> Vec<&Column> {
        let mut cols: Vec<&Column> = self.columns.iter().collect();
        cols.sort_by(|a, b| {
            a.ordinal_position
                .cmp(&b.ordinal_position)
                .then_with(|| ident_cmp(&a.name, &b.name))
        });
        cols
    }

    /// Primary-key columns ordered by ordinal position
    pub fn key_columns(&self) -> Vec<&Column> {
        self.columns_by_ordinal()
            .into_iter()
            .filter(|c| c.is_primary_key)
            .collect()
    }

    /// Non-key columns ordered by ordinal position
    pub fn non_key_columns(&self) -> Vec<&Column> {
        self.columns_by_ordinal()
            .into_iter()
            .filter(|c| !c.is_primary_key)
            .collect()
    }

    /// Catalog display order: schema, then name
    pub fn display_cmp(&self, other: &Table) -> Ordering {
        ident_cmp(&self.schema, &other.schema).then_with(|| ident_cmp(&self.name, &other.name))
    }
}

/// A foreign-key constraint between two columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub constraint_name: String,
    /// Referencing (child) column
    pub source: ColumnRef,
    /// Referenced (parent) column
    pub target: ColumnRef,
}

/// The filtered database model
#[derive(Debug, Clone)]
pub struct Schema {
    pub database_name: String,
    /// Tables in catalog order
    pub tables: Vec<Table>,
    /// Foreign-key constraints whose endpoints are both in the model
    pub relationships: Vec<Relationship>,
    pub generated_at: DateTime<Utc>,
}

impl Schema {
    pub fn new(database_name: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            database_name: database_name.into(),
            tables: Vec::new(),
            relationships: Vec::new(),
            generated_at,
        }
    }

    /// Find a table by schema and name (case-insensitive)
    pub fn table(&self, schema: &str, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.is(schema, name))
    }

    /// Tables sorted by (schema, name)
    pub fn sorted_tables(&self) -> Vec<&Table> {
        let mut tables: Vec<&Table> = self.tables.iter().collect();
        tables.sort_by(|a, b| a.display_cmp(b));
        tables
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
