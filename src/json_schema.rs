//! JSON Schema generation for the files this tool reads.
//!
//! Schemas are generated using the schemars crate and can be exported via
//! the `schema` subcommand.

use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// Returns all JSON schemas, keyed by name.
/// Uses BTreeMap for deterministic ordering (important for diffable output).
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();

    // --config file
    schemas.insert("config", schema_for!(crate::config::RenderOptions));

    // catalog snapshot input
    schemas.insert("snapshot", schema_for!(crate::catalog::CatalogSnapshot));

    schemas
}

/// Generate a single schema by name.
pub fn get_schema(name: &str) -> Option<Schema> {
    all_schemas().remove(name)
}

/// List all available schema names.
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}
