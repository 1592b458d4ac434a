//! Schema command: print JSON Schemas of the input file formats.

use crate::json_schema::{get_schema, schema_names};
use anyhow::{anyhow, Result};

pub fn run(name: &str, list: bool) -> Result<()> {
    if list {
        for name in schema_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let schema = get_schema(name).ok_or_else(|| {
        anyhow!(
            "unknown schema: {}. Valid options: {}",
            name,
            schema_names().join(", ")
        )
    })?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
