//! Render options and their configuration file.
//!
//! Options can be loaded from a JSON or YAML file (keys in camelCase, with
//! snake_case accepted as well) and then patched with command-line
//! overrides.

use crate::model::DEFAULT_SCHEMA;
use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Schemas excluded unless the configuration says otherwise
pub const SYSTEM_SCHEMAS: [&str; 2] = ["sys", "INFORMATION_SCHEMA"];

/// Options controlling table selection and diagram content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Include table and column descriptions as comments
    #[serde(alias = "include_descriptions")]
    pub include_descriptions: bool,

    /// Include formatted column data types
    #[serde(alias = "include_data_types")]
    pub include_data_types: bool,

    /// List non-primary-key indexes inside each entity
    #[serde(alias = "include_indexes")]
    pub include_indexes: bool,

    /// Draw foreign key relationships
    #[serde(alias = "include_relationships")]
    pub include_relationships: bool,

    /// Maximum number of tables to include (0 for unlimited)
    #[serde(alias = "max_tables")]
    pub max_tables: usize,

    /// Schemas to include (empty for all schemas)
    #[serde(alias = "include_schemas")]
    pub include_schemas: Vec<String>,

    /// Schemas to exclude
    #[serde(alias = "exclude_schemas")]
    pub exclude_schemas: Vec<String>,

    /// Table name regular expressions to include
    #[serde(alias = "include_table_patterns")]
    pub include_table_patterns: Vec<String>,

    /// Table name regular expressions to exclude
    #[serde(alias = "exclude_table_patterns")]
    pub exclude_table_patterns: Vec<String>,

    /// Table names to exclude; `*` and `?` act as wildcards
    #[serde(alias = "exclude_tables")]
    pub exclude_tables: Vec<String>,

    /// PlantUML theme, emitted as `!theme <value>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Extra PlantUML lines copied verbatim after the header
    #[serde(alias = "custom_directives")]
    pub custom_directives: Vec<String>,

    /// Schema whose tables render without a schema prefix
    #[serde(alias = "default_schema")]
    pub default_schema: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_descriptions: true,
            include_data_types: true,
            include_indexes: false,
            include_relationships: true,
            max_tables: 0,
            include_schemas: Vec::new(),
            exclude_schemas: SYSTEM_SCHEMAS.iter().map(|s| s.to_string()).collect(),
            include_table_patterns: Vec::new(),
            exclude_table_patterns: Vec::new(),
            exclude_tables: Vec::new(),
            theme: None,
            custom_directives: Vec::new(),
            default_schema: DEFAULT_SCHEMA.to_string(),
        }
    }
}

impl RenderOptions {
    /// Load options from a JSON or YAML file (chosen by extension)
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let options = match ext.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml(&content)?,
            _ => Self::from_json(&content)?,
        };
        Ok(options)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).context("invalid JSON configuration")
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        serde_yaml_ng::from_str(content).context("invalid YAML configuration")
    }

    /// Apply command-line overrides on top of loaded options
    pub fn apply(&mut self, overrides: &OptionOverrides) {
        if !overrides.include_schemas.is_empty() {
            self.include_schemas = overrides.include_schemas.clone();
        }
        if !overrides.exclude_schemas.is_empty() {
            self.exclude_schemas = overrides.exclude_schemas.clone();
        }
        if !overrides.exclude_tables.is_empty() {
            self.exclude_tables = overrides.exclude_tables.clone();
        }
        if !overrides.include_table_patterns.is_empty() {
            self.include_table_patterns = overrides.include_table_patterns.clone();
        }
        if !overrides.exclude_table_patterns.is_empty() {
            self.exclude_table_patterns = overrides.exclude_table_patterns.clone();
        }
        if let Some(max) = overrides.max_tables.filter(|m| *m > 0) {
            self.max_tables = max;
        }
        if let Some(v) = overrides.include_data_types {
            self.include_data_types = v;
        }
        if let Some(v) = overrides.include_relationships {
            self.include_relationships = v;
        }
        if let Some(v) = overrides.include_indexes {
            self.include_indexes = v;
        }
        if let Some(v) = overrides.include_descriptions {
            self.include_descriptions = v;
        }
        if let Some(theme) = overrides.theme.as_ref().filter(|t| !t.is_empty()) {
            self.theme = Some(theme.clone());
        }
        if let Some(schema) = overrides.default_schema.as_ref().filter(|s| !s.is_empty()) {
            self.default_schema = schema.clone();
        }
    }
}

/// Values given on the command line; unset fields leave the config alone
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub include_schemas: Vec<String>,
    pub exclude_schemas: Vec<String>,
    pub exclude_tables: Vec<String>,
    pub include_table_patterns: Vec<String>,
    pub exclude_table_patterns: Vec<String>,
    pub max_tables: Option<usize>,
    pub include_data_types: Option<bool>,
    pub include_relationships: Option<bool>,
    pub include_indexes: Option<bool>,
    pub include_descriptions: Option<bool>,
    pub theme: Option<String>,
    pub default_schema: Option<String>,
}
