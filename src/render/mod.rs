//! PlantUML diagram rendering.
//!
//! Two independent layouts share the same header, entity naming and type
//! formatting:
//! - `entity`: IE-notation entities with cardinality connectors
//! - `class`: class boxes with visibility markers and plain associations

mod class;
mod datatype;
mod entity;

pub use class::to_class_diagram;
pub use datatype::{format_data_type, TypeFamily};
pub use entity::to_entity_diagram;

use crate::config::RenderOptions;
use crate::model::Schema;
use crate::resolve::ResolvedRelationship;
use std::fmt;
use std::str::FromStr;

/// Timestamp layout for the header comment
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Diagram notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramStyle {
    /// Entity-relationship diagram (IE notation)
    #[default]
    EntityRelationship,
    /// Class diagram with directed associations
    ClassDiagram,
}

/// Errors raised by the renderer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagramError {
    #[error("Unknown diagram type: {0}. Valid options: entity, class")]
    UnknownStyle(String),
}

impl FromStr for DiagramStyle {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entity" | "er" | "erd" | "entity-relationship" => Ok(DiagramStyle::EntityRelationship),
            "class" | "class-diagram" => Ok(DiagramStyle::ClassDiagram),
            _ => Err(DiagramError::UnknownStyle(s.to_string())),
        }
    }
}

impl fmt::Display for DiagramStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramStyle::EntityRelationship => write!(f, "entity"),
            DiagramStyle::ClassDiagram => write!(f, "class"),
        }
    }
}

/// Render a diagram in the given style
pub fn render(
    schema: &Schema,
    relationships: &[ResolvedRelationship],
    options: &RenderOptions,
    style: DiagramStyle,
) -> String {
    tracing::info!(
        tables = schema.table_count(),
        relationships = relationships.len(),
        %style,
        "rendering diagram"
    );
    match style {
        DiagramStyle::EntityRelationship => to_entity_diagram(schema, relationships, options),
        DiagramStyle::ClassDiagram => to_class_diagram(schema, relationships, options),
    }
}

/// Render a diagram for a style given by name (`entity` or `class`)
pub fn render_named(
    schema: &Schema,
    relationships: &[ResolvedRelationship],
    options: &RenderOptions,
    style: &str,
) -> Result<String, DiagramError> {
    let style: DiagramStyle = style.parse()?;
    Ok(render(schema, relationships, options, style))
}

/// Start marker, generation comments, theme and custom directives
fn write_header(output: &mut String, schema: &Schema, options: &RenderOptions) {
    output.push_str("@startuml\n");
    output.push_str(&format!(
        "' Generated on {} UTC\n",
        schema.generated_at.format(TIMESTAMP_FORMAT)
    ));
    output.push_str(&format!("' Database: {}\n", schema.database_name));
    output.push('\n');

    if let Some(theme) = options.theme.as_deref().filter(|t| !t.is_empty()) {
        output.push_str(&format!("!theme {}\n", theme));
        output.push('\n');
    }

    for directive in &options.custom_directives {
        output.push_str(directive);
        output.push('\n');
    }
    if !options.custom_directives.is_empty() {
        output.push('\n');
    }
}

/// Flatten a description onto one comment line
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
