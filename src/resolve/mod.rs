//! Relationship resolution for diagram edges.
//!
//! Turns raw foreign-key constraints into drawable edges:
//! - constraints touching a table outside the model are dropped
//! - constraints that render to an already-emitted entity pair are dropped,
//!   so composite keys (and parallel constraints) collapse to one edge
//! - each edge is classified as one-to-one or one-to-many, and as optional
//!   or mandatory from the referencing column's nullability

use crate::model::{Relationship, Table};
use ahash::AHashSet;

/// Relationship cardinality for ERD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// The referencing column is covered by a single-column unique index
    OneToOne,
    #[default]
    OneToMany,
}

/// Whether the referencing side may be absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Optionality {
    /// FK column is nullable (or unknown)
    #[default]
    Optional,
    Mandatory,
}

impl Cardinality {
    /// PlantUML IE connector, target side on the left
    pub fn as_plantuml(self, optionality: Optionality) -> &'static str {
        match (self, optionality) {
            (Cardinality::OneToOne, Optionality::Optional) => "||--o|",
            (Cardinality::OneToOne, Optionality::Mandatory) => "||--||",
            (Cardinality::OneToMany, Optionality::Optional) => "||--o{",
            (Cardinality::OneToMany, Optionality::Mandatory) => "||--|{",
        }
    }
}

/// A relationship that survived resolution, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelationship {
    pub relationship: Relationship,
    /// Rendered name of the referencing table
    pub source_entity: String,
    /// Rendered name of the referenced table
    pub target_entity: String,
    pub cardinality: Cardinality,
    pub optionality: Optionality,
}

impl ResolvedRelationship {
    /// Edge label: the referenced column
    pub fn label(&self) -> &str {
        &self.relationship.target.column
    }
}

/// Rendered (source, target) pairs already emitted
#[derive(Debug, Clone, Default)]
pub struct SeenEdges {
    seen: AHashSet<(String, String)>,
}

impl SeenEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair; false if it was already present
    pub fn insert(&mut self, source_entity: &str, target_entity: &str) -> bool {
        self.seen
            .insert((source_entity.to_string(), target_entity.to_string()))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

fn find_table<'a>(tables: &'a [Table], schema: &str, name: &str) -> Option<&'a Table> {
    tables.iter().find(|t| t.is(schema, name))
}

/// Resolve one constraint against the model, updating `seen`.
///
/// Returns `None` when an endpoint is missing or the rendered edge was
/// already emitted.
pub fn resolve_one(
    relationship: &Relationship,
    tables: &[Table],
    default_schema: &str,
    seen: &mut SeenEdges,
) -> Option<ResolvedRelationship> {
    let source = &relationship.source;
    let target = &relationship.target;

    let (Some(from_table), Some(to_table)) = (
        find_table(tables, &source.schema, &source.table),
        find_table(tables, &target.schema, &target.table),
    ) else {
        tracing::debug!(
            constraint = %relationship.constraint_name,
            "skipping relationship to a table outside the diagram"
        );
        return None;
    };

    let source_entity = from_table.entity_name(default_schema);
    let target_entity = to_table.entity_name(default_schema);

    if !seen.insert(&source_entity, &target_entity) {
        tracing::debug!(
            constraint = %relationship.constraint_name,
            from = %source_entity,
            to = %target_entity,
            "skipping duplicate edge"
        );
        return None;
    }

    let cardinality = if from_table
        .indexes
        .iter()
        .any(|idx| idx.is_unique_on(&source.column))
    {
        Cardinality::OneToOne
    } else {
        Cardinality::OneToMany
    };

    // An unknown column is treated as nullable
    let optionality = match from_table.column(&source.column) {
        Some(col) if !col.is_nullable => Optionality::Mandatory,
        _ => Optionality::Optional,
    };

    Some(ResolvedRelationship {
        relationship: relationship.clone(),
        source_entity,
        target_entity,
        cardinality,
        optionality,
    })
}

/// Resolve constraints into deduplicated edges, in first-seen order
pub fn resolve(
    relationships: &[Relationship],
    tables: &[Table],
    default_schema: &str,
) -> Vec<ResolvedRelationship> {
    let mut seen = SeenEdges::new();
    relationships
        .iter()
        .filter_map(|r| resolve_one(r, tables, default_schema, &mut seen))
        .collect()
}
