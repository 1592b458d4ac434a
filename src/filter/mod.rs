//! Table selection rules.
//!
//! Each table name runs through an ordered chain of rules. The first rule
//! that reaches a decision wins:
//!
//! 1. `excludeTables` wildcards (`*`, `?`), case-insensitive
//! 2. `excludeTablePatterns` regular expressions, case-insensitive
//! 3. `includeTablePatterns` regular expressions: when present, a table
//!    must match one of them
//!
//! After the chain, `maxTables` truncates the survivors in catalog order.

mod warnings;

pub use warnings::{FilterWarning, WarningCollector};

use crate::catalog::TableRow;
use crate::config::RenderOptions;
use crate::model::ident_eq;
use glob::{MatchOptions, Pattern};
use regex::{Regex, RegexBuilder};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Outcome of a single rule for one table name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Keep,
    Drop,
    Next,
}

type Rule = fn(&TableFilter, &str) -> Decision;

/// Rules in precedence order
const RULES: [Rule; 3] = [
    TableFilter::exclude_by_wildcard,
    TableFilter::exclude_by_pattern,
    TableFilter::include_by_pattern,
];

/// A table-name wildcard from `excludeTables`
#[derive(Debug, Clone)]
pub enum Wildcard {
    Glob(Pattern),
    /// Pattern did not compile; compared by case-insensitive equality
    Exact(String),
}

impl Wildcard {
    /// Compile a wildcard where only `*` and `?` are special
    pub fn compile(raw: &str, warnings: &mut WarningCollector) -> Self {
        let mut escaped = String::with_capacity(raw.len());
        for c in raw.chars() {
            match c {
                // Collapse runs of `*`; glob only allows `**` as a path component
                '*' if escaped.ends_with('*') => {}
                '*' | '?' => escaped.push(c),
                _ => escaped.push_str(&Pattern::escape(c.encode_utf8(&mut [0u8; 4]))),
            }
        }

        match Pattern::new(&escaped) {
            Ok(pattern) => Wildcard::Glob(pattern),
            Err(e) => {
                warnings.add(FilterWarning::InvalidWildcard {
                    pattern: raw.to_string(),
                    message: e.msg.to_string(),
                });
                Wildcard::Exact(raw.to_string())
            }
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Wildcard::Glob(p) => p.matches_with(name, MATCH_OPTIONS),
            Wildcard::Exact(s) => ident_eq(s, name),
        }
    }
}

/// Compile case-insensitive regexes, skipping (and reporting) bad ones
fn compile_patterns(raw: &[String], warnings: &mut WarningCollector) -> Vec<Regex> {
    raw.iter()
        .filter_map(
            |p| match RegexBuilder::new(p).case_insensitive(true).build() {
                Ok(re) => Some(re),
                Err(e) => {
                    warnings.add(FilterWarning::InvalidRegex {
                        pattern: p.clone(),
                        message: e.to_string(),
                    });
                    None
                }
            },
        )
        .collect()
}

/// Compiled name filters and table cap
#[derive(Debug)]
pub struct TableFilter {
    exclude_tables: Vec<Wildcard>,
    exclude_patterns: Vec<Regex>,
    include_patterns: Vec<Regex>,
    /// Whether include patterns were configured at all. A list made only
    /// of invalid patterns still restricts the result (to nothing).
    has_include_patterns: bool,
    max_tables: usize,
}

impl TableFilter {
    /// Compile the filters described by `options`
    pub fn new(options: &RenderOptions, warnings: &mut WarningCollector) -> Self {
        Self {
            exclude_tables: options
                .exclude_tables
                .iter()
                .map(|p| Wildcard::compile(p, warnings))
                .collect(),
            exclude_patterns: compile_patterns(&options.exclude_table_patterns, warnings),
            include_patterns: compile_patterns(&options.include_table_patterns, warnings),
            has_include_patterns: !options.include_table_patterns.is_empty(),
            max_tables: options.max_tables,
        }
    }

    fn exclude_by_wildcard(&self, name: &str) -> Decision {
        if self.exclude_tables.iter().any(|w| w.matches(name)) {
            Decision::Drop
        } else {
            Decision::Next
        }
    }

    fn exclude_by_pattern(&self, name: &str) -> Decision {
        if self.exclude_patterns.iter().any(|re| re.is_match(name)) {
            Decision::Drop
        } else {
            Decision::Next
        }
    }

    fn include_by_pattern(&self, name: &str) -> Decision {
        if !self.has_include_patterns {
            return Decision::Next;
        }
        if self.include_patterns.iter().any(|re| re.is_match(name)) {
            Decision::Keep
        } else {
            Decision::Drop
        }
    }

    /// Run the rule chain for one table name
    pub fn accepts(&self, name: &str) -> bool {
        for rule in RULES {
            match rule(self, name) {
                Decision::Keep => return true,
                Decision::Drop => return false,
                Decision::Next => {}
            }
        }
        true
    }

    /// Filter tables (already in catalog order) and apply the table cap
    pub fn apply(&self, tables: Vec<TableRow>) -> Vec<TableRow> {
        let mut kept: Vec<TableRow> = tables
            .into_iter()
            .filter(|t| {
                let keep = self.accepts(&t.name);
                if !keep {
                    tracing::debug!(schema = %t.schema, table = %t.name, "table filtered out");
                }
                keep
            })
            .collect();

        if self.max_tables > 0 && kept.len() > self.max_tables {
            tracing::debug!(
                kept = kept.len(),
                max_tables = self.max_tables,
                "truncating table list"
            );
            kept.truncate(self.max_tables);
        }

        kept
    }
}

/// Result of filtering catalog tables
#[derive(Debug)]
pub struct FilterOutcome {
    pub tables: Vec<TableRow>,
    pub warnings: Vec<FilterWarning>,
}

/// Filter catalog tables by name and cap the result.
///
/// `tables` must already be in catalog order (schema, then name).
pub fn filter_tables(tables: Vec<TableRow>, options: &RenderOptions) -> FilterOutcome {
    let mut warnings = WarningCollector::new();
    let filter = TableFilter::new(options, &mut warnings);
    FilterOutcome {
        tables: filter.apply(tables),
        warnings: warnings.into_vec(),
    }
}
