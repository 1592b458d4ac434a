//! Warnings raised while compiling table filters.
//!
//! Bad patterns never abort a run. They are recorded here, logged, and
//! handed back to the caller alongside the generated diagram.

/// Warning types that can occur while preparing filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterWarning {
    /// A regular expression failed to compile and will never match
    InvalidRegex {
        pattern: String,
        message: String,
    },
    /// A wildcard failed to compile and falls back to exact matching
    InvalidWildcard {
        pattern: String,
        message: String,
    },
}

impl std::fmt::Display for FilterWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterWarning::InvalidRegex { pattern, message } => {
                write!(f, "Invalid regex pattern '{}': {} (ignored)", pattern, message)
            }
            FilterWarning::InvalidWildcard { pattern, message } => {
                write!(
                    f,
                    "Invalid wildcard pattern '{}': {} (using exact match)",
                    pattern, message
                )
            }
        }
    }
}

/// Collects warnings while filters are compiled
#[derive(Debug, Default)]
pub struct WarningCollector {
    warnings: Vec<FilterWarning>,
}

impl WarningCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning, skipping exact duplicates
    pub fn add(&mut self, warning: FilterWarning) {
        tracing::warn!("{}", warning);
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    pub fn warnings(&self) -> &[FilterWarning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn count(&self) -> usize {
        self.warnings.len()
    }

    pub fn into_vec(self) -> Vec<FilterWarning> {
        self.warnings
    }
}
