//! Column type display strings.

use crate::model::Column;

/// Broad type families that carry size information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    /// CHAR, VARCHAR and their national variants
    Character,
    /// DECIMAL, NUMERIC
    ExactNumeric,
    /// FLOAT, REAL, DOUBLE
    ApproximateNumeric,
    Other,
}

impl TypeFamily {
    /// Classify an upper-cased type name
    pub fn of(type_name: &str) -> Self {
        match type_name {
            "CHAR" | "NCHAR" | "VARCHAR" | "NVARCHAR" | "CHARACTER" | "CHARACTER VARYING" => {
                TypeFamily::Character
            }
            "DECIMAL" | "NUMERIC" => TypeFamily::ExactNumeric,
            "FLOAT" | "REAL" | "DOUBLE" | "DOUBLE PRECISION" => TypeFamily::ApproximateNumeric,
            _ => TypeFamily::Other,
        }
    }
}

/// Format a column's declared type for display.
///
/// `VARCHAR` with length 50 gives `VARCHAR(50)`, length -1 gives
/// `VARCHAR(MAX)`. Numeric-specific precision/scale win over the generic
/// pair. Anything without usable size metadata renders as the upper-cased
/// type name.
pub fn format_data_type(column: &Column) -> String {
    let data_type = column.data_type.trim().to_uppercase();

    match TypeFamily::of(&data_type) {
        TypeFamily::Character => match column.max_length {
            Some(-1) => format!("{}(MAX)", data_type),
            Some(len) => format!("{}({})", data_type, len),
            None => data_type,
        },
        TypeFamily::ExactNumeric => {
            match (
                column.numeric_precision,
                column.numeric_scale,
                column.precision,
                column.scale,
            ) {
                (Some(p), Some(s), _, _) | (_, _, Some(p), Some(s)) => {
                    format!("{}({},{})", data_type, p, s)
                }
                _ => data_type,
            }
        }
        TypeFamily::ApproximateNumeric => match column.numeric_precision.or(column.precision) {
            Some(p) => format!("{}({})", data_type, p),
            None => data_type,
        },
        TypeFamily::Other => data_type,
    }
}
