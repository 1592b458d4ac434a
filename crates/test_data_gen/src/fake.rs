//! Fake catalog helpers.
//!
//! Provides deterministic table names, column names, types and
//! descriptions.

use rand::Rng;

/// Schemas tables are spread across
pub const SCHEMAS: &[&str] = &["dbo", "dbo", "dbo", "sales", "hr", "audit"];

/// Table name stems
const TABLE_NOUNS: &[&str] = &[
    "Customer", "Order", "Product", "Invoice", "Payment", "Shipment", "Supplier", "Employee",
    "Department", "Project", "Task", "Comment", "Category", "Address", "Contract", "Account",
    "Ledger", "Warehouse", "Region", "Campaign",
];

/// Table name qualifiers
const TABLE_SUFFIXES: &[&str] = &["", "Line", "History", "Detail", "Note", "Item", "Status"];

/// Column name stems for non-key columns
const COLUMN_NAMES: &[&str] = &[
    "Name", "Code", "Title", "Email", "Phone", "Amount", "Quantity", "Price", "CreatedAt",
    "UpdatedAt", "IsActive", "Notes", "Reference", "Rate", "Weight", "DueDate", "Status",
    "ExternalKey", "Score", "Version",
];

const STRING_LENGTHS: &[i32] = &[50, 100, 256];

const LOREM_WORDS: &[&str] = &[
    "stores", "tracks", "records", "links", "current", "historical", "customer", "billing",
    "shipping", "audit", "value", "state", "owner", "primary", "optional",
];

/// A column type with the size metadata the catalog would report
#[derive(Debug, Clone, PartialEq)]
pub struct FakeType {
    pub data_type: &'static str,
    pub max_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
}

impl FakeType {
    fn plain(data_type: &'static str) -> Self {
        Self {
            data_type,
            max_length: None,
            numeric_precision: None,
            numeric_scale: None,
        }
    }
}

/// Fake catalog generator
pub struct FakeData<R: Rng> {
    rng: R,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn schema(&mut self) -> &'static str {
        SCHEMAS[self.rng.random_range(0..SCHEMAS.len())]
    }

    /// Table name; `index` keeps names unique across a catalog
    pub fn table_name(&self, index: usize) -> String {
        let noun = TABLE_NOUNS[index % TABLE_NOUNS.len()];
        let suffix = TABLE_SUFFIXES[(index / TABLE_NOUNS.len()) % TABLE_SUFFIXES.len()];
        let round = index / (TABLE_NOUNS.len() * TABLE_SUFFIXES.len());
        if round == 0 {
            format!("{}{}", noun, suffix)
        } else {
            format!("{}{}{}", noun, suffix, round + 1)
        }
    }

    pub fn column_name(&mut self, position: usize) -> String {
        let stem = COLUMN_NAMES[self.rng.random_range(0..COLUMN_NAMES.len())];
        format!("{}{}", stem, position)
    }

    pub fn column_type(&mut self) -> FakeType {
        match self.rng.random_range(0..10) {
            0 => FakeType {
                max_length: Some(STRING_LENGTHS[self.rng.random_range(0..STRING_LENGTHS.len())]),
                ..FakeType::plain("nvarchar")
            },
            1 => FakeType {
                max_length: Some(-1),
                ..FakeType::plain("varchar")
            },
            2 => FakeType {
                max_length: Some(self.rng.random_range(1..=10)),
                ..FakeType::plain("char")
            },
            3 => FakeType {
                numeric_precision: Some(self.rng.random_range(10..=18)),
                numeric_scale: Some(self.rng.random_range(0..=4)),
                ..FakeType::plain("decimal")
            },
            4 => FakeType {
                numeric_precision: Some(53),
                ..FakeType::plain("float")
            },
            5 => FakeType::plain("datetime2"),
            6 => FakeType::plain("bit"),
            7 => FakeType::plain("bigint"),
            8 => FakeType::plain("uniqueidentifier"),
            _ => FakeType::plain("int"),
        }
    }

    pub fn boolean(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability)
    }

    pub fn int_range(&mut self, min: usize, max: usize) -> usize {
        self.rng.random_range(min..=max)
    }

    /// Short description, sometimes spanning two lines
    pub fn description(&mut self) -> String {
        let count = self.rng.random_range(3..7);
        let words: Vec<&str> = (0..count)
            .map(|_| LOREM_WORDS[self.rng.random_range(0..LOREM_WORDS.len())])
            .collect();
        if self.rng.random_bool(0.2) {
            let mid = words.len() / 2;
            format!("{}\n{}", words[..mid].join(" "), words[mid..].join(" "))
        } else {
            words.join(" ")
        }
    }
}
