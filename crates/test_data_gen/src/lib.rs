//! Test Data Generator for schema-puml tests and benchmarks.
//!
//! Generates deterministic, FK-consistent catalog snapshots shaped like
//! the JSON that `schema-puml generate` reads.
//!
//! # Example
//!
//! ```rust
//! use test_data_gen::{Generator, Scale};
//!
//! // Generate a small catalog with a seed for reproducibility
//! let mut gen = Generator::new(42, Scale::Small);
//! let snapshot = gen.generate();
//!
//! println!("{}", serde_json::to_string_pretty(&snapshot).unwrap());
//! ```

pub mod fake;
pub mod generator;

pub use generator::{Generator, Scale};
