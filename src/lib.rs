pub mod catalog;
pub mod config;
pub mod filter;
pub mod json_schema;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod resolve;
