//! Classification, aggregation, and export for regiontree.
//!
//! This crate turns registry rows into one nested region tree per top-level
//! region (e.g., `convert`).

pub mod aggregator;
pub mod classifier;
pub mod exporter;
pub mod pipeline;
pub mod policy;
