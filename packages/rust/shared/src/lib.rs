//! Shared types, error model, and configuration for regiontree.
//!
//! This crate is the foundation depended on by all other regiontree crates.
//! It provides:
//! - [`RegionTreeError`]: the unified error type
//! - Domain types ([`SourceRecord`], [`Classification`], [`RegionTree`])
//! - Configuration ([`AppConfig`], [`SourceConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, OutputConfig, SourceConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{RegionTreeError, Result};
pub use types::{
    Classification, DistrictNode, LocalityLeaf, RegionTree, SourceRecord, Status, TerminalLevel,
};
