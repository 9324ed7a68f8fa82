//! Error types for regiontree.
//!
//! Library crates use [`RegionTreeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Classification and aggregation never fail: unrecognised names are
//! classification outcomes, not errors. Only the loader, exporter, and
//! config layer produce these variants.

use std::path::PathBuf;

/// Top-level error type for all regiontree operations.
#[derive(Debug, thiserror::Error)]
pub enum RegionTreeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Malformed registry table (bad CSV, non-UTF-8 bytes, short rows).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Structural problem with the input (missing column, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Output document could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RegionTreeError>;

impl RegionTreeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = RegionTreeError::config("unknown delimiter");
        assert_eq!(err.to_string(), "config error: unknown delimiter");

        let err = RegionTreeError::validation("missing column '법정동명'");
        assert!(err.to_string().contains("법정동명"));
    }

    #[test]
    fn io_error_carries_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = RegionTreeError::io("/tmp/registry.csv", source);
        let msg = err.to_string();
        assert!(msg.contains("registry.csv"));
        assert!(msg.contains("gone"));
    }
}
