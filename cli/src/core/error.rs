//! # packit Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! This module defines the error types used throughout packit. Library-style
//! functions return `Result<T>` (an alias for `anyhow::Result<T>`) and attach
//! context as errors travel upward; the typed `PackitError` variants mark the
//! failures the orchestrator has to classify.
//!
//! ## Architecture
//!
//! - `PackitError`: a `thiserror` enum covering configuration problems, missing
//!   sources, empty glob matches, invalid patterns, filesystem trouble and
//!   failed archiver invocations.
//! - `Result<T>`: `anyhow::Result<T>` for flexible propagation with context.
//!
//! The orchestrator (`commands::run`) downcasts errors back to `PackitError`
//! to decide whether `FAIL_ON_ERROR=false` may turn them into warnings.
//! Configuration errors never can.
//!
//! ## Examples
//!
//! ```rust
//! if !source.exists() {
//!     return Err(PackitError::SourceNotFound { path: source.to_path_buf() }.into());
//! }
//!
//! let is_config = err
//!     .downcast_ref::<PackitError>()
//!     .map_or(false, PackitError::is_config);
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for packit.
#[derive(Error, Debug)]
pub enum PackitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source path '{}' does not exist", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("No files matched pattern '{pattern}'")]
    NoMatch { pattern: String },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },
}

impl PackitError {
    /// Configuration errors stop the run even in lenient mode.
    pub fn is_config(&self) -> bool {
        matches!(self, PackitError::Config(_))
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = PackitError::Config("Source is required".to_string());
        assert_eq!(config_err.to_string(), "Configuration error: Source is required");

        let missing = PackitError::SourceNotFound {
            path: PathBuf::from("/work/missing"),
        };
        assert_eq!(missing.to_string(), "Source path '/work/missing' does not exist");

        let no_match = PackitError::NoMatch {
            pattern: "**/*.log".into(),
        };
        assert_eq!(no_match.to_string(), "No files matched pattern '**/*.log'");
    }

    #[test]
    fn test_only_config_errors_are_config() {
        assert!(PackitError::Config("x".into()).is_config());
        assert!(!PackitError::NoMatch { pattern: "*".into() }.is_config());
        assert!(!PackitError::ExternalCommand {
            cmd: "zip".into(),
            status: "exit status: 12".into(),
            output: String::new(),
        }
        .is_config());
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = PackitError::NoMatch {
            pattern: "*.txt".into(),
        }
        .into();
        let err = err.context("Compression failed");
        assert!(matches!(
            err.downcast_ref::<PackitError>(),
            Some(PackitError::NoMatch { .. })
        ));
    }
}
