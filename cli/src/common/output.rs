//! # packit Step Outputs (`common::output`)
//!
//! File: cli/src/common/output.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Publishes `key=value` outputs back to the calling CI step. When the runner
//! provides an output file (`GITHUB_OUTPUT`) the line is appended there;
//! otherwise it is printed to stdout so it still shows up in the log.
//!
use crate::common::fs::io;
use crate::core::error::Result;
use std::path::Path;
use tracing::debug;

/// Name of the single output packit publishes.
pub const FILE_PATH_KEY: &str = "file_path";

/// Publishes `key=value` to `output_file`, or stdout when there is none.
pub fn publish(output_file: Option<&Path>, key: &str, value: &str) -> Result<()> {
    let line = format!("{}={}", key, value);
    match output_file {
        Some(path) => {
            debug!("Publishing `{}` to {:?}", line, path);
            io::append_line(path, &line)
        }
        None => {
            println!("{}", line);
            Ok(())
        }
    }
}
