//! # packit Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test runs
//! the compiled `packit` binary the way a CI runner would: inputs as
//! environment variables, a workspace directory and an output file.
//!
//! Every `.rs` file in this directory (other than this module) is compiled as
//! a separate test crate.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Inputs the tests control explicitly; inherited values are removed.
const INPUT_VARS: [&str; 14] = [
    "COMMAND",
    "SOURCE",
    "FORMAT",
    "DEST",
    "DESTFILENAME",
    "EXCLUDE",
    "INCLUDEROOT",
    "PRESERVEGLOBSTRUCTURE",
    "STRIPPREFIX",
    "FAIL_ON_ERROR",
    "VERBOSE",
    "GITHUB_WORKSPACE",
    "GITHUB_OUTPUT",
    "GLOBARCHIVENAME",
];

/// # Get packit Command (`packit_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `packit` binary with a
/// clean input environment.
///
/// ## Panics
/// Panics if the `packit` binary cannot be found via `Command::cargo_bin`.
pub fn packit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("packit").expect("Failed to find packit binary for testing");
    for var in INPUT_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A `packit` command running in `workspace`, publishing to
/// `<workspace>/github_output`.
pub fn packit_in(workspace: &Path) -> Command {
    let mut cmd = packit_cmd();
    cmd.current_dir(workspace)
        .env("GITHUB_WORKSPACE", workspace)
        .env("GITHUB_OUTPUT", output_file(workspace));
    cmd
}

pub fn output_file(workspace: &Path) -> PathBuf {
    workspace.join("github_output")
}

/// The last `file_path=` value written to the output file.
pub fn published_file_path(workspace: &Path) -> Option<String> {
    let content = fs::read_to_string(output_file(workspace)).ok()?;
    content
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix("file_path="))
        .map(str::to_string)
}

/// Writes `content` to `root/rel`, creating parents.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A canonical temporary workspace.
pub fn workspace() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = fs::canonicalize(dir.path()).unwrap();
    (dir, path)
}

/// Whether `program` is on `PATH`; tests needing it are skipped otherwise.
pub fn tool_available(program: &str) -> bool {
    which::which(program).is_ok()
}

/// File entries of a tar archive (`.tar` or `.tgz`) with their contents,
/// in archive order. Directory entries are left out.
pub fn read_tar(path: &Path) -> Vec<(String, String)> {
    let file = fs::File::open(path).unwrap();
    let name = path.to_string_lossy();
    let reader: Box<dyn Read> = if name.ends_with(".tgz") || name.ends_with(".tar.gz") {
        Box::new(flate2::read::GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let mut archive = tar::Archive::new(reader);
    let mut files = Vec::new();
    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry.path().unwrap().to_string_lossy().into_owned();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        files.push((name, content));
    }
    files
}

/// Every entry name of a tar archive, directories included (with trailing `/`).
pub fn tar_entry_names(path: &Path) -> Vec<String> {
    let file = fs::File::open(path).unwrap();
    let name = path.to_string_lossy();
    let reader: Box<dyn Read> = if name.ends_with(".tgz") {
        Box::new(flate2::read::GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let mut archive = tar::Archive::new(reader);
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            let mut name = entry.path().unwrap().to_string_lossy().into_owned();
            if entry.header().entry_type().is_dir() && !name.ends_with('/') {
                name.push('/');
            }
            name
        })
        .collect()
}

/// Entry names of a zip archive in stored order, as listed by `unzip -Z1`.
pub fn zip_entry_names(path: &Path) -> Vec<String> {
    let output = std::process::Command::new("unzip")
        .arg("-Z1")
        .arg(path)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "unzip -Z1 failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}
