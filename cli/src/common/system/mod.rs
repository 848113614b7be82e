//! # packit System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Host inspection helpers. Currently this is the lookup of external tools on
//! `PATH` through the `which` crate, which lets the archiver fail with a clear
//! message ("required tool 'zip' was not found") before attempting to spawn
//! anything. Only executable files count as a match.
//!
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Locates the executable `program` in the directories listed in `PATH`.
pub fn find_tool(program: &str) -> Option<PathBuf> {
    find_tool_in(program, env::var_os("PATH"))
}

fn find_tool_in(program: &str, search_path: Option<OsString>) -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    which::which_in(program, search_path, cwd).ok()
}
