//! # packit Configuration
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Turns the raw inputs of a CI step into one immutable [`ActionConfig`].
//! Inputs arrive as environment variables set by the action descriptor
//! (`COMMAND`, `SOURCE`, `FORMAT`, ...); each one is also a long flag, and
//! flags take precedence over the environment.
//!
//! ## Architecture
//!
//! 1. `ActionArgs` (clap derive, `env` feature) captures every input as an
//!    optional string. CI runners export unset inputs as empty strings, so
//!    blank values are treated as absent.
//! 2. `ActionConfig::from_args` validates and converts: command and format
//!    enums, booleans (`true/false`, `yes/no`, `on/off`, `1/0`), resolved
//!    paths, exclusion tokens.
//! 3. The config is built once in `main` and passed by reference; no other
//!    module reads the environment.
//!
//! | Variable                | Default            |
//! |-------------------------|--------------------|
//! | `COMMAND`               | required           |
//! | `SOURCE`                | required           |
//! | `FORMAT`                | required           |
//! | `DEST`                  | see target rules   |
//! | `DESTFILENAME`          | source base name   |
//! | `EXCLUDE`               | none               |
//! | `INCLUDEROOT`           | `true`             |
//! | `PRESERVEGLOBSTRUCTURE` | `false`            |
//! | `STRIPPREFIX`           | empty              |
//! | `FAIL_ON_ERROR`         | `true`             |
//! | `VERBOSE`               | `false`            |
//! | `GITHUB_WORKSPACE`      | current directory  |
//! | `GITHUB_OUTPUT`         | stdout             |
//! | `GLOBARCHIVENAME`       | `archive`          |
//!
use crate::common::archive::ArchiveFormat;
use crate::core::error::{PackitError, Result};
use anyhow::Context;
use clap::Args;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Base name for glob archives when the pattern has no literal directory.
pub const DEFAULT_GLOB_ARCHIVE_NAME: &str = "archive";

/// Raw step inputs. Every field is optional here; validation happens in
/// [`ActionConfig::from_args`].
#[derive(Args, Debug, Default, Clone)]
pub struct ActionArgs {
    /// Operation to run: `compress` or `decompress`.
    #[arg(long, env = "COMMAND")]
    pub command: Option<String>,

    /// Directory, file or glob pattern to compress, or archive to extract.
    #[arg(long, env = "SOURCE")]
    pub source: Option<String>,

    /// Archive format: zip, tar, tgz or tbz2.
    #[arg(long, env = "FORMAT")]
    pub format: Option<String>,

    /// Output directory (compress) or extraction directory (decompress).
    #[arg(long, env = "DEST")]
    pub dest: Option<String>,

    /// Archive base name; the format extension is appended when missing.
    #[arg(long, env = "DESTFILENAME")]
    pub destfilename: Option<String>,

    /// Space-separated exclude patterns.
    #[arg(long, env = "EXCLUDE")]
    pub exclude: Option<String>,

    /// Wrap archive contents in a directory named after the source.
    #[arg(long, env = "INCLUDEROOT")]
    pub include_root: Option<String>,

    /// Keep the relative layout of glob matches instead of flattening them.
    #[arg(long, env = "PRESERVEGLOBSTRUCTURE")]
    pub preserve_glob_structure: Option<String>,

    /// Prefix removed from preserved glob paths.
    #[arg(long, env = "STRIPPREFIX")]
    pub strip_prefix: Option<String>,

    /// Exit non-zero on errors; `false` downgrades them to warnings.
    #[arg(long, env = "FAIL_ON_ERROR")]
    pub fail_on_error: Option<String>,

    /// Debug-level logging and archiver output.
    #[arg(long, env = "VERBOSE")]
    pub verbose: Option<String>,

    /// Base directory for relative sources and destinations.
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<String>,

    /// File the `file_path` output is appended to.
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<String>,

    /// Archive base name for glob sources without a literal directory.
    #[arg(long, env = "GLOBARCHIVENAME")]
    pub glob_archive_name: Option<String>,
}

/// The operation requested through `COMMAND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCommand {
    Compress,
    Decompress,
}

impl fmt::Display for ActionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCommand::Compress => f.write_str("compress"),
            ActionCommand::Decompress => f.write_str("decompress"),
        }
    }
}

impl FromStr for ActionCommand {
    type Err = PackitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compress" => Ok(ActionCommand::Compress),
            "decompress" => Ok(ActionCommand::Decompress),
            other => Err(PackitError::Config(format!(
                "Invalid command: {}. Supported commands: compress, decompress",
                other
            ))),
        }
    }
}

/// Validated configuration for one invocation.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    pub command: ActionCommand,
    /// Source exactly as given (may be a glob).
    pub source: String,
    pub format: ArchiveFormat,
    /// Destination directory, already resolved against the workspace.
    pub dest: Option<PathBuf>,
    pub destfilename: Option<String>,
    pub exclude: Vec<String>,
    pub include_root: bool,
    pub preserve_glob_structure: bool,
    pub strip_prefix: String,
    pub fail_on_error: bool,
    pub verbose: bool,
    /// Absolute base directory for relative paths.
    pub workspace: PathBuf,
    pub output_file: Option<PathBuf>,
    pub glob_archive_name: String,
}

impl ActionConfig {
    /// Validates `args` and builds the configuration.
    ///
    /// `cwd` is used when no workspace is given and to absolutise a relative one.
    ///
    /// # Errors
    ///
    /// `PackitError::Config` for missing required inputs, unknown command or
    /// format, and unparseable booleans.
    pub fn from_args(args: &ActionArgs, cwd: &Path) -> Result<Self> {
        let command: ActionCommand = required(&args.command, "Command")?.parse()?;
        let source = required(&args.source, "Source")?.to_string();
        let format: ArchiveFormat = required(&args.format, "Format")?.parse()?;

        let workspace = match present(&args.workspace) {
            Some(ws) => cwd.join(ws),
            None => cwd.to_path_buf(),
        };

        Ok(Self {
            command,
            source,
            format,
            dest: present(&args.dest).map(|d| workspace.join(d)),
            destfilename: present(&args.destfilename).map(str::to_string),
            exclude: present(&args.exclude)
                .map(|e| e.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            include_root: parse_flag("INCLUDEROOT", &args.include_root, true)?,
            preserve_glob_structure: parse_flag(
                "PRESERVEGLOBSTRUCTURE",
                &args.preserve_glob_structure,
                false,
            )?,
            strip_prefix: present(&args.strip_prefix).unwrap_or_default().to_string(),
            fail_on_error: parse_flag("FAIL_ON_ERROR", &args.fail_on_error, true)?,
            verbose: parse_flag("VERBOSE", &args.verbose, false)?,
            output_file: present(&args.output_file).map(|o| cwd.join(o)),
            glob_archive_name: present(&args.glob_archive_name)
                .unwrap_or(DEFAULT_GLOB_ARCHIVE_NAME)
                .to_string(),
            workspace,
        })
    }

    /// Builds the configuration relative to the process's current directory.
    pub fn from_env_args(args: &ActionArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::from_args(args, &cwd)
    }

    /// Resolves `path` against the workspace unless it is already absolute.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.workspace.join(path)
    }
}

/// Reads `VERBOSE` leniently, before the config is validated, so logging can
/// be set up first. Invalid values fall back to `false` here and are reported
/// by `ActionConfig::from_args`.
pub fn verbose_hint(args: &ActionArgs) -> bool {
    parse_flag("VERBOSE", &args.verbose, false).unwrap_or(false)
}

/// Trimmed value, or `None` for absent and blank inputs.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: &'a Option<String>, label: &str) -> Result<&'a str> {
    present(value).ok_or_else(|| PackitError::Config(format!("{} is required", label)).into())
}

/// Parses a boolean input, falling back to `default` when blank.
pub fn parse_flag(name: &str, value: &Option<String>, default: bool) -> Result<bool> {
    let Some(raw) = present(value) else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(PackitError::Config(format!(
            "{} must be true or false, got '{}'",
            name, raw
        ))
        .into()),
    }
}
