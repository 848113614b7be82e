//! # Source Classification (`commands::compress::source`)
//!
//! File: cli/src/commands/compress/source.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Parses the `SOURCE` input once into a [`SourceSpec`]: a plain path
//! (directory or file) or a glob pattern, together with the directory it is
//! resolved against. Also splits a glob into its literal directory prefix and
//! its wildcard remainder, which both the matcher and the naming rules need.
//!
use super::exclude::has_glob_meta;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    PlainPath,
    GlobPattern,
}

/// The user-supplied source expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub raw: String,
    pub kind: SourceKind,
    pub base_dir: PathBuf,
}

impl SourceSpec {
    pub fn parse(raw: &str, base_dir: &Path) -> Self {
        let raw = raw.trim().to_string();
        let kind = if has_glob_meta(&raw) {
            SourceKind::GlobPattern
        } else {
            SourceKind::PlainPath
        };
        Self {
            raw,
            kind,
            base_dir: base_dir.to_path_buf(),
        }
    }

    pub fn is_glob(&self) -> bool {
        self.kind == SourceKind::GlobPattern
    }

    /// The plain path, resolved against the base directory.
    pub fn path(&self) -> PathBuf {
        self.base_dir.join(&self.raw)
    }

    /// Deepest literal directory segment of a glob (`build/logs/**/*.log` ->
    /// `logs`), `None` when the pattern starts with a wildcard.
    pub fn literal_dir_name(&self) -> Option<String> {
        let (prefix, _) = split_literal_prefix(&self.raw);
        prefix.components().rev().find_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
    }
}

/// Splits a glob into the directories before the first wildcard segment and
/// the remaining pattern.
///
/// The final segment always belongs to the remainder, so `logs/app.log`
/// splits into (`logs`, `app.log`).
///
/// ```text
/// "/data/out/**/*.txt" -> ("/data/out", "**/*.txt")
/// "logs/*.log"         -> ("logs", "*.log")
/// "**/*.log"           -> ("", "**/*.log")
/// ```
pub fn split_literal_prefix(pattern: &str) -> (PathBuf, String) {
    let parts: Vec<&str> = pattern.split('/').collect();
    let last = parts.len().saturating_sub(1);
    let literal_count = parts[..last]
        .iter()
        .take_while(|part| !has_glob_meta(part))
        .count();

    let mut prefix = PathBuf::new();
    if pattern.starts_with('/') {
        prefix.push("/");
    }
    for part in &parts[..literal_count] {
        if !part.is_empty() && *part != "." {
            prefix.push(part);
        }
    }
    let rest = parts[literal_count..].join("/");
    (prefix, rest)
}
