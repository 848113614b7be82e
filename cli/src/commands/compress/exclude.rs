//! # Exclusion Filter (`commands::compress::exclude`)
//!
//! File: cli/src/commands/compress/exclude.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Decides whether a relative path is dropped from the archive, given the
//! space-separated tokens of the `EXCLUDE` input. A path is excluded when ANY
//! token matches it or one of its parent directories.
//!
//! A token matches a path when:
//! - it equals the path exactly (`docs/draft.md`, or a directory path such as `docs/drafts`),
//! - it equals the name of the file or of any directory on the way (`node_modules`),
//! - it is a glob matching the name or the whole relative path (`*.log`, `build/*.tmp`),
//! - it ends in `/` and names a directory, in which case only directories
//!   match and everything below them is excluded (`cache/`, `tmp*/`).
//!
//! The same filter is used for plain directory walks and for glob matching,
//! so an exclude token behaves identically in both modes.
//!
use crate::core::error::{PackitError, Result};
use globset::{GlobBuilder, GlobMatcher};

/// Characters that make a token (or source) a glob.
pub fn has_glob_meta(value: &str) -> bool {
    value.contains(['*', '?', '[', '{'])
}

#[derive(Debug)]
struct ExcludeRule {
    token: String,
    dir_only: bool,
    glob: Option<GlobMatcher>,
}

impl ExcludeRule {
    fn parse(raw: &str) -> Result<Option<Self>> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
        let dir_only = trimmed.ends_with('/');
        let token = trimmed.trim_end_matches('/');
        if token.is_empty() {
            return Ok(None);
        }

        let glob = if has_glob_meta(token) {
            let glob = GlobBuilder::new(token)
                .literal_separator(true)
                .build()
                .map_err(|source| PackitError::InvalidPattern {
                    pattern: raw.to_string(),
                    source,
                })?;
            Some(glob.compile_matcher())
        } else {
            None
        };

        Ok(Some(Self {
            token: token.to_string(),
            dir_only,
            glob,
        }))
    }

    /// Whether the rule matches `path` itself (not its parents).
    fn matches(&self, path: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        let name = path.rsplit('/').next().unwrap_or(path);
        if path == self.token || name == self.token {
            return true;
        }
        match &self.glob {
            Some(glob) => glob.is_match(name) || glob.is_match(path),
            None => false,
        }
    }
}

/// Compiled `EXCLUDE` tokens.
#[derive(Debug, Default)]
pub struct ExclusionFilter {
    rules: Vec<ExcludeRule>,
}

impl ExclusionFilter {
    /// Compiles `tokens`; blank tokens are ignored.
    ///
    /// # Errors
    ///
    /// `PackitError::InvalidPattern` when a glob token does not compile.
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut rules = Vec::with_capacity(tokens.len());
        for token in tokens {
            if let Some(rule) = ExcludeRule::parse(token.as_ref())? {
                rules.push(rule);
            }
        }
        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether the file at `relative` (slash separated) is excluded.
    pub fn should_exclude(&self, relative: &str) -> bool {
        self.excluded(relative, false)
    }

    /// Whether the directory at `relative` and everything below it is excluded.
    pub fn should_exclude_dir(&self, relative: &str) -> bool {
        self.excluded(relative, true)
    }

    fn excluded(&self, relative: &str, is_dir: bool) -> bool {
        if self.rules.is_empty() {
            return false;
        }
        let relative = relative.strip_prefix("./").unwrap_or(relative);
        if self.rules.iter().any(|rule| rule.matches(relative, is_dir)) {
            return true;
        }
        // Every proper prefix ending at a '/' is an ancestor directory.
        relative
            .match_indices('/')
            .map(|(idx, _)| &relative[..idx])
            .any(|ancestor| self.rules.iter().any(|rule| rule.matches(ancestor, true)))
    }
}
