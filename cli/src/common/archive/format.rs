//! # packit Archive Formats (`common::archive::format`)
//!
//! File: cli/src/common/archive/format.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! The closed set of archive formats packit understands, with the file
//! extension and `tar` compression flag that belong to each.
//!
use crate::core::error::PackitError;
use std::fmt;
use std::str::FromStr;

/// Archive formats accepted by the `FORMAT` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
    Tgz,
    Tbz2,
}

impl ArchiveFormat {
    /// Every supported format, in the order they are listed to users.
    pub const ALL: [ArchiveFormat; 4] = [
        ArchiveFormat::Zip,
        ArchiveFormat::Tar,
        ArchiveFormat::Tgz,
        ArchiveFormat::Tbz2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::Tgz => "tgz",
            ArchiveFormat::Tbz2 => "tbz2",
        }
    }

    /// File extension including the leading dot, e.g. `.tgz`.
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => ".zip",
            ArchiveFormat::Tar => ".tar",
            ArchiveFormat::Tgz => ".tgz",
            ArchiveFormat::Tbz2 => ".tbz2",
        }
    }

    /// Compression letter for `tar` (`z`, `j`), `None` for plain tar and zip.
    pub fn tar_compression_flag(self) -> Option<char> {
        match self {
            ArchiveFormat::Tgz => Some('z'),
            ArchiveFormat::Tbz2 => Some('j'),
            ArchiveFormat::Zip | ArchiveFormat::Tar => None,
        }
    }

    /// Comma separated list for error messages ("zip, tar, tgz, tbz2").
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveFormat {
    type Err = PackitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                PackitError::Config(format!(
                    "Invalid format: {}. Supported formats: {}",
                    wanted,
                    Self::supported_list()
                ))
            })
    }
}
