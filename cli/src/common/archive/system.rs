//! # packit System Archiver (`common::archive::system`)
//!
//! File: cli/src/common/archive/system.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Drives the archive tools that ship with CI images (`zip`, `unzip`, `tar`
//! with `gzip`/`bzip2`) as child processes.
//!
//! ## Architecture
//!
//! Command lines are built by the pure functions [`compress_invocation`] and
//! [`extract_invocation`]; [`SystemArchiver`] checks the tool is on `PATH`,
//! then runs the invocation through `common::process`.
//!
//! Entry names are always passed on stdin:
//!
//! | Format | Compress                                          | Extract                         |
//! |--------|---------------------------------------------------|---------------------------------|
//! | zip    | `zip <out> -@`                                    | `unzip -o <archive> -d <dest>`  |
//! | tar    | `tar --no-recursion --null -h -cf <out> -T -`     | `tar -xf <archive> -C <dest>`   |
//! | tgz    | `tar --no-recursion --null -h -czf <out> -T -`    | `tar -xzf <archive> -C <dest>`  |
//! | tbz2   | `tar --no-recursion --null -h -cjf <out> -T -`    | `tar -xjf <archive> -C <dest>`  |
//!
//! tar reads NUL-terminated names, which it takes verbatim: a name may hold a
//! newline or start with `-`. `zip -@` only reads one name per line, so names
//! containing a newline are left out of zip archives with a warning.
//!
//! `-h` makes tar store the files symlinks point to, matching zip's default.
//!
use super::{ArchiveFormat, ArchiveRequest, Archiver, ExtractionRequest};
use crate::common::{process, system};
use crate::core::error::{PackitError, Result};
use anyhow::Context;
use std::fs;
use tracing::{debug, info, warn};

/// End-of-central-directory record of a zip with no entries. `zip` refuses
/// to create one, so packit writes it directly.
const EMPTY_ZIP: [u8; 22] = [
    0x50, 0x4b, 0x05, 0x06, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Archiver backed by the OS archive tools.
#[derive(Debug, Default, Clone)]
pub struct SystemArchiver;

impl SystemArchiver {
    pub fn new() -> Self {
        Self
    }
}

impl Archiver for SystemArchiver {
    fn compress(&self, request: &ArchiveRequest) -> Result<()> {
        if request.entries.is_empty() && request.format == ArchiveFormat::Zip {
            info!("No entries to add; writing an empty zip archive");
            return fs::write(&request.output, EMPTY_ZIP).with_context(|| {
                format!("Failed to write empty archive {:?}", request.output)
            });
        }

        let invocation = compress_invocation(request);
        require_tool(&invocation.program)?;
        info!(
            "Creating {} archive {:?} with {} entries",
            request.format,
            request.output,
            request.entries.len()
        );
        let stdout = process::run(&invocation, &request.working_dir)?;
        log_tool_output(&invocation.program, &stdout);
        Ok(())
    }

    fn extract(&self, request: &ExtractionRequest) -> Result<()> {
        let invocation = extract_invocation(request);
        require_tool(&invocation.program)?;
        info!(
            "Extracting {:?} into {:?}",
            request.archive, request.destination
        );
        let stdout = process::run(&invocation, &request.destination)?;
        log_tool_output(&invocation.program, &stdout);
        Ok(())
    }
}

fn log_tool_output(program: &str, stdout: &str) {
    if !stdout.is_empty() {
        debug!("{} output:\n{}", program, stdout);
    }
}

fn require_tool(program: &str) -> Result<()> {
    match system::find_tool(program) {
        Some(path) => {
            debug!("Using {} at {:?}", program, path);
            Ok(())
        }
        None => Err(PackitError::ExternalCommand {
            cmd: program.to_string(),
            status: "not found".to_string(),
            output: format!("required tool '{}' was not found on PATH", program),
        }
        .into()),
    }
}

/// Builds the compression command for `request`.
pub fn compress_invocation(request: &ArchiveRequest) -> process::Invocation {
    match request.format {
        ArchiveFormat::Zip => process::Invocation::new("zip")
            .arg(&request.output)
            .arg("-@")
            .stdin(zip_names(&request.entries)),
        format => {
            let mut mode = String::from("-c");
            if let Some(flag) = format.tar_compression_flag() {
                mode.push(flag);
            }
            mode.push('f');
            let names: String = request
                .entries
                .iter()
                .map(|entry| format!("{}\0", entry))
                .collect();
            process::Invocation::new("tar")
                .arg("--no-recursion")
                .arg("--null")
                .arg("-h")
                .arg(mode)
                .arg(&request.output)
                .arg("-T")
                .arg("-")
                .stdin(names)
        }
    }
}

/// One name per line for `zip -@`.
fn zip_names(entries: &[String]) -> String {
    entries
        .iter()
        .filter(|entry| {
            let listable = !entry.contains('\n');
            if !listable {
                warn!("Leaving {:?} out of the zip archive: names with newlines are not supported", entry);
            }
            listable
        })
        .map(|entry| format!("{}\n", entry))
        .collect()
}

/// Builds the extraction command for `request`.
pub fn extract_invocation(request: &ExtractionRequest) -> process::Invocation {
    match request.format {
        ArchiveFormat::Zip => process::Invocation::new("unzip")
            .arg("-o")
            .arg(&request.archive)
            .arg("-d")
            .arg(&request.destination),
        format => {
            let mut mode = String::from("-x");
            if let Some(flag) = format.tar_compression_flag() {
                mode.push(flag);
            }
            mode.push('f');
            process::Invocation::new("tar")
                .arg(mode)
                .arg(&request.archive)
                .arg("-C")
                .arg(&request.destination)
        }
    }
}
