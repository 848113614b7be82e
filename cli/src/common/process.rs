//! # packit Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Runs external programs (`zip`, `unzip`, `tar`) synchronously and maps
//! their outcome into packit's error system. A command is described by an
//! [`Invocation`]: program name, arguments, and optional text to write to the
//! child's stdin (used to feed entry lists to the archivers).
//!
//! ## Architecture
//!
//! - stdout and stderr are always captured, never inherited. stdout is
//!   handed back to the caller; stderr of a successful run is logged.
//! - A non-zero exit becomes `PackitError::ExternalCommand` carrying the
//!   command line, the exit status and the captured stderr.
//! - A program that cannot be spawned (usually: not installed) is reported
//!   with context naming the program.
//!
//! ## Usage
//!
//! ```rust
//! let inv = Invocation::new("tar").arg("-xf").arg(&archive).arg("-C").arg(&dest);
//! let stdout = process::run(&inv, &workspace)?;
//! debug!("tar said: {}", stdout);
//! ```
//!
use crate::core::error::{PackitError, Result};
use anyhow::Context;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, warn};

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
    pub stdin: Option<String>,
}

impl Invocation {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Text written to the child's stdin, which is then closed.
    pub fn stdin(mut self, input: String) -> Self {
        self.stdin = Some(input);
        self
    }

    /// Arguments as lossy strings, handy for assertions and logs.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.args_lossy() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// # Run Command (`run`)
///
/// Executes `invocation` with `cwd` as its working directory, waits for it and
/// returns its trimmed stdout.
///
/// ## Errors
///
/// - The program could not be started (missing binary, permissions).
/// - Writing to the child's stdin failed.
/// - The program exited unsuccessfully (`PackitError::ExternalCommand`).
pub fn run(invocation: &Invocation, cwd: &Path) -> Result<String> {
    debug!("Executing `{}` in {:?}", invocation, cwd);

    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(if invocation.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

    let mut child = command
        .spawn()
        .with_context(|| format!("Failed to launch '{}'; is it installed?", invocation.program))?;

    // Written from a separate thread: the child may fill its stdout pipe
    // before it has consumed all of stdin.
    let writer = match &invocation.stdin {
        Some(input) => {
            let mut pipe = child
                .stdin
                .take()
                .context("Child process stdin was not captured")?;
            let input = input.clone();
            Some(thread::spawn(move || pipe.write_all(input.as_bytes())))
        }
        None => None,
    };

    let output = child
        .wait_with_output()
        .with_context(|| format!("Failed to wait for '{}'", invocation.program))?;

    if let Some(handle) = writer {
        match handle.join() {
            Ok(Ok(())) => {}
            // A child that exits early closes its end; its exit status says more.
            Ok(Err(e)) => debug!("Writing stdin of '{}' stopped early: {}", invocation.program, e),
            Err(_) => anyhow::bail!("stdin writer for '{}' panicked", invocation.program),
        }
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
        return Err(PackitError::ExternalCommand {
            cmd: invocation.to_string(),
            status: output.status.to_string(),
            output: stderr,
        }
        .into());
    }

    if !stderr.is_empty() {
        warn!("Command stderr:\n{}", stderr);
    }
    Ok(stdout)
}
