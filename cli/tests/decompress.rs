//! # packit Decompress Integration Tests
//!
//! File: cli/tests/decompress.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Round trips through the binary: compress a directory, extract the archive
//! into a fresh directory, compare contents. Formats whose tools are missing
//! are skipped.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn run(ws: &Path, command: &str, source: &str, format: &str) -> Command {
    let mut cmd = packit_in(ws);
    cmd.env("COMMAND", command)
        .env("SOURCE", source)
        .env("FORMAT", format);
    cmd
}

fn tools_for(format: &str) -> &'static [&'static str] {
    match format {
        "zip" => &["zip", "unzip"],
        "tgz" => &["tar", "gzip"],
        "tbz2" => &["tar", "bzip2"],
        _ => &["tar"],
    }
}

fn round_trip(format: &str) {
    if let Some(missing) = tools_for(format).iter().find(|t| !tool_available(t)) {
        eprintln!("skipping {}: {} not installed", format, missing);
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "test2/test2.txt", "Test content for test2");
    write_file(&ws, "test2/nested/deeper.txt", "deeper");

    run(&ws, "compress", "test2", format).assert().success();
    let archive = format!("test2.{}", format);
    assert!(ws.join(&archive).is_file());

    run(&ws, "decompress", &archive, format)
        .env("DEST", "out")
        .assert()
        .success()
        .stdout(predicate::str::contains("Decompression Results"))
        .stdout(predicate::str::contains("test2/ (directory)"));

    let out = ws.join("out");
    assert_eq!(
        fs::read_to_string(out.join("test2/test2.txt")).unwrap(),
        "Test content for test2"
    );
    assert_eq!(
        fs::read_to_string(out.join("test2/nested/deeper.txt")).unwrap(),
        "deeper"
    );
    assert_eq!(published_file_path(&ws), Some(out.display().to_string()));
}

#[test]
fn test_round_trip_zip() {
    round_trip("zip");
}

#[test]
fn test_round_trip_tar() {
    round_trip("tar");
}

#[test]
fn test_round_trip_tgz() {
    round_trip("tgz");
}

#[test]
fn test_round_trip_tbz2() {
    round_trip("tbz2");
}

/// Without `DEST` the archive is extracted into the workspace.
#[test]
fn test_extract_into_workspace() {
    if !tool_available("tar") {
        eprintln!("skipping: tar not installed");
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "site/index.html", "<html/>");
    run(&ws, "compress", "site", "tar")
        .env("DEST", "dist")
        .assert()
        .success();
    fs::remove_dir_all(ws.join("site")).unwrap();

    run(&ws, "decompress", "dist/site.tar", "tar")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(ws.join("site/index.html")).unwrap(), "<html/>");
    assert_eq!(published_file_path(&ws), Some(ws.display().to_string()));
}

/// Existing files are overwritten and unrelated ones left alone.
#[test]
fn test_extract_over_existing_content() {
    if !tool_available("tar") {
        eprintln!("skipping: tar not installed");
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "test2/test2.txt", "new");
    run(&ws, "compress", "test2", "tar").assert().success();

    write_file(&ws, "out/test2/test2.txt", "old");
    write_file(&ws, "out/unrelated.txt", "stay");
    run(&ws, "decompress", "test2.tar", "tar")
        .env("DEST", "out")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(ws.join("out/test2/test2.txt")).unwrap(), "new");
    assert_eq!(fs::read_to_string(ws.join("out/unrelated.txt")).unwrap(), "stay");
}

#[test]
fn test_missing_archive_strict_and_lenient() {
    let (_dir, ws) = workspace();

    run(&ws, "decompress", "missing.zip", "zip")
        .assert()
        .failure()
        .stdout(predicate::str::contains("does not exist"));

    run(&ws, "decompress", "missing.zip", "zip")
        .env("FAIL_ON_ERROR", "false")
        .assert()
        .success();
    assert_eq!(published_file_path(&ws), Some(String::new()));
}

/// A corrupt archive is an archiver failure.
#[test]
fn test_corrupt_archive_fails() {
    if !tool_available("tar") {
        eprintln!("skipping: tar not installed");
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "broken.tgz", "this is not gzip");

    run(&ws, "decompress", "broken.tgz", "tgz")
        .env("DEST", "out")
        .assert()
        .failure()
        .stdout(predicate::str::contains("External command failed"));
}
