//! # packit Compress Integration Tests
//!
//! File: cli/tests/compress.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/packit
//!
//! ## Overview
//!
//! Runs `COMMAND=compress` end to end and reads the produced archives back
//! with the `tar` and `flate2` crates. Tar formats are used so the contents
//! can be checked without extra tools; every test is skipped when `tar` is
//! not installed.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::path::Path;

fn compress(ws: &Path, source: &str, format: &str) -> Command {
    let mut cmd = packit_in(ws);
    cmd.env("COMMAND", "compress")
        .env("SOURCE", source)
        .env("FORMAT", format);
    cmd
}

fn skip_without_tar() -> bool {
    if tool_available("tar") {
        return false;
    }
    eprintln!("skipping: tar not installed");
    true
}

fn skip_without_zip() -> bool {
    if tool_available("zip") && tool_available("unzip") {
        return false;
    }
    eprintln!("skipping: zip/unzip not installed");
    true
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

/// # Test Directory With Root (`test_directory_with_root`)
///
/// `test2/` archived with `INCLUDEROOT=true` lands next to the source and
/// wraps its contents in `test2/`.
#[test]
fn test_directory_with_root() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "test2/test2.txt", "Test content for test2");

    compress(&ws, "test2", "tar")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compression Results"));

    let archive = ws.join("test2.tar");
    assert_eq!(
        read_tar(&archive),
        pairs(&[("test2/test2.txt", "Test content for test2")])
    );
    assert_eq!(tar_entry_names(&archive), vec!["test2/", "test2/test2.txt"]);
    assert_eq!(
        published_file_path(&ws),
        Some(archive.display().to_string())
    );
}

/// With `INCLUDEROOT=false` the archive goes inside the source and holds the
/// contents at its root.
#[test]
fn test_directory_without_root() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "test2/test2.txt", "Test content for test2");

    compress(&ws, "test2", "tgz")
        .env("INCLUDEROOT", "false")
        .assert()
        .success();

    let archive = ws.join("test2/test2.tgz");
    assert_eq!(
        read_tar(&archive),
        pairs(&[("test2.txt", "Test content for test2")])
    );
    assert!(!ws.join("test2.tgz").exists());
}

/// Re-running produces the same entries; the old archive is replaced, not
/// archived into the new one.
#[test]
fn test_rerun_is_idempotent() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "site/index.html", "<html/>");
    write_file(&ws, "site/css/app.css", "body{}");

    for _ in 0..2 {
        compress(&ws, "site", "tar")
            .env("INCLUDEROOT", "false")
            .assert()
            .success();
        assert_eq!(
            tar_entry_names(&ws.join("site/site.tar")),
            vec!["css/", "css/app.css", "index.html"]
        );
    }
}

#[test]
fn test_zip_directory_with_root() {
    if skip_without_zip() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "test2/test2.txt", "Test content for test2");

    compress(&ws, "test2", "zip").assert().success();

    let archive = ws.join("test2.zip");
    assert_eq!(zip_entry_names(&archive), vec!["test2/", "test2/test2.txt"]);
    assert_eq!(published_file_path(&ws), Some(archive.display().to_string()));
}

/// The zip lands inside `test2/` with `test2.txt` as its only entry, also on
/// a second run.
#[test]
fn test_zip_directory_without_root() {
    if skip_without_zip() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "test2/test2.txt", "Test content for test2");

    for _ in 0..2 {
        compress(&ws, "test2", "zip")
            .env("INCLUDEROOT", "false")
            .assert()
            .success();
        assert_eq!(zip_entry_names(&ws.join("test2/test2.zip")), vec!["test2.txt"]);
    }
    assert!(!ws.join("test2.zip").exists());
}

#[test]
fn test_dest_and_destfilename() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "test2/test2.txt", "x");

    compress(&ws, "test2", "tar")
        .env("DEST", "artifacts/out")
        .env("DESTFILENAME", "release.TAR")
        .assert()
        .success();

    let archive = ws.join("artifacts/out/release.TAR");
    assert_eq!(read_tar(&archive), pairs(&[("test2/test2.txt", "x")]));
}

#[test]
fn test_single_file_source() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "dist/app.js", "console.log(1)");

    compress(&ws, "dist/app.js", "tgz").assert().success();

    assert_eq!(
        read_tar(&ws.join("dist/app.tgz")),
        pairs(&[("app.js", "console.log(1)")])
    );
}

/// # Test Exclusions (`test_exclude_forms`)
///
/// Exact name, glob, directory name and trailing-slash forms.
#[test]
fn test_exclude_forms() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "proj/keep.txt", "keep");
    write_file(&ws, "proj/secret.env", "s");
    write_file(&ws, "proj/logs/debug.log", "d");
    write_file(&ws, "proj/node_modules/pkg/index.js", "n");
    write_file(&ws, "proj/cache/blob.bin", "c");

    compress(&ws, "proj", "tar")
        .env("EXCLUDE", "secret.env *.log node_modules cache/")
        .assert()
        .success();

    assert_eq!(
        read_tar(&ws.join("proj.tar")),
        pairs(&[("proj/keep.txt", "keep")])
    );
}

/// # Test Glob Collisions (`test_glob_flatten_collisions`)
///
/// `a/x.log` and `b/x.log` flatten to `x.log` and `x_1.log`.
#[test]
fn test_glob_flatten_collisions() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "b/x.log", "from b");
    write_file(&ws, "a/x.log", "from a");
    write_file(&ws, "a/notes.txt", "ignored");

    compress(&ws, "**/*.log", "tgz")
        .env("INCLUDEROOT", "false")
        .assert()
        .success();

    let archive = ws.join("archive.tgz");
    assert_eq!(
        read_tar(&archive),
        pairs(&[("x.log", "from a"), ("x_1.log", "from b")])
    );
    assert_eq!(
        published_file_path(&ws),
        Some(archive.display().to_string())
    );
}

/// A glob archive written into the workspace is not picked up by the next
/// run of the same glob.
#[test]
fn test_glob_rerun_is_idempotent() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    let (_out_dir, out) = workspace();
    write_file(&ws, "a.txt", "a");

    for _ in 0..2 {
        compress(&ws, "**/*", "tar")
            .env("INCLUDEROOT", "false")
            .env("GITHUB_OUTPUT", output_file(&out))
            .assert()
            .success();
        assert_eq!(tar_entry_names(&ws.join("archive.tar")), vec!["a.txt"]);
    }
}

/// A glob with a literal directory is named after it and, with the root
/// included, wrapped in it.
#[test]
fn test_glob_named_after_literal_dir() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "build/logs/one.log", "1");
    write_file(&ws, "build/logs/two.log", "2");

    compress(&ws, "build/logs/*.log", "tar").assert().success();

    assert_eq!(
        read_tar(&ws.join("logs.tar")),
        pairs(&[("logs/one.log", "1"), ("logs/two.log", "2")])
    );
}

#[test]
fn test_bare_glob_name_is_configurable() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "docs/a.doc", "a");

    compress(&ws, "**/*.doc", "tar")
        .env("GLOBARCHIVENAME", "documents")
        .assert()
        .success();

    assert_eq!(
        read_tar(&ws.join("documents.tar")),
        pairs(&[("documents/a.doc", "a")])
    );
}

/// # Test Preserve With Strip Prefix (`test_glob_preserve_strip_prefix`)
///
/// Paths under the prefix lose it; others are kept unchanged.
#[test]
fn test_glob_preserve_strip_prefix() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "out/a/one.txt", "1");
    write_file(&ws, "out/b/two.txt", "2");
    write_file(&ws, "other/three.txt", "3");

    compress(&ws, "{out,other}/**/*.txt", "tar")
        .env("INCLUDEROOT", "false")
        .env("PRESERVEGLOBSTRUCTURE", "true")
        .env("STRIPPREFIX", "out/")
        .env("DESTFILENAME", "bundle")
        .assert()
        .success();

    assert_eq!(
        read_tar(&ws.join("bundle.tar")),
        pairs(&[("a/one.txt", "1"), ("b/two.txt", "2"), ("other/three.txt", "3")])
    );
}

#[test]
fn test_glob_exclusions() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    write_file(&ws, "logs/app.log", "a");
    write_file(&ws, "logs/old/app.log", "o");
    write_file(&ws, "logs/debug.log", "d");

    compress(&ws, "logs/**/*.log", "tar")
        .env("EXCLUDE", "old/ debug.log")
        .env("INCLUDEROOT", "false")
        .assert()
        .success();

    assert_eq!(read_tar(&ws.join("logs.tar")), pairs(&[("app.log", "a")]));
}

/// # Test No Match (`test_no_match_strict_and_lenient`)
///
/// Strict mode fails the step; lenient mode warns, publishes an empty
/// `file_path` and produces no archive.
#[test]
fn test_no_match_strict_and_lenient() {
    let (_dir, ws) = workspace();
    write_file(&ws, "readme.md", "x");

    compress(&ws, "**/*.doc", "tar")
        .assert()
        .failure()
        .stdout(predicate::str::contains("No files matched pattern '**/*.doc'"));
    assert_eq!(published_file_path(&ws), None);

    compress(&ws, "**/*.doc", "tar")
        .env("FAIL_ON_ERROR", "false")
        .assert()
        .success()
        .stdout(predicate::str::contains("No files matched"));
    assert_eq!(published_file_path(&ws), Some(String::new()));
    assert!(!ws.join("archive.tar").exists());
}

#[test]
fn test_missing_source_strict_and_lenient() {
    let (_dir, ws) = workspace();

    compress(&ws, "nope", "zip")
        .assert()
        .failure()
        .stdout(predicate::str::contains("does not exist"));

    compress(&ws, "nope", "zip")
        .env("FAIL_ON_ERROR", "false")
        .assert()
        .success();
    assert_eq!(published_file_path(&ws), Some(String::new()));
}

/// A file whose archive name is its own name is refused, not overwritten.
#[test]
fn test_file_source_named_like_its_archive_is_kept() {
    let (_dir, ws) = workspace();
    write_file(&ws, "bundle.tar", "precious user data");

    compress(&ws, "bundle.tar", "tar")
        .assert()
        .failure()
        .stdout(predicate::str::contains("is the source itself"));

    assert_eq!(
        std::fs::read_to_string(ws.join("bundle.tar")).unwrap(),
        "precious user data"
    );
    assert_eq!(published_file_path(&ws), None);
}

/// An empty directory still produces an archive.
#[test]
fn test_empty_directory_produces_archive() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    std::fs::create_dir_all(ws.join("empty")).unwrap();

    compress(&ws, "empty", "tar")
        .assert()
        .success()
        .stdout(predicate::str::contains("contains no files"));
    assert_eq!(tar_entry_names(&ws.join("empty.tar")), vec!["empty/"]);
}

/// Links into trees outside the matched directory are followed; broken
/// links are skipped.
#[cfg(unix)]
#[test]
fn test_glob_follows_symlinks() {
    if skip_without_tar() {
        return;
    }
    let (_dir, ws) = workspace();
    let (_outside_dir, outside) = workspace();
    write_file(&outside, "real/gen.txt", "generated");
    write_file(&ws, "bazel-out/own.txt", "own");
    std::os::unix::fs::symlink(outside.join("real"), ws.join("bazel-out/bin")).unwrap();
    std::os::unix::fs::symlink(ws.join("gone"), ws.join("bazel-out/broken.txt")).unwrap();

    compress(&ws, "bazel-out/**/*.txt", "tar")
        .env("INCLUDEROOT", "false")
        .env("PRESERVEGLOBSTRUCTURE", "true")
        .env("STRIPPREFIX", "bazel-out")
        .assert()
        .success();

    assert_eq!(
        read_tar(&ws.join("bazel-out.tar")),
        pairs(&[("bin/gen.txt", "generated"), ("own.txt", "own")])
    );
}
