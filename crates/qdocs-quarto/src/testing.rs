//! Stub renderers for tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable `quarto` shell script into `dir` and return its path.
pub(crate) fn stub_renderer(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("quarto");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Stub that appends one line to `count` next to itself on every call.
pub(crate) fn counting_renderer(dir: &Path, body: &str) -> PathBuf {
    stub_renderer(
        dir,
        &format!("echo call >> \"$(dirname \"$0\")/count\"\n{body}"),
    )
}

/// Number of calls recorded by [`counting_renderer`].
pub(crate) fn call_count(dir: &Path) -> usize {
    fs::read_to_string(dir.join("count"))
        .map(|s| s.lines().count())
        .unwrap_or(0)
}
