//! File discovery by walking the docs directory.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::FileError;
use crate::file::{File, SourceFile};
use crate::files::Files;
use crate::mapping;
use crate::plugin::SiteLayout;

/// Walk the docs directory and build a [`SourceFile`] for every file.
///
/// Hidden files and directories (leading `.`) are skipped. Symlinked directories
/// are followed, each real directory at most once. Within a directory,
/// files come before subdirectories, `index.*` and `README.*` come first, and
/// the rest is sorted by name, so discovery order is stable across platforms.
///
/// # Errors
///
/// Returns [`FileError`] if the docs directory or one of its subdirectories
/// cannot be read.
pub fn discover(layout: &SiteLayout) -> Result<Files, FileError> {
    let mut files: Vec<Arc<dyn File>> = Vec::new();
    walk(layout, &layout.docs_dir, &mut HashSet::new(), &mut files)?;
    tracing::debug!(
        docs_dir = %layout.docs_dir.display(),
        count = files.len(),
        "Discovered files"
    );
    Ok(Files::new(files))
}

fn walk(
    layout: &SiteLayout,
    dir: &Path,
    visited: &mut HashSet<PathBuf>,
    files: &mut Vec<Arc<dyn File>>,
) -> Result<(), FileError> {
    if let Ok(real) = fs::canonicalize(dir)
        && !visited.insert(real)
    {
        return Ok(());
    }
    let entries = fs::read_dir(dir).map_err(|e| FileError::io(e, dir))?;

    let mut names = Vec::new();
    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FileError::io(e, dir))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let is_dir = fs::metadata(entry.path()).is_ok_and(|m| m.is_dir());
        if is_dir {
            subdirs.push(entry.path());
        } else {
            names.push((entry.path(), name));
        }
    }

    names.sort_by(|(_, a), (_, b)| sort_key(a).cmp(&sort_key(b)));
    subdirs.sort();

    for (path, _) in names {
        let Ok(rel_path) = path.strip_prefix(&layout.docs_dir) else {
            continue;
        };
        files.push(Arc::new(SourceFile::new(
            mapping::to_src_uri(rel_path),
            &layout.docs_dir,
            &layout.site_dir,
            layout.use_directory_urls,
        )));
    }

    for subdir in subdirs {
        walk(layout, &subdir, visited, files)?;
    }

    Ok(())
}

/// Index pages first, then by name.
fn sort_key(name: &str) -> (bool, &str) {
    let (stem, _) = mapping::split_extension(name);
    (!matches!(stem, "index" | "README"), name)
}
