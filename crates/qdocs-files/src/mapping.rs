//! Source path to destination path and URL mapping.
//!
//! Source URIs are relative to the docs directory and always use `/` separators.
//! Documentation pages are mapped by their slug (the source URI without its
//! extension), so the mapping of a page never depends on which format it was
//! written in:
//!
//! | source             | `use_directory_urls = true` | `use_directory_urls = false` |
//! |--------------------|-----------------------------|------------------------------|
//! | `index.md`         | `index.html` (`./`)         | `index.html`                 |
//! | `README.md`        | `index.html` (`./`)         | `index.html`                 |
//! | `guide.md`         | `guide/index.html` (`guide/`) | `guide.html`               |
//! | `api/client.qmd`   | `api/client/index.html`     | `api/client.html`            |
//!
//! Every other file keeps its source URI as destination.

use std::path::{Component, Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Extensions recognized as markdown documentation pages.
pub const MARKDOWN_EXTENSIONS: &[&str] = &[".markdown", ".mdown", ".mkdn", ".mkd", ".md"];

/// Extensions served verbatim as static pages.
pub const STATIC_PAGE_EXTENSIONS: &[&str] = &[".html", ".htm", ".xml", ".json"];

/// Extensions treated as JavaScript assets.
pub const JAVASCRIPT_EXTENSIONS: &[&str] = &[".js", ".javascript", ".mjs"];

/// Characters left unescaped in URLs besides ASCII alphanumerics.
const URL_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Final component of a source URI.
pub fn file_name(src_uri: &str) -> &str {
    src_uri.rsplit_once('/').map_or(src_uri, |(_, name)| name)
}

/// Split a file name into stem and extension (including the dot).
///
/// Leading dots belong to the stem, so `.hidden` has no extension.
///
/// - `guide.md` -> (`guide`, `.md`)
/// - `archive.tar.gz` -> (`archive.tar`, `.gz`)
/// - `.hidden` -> (`.hidden`, ``)
pub fn split_extension(file_name: &str) -> (&str, &str) {
    let leading = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[leading..].rfind('.') {
        Some(dot) => file_name.split_at(leading + dot),
        None => (file_name, ""),
    }
}

/// Extension of a source URI, including the dot (empty if none).
pub fn extension(src_uri: &str) -> &str {
    split_extension(file_name(src_uri)).1
}

/// Page name of a source URI: its file stem, with `README` standing in for `index`.
pub fn stem(src_uri: &str) -> &str {
    let (stem, _) = split_extension(file_name(src_uri));
    if stem == "README" { "index" } else { stem }
}

/// Check whether a source URI names a markdown page (case-insensitive).
pub fn is_markdown(src_uri: &str) -> bool {
    let ext = extension(src_uri).to_ascii_lowercase();
    MARKDOWN_EXTENSIONS.contains(&ext.as_str())
}

/// Destination path for a documentation page, ignoring the source extension.
pub fn page_dest_path(src_uri: &str, use_directory_urls: bool) -> String {
    let parent = src_uri.rsplit_once('/').map_or("", |(parent, _)| parent);
    let name = stem(src_uri);
    let dest = if !use_directory_urls || name == "index" {
        format!("{name}.html")
    } else {
        format!("{name}/index.html")
    };
    join_uri(parent, &dest)
}

/// Destination path for any source file.
///
/// Pages go through [`page_dest_path`]; everything else is copied as-is.
pub fn dest_path(src_uri: &str, is_page: bool, use_directory_urls: bool) -> String {
    if is_page {
        page_dest_path(src_uri, use_directory_urls)
    } else {
        src_uri.to_owned()
    }
}

/// Public URL for a destination path, relative to the site root.
///
/// With directory URLs, `index.html` collapses to its directory (`guide/`, or
/// `./` at the root). The result is percent-encoded.
pub fn url(dest_path: &str, use_directory_urls: bool) -> String {
    let (dirname, filename) = dest_path.rsplit_once('/').unwrap_or(("", dest_path));
    let url = if use_directory_urls && filename == "index.html" {
        format!("{}/", if dirname.is_empty() { "." } else { dirname })
    } else {
        dest_path.to_owned()
    };
    utf8_percent_encode(&url, URL_SAFE).to_string()
}

/// Lexically normalize a path: drop `.` components and fold `..` into the parent.
///
/// Does not touch the filesystem, so symlinks are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Convert an OS-relative path into a `/`-separated source URI.
pub fn to_src_uri(rel_path: &Path) -> String {
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn join_uri(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}/{name}")
    }
}
