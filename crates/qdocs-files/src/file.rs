//! The file contract read by the page builder, and the native file record.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{FileError, FileErrorKind};
use crate::mapping;

/// A file taking part in a site build.
///
/// This is the complete surface the page builder reads from a file object. The
/// builder never inspects the concrete type: a plugin may replace a [`SourceFile`]
/// with its own implementation and the rest of the pipeline treats it exactly the
/// same, so destination paths, URLs and page classification must be consistent
/// with [`mapping`].
///
/// Content is exposed through methods rather than stored fields, since some
/// implementations produce it on demand.
pub trait File: fmt::Debug + Send + Sync {
    /// Source URI relative to the docs directory, `/`-separated (e.g. `api/client.qmd`).
    fn src_uri(&self) -> &str;

    /// Absolute path of the source file.
    fn abs_src_path(&self) -> &Path;

    /// Docs directory the file was discovered in.
    fn src_dir(&self) -> &Path;

    /// Site output directory.
    fn dest_dir(&self) -> &Path;

    /// Whether directory-style URLs (`slug/index.html`) are in use.
    fn use_directory_urls(&self) -> bool;

    /// Page name (file stem, `README` mapped to `index`).
    fn name(&self) -> &str;

    /// Source extension including the dot (e.g. `.md`), empty if none.
    fn extension(&self) -> &str;

    /// Destination path relative to the site directory, `/`-separated.
    fn dest_path(&self) -> &str;

    /// Absolute destination path inside the site directory.
    fn abs_dest_path(&self) -> &Path;

    /// Public URL relative to the site root.
    fn url(&self) -> &str;

    /// Whether the file is rendered as a documentation page.
    fn is_documentation_page(&self) -> bool;

    /// Whether the file is a page served verbatim (HTML, XML, JSON).
    fn is_static_page(&self) -> bool;

    /// Whether the file is copied as a media asset.
    fn is_media_file(&self) -> bool;

    /// Whether the file is a JavaScript asset.
    fn is_javascript(&self) -> bool;

    /// Whether the file is a stylesheet.
    fn is_css(&self) -> bool;

    /// Raw file content.
    ///
    /// Implementations may compute this on every call; callers that need the
    /// content more than once should keep the result.
    fn content_bytes(&self) -> Result<Vec<u8>, FileError>;

    /// File content decoded as UTF-8.
    fn content_string(&self) -> Result<String, FileError>;
}

/// A file found on disk during discovery.
///
/// All derived values are computed once at construction from the source URI and
/// the site layout, following [`mapping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    src_uri: String,
    abs_src_path: PathBuf,
    src_dir: PathBuf,
    dest_dir: PathBuf,
    use_directory_urls: bool,
    name: String,
    extension: String,
    is_page: bool,
    dest_path: String,
    abs_dest_path: PathBuf,
    url: String,
}

impl SourceFile {
    /// Create a file record.
    ///
    /// # Arguments
    ///
    /// * `src_uri` - Path relative to `src_dir` (backslashes are normalized to `/`)
    /// * `src_dir` - Docs directory
    /// * `dest_dir` - Site output directory
    /// * `use_directory_urls` - Directory-style (`slug/index.html`) or flat (`slug.html`) pages
    pub fn new(
        src_uri: impl Into<String>,
        src_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        use_directory_urls: bool,
    ) -> Self {
        let src_uri = src_uri.into().replace('\\', "/");
        let src_dir = src_dir.into();
        let dest_dir = dest_dir.into();

        let is_page = mapping::is_markdown(&src_uri);
        let dest_path = mapping::dest_path(&src_uri, is_page, use_directory_urls);
        let url = mapping::url(&dest_path, use_directory_urls);

        Self {
            abs_src_path: mapping::normalize(&src_dir.join(&src_uri)),
            abs_dest_path: mapping::normalize(&dest_dir.join(&dest_path)),
            name: mapping::stem(&src_uri).to_owned(),
            extension: mapping::extension(&src_uri).to_owned(),
            src_uri,
            src_dir,
            dest_dir,
            use_directory_urls,
            is_page,
            dest_path,
            url,
        }
    }

    fn extension_in(&self, extensions: &[&str]) -> bool {
        extensions.contains(&self.extension.to_ascii_lowercase().as_str())
    }
}

impl File for SourceFile {
    fn src_uri(&self) -> &str {
        &self.src_uri
    }

    fn abs_src_path(&self) -> &Path {
        &self.abs_src_path
    }

    fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    fn use_directory_urls(&self) -> bool {
        self.use_directory_urls
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn extension(&self) -> &str {
        &self.extension
    }

    fn dest_path(&self) -> &str {
        &self.dest_path
    }

    fn abs_dest_path(&self) -> &Path {
        &self.abs_dest_path
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn is_documentation_page(&self) -> bool {
        self.is_page
    }

    fn is_static_page(&self) -> bool {
        self.extension_in(mapping::STATIC_PAGE_EXTENSIONS)
    }

    fn is_media_file(&self) -> bool {
        !self.is_documentation_page() && !self.is_static_page()
    }

    fn is_javascript(&self) -> bool {
        self.extension_in(mapping::JAVASCRIPT_EXTENSIONS)
    }

    fn is_css(&self) -> bool {
        self.extension_in(&[".css"])
    }

    fn content_bytes(&self) -> Result<Vec<u8>, FileError> {
        std::fs::read(&self.abs_src_path).map_err(|e| FileError::io(e, &self.abs_src_path))
    }

    fn content_string(&self) -> Result<String, FileError> {
        String::from_utf8(self.content_bytes()?).map_err(|e| {
            FileError::new(FileErrorKind::Encoding)
                .with_path(&self.abs_src_path)
                .with_source(e)
        })
    }
}
