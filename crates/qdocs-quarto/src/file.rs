//! Quarto source file presented as a markdown documentation page.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use qdocs_files::{File, FileError, mapping};

use crate::error::RenderError;
use crate::settings::RenderSettings;

/// Wraps a discovered `.qmd` file so the page builder treats it as a markdown page.
///
/// Destination path and URL are computed once, with the same rules the host uses
/// for a `.md` file of the same slug. Content is rendered by the external renderer
/// on every request and never cached. Every other [`File`] method answers from the
/// wrapped file.
#[derive(Debug)]
pub struct QuartoFile {
    file: Arc<dyn File>,
    dest_path: String,
    abs_dest_path: PathBuf,
    url: String,
    settings: Arc<RenderSettings>,
}

impl QuartoFile {
    /// Wrap a file.
    ///
    /// # Arguments
    ///
    /// * `file` - File to wrap
    /// * `use_directory_urls` - Directory-style (`slug/index.html`) or flat (`slug.html`) output
    /// * `site_dir` - Site output directory
    /// * `settings` - Render settings of the current build
    pub fn new(
        file: Arc<dyn File>,
        use_directory_urls: bool,
        site_dir: &Path,
        settings: Arc<RenderSettings>,
    ) -> Self {
        let dest_path = mapping::page_dest_path(file.src_uri(), use_directory_urls);
        let abs_dest_path = mapping::normalize(&site_dir.join(&dest_path));
        let url = mapping::url(&dest_path, use_directory_urls);
        Self {
            file,
            dest_path,
            abs_dest_path,
            url,
            settings,
        }
    }

    /// The wrapped file.
    pub fn inner(&self) -> &Arc<dyn File> {
        &self.file
    }

    /// Run the renderer on the source file and return its output.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RenderFailure`] if the renderer cannot be started or
    /// exits unsuccessfully.
    pub fn render(&self) -> Result<Vec<u8>, RenderError> {
        let span = tracing::debug_span!(
            parent: &self.settings.span,
            "render",
            src = self.file.src_uri()
        );
        let _enter = span.enter();
        self.settings.renderer.render(self.file.abs_src_path())
    }

    /// Render the source file and decode the output as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RenderFailure`] as [`render`](Self::render) does, or
    /// [`RenderError::EncodingFailure`] if the output is not valid UTF-8.
    pub fn render_string(&self) -> Result<String, RenderError> {
        let text =
            String::from_utf8(self.render()?).map_err(|source| RenderError::EncodingFailure {
                path: self.file.abs_src_path().to_path_buf(),
                source,
            })?;
        tracing::trace!(src = self.file.src_uri(), content = %text, "Rendered markdown");
        Ok(text)
    }
}

impl File for QuartoFile {
    fn src_uri(&self) -> &str {
        self.file.src_uri()
    }

    fn abs_src_path(&self) -> &Path {
        self.file.abs_src_path()
    }

    fn src_dir(&self) -> &Path {
        self.file.src_dir()
    }

    fn dest_dir(&self) -> &Path {
        self.file.dest_dir()
    }

    fn use_directory_urls(&self) -> bool {
        self.file.use_directory_urls()
    }

    fn name(&self) -> &str {
        self.file.name()
    }

    fn extension(&self) -> &str {
        self.file.extension()
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
        true
    }

    fn is_static_page(&self) -> bool {
        false
    }

    fn is_media_file(&self) -> bool {
        self.file.is_media_file()
    }

    fn is_javascript(&self) -> bool {
        self.file.is_javascript()
    }

    fn is_css(&self) -> bool {
        self.file.is_css()
    }

    fn content_bytes(&self) -> Result<Vec<u8>, FileError> {
        Ok(self.render()?)
    }

    fn content_string(&self) -> Result<String, FileError> {
        Ok(self.render_string()?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use qdocs_files::{FileErrorKind, SourceFile};
    use tracing::Span;

    use super::*;
    use crate::renderer::Renderer;

    fn settings(renderer: impl Into<PathBuf>) -> Arc<RenderSettings> {
        Arc::new(RenderSettings::new(Renderer::new(renderer), Span::none()))
    }

    fn wrap(src_uri: &str, use_directory_urls: bool) -> QuartoFile {
        let file = Arc::new(SourceFile::new(
            src_uri,
            "/project/docs",
            "/project/site",
            use_directory_urls,
        ));
        QuartoFile::new(
            file,
            use_directory_urls,
            Path::new("/project/site"),
            settings("/nonexistent/quarto"),
        )
    }

    /// File with answers no [`SourceFile`] would give, to tell forwarding from recomputation.
    #[derive(Debug)]
    struct FakeFile;

    impl File for FakeFile {
        fn src_uri(&self) -> &str {
            "notebooks/model.qmd"
        }
        fn abs_src_path(&self) -> &Path {
            Path::new("/elsewhere/model.qmd")
        }
        fn src_dir(&self) -> &Path {
            Path::new("/elsewhere")
        }
        fn dest_dir(&self) -> &Path {
            Path::new("/public")
        }
        fn use_directory_urls(&self) -> bool {
            false
        }
        fn name(&self) -> &str {
            "custom-name"
        }
        fn extension(&self) -> &str {
            ".qmd"
        }
        fn dest_path(&self) -> &str {
            "fake/dest"
        }
        fn abs_dest_path(&self) -> &Path {
            Path::new("/public/fake/dest")
        }
        fn url(&self) -> &str {
            "fake/url"
        }
        fn is_documentation_page(&self) -> bool {
            false
        }
        fn is_static_page(&self) -> bool {
            true
        }
        fn is_media_file(&self) -> bool {
            true
        }
        fn is_javascript(&self) -> bool {
            true
        }
        fn is_css(&self) -> bool {
            true
        }
        fn content_bytes(&self) -> Result<Vec<u8>, FileError> {
            Ok(b"raw".to_vec())
        }
        fn content_string(&self) -> Result<String, FileError> {
            Ok("raw".to_owned())
        }
    }

    #[test]
    fn test_dest_path_directory_urls() {
        let file = wrap("reports/q3.qmd", true);

        assert_eq!(file.dest_path(), "reports/q3/index.html");
        assert_eq!(
            file.abs_dest_path(),
            Path::new("/project/site/reports/q3/index.html")
        );
        assert_eq!(file.url(), "reports/q3/");
    }

    #[test]
    fn test_dest_path_flat() {
        let file = wrap("reports/q3.qmd", false);

        assert_eq!(file.dest_path(), "reports/q3.html");
        assert_eq!(
            file.abs_dest_path(),
            Path::new("/project/site/reports/q3.html")
        );
        assert_eq!(file.url(), "reports/q3.html");
    }

    #[test]
    fn test_paths_match_native_markdown_page() {
        for use_directory_urls in [true, false] {
            for slug in ["index", "README", "guide", "a/b/c", "my notes/intro"] {
                let adapter = wrap(&format!("{slug}.qmd"), use_directory_urls);
                let native = SourceFile::new(
                    format!("{slug}.md"),
                    "/project/docs",
                    "/project/site",
                    use_directory_urls,
                );

                assert_eq!(adapter.dest_path(), native.dest_path());
                assert_eq!(adapter.abs_dest_path(), native.abs_dest_path());
                assert_eq!(adapter.url(), native.url());
            }
        }
    }

    #[test]
    fn test_is_documentation_page_overrides_wrapped() {
        let file = wrap("analysis.qmd", true);

        assert!(!file.inner().is_documentation_page());
        assert!(file.is_documentation_page());
        assert!(!file.is_static_page());
    }

    #[test]
    fn test_delegates_to_wrapped_file() {
        let inner: Arc<dyn File> = Arc::new(FakeFile);
        let file = QuartoFile::new(
            Arc::clone(&inner),
            true,
            Path::new("/site"),
            settings("/nonexistent/quarto"),
        );

        assert_eq!(file.src_uri(), inner.src_uri());
        assert_eq!(file.abs_src_path(), inner.abs_src_path());
        assert_eq!(file.src_dir(), inner.src_dir());
        assert_eq!(file.dest_dir(), inner.dest_dir());
        assert_eq!(file.use_directory_urls(), inner.use_directory_urls());
        assert_eq!(file.name(), "custom-name");
        assert_eq!(file.extension(), inner.extension());
        assert_eq!(file.is_media_file(), inner.is_media_file());
        assert_eq!(file.is_javascript(), inner.is_javascript());
        assert_eq!(file.is_css(), inner.is_css());
        assert!(Arc::ptr_eq(file.inner(), &inner));
    }

    #[test]
    fn test_overrides_do_not_read_wrapped_paths() {
        let file = QuartoFile::new(
            Arc::new(FakeFile),
            true,
            Path::new("/site"),
            settings("/nonexistent/quarto"),
        );

        assert_eq!(file.dest_path(), "notebooks/model/index.html");
        assert_eq!(file.abs_dest_path(), Path::new("/site/notebooks/model/index.html"));
        assert_eq!(file.url(), "notebooks/model/");
        assert!(file.is_documentation_page());
        assert!(!file.is_static_page());
    }

    #[test]
    fn test_content_missing_renderer_is_render_error() {
        let file = wrap("analysis.qmd", true);

        let err = file.content_bytes().unwrap_err();

        assert_eq!(err.kind, FileErrorKind::Render);
        assert_eq!(
            err.path.as_deref(),
            Some(Path::new("/project/docs/analysis.qmd"))
        );
    }

    #[cfg(unix)]
    mod unix {
        use pretty_assertions::assert_eq;

        use super::*;
        use crate::error::RenderStatus;
        use crate::testing::{call_count, counting_renderer, stub_renderer};

        fn wrap_with(renderer: &Path, docs: &Path) -> QuartoFile {
            let file = Arc::new(SourceFile::new("report.qmd", docs, "/site", true));
            QuartoFile::new(file, true, Path::new("/site"), settings(renderer))
        }

        #[test]
        fn test_content_string_returns_rendered_text() {
            let dir = tempfile::tempdir().unwrap();
            let stub = stub_renderer(dir.path(), r"printf '# Title\n'");
            let file = wrap_with(&stub, dir.path());

            assert_eq!(file.content_string().unwrap(), "# Title\n");
            assert_eq!(file.content_bytes().unwrap(), b"# Title\n");
        }

        #[test]
        fn test_renderer_receives_absolute_source_path() {
            let dir = tempfile::tempdir().unwrap();
            let stub = stub_renderer(dir.path(), r#"printf '%s' "$2""#);
            let file = wrap_with(&stub, dir.path());

            assert_eq!(
                file.content_string().unwrap(),
                dir.path().join("report.qmd").to_string_lossy()
            );
        }

        #[test]
        fn test_content_is_not_cached() {
            let dir = tempfile::tempdir().unwrap();
            let stub = counting_renderer(dir.path(), r"printf '# Title\n'");
            let file = wrap_with(&stub, dir.path());

            file.content_bytes().unwrap();
            file.content_bytes().unwrap();

            assert_eq!(call_count(dir.path()), 2);
        }

        #[test]
        fn test_content_string_renders_each_call() {
            let dir = tempfile::tempdir().unwrap();
            let stub = counting_renderer(dir.path(), r#"wc -l < "$(dirname "$0")/count""#);
            let file = wrap_with(&stub, dir.path());

            let first = file.content_string().unwrap();
            let second = file.content_string().unwrap();

            assert_eq!(first.trim(), "1");
            assert_eq!(second.trim(), "2");
        }

        #[test]
        fn test_render_failure_carries_diagnostics() {
            let dir = tempfile::tempdir().unwrap();
            let stub = stub_renderer(dir.path(), "echo 'ERROR: bad front matter' >&2\nexit 1");
            let file = wrap_with(&stub, dir.path());

            let err = file.content_bytes().unwrap_err();

            assert_eq!(err.kind, FileErrorKind::Render);
            match err.downcast_source::<RenderError>() {
                Some(RenderError::RenderFailure { status, stderr, .. }) => {
                    assert_eq!(*status, RenderStatus::Exited(1));
                    assert_eq!(stderr, "ERROR: bad front matter\n");
                }
                other => panic!("Expected RenderFailure, got {other:?}"),
            }
        }

        #[test]
        fn test_render_string_invalid_utf8() {
            let dir = tempfile::tempdir().unwrap();
            let stub = stub_renderer(dir.path(), r"printf '\377\376'");
            let file = wrap_with(&stub, dir.path());

            let err = file.render_string().unwrap_err();
            assert!(matches!(err, RenderError::EncodingFailure { .. }));

            let file_err = file.content_string().unwrap_err();
            assert_eq!(file_err.kind, FileErrorKind::Encoding);
        }
    }
}
