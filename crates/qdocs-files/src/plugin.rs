//! Build hooks and the site layout they receive.

use std::path::PathBuf;

use crate::files::Files;

/// Resolved site layout shared by every build phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    /// Docs (source) directory.
    pub docs_dir: PathBuf,
    /// Site (output) directory.
    pub site_dir: PathBuf,
    /// Directory-style page URLs (`slug/`) instead of flat ones (`slug.html`).
    pub use_directory_urls: bool,
}

impl SiteLayout {
    /// Create a site layout.
    pub fn new(
        docs_dir: impl Into<PathBuf>,
        site_dir: impl Into<PathBuf>,
        use_directory_urls: bool,
    ) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            site_dir: site_dir.into(),
            use_directory_urls,
        }
    }
}

/// Build-time hooks.
///
/// A build calls [`on_config`](Plugin::on_config) exactly once before any file is
/// processed, then [`on_files`](Plugin::on_files) once with the full discovered
/// collection. Content is requested from the returned files later, after all
/// hooks have run.
pub trait Plugin {
    /// Error returned by the hooks. Errors abort the build.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve plugin configuration for this build.
    fn on_config(&mut self, site: &SiteLayout) -> Result<(), Self::Error>;

    /// Return the collection the rest of the build will use.
    ///
    /// Must not modify `files`; entries the plugin does not replace should be
    /// passed through as the same handles.
    fn on_files(&self, files: &Files, site: &SiteLayout) -> Result<Files, Self::Error>;
}
