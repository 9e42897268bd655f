//! Parallel content rendering for a whole file collection.

use std::sync::Arc;

use qdocs_files::{File, FileError, Files};
use rayon::prelude::*;

use crate::error::RenderError;

/// Content of one documentation page.
#[derive(Debug)]
pub struct RenderedPage {
    /// Source URI of the page.
    pub src_uri: String,
    /// Destination path of the page.
    pub dest_path: String,
    /// Page content, or the error that prevented it.
    pub content: Result<String, FileError>,
}

/// Read the content of every documentation page using `jobs` threads.
///
/// Results come back in collection order. A failed page does not stop the others;
/// its error is stored in [`RenderedPage::content`].
///
/// # Arguments
/// * `files` - Collection returned by the plugin hooks
/// * `jobs` - Number of parallel renders (`0` lets rayon decide)
///
/// # Errors
///
/// Returns [`RenderError::ThreadPool`] if the thread pool cannot be created.
pub fn render_pages(files: &Files, jobs: usize) -> Result<Vec<RenderedPage>, RenderError> {
    let pages: Vec<&Arc<dyn File>> = files.documentation_pages().collect();
    if pages.is_empty() {
        return Ok(Vec::new());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    tracing::info!(pages = pages.len(), jobs = pool.current_num_threads(), "Rendering pages");

    Ok(pool.install(|| {
        pages
            .par_iter()
            .map(|file| RenderedPage {
                src_uri: file.src_uri().to_owned(),
                dest_path: file.dest_path().to_owned(),
                content: file.content_string(),
            })
            .collect()
    }))
}
