//! Ordered file collection passed between build phases.

use std::sync::Arc;

use crate::file::File;

/// Ordered collection of the files taking part in a build.
///
/// Entries are shared handles: building a new collection from an existing one
/// clones the `Arc`, not the file, so an entry that is passed through keeps its
/// identity (`Arc::ptr_eq`).
#[derive(Debug, Default, Clone)]
pub struct Files {
    files: Vec<Arc<dyn File>>,
}

impl Files {
    /// Create a collection from file handles, keeping their order.
    #[must_use]
    pub fn new(files: Vec<Arc<dyn File>>) -> Self {
        Self { files }
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all files in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn File>> {
        self.files.iter()
    }

    /// Get the file at a position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<dyn File>> {
        self.files.get(index)
    }

    /// Find a file by its source URI.
    #[must_use]
    pub fn get_by_src_uri(&self, src_uri: &str) -> Option<&Arc<dyn File>> {
        self.files.iter().find(|f| f.src_uri() == src_uri)
    }

    /// Iterate over files rendered as documentation pages.
    pub fn documentation_pages(&self) -> impl Iterator<Item = &Arc<dyn File>> {
        self.files.iter().filter(|f| f.is_documentation_page())
    }

    /// Iterate over static pages.
    pub fn static_pages(&self) -> impl Iterator<Item = &Arc<dyn File>> {
        self.files.iter().filter(|f| f.is_static_page())
    }

    /// Iterate over media files.
    pub fn media_files(&self) -> impl Iterator<Item = &Arc<dyn File>> {
        self.files.iter().filter(|f| f.is_media_file())
    }
}

impl FromIterator<Arc<dyn File>> for Files {
    fn from_iter<I: IntoIterator<Item = Arc<dyn File>>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Files {
    type Item = &'a Arc<dyn File>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn File>>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::SourceFile;

    fn sample() -> Files {
        ["index.md", "guide.md", "analysis.qmd", "img/logo.png", "embed.html"]
            .into_iter()
            .map(|uri| Arc::new(SourceFile::new(uri, "/docs", "/site", true)) as Arc<dyn File>)
            .collect()
    }

    #[test]
    fn test_files_preserve_order() {
        let files = sample();
        let uris: Vec<_> = files.iter().map(|f| f.src_uri()).collect();

        assert_eq!(
            uris,
            vec!["index.md", "guide.md", "analysis.qmd", "img/logo.png", "embed.html"]
        );
        assert_eq!(files.len(), 5);
        assert!(!files.is_empty());
    }

    #[test]
    fn test_files_get_by_src_uri() {
        let files = sample();

        assert_eq!(files.get_by_src_uri("guide.md").unwrap().url(), "guide/");
        assert!(files.get_by_src_uri("missing.md").is_none());
    }

    #[test]
    fn test_files_classification_views() {
        let files = sample();

        assert_eq!(files.documentation_pages().count(), 2);
        assert_eq!(files.static_pages().count(), 1);
        assert_eq!(files.media_files().count(), 2);
    }

    #[test]
    fn test_files_clone_shares_entries() {
        let files = sample();
        let copy = files.clone();

        for (a, b) in files.iter().zip(&copy) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_files_default_is_empty() {
        let files = Files::default();

        assert!(files.is_empty());
        assert!(files.get(0).is_none());
    }
}
