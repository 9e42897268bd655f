//! File error type shared by every [`File`](crate::File) implementation.

use std::path::PathBuf;

/// Semantic error categories for file access.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FileErrorKind {
    /// Source file does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Other I/O failure while reading the source.
    Io,
    /// Content had to be produced by an external renderer, and rendering failed.
    Render,
    /// Content is not valid text in the expected encoding.
    Encoding,
    /// Other/unknown error category.
    Other,
}

/// File error with semantic kind and implementation-specific source.
///
/// Implementations of [`File`](crate::File) that produce content in unusual ways
/// attach their own error as the source, so callers can recover it with
/// [`FileError::downcast_source`].
#[derive(Debug)]
pub struct FileError {
    /// Semantic error category.
    pub kind: FileErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FileError {
    /// Create a new file error.
    #[must_use]
    pub fn new(kind: FileErrorKind) -> Self {
        Self {
            kind,
            path: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a file error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => FileErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => FileErrorKind::PermissionDenied,
            _ => FileErrorKind::Io,
        };
        Self::new(kind).with_path(path).with_source(err)
    }
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "Kind: message (path: /foo/bar)"
        let kind_str = match self.kind {
            FileErrorKind::NotFound => "Not found",
            FileErrorKind::PermissionDenied => "Permission denied",
            FileErrorKind::Io => "I/O error",
            FileErrorKind::Render => "Render failed",
            FileErrorKind::Encoding => "Invalid encoding",
            FileErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}
