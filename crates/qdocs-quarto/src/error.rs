//! Render error types.

use std::path::PathBuf;
use std::string::FromUtf8Error;

use qdocs_files::{FileError, FileErrorKind};

/// How a renderer process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Process exited with a code.
    Exited(i32),
    /// Process was terminated by a signal.
    Terminated,
    /// Process could not be started.
    NotLaunched,
}

impl From<std::process::ExitStatus> for RenderStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        status.code().map_or(Self::Terminated, Self::Exited)
    }
}

impl std::fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exit code {code}"),
            Self::Terminated => write!(f, "terminated by signal"),
            Self::NotLaunched => write!(f, "not launched"),
        }
    }
}

/// Error returned by renderer resolution, invocation and the plugin hooks.
///
/// None of these are retried: rendering is deterministic, so a second attempt
/// would fail the same way.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No renderer configured and none found in `PATH`.
    #[error("Renderer `{name}` not found in PATH: {source}")]
    RendererNotFound {
        /// Executable name that was searched for.
        name: String,
        #[source]
        source: which::Error,
    },

    /// The renderer did not produce a document.
    #[error("Rendering {} failed ({status}): {}", .path.display(), .stderr.trim_end())]
    RenderFailure {
        /// Source file being rendered.
        path: PathBuf,
        /// How the process ended.
        status: RenderStatus,
        /// Diagnostic output captured from the renderer.
        stderr: String,
        /// Launch error, if the process never started.
        #[source]
        source: Option<std::io::Error>,
    },

    /// The renderer output is not valid UTF-8.
    #[error("Rendered output of {} is not valid UTF-8: {source}", .path.display())]
    EncodingFailure {
        /// Source file being rendered.
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    /// The configured ignore pattern is not a valid regular expression.
    #[error("Invalid ignore pattern `{pattern}`: {source}")]
    InvalidIgnorePattern {
        /// Pattern as configured.
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Files were transformed before the renderer was resolved.
    #[error("Quarto plugin used before on_config resolved the renderer")]
    NotConfigured,

    /// Thread pool for parallel rendering could not be created.
    #[error("Failed to create render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl From<RenderError> for FileError {
    fn from(err: RenderError) -> Self {
        let kind = match err {
            RenderError::EncodingFailure { .. } => FileErrorKind::Encoding,
            _ => FileErrorKind::Render,
        };
        let path = match &err {
            RenderError::RenderFailure { path, .. } | RenderError::EncodingFailure { path, .. } => {
                Some(path.clone())
            }
            _ => None,
        };
        let error = FileError::new(kind).with_source(err);
        match path {
            Some(path) => error.with_path(path),
            None => error,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_render_status_display() {
        assert_eq!(RenderStatus::Exited(3).to_string(), "exit code 3");
        assert_eq!(RenderStatus::Terminated.to_string(), "terminated by signal");
        assert_eq!(RenderStatus::NotLaunched.to_string(), "not launched");
    }

    #[test]
    fn test_render_failure_display() {
        let err = RenderError::RenderFailure {
            path: PathBuf::from("/docs/report.qmd"),
            status: RenderStatus::Exited(1),
            stderr: "ERROR: YAML parse error\n".to_owned(),
            source: None,
        };

        assert_eq!(
            err.to_string(),
            "Rendering /docs/report.qmd failed (exit code 1): ERROR: YAML parse error"
        );
    }

    #[test]
    fn test_render_failure_into_file_error() {
        let err = RenderError::RenderFailure {
            path: PathBuf::from("/docs/report.qmd"),
            status: RenderStatus::Exited(1),
            stderr: "boom".to_owned(),
            source: None,
        };

        let file_err = FileError::from(err);

        assert_eq!(file_err.kind, FileErrorKind::Render);
        assert_eq!(file_err.path.as_deref(), Some(Path::new("/docs/report.qmd")));
        assert!(matches!(
            file_err.downcast_source::<RenderError>(),
            Some(RenderError::RenderFailure { .. })
        ));
    }

    #[test]
    fn test_encoding_failure_into_file_error() {
        let source = String::from_utf8(vec![0xff]).unwrap_err();
        let err = RenderError::EncodingFailure {
            path: PathBuf::from("/docs/report.qmd"),
            source,
        };

        let file_err = FileError::from(err);

        assert_eq!(file_err.kind, FileErrorKind::Encoding);
    }

    #[test]
    fn test_not_configured_into_file_error() {
        let file_err = FileError::from(RenderError::NotConfigured);

        assert_eq!(file_err.kind, FileErrorKind::Render);
        assert!(file_err.path.is_none());
    }

    #[test]
    fn test_render_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RenderError>();
    }
}
