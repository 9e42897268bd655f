//! CLI error types.

use qdocs_config::ConfigError;
use qdocs_files::FileError;
use qdocs_quarto::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Files(#[from] FileError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("No such file in docs directory: {0}")]
    PageNotFound(String),

    #[error("{failed} of {total} pages failed to render")]
    PagesFailed { failed: usize, total: usize },

    #[error("{0}")]
    Validation(String),
}
