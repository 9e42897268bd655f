//! External renderer resolution and invocation.
//!
//! The renderer is called once per content request as
//! `<renderer> render <source> --to=hugo-md -o -` and must write the rendered
//! markdown to stdout and exit zero.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

use crate::error::{RenderError, RenderStatus};

/// Executable searched in `PATH` when no renderer path is configured.
pub const DEFAULT_RENDERER: &str = "quarto";

/// Markdown dialect requested from the renderer.
pub const OUTPUT_FORMAT: &str = "hugo-md";

/// Handle to the external renderer executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    program: PathBuf,
}

impl Renderer {
    /// Use the given executable as-is.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the renderer against the process environment.
    ///
    /// A configured path is used verbatim. Otherwise [`DEFAULT_RENDERER`] is
    /// searched in `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RendererNotFound`] if nothing is configured and
    /// the search finds no executable.
    pub fn resolve(configured: Option<&Path>) -> Result<Self, RenderError> {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::resolve_in(configured, std::env::var_os("PATH"), &cwd)
    }

    /// Resolve the renderer against an explicit search path.
    ///
    /// `paths` uses the platform `PATH` syntax; `cwd` anchors relative entries.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RendererNotFound`] if nothing is configured and
    /// the search finds no executable.
    pub fn resolve_in<P: AsRef<OsStr>>(
        configured: Option<&Path>,
        paths: Option<P>,
        cwd: &Path,
    ) -> Result<Self, RenderError> {
        if let Some(path) = configured {
            return Ok(Self::new(path));
        }
        which::which_in(DEFAULT_RENDERER, paths, cwd)
            .map(Self::new)
            .map_err(|source| RenderError::RendererNotFound {
                name: DEFAULT_RENDERER.to_owned(),
                source,
            })
    }

    /// Path of the executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Build the render command for a source file.
    pub fn command(&self, source: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("render")
            .arg(source)
            .arg(format!("--to={OUTPUT_FORMAT}"))
            .args(["-o", "-"]);
        cmd
    }

    /// Render a source file and return the renderer's stdout.
    ///
    /// Blocks until the process exits. Every call starts a new process.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RenderFailure`] if the process cannot be started
    /// or exits unsuccessfully; the error carries the captured stderr.
    pub fn render(&self, source: &Path) -> Result<Vec<u8>, RenderError> {
        let started = Instant::now();
        tracing::debug!(
            renderer = %self.program.display(),
            source = %source.display(),
            "Running renderer"
        );

        let output = self
            .command(source)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| RenderError::RenderFailure {
                path: source.to_path_buf(),
                status: RenderStatus::NotLaunched,
                stderr: e.to_string(),
                source: Some(e),
            })?;

        if !output.status.success() {
            return Err(RenderError::RenderFailure {
                path: source.to_path_buf(),
                status: output.status.into(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                source: None,
            });
        }

        tracing::debug!(
            source = %source.display(),
            bytes = output.stdout.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Renderer finished"
        );
        Ok(output.stdout)
    }
}
