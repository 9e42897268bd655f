//! Build plugin that swaps Quarto sources for rendering adapters.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use qdocs_files::{File, Files, Plugin, SiteLayout};
use regex::Regex;
use tracing::Span;

use crate::error::RenderError;
use crate::file::QuartoFile;
use crate::renderer::Renderer;
use crate::settings::RenderSettings;

/// Source extension handled by the plugin, compared case-sensitively.
pub const QMD_EXTENSION: &str = "qmd";

/// User-facing plugin options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuartoOptions {
    /// Renderer executable. Searched in `PATH` when unset.
    pub renderer_path: Option<PathBuf>,
    /// Regular expression for source paths to leave alone.
    pub ignore: Option<String>,
    /// Keep intermediate renderer output. Accepted but has no effect.
    pub keep_output: bool,
}

/// Quarto integration for the build pipeline.
///
/// [`on_config`](Plugin::on_config) resolves the renderer and compiles the ignore
/// pattern; [`on_files`](Plugin::on_files) wraps every `.qmd` file in a
/// [`QuartoFile`].
#[derive(Debug)]
pub struct QuartoPlugin {
    options: QuartoOptions,
    span: Span,
    settings: Option<Arc<RenderSettings>>,
    ignores: Vec<Regex>,
}

impl QuartoPlugin {
    /// Create an unconfigured plugin.
    ///
    /// Render logging of every adapter created by this plugin is attached to `span`.
    pub fn new(options: QuartoOptions, span: Span) -> Self {
        Self {
            options,
            span,
            settings: None,
            ignores: Vec::new(),
        }
    }

    /// Renderer resolved by `on_config`, if it has run.
    pub fn renderer(&self) -> Option<&Renderer> {
        self.settings.as_ref().map(|settings| &settings.renderer)
    }

    /// Whether a file is rendered by Quarto.
    pub fn should_include(&self, file: &dyn File) -> bool {
        file.abs_src_path()
            .extension()
            .is_some_and(|ext| ext == QMD_EXTENSION)
    }

    /// Drop paths fully matched by an ignore pattern.
    ///
    /// Paths are compared as `/`-separated strings.
    pub fn filter_ignores<'a, I, P>(&self, paths: I) -> Vec<&'a Path>
    where
        I: IntoIterator<Item = &'a P>,
        P: AsRef<Path> + ?Sized + 'a,
    {
        paths
            .into_iter()
            .map(|path| -> &'a Path { path.as_ref() })
            .filter(|path| {
                let path = path.to_string_lossy().replace('\\', "/");
                !self.ignores.iter().any(|re| re.is_match(&path))
            })
            .collect()
    }
}

fn compile_ignore(pattern: &str) -> Result<Regex, RenderError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| RenderError::InvalidIgnorePattern {
        pattern: pattern.to_owned(),
        source,
    })
}

impl Plugin for QuartoPlugin {
    type Error = RenderError;

    fn on_config(&mut self, _site: &SiteLayout) -> Result<(), RenderError> {
        let renderer = Renderer::resolve(self.options.renderer_path.as_deref())?;

        self.ignores = match &self.options.ignore {
            Some(pattern) => vec![compile_ignore(pattern)?],
            None => Vec::new(),
        };

        if self.options.keep_output {
            tracing::warn!("`keep_output` is set but has no effect");
        }

        tracing::info!(
            parent: &self.span,
            renderer = %renderer.program().display(),
            ignore = self.options.ignore.as_deref().unwrap_or(""),
            "Quarto plugin configured"
        );

        self.settings = Some(Arc::new(RenderSettings::new(renderer, self.span.clone())));
        Ok(())
    }

    fn on_files(&self, files: &Files, site: &SiteLayout) -> Result<Files, RenderError> {
        let settings = self.settings.as_ref().ok_or(RenderError::NotConfigured)?;

        let mut wrapped = 0usize;
        let out: Files = files
            .iter()
            .map(|file| {
                if self.should_include(&**file) {
                    wrapped += 1;
                    tracing::debug!(parent: &self.span, src = file.src_uri(), "Wrapping Quarto file");
                    Arc::new(QuartoFile::new(
                        Arc::clone(file),
                        site.use_directory_urls,
                        &site.site_dir,
                        Arc::clone(settings),
                    )) as Arc<dyn File>
                } else {
                    Arc::clone(file)
                }
            })
            .collect();

        tracing::info!(parent: &self.span, total = out.len(), quarto = wrapped, "Files transformed");
        Ok(out)
    }
}
