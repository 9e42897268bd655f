//! CLI command implementations.

pub(crate) mod files;
pub(crate) mod render;

use std::path::PathBuf;

use clap::Args;
use qdocs_config::{CliSettings, Config};
use qdocs_files::{Files, Plugin, SiteLayout, discover, mapping};
use qdocs_quarto::{QuartoOptions, QuartoPlugin};

use crate::error::CliError;

pub(crate) use files::FilesArgs;
pub(crate) use render::RenderArgs;

/// Site options shared by every command.
#[derive(Args, Debug)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover qdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs source directory (overrides config).
    #[arg(long)]
    docs_dir: Option<PathBuf>,

    /// Site output directory (overrides config).
    #[arg(long)]
    site_dir: Option<PathBuf>,

    /// Use flat `page.html` URLs instead of `page/` (overrides config).
    #[arg(long)]
    no_directory_urls: bool,

    /// Quarto executable (overrides config).
    #[arg(long, env = "QDOCS_QUARTO")]
    quarto: Option<PathBuf>,
}

impl SiteArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            docs_dir: self.docs_dir.clone(),
            site_dir: self.site_dir.clone(),
            use_directory_urls: self.no_directory_urls.then_some(false),
            renderer_path: self.quarto.clone(),
        }
    }
}

/// Files of one build after every plugin hook has run.
pub(crate) struct Pipeline {
    pub(crate) layout: SiteLayout,
    /// Collection as discovered, before plugins.
    pub(crate) discovered: Files,
    /// Collection handed to the page builder.
    pub(crate) files: Files,
}

impl Pipeline {
    /// Load configuration, discover files and run the Quarto plugin over them.
    pub(crate) fn load(args: &SiteArgs) -> Result<Self, CliError> {
        let config = Config::load(args.config.as_deref(), Some(&args.cli_settings()))?;
        let site = &config.site_resolved;
        let cwd = std::env::current_dir()?;
        let layout = SiteLayout::new(
            mapping::normalize(&cwd.join(&site.docs_dir)),
            mapping::normalize(&cwd.join(&site.site_dir)),
            site.use_directory_urls,
        );

        let span = tracing::info_span!("build", docs_dir = %layout.docs_dir.display());
        let options = QuartoOptions {
            renderer_path: config.quarto.renderer_path.clone(),
            ignore: config.quarto.ignore.clone(),
            keep_output: config.quarto.keep_output,
        };
        Self::run(layout, options, span)
    }

    fn run(
        layout: SiteLayout,
        options: QuartoOptions,
        span: tracing::Span,
    ) -> Result<Self, CliError> {
        let mut plugin = QuartoPlugin::new(options, span);
        plugin.on_config(&layout)?;

        let discovered = discover(&layout)?;
        let files = plugin.on_files(&discovered, &layout)?;

        Ok(Self {
            layout,
            discovered,
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use tracing::Span;

    use super::*;

    #[test]
    fn test_pipeline_wraps_quarto_files_only() {
        let root = tempfile::tempdir().unwrap();
        let docs = root.path().join("docs");
        fs::create_dir_all(docs.join("reports")).unwrap();
        fs::write(docs.join("index.md"), "# Home\n").unwrap();
        fs::write(docs.join("reports/q3.qmd"), "---\ntitle: Q3\n---\n").unwrap();

        let layout = SiteLayout::new(&docs, root.path().join("site"), true);
        let options = QuartoOptions {
            renderer_path: Some(PathBuf::from("/nonexistent/bin/quarto")),
            ..QuartoOptions::default()
        };

        let pipeline = Pipeline::run(layout, options, Span::none()).unwrap();

        assert_eq!(pipeline.files.len(), 2);
        let pages: Vec<_> = pipeline
            .files
            .documentation_pages()
            .map(|f| f.url().to_owned())
            .collect();
        assert_eq!(pages, vec!["./", "reports/q3/"]);

        let unchanged: Vec<bool> = pipeline
            .discovered
            .iter()
            .zip(pipeline.files.iter())
            .map(|(a, b)| Arc::ptr_eq(a, b))
            .collect();
        assert_eq!(unchanged, vec![true, false]);
    }

    #[test]
    fn test_pipeline_missing_docs_dir() {
        let root = tempfile::tempdir().unwrap();
        let layout = SiteLayout::new(root.path().join("docs"), root.path().join("site"), true);
        let options = QuartoOptions {
            renderer_path: Some(PathBuf::from("/nonexistent/bin/quarto")),
            ..QuartoOptions::default()
        };

        let result = Pipeline::run(layout, options, Span::none());

        assert!(matches!(result, Err(CliError::Files(_))));
    }
}
