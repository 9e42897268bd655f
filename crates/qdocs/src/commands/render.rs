//! `qdocs render` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use qdocs_files::mapping;
use qdocs_quarto::{RenderedPage, render_pages};

use super::{Pipeline, SiteArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Page to render, as a path inside the docs directory or a source URI.
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    page: Option<String>,

    /// Render every documentation page.
    #[arg(long)]
    all: bool,

    /// Directory for `--all` output (default: site directory).
    #[arg(short, long, requires = "all")]
    out_dir: Option<PathBuf>,

    /// Parallel renders for `--all` (default: one per CPU).
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let pipeline = Pipeline::load(&self.site)?;

        if self.all {
            let out_dir = self
                .out_dir
                .clone()
                .unwrap_or_else(|| pipeline.layout.site_dir.clone());
            return render_all(&pipeline, &out_dir, self.jobs, &output);
        }

        let Some(page) = self.page.as_deref() else {
            return Err(CliError::Validation("Specify a page or --all".to_owned()));
        };
        let cwd = std::env::current_dir()?;
        let src_uri = src_uri_for(page, &pipeline.layout.docs_dir, &cwd);
        let file = pipeline
            .files
            .get_by_src_uri(&src_uri)
            .ok_or_else(|| CliError::PageNotFound(src_uri.clone()))?;

        let content = file.content_string()?;
        output.raw(&content)?;
        Ok(())
    }
}

fn render_all(
    pipeline: &Pipeline,
    out_dir: &Path,
    jobs: usize,
    output: &Output,
) -> Result<(), CliError> {
    output.info(&format!("Output: {}", out_dir.display()));

    let pages = render_pages(&pipeline.files, jobs)?;
    let total = pages.len();
    let mut failed = 0usize;

    for RenderedPage {
        src_uri, content, ..
    } in pages
    {
        match content {
            Ok(content) => {
                let target = out_dir.join(markdown_path(&src_uri));
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&target, content)?;
                output.info(&format!("  {src_uri} -> {}", target.display()));
            }
            Err(err) => {
                failed += 1;
                output.warning(&format!("  {src_uri}: {err}"));
            }
        }
    }

    if failed > 0 {
        return Err(CliError::PagesFailed { failed, total });
    }
    output.success(&format!("Rendered {total} pages to {}", out_dir.display()));
    Ok(())
}

/// Source URI for a page argument.
///
/// Existing paths under the docs directory are converted to their source URI;
/// anything else is taken as a source URI already.
fn src_uri_for(page: &str, docs_dir: &Path, cwd: &Path) -> String {
    let path = cwd.join(page);
    if path.exists()
        && let Ok(rel) = mapping::normalize(&path).strip_prefix(docs_dir)
    {
        return mapping::to_src_uri(rel);
    }
    page.replace('\\', "/")
}

/// Output path of a page's markdown: its slug with a `.md` extension.
fn markdown_path(src_uri: &str) -> String {
    let slug = &src_uri[..src_uri.len() - mapping::extension(src_uri).len()];
    format!("{slug}.md")
}
