//! `qdocs files` command implementation.

use std::sync::Arc;

use clap::Args;

use super::{Pipeline, SiteArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the files command.
#[derive(Args)]
pub(crate) struct FilesArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Only list documentation pages.
    #[arg(long)]
    pages: bool,
}

impl FilesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let pipeline = Pipeline::load(&self.site)?;

        output.info(&format!("Docs: {}", pipeline.layout.docs_dir.display()));

        let mut quarto = 0usize;
        for (before, file) in pipeline.discovered.iter().zip(pipeline.files.iter()) {
            if self.pages && !file.is_documentation_page() {
                continue;
            }
            let wrapped = !Arc::ptr_eq(before, file);
            let marker = if wrapped {
                quarto += 1;
                output.highlight("quarto")
            } else {
                output.dim(kind(file.as_ref()))
            };
            output.line(&format!(
                "{marker:>8}  {} -> {}  {}",
                file.src_uri(),
                file.dest_path(),
                output.dim(file.url())
            ))?;
        }

        output.success(&format!(
            "{} files, {quarto} rendered by Quarto",
            pipeline.files.len()
        ));
        Ok(())
    }
}

/// Short label for the host's classification of a file.
fn kind(file: &dyn qdocs_files::File) -> &'static str {
    if file.is_documentation_page() {
        "page"
    } else if file.is_static_page() {
        "static"
    } else if file.is_media_file() {
        "media"
    } else {
        "other"
    }
}
