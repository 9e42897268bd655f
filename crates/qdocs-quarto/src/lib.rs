//! Quarto rendering plugin for qdocs.
//!
//! Lets a documentation site contain Quarto (`.qmd`) sources. During the file
//! phase of a build every `.qmd` file is replaced by a [`QuartoFile`], which
//! reports the output path and URL a markdown page of the same name would get and
//! produces its content by running the external renderer:
//!
//! ```text
//! quarto render <abs_src_path> --to=hugo-md -o -
//! ```
//!
//! Rendering happens on every content request. Nothing is cached.
//!
//! # Example
//!
//! ```ignore
//! use qdocs_files::{Plugin, SiteLayout, discover};
//! use qdocs_quarto::{QuartoOptions, QuartoPlugin};
//!
//! let site = SiteLayout::new("docs", "site", true);
//! let mut plugin = QuartoPlugin::new(QuartoOptions::default(), tracing::info_span!("build"));
//! plugin.on_config(&site)?;
//!
//! let files = plugin.on_files(&discover(&site)?, &site)?;
//! for page in files.documentation_pages() {
//!     let markdown = page.content_string()?;
//! }
//! ```

mod batch;
mod error;
mod file;
mod plugin;
mod renderer;
mod settings;
#[cfg(all(test, unix))]
mod testing;

pub use batch::{RenderedPage, render_pages};
pub use error::{RenderError, RenderStatus};
pub use file::QuartoFile;
pub use plugin::{QMD_EXTENSION, QuartoOptions, QuartoPlugin};
pub use renderer::{DEFAULT_RENDERER, OUTPUT_FORMAT, Renderer};
pub use settings::RenderSettings;
