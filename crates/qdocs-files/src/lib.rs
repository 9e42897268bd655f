//! Documentation file model for qdocs.
//!
//! This crate is the host side of the build pipeline: it discovers source files,
//! maps them to output paths and URLs, and defines the contract every file object
//! handed to the page builder must satisfy.
//!
//! # Architecture
//!
//! - [`File`] trait: everything the page builder reads from a file object
//! - [`SourceFile`]: the native file record produced by discovery
//! - [`Files`]: ordered collection of `Arc<dyn File>` passed between build phases
//! - [`Plugin`] trait: build hooks that may substitute file objects
//! - [`mapping`]: source-path to destination-path/URL rules
//! - [`discover`]: recursive docs directory walk
//!
//! # Example
//!
//! ```ignore
//! use qdocs_files::{SiteLayout, discover};
//!
//! let layout = SiteLayout::new("docs", "site", true);
//! let files = discover(&layout)?;
//! for file in files.documentation_pages() {
//!     println!("{} -> {}", file.src_uri(), file.url());
//! }
//! ```

mod discover;
mod error;
mod file;
mod files;
pub mod mapping;
mod plugin;

pub use discover::discover;
pub use error::{FileError, FileErrorKind};
pub use file::{File, SourceFile};
pub use files::Files;
pub use plugin::{Plugin, SiteLayout};
