//! Per-build render settings shared by every adapter.

use tracing::Span;

use crate::renderer::Renderer;

/// Snapshot of the plugin configuration taken when the build is configured.
///
/// Shared read-only between all [`QuartoFile`](crate::QuartoFile)s of a build.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Resolved renderer.
    pub renderer: Renderer,
    /// Build-scoped span that render spans are attached to.
    pub span: Span,
}

impl RenderSettings {
    /// Create settings for a renderer, logging under `span`.
    pub fn new(renderer: Renderer, span: Span) -> Self {
        Self { renderer, span }
    }
}
