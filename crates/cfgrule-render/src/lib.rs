//! Rendering utilities for CI surfaces (Markdown, GitHub annotations).
//!
//! Renderers take a flattened, schema-independent view of a report so they never need to
//! know which envelope version produced it.

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableCompliance, RenderableData, RenderableEvaluation, RenderableReport,
    RenderableVerdictStatus,
};
