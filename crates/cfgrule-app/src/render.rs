//! Render use cases: markdown and GitHub annotations from in-memory reports.

use cfgrule_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    cfgrule_render::render_markdown(report)
}

/// GitHub annotations, capped at `max` lines (Actions drops the excess anyway).
pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    cfgrule_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}
