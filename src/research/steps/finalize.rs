use tracing::info;

use crate::research::{ResearchState, Source, Step, Transition};

/// Rendered in place of the bullet list when no source is citable
pub const NO_SOURCES: &str = "No valid sources available.";
/// Report body when no summary was ever produced
pub const NO_SUMMARY: &str = "No summary generated";

/// Compose the final markdown report into `current_summary`
pub fn finalize(state: &mut ResearchState) -> Transition {
    let sources_text = render_sources(state.citable_sources());
    let body = state.current_summary.as_deref().unwrap_or(NO_SUMMARY);

    let report = format!(
        "# Research on {}\n\n{}\n\n## Sources\n{}",
        state.topic(),
        body,
        sources_text
    );

    info!(
        sources = state.sources().len(),
        cited = state.citable_sources().count(),
        report_len = report.len(),
        "Finalized report"
    );
    state.current_summary = Some(report);
    Transition::success(Step::Stop)
}

/// `- {title} ({url})` per source, or [`NO_SOURCES`]
pub fn render_sources<'a, I>(sources: I) -> String
where
    I: IntoIterator<Item = &'a Source>,
{
    let lines: Vec<String> = sources
        .into_iter()
        .map(|s| format!("- {} ({})", s.title, s.url))
        .collect();

    if lines.is_empty() {
        NO_SOURCES.to_string()
    } else {
        lines.join("\n")
    }
}
