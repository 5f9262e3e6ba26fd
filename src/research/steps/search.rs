use tracing::{info, warn};

use crate::research::{ResearchState, Source, Step, StepError, Transition, UNTITLED};
use crate::search::{SearchHit, SearchProvider};

/// Stored as `latest_results` when the search backend fails
pub const SEARCH_FAILED: &str = "No results available due to search error.";

/// Run one search iteration with the current query.
///
/// A missing query is sent as the empty string; the backend decides what that
/// means. The loop counter advances whether or not the search succeeds.
pub async fn search(state: &mut ResearchState, provider: &dyn SearchProvider) -> Transition {
    let query = state.search_query.clone().unwrap_or_default();
    info!(query = %query, iteration = state.loop_count() + 1, "Performing search");

    let transition = match provider.search(&query).await {
        Ok(hits) => {
            state.latest_results = Some(flatten_hits(&hits));
            state.extend_sources(hits.iter().map(Source::from_hit));
            info!(results = hits.len(), total_sources = state.sources().len(), "Search done");
            Transition::success(Step::Summarize)
        }
        Err(e) => {
            let e = StepError::from(e);
            warn!(error = %e, "Search failed, continuing without results");
            state.latest_results = Some(SEARCH_FAILED.to_string());
            Transition::degraded(Step::Summarize, e.to_string())
        }
    };

    state.complete_search_iteration();
    transition
}

/// One `title: content` line per hit
pub fn flatten_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| {
            format!(
                "{}: {}",
                hit.title.as_deref().unwrap_or(UNTITLED),
                hit.content.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
