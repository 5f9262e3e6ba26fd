//! Research state threaded through every step of a run.

use serde::{Deserialize, Serialize};

use crate::search::SearchHit;

/// Title recorded for a search hit that came back without one
pub const UNTITLED: &str = "Untitled";
/// URL recorded for a search hit that came back without one
pub const NO_URL: &str = "No URL provided";

pub const DEFAULT_MAX_LOOPS: u32 = 2;

/// A cited page: title and URL as reported by the search backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    /// Set when a placeholder stands in for a field the backend left out
    #[serde(skip)]
    defaulted: bool,
}

impl Source {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            defaulted: false,
        }
    }

    /// Missing or blank fields are replaced with placeholders
    pub fn from_hit(hit: &SearchHit) -> Self {
        let supplied = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        };
        let title = supplied(&hit.title);
        let url = supplied(&hit.url);

        Self {
            defaulted: title.is_none() || url.is_none(),
            title: title.unwrap_or_else(|| UNTITLED.to_string()),
            url: url.unwrap_or_else(|| NO_URL.to_string()),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        self.defaulted
    }

    /// Whether this source may appear in the final report: both fields were
    /// supplied by the backend and neither is blank.
    pub fn is_citable(&self) -> bool {
        !self.defaulted && !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }
}

/// Mutable record for one research run.
///
/// `topic`, `max_loops`, `sources` and `loop_count` are only reachable through
/// methods so the run-level invariants hold: the topic never changes, sources
/// are append-only and the loop counter only moves forward one search at a time.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchState {
    topic: String,
    pub search_query: Option<String>,
    pub latest_results: Option<String>,
    pub current_summary: Option<String>,
    sources: Vec<Source>,
    loop_count: u32,
    max_loops: u32,
}

impl ResearchState {
    pub fn new(topic: impl Into<String>) -> Self {
        Self::with_max_loops(topic, DEFAULT_MAX_LOOPS)
    }

    pub fn with_max_loops(topic: impl Into<String>, max_loops: u32) -> Self {
        Self {
            topic: topic.into(),
            search_query: None,
            latest_results: None,
            current_summary: None,
            sources: Vec::new(),
            loop_count: 0,
            max_loops,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    pub fn max_loops(&self) -> u32 {
        self.max_loops
    }

    pub fn push_source(&mut self, source: Source) {
        self.sources.push(source);
    }

    pub fn extend_sources<I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = Source>,
    {
        self.sources.extend(sources);
    }

    /// Sources that survive the finalize filter, in insertion order
    pub fn citable_sources(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter().filter(|s| s.is_citable())
    }

    pub(crate) fn complete_search_iteration(&mut self) {
        self.loop_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = ResearchState::new("rust ownership");
        assert_eq!(state.topic(), "rust ownership");
        assert!(state.search_query.is_none());
        assert!(state.latest_results.is_none());
        assert!(state.current_summary.is_none());
        assert!(state.sources().is_empty());
        assert_eq!(state.loop_count(), 0);
        assert_eq!(state.max_loops(), DEFAULT_MAX_LOOPS);
    }

    #[test]
    fn test_source_from_hit_defaults_missing_fields() {
        let hit = SearchHit {
            title: None,
            url: Some("   ".to_string()),
            content: Some("text".to_string()),
        };
        let source = Source::from_hit(&hit);
        assert_eq!(source.title, UNTITLED);
        assert_eq!(source.url, NO_URL);
        assert!(source.is_defaulted());
        assert!(!source.is_citable());
    }

    #[test]
    fn test_page_titled_untitled_is_still_citable() {
        let hit = SearchHit::new(UNTITLED, "http://example.com/untitled", "body");
        let source = Source::from_hit(&hit);
        assert!(!source.is_defaulted());
        assert!(source.is_citable());

        // the flag is not part of the wire format
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json, serde_json::json!({"title": UNTITLED, "url": "http://example.com/untitled"}));
    }

    #[test]
    fn test_citable_sources_filters_but_keeps_everything() {
        let mut state = ResearchState::new("topic");
        state.extend_sources(vec![
            Source::new("Ownership", "http://x"),
            Source::new("", "http://empty-title"),
            Source::from_hit(&SearchHit {
                title: Some("Placeholder url".to_string()),
                url: None,
                content: None,
            }),
            Source::new("Borrowing", "http://y"),
        ]);

        assert_eq!(state.sources().len(), 4);
        let titles: Vec<_> = state.citable_sources().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Ownership", "Borrowing"]);
    }

    #[test]
    fn test_search_iteration_counter() {
        let mut state = ResearchState::with_max_loops("topic", 3);
        state.complete_search_iteration();
        state.complete_search_iteration();
        assert_eq!(state.loop_count(), 2);
        assert_eq!(state.max_loops(), 3);
    }
}
