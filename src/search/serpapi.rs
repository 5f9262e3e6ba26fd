//! SerpAPI Client
//!
//! Uses the Google Light engine for quick general web search. Organic results
//! carry a snippet rather than full page content; the snippet becomes the hit's
//! content.

use async_trait::async_trait;
use serde_json::Value;
use serpapi_search_rust::serp_api_search::SerpApiSearch;
use std::collections::HashMap;
use tracing::{debug, info};

use super::{SearchError, SearchHit, SearchProvider};
use crate::config::SearchConfig;

/// SerpAPI client for general web search
pub struct SerpApiClient {
    api_key: String,
    max_results: usize,
}

impl SerpApiClient {
    /// Create a new SerpAPI client
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            max_results: 10,
        }
    }

    /// Configure client from config
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        if config.serpapi_key.is_empty() {
            return Err(SearchError::NoApiKey("serpapi".to_string()));
        }

        Ok(Self {
            api_key: config.serpapi_key.clone(),
            max_results: config.max_results,
        })
    }

    /// Set maximum results per search
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        info!(query = %query, "Searching Google Light via SerpAPI");

        let mut params = HashMap::<String, String>::new();
        params.insert("engine".to_string(), "google_light".to_string());
        params.insert("q".to_string(), query.to_string());
        params.insert("hl".to_string(), "en".to_string());
        params.insert("gl".to_string(), "us".to_string());
        params.insert("num".to_string(), self.max_results.to_string());

        let search = SerpApiSearch::google(params, self.api_key.clone());

        let results = search
            .json()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        debug!("Raw Light response received");

        if let Some(error) = results.get("error").and_then(|v| v.as_str()) {
            // SerpAPI reports "no results" as an error string
            if error.contains("hasn't returned any results") {
                return Ok(Vec::new());
            }
            return Err(SearchError::RequestFailed(error.to_string()));
        }

        let hits = parse_organic_results(results.get("organic_results"), self.max_results)?;
        info!(count = hits.len(), "Google Light search completed");
        Ok(hits)
    }
}

/// Map `organic_results` entries onto search hits, keeping absent fields absent
fn parse_organic_results(organic: Option<&Value>, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
    let Some(organic) = organic else {
        return Ok(Vec::new());
    };

    let results_array = organic
        .as_array()
        .ok_or_else(|| SearchError::ParseError("Expected array of results".to_string()))?;

    let text = |result: &Value, key: &str| {
        result
            .get(key)
            .and_then(|v| v.as_str())
            .map(String::from)
    };

    Ok(results_array
        .iter()
        .take(max_results)
        .map(|result| SearchHit {
            title: text(result, "title"),
            url: text(result, "link"),
            content: text(result, "snippet"),
        })
        .collect())
}
