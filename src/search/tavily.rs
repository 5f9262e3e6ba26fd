//! Tavily Client
//!
//! Tavily returns ready-to-summarize page content alongside title and URL,
//! which is exactly the shape the summarize step consumes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{SearchError, SearchHit, SearchProvider};
use crate::config::SearchConfig;

const TAVILY_API_BASE: &str = "https://api.tavily.com";

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
    include_answer: bool,
    include_raw_content: bool,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

pub struct TavilyClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_results: usize,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: normalize_api_key(&api_key.into()),
            base_url: TAVILY_API_BASE.to_string(),
            max_results: 5,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        if config.tavily_api_key.trim().is_empty() {
            return Err(SearchError::NoApiKey("tavily".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key: normalize_api_key(&config.tavily_api_key),
            base_url: config
                .base_url
                .as_deref()
                .unwrap_or(TAVILY_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            max_results: config.max_results,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        info!(query = %query, "Searching via Tavily");

        let body = TavilyRequest {
            query,
            search_depth: "basic",
            max_results: self.max_results,
            include_answer: false,
            include_raw_content: false,
        };

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SearchError::RequestFailed(format!("Tavily returned {}: {}", status, text)));
        }

        let parsed: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        debug!(count = parsed.results.len(), "Tavily search completed");
        Ok(parsed.results)
    }
}

/// Tavily development keys are issued with a `tvly-dev-` prefix that is often
/// left out of environment files.
fn normalize_api_key(key: &str) -> String {
    let key = key.trim();
    if key.starts_with("tvly-") {
        key.to_string()
    } else {
        format!("tvly-dev-{}", key)
    }
}
