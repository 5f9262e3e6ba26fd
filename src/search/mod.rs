//! Search Module
//!
//! Web search backends for the research loop:
//! - Tavily (primary) - LLM-oriented search returning page content
//! - SerpAPI Google Light - general web search with snippets
//!
//! Both backends produce [`SearchHit`]s; any field may be absent and the
//! research steps decide how to default it.

pub mod serpapi;
pub mod tavily;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SearchConfig;
use crate::types::{AppError, AppResult};

pub use serpapi::SerpApiClient;
pub use tavily::TavilyClient;

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search API key not configured for {0}")]
    NoApiKey(String),

    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse search results: {0}")]
    ParseError(String),
}

/// One search result as returned by a backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
            content: Some(content.into()),
        }
    }
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// Build the backend named by `config.provider`
pub fn from_config(config: &SearchConfig) -> AppResult<Arc<dyn SearchProvider>> {
    match config.provider.trim().to_lowercase().as_str() {
        "tavily" => Ok(Arc::new(TavilyClient::from_config(config)?)),
        "serpapi" => Ok(Arc::new(SerpApiClient::from_config(config)?)),
        other => Err(AppError::Config(format!("Unsupported search provider: {}", other))),
    }
}
