use std::sync::Arc;

use validator::Validate;

use crate::config::Config;
use crate::research::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<Orchestrator>,
}

// API Request/Response types

#[derive(Debug, serde::Deserialize, Validate)]
pub struct ResearchRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Topic required"))]
    pub topic: String,
}

impl ResearchRequest {
    /// Trimmed topic, or `None` when the request carries nothing to research
    pub fn normalized_topic(&self) -> Option<&str> {
        let topic = self.topic.trim();
        if self.validate().is_err() || topic.is_empty() {
            None
        } else {
            Some(topic)
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}
