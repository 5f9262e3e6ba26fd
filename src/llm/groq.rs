// Groq speaks the OpenAI chat-completions protocol; only the endpoint differs.

use std::time::Duration;

use async_trait::async_trait;

use crate::llm::openai::OpenAIAdapter;
use crate::llm::provider::LLMAdapter;
use crate::types::{AppResult, LLMRequest, LLMResponse};

pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

pub struct GroqAdapter {
    inner: OpenAIAdapter,
    api_base: String,
}

impl GroqAdapter {
    pub fn new(api_key: &str, timeout: Duration) -> AppResult<Self> {
        Self::with_api_base(api_key, None, timeout)
    }

    /// `LLM_BASE_URL` overrides the public Groq endpoint when set
    pub fn with_api_base(api_key: &str, api_base: Option<&str>, timeout: Duration) -> AppResult<Self> {
        let api_base = api_base
            .unwrap_or(GROQ_API_BASE)
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            inner: OpenAIAdapter::new_with_api_base(api_key, &api_base, timeout)?,
            api_base,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait]
impl LLMAdapter for GroqAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.inner.create_chat_completion(request).await
    }
}
