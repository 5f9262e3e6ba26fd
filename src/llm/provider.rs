use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::LLMConfig;
use crate::types::{AppError, AppResult, LLMMessage, LLMProvider, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Single-prompt text generation, the only capability the research steps need.
///
/// Implementations must be safe to share between concurrent research runs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> AppResult<String>;
}

/// Provider name, credentials and transport settings used to build an adapter
pub struct LLMProviderConfig {
    pub name: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
    provider: LLMProvider,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl LLM {
    pub fn new(provider: LLMProviderConfig, model: impl Into<String>) -> AppResult<Self> {
        let kind: LLMProvider = provider.name.parse()?;
        let adapter: Box<dyn LLMAdapter> = match kind {
            LLMProvider::Google => Box::new(crate::llm::google::GoogleAdapter::with_options(
                &provider.api_key,
                provider.base_url.as_deref(),
                provider.timeout,
            )?),
            LLMProvider::OpenAI => match provider.base_url.as_deref() {
                Some(base) => Box::new(crate::llm::openai::OpenAIAdapter::new_with_api_base(
                    &provider.api_key,
                    base,
                    provider.timeout,
                )?),
                None => Box::new(crate::llm::openai::OpenAIAdapter::new(
                    &provider.api_key,
                    provider.timeout,
                )?),
            },
            LLMProvider::Groq => Box::new(crate::llm::groq::GroqAdapter::with_api_base(
                &provider.api_key,
                provider.base_url.as_deref(),
                provider.timeout,
            )?),
        };

        Ok(Self {
            adapter,
            provider: kind,
            model: model.into(),
            temperature: None,
            max_tokens: None,
        })
    }

    /// Build the configured provider, failing when its API key is missing
    pub fn from_config(config: &LLMConfig) -> AppResult<Self> {
        let api_key = config.active_api_key().ok_or_else(|| {
            AppError::Config(format!("No API key configured for LLM provider '{}'", config.provider))
        })?;

        let llm = Self::new(
            LLMProviderConfig {
                name: config.provider.clone(),
                api_key,
                base_url: config.base_url.clone(),
                timeout: Duration::from_secs(config.request_timeout_secs),
            },
            config.model.clone(),
        )?;

        Ok(llm
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens))
    }

    /// Wrap an already-built adapter (custom providers, tests)
    pub fn from_adapter(adapter: Box<dyn LLMAdapter>, provider: LLMProvider, model: impl Into<String>) -> Self {
        Self {
            adapter,
            provider,
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn provider(&self) -> LLMProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}

#[async_trait]
impl TextGenerator for LLM {
    async fn generate_content(&self, prompt: &str) -> AppResult<String> {
        let request = LLMRequest {
            model: self.model.clone(),
            messages: vec![LLMMessage::user(prompt)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system_instruction: None,
        };

        let response = self.create_chat_completion(&request).await?;
        debug!(
            provider = %self.provider,
            model = %self.model,
            total_tokens = response.usage.total_tokens,
            finish_reason = %response.finish_reason,
            "Generation completed"
        );
        Ok(response.content)
    }
}
