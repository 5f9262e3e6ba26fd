use std::time::Duration;

use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest, LLMResponse, TokenUsage};
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

pub struct OpenAIAdapter {
    client: Client<OpenAIConfig>,
}

impl OpenAIAdapter {
    pub fn new(api_key: &str, timeout: Duration) -> AppResult<Self> {
        Self::with_config(OpenAIConfig::new().with_api_key(api_key), timeout)
    }

    /// OpenAI-compatible endpoints (Groq, local gateways)
    pub fn new_with_api_base(api_key: &str, api_base: &str, timeout: Duration) -> AppResult<Self> {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        Self::with_config(config, timeout)
    }

    /// async-openai's default HTTP client has no request timeout
    fn with_config(config: OpenAIConfig, timeout: Duration) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build OpenAI HTTP client: {}", e)))?;

        Ok(Self {
            client: Client::with_config(config).with_http_client(http_client),
        })
    }

    fn convert_messages(request: &LLMRequest) -> Vec<ChatCompletionRequestMessage> {
        let system = request.system_instruction.iter().map(|s| {
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(s.as_str()))
        });

        let rest = request.messages.iter().map(|m: &LLMMessage| match m.role.as_str() {
            "system" => ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage::from(m.content.as_str()),
            ),
            "assistant" => ChatCompletionRequestMessage::Assistant(m.content.as_str().into()),
            _ => ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage::from(m.content.as_str()),
            ),
        });

        system.chain(rest).collect()
    }
}

#[async_trait]
impl LLMAdapter for OpenAIAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(request.model.clone());
        args.messages(Self::convert_messages(request));
        if let Some(max_tokens) = request.max_tokens {
            args.max_completion_tokens(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            args.temperature(temperature);
        }

        let chat_request = args
            .build()
            .map_err(|e| AppError::LLMApi(format!("OpenAI request build failed: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e| AppError::LLMApi(format!("OpenAI API error: {}", e)))?;

        let usage = response
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::LLMApi("OpenAI returned no choices".to_string()))?;

        Ok(LLMResponse {
            content: choice.message.content.unwrap_or_default(),
            finish_reason: choice
                .finish_reason
                .map(|r| format!("{:?}", r).to_lowercase())
                .unwrap_or_else(|| "stop".to_string()),
            usage,
        })
    }
}
