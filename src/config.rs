use anyhow::Result;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub search: SearchConfig,
    pub research: ResearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: String,
    pub model: String,
    pub gemini_api_key: String,
    pub openai_api_key: String,
    pub groq_api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Overrides the provider endpoint (proxies, local gateways, tests)
    pub base_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl LLMConfig {
    /// API key for the configured provider, if one is set
    pub fn active_api_key(&self) -> Option<String> {
        let key = match self.provider.trim().to_lowercase().as_str() {
            "google" | "gemini" => &self.gemini_api_key,
            "openai" => &self.openai_api_key,
            "groq" => &self.groq_api_key,
            _ => return None,
        };
        if key.is_empty() {
            None
        } else {
            Some(key.clone())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub provider: String,
    pub tavily_api_key: String,
    pub serpapi_key: String,
    pub max_results: usize,
    pub base_url: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchConfig {
    pub max_loops: u32,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self { max_loops: 2 }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: parse_list(
                    &env::var("ALLOWED_ORIGINS")
                        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string()),
                ),
            },
            llm: LLMConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "google".to_string()),
                model: env::var("LLM_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
                gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
                openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                groq_api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
                temperature: env::var("LLM_TEMPERATURE")
                    .unwrap_or_else(|_| "0.3".to_string())
                    .parse()?,
                max_tokens: env::var("LLM_MAX_TOKENS")
                    .unwrap_or_else(|_| "2048".to_string())
                    .parse()?,
                base_url: non_empty(env::var("LLM_BASE_URL").ok()),
                request_timeout_secs: env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()?,
            },
            search: SearchConfig {
                provider: env::var("SEARCH_PROVIDER").unwrap_or_else(|_| "tavily".to_string()),
                tavily_api_key: env::var("TAVILY_API_KEY").unwrap_or_default(),
                serpapi_key: env::var("SERPAPI_API_KEY").unwrap_or_default(),
                max_results: env::var("SEARCH_MAX_RESULTS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()?,
                base_url: non_empty(env::var("SEARCH_BASE_URL").ok()),
                request_timeout_secs: env::var("SEARCH_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()?,
            },
            research: ResearchConfig {
                max_loops: env::var("RESEARCH_MAX_LOOPS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()?,
            },
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
