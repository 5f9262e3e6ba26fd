// In-memory collaborators for research tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::TextGenerator;
use crate::search::{SearchError, SearchHit, SearchProvider};
use crate::types::{AppError, AppResult};

/// Generator answering every prompt with a closure
pub struct FnGenerator<F> {
    respond: F,
    prompts: Mutex<Vec<String>>,
}

impl<F> FnGenerator<F>
where
    F: Fn(&str) -> AppResult<String> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl<F> TextGenerator for FnGenerator<F>
where
    F: Fn(&str) -> AppResult<String> + Send + Sync,
{
    async fn generate_content(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.respond)(prompt)
    }
}

pub fn fixed_generator(text: &'static str) -> FnGenerator<impl Fn(&str) -> AppResult<String> + Send + Sync> {
    FnGenerator::new(move |_| Ok(text.to_string()))
}

pub fn failing_generator() -> FnGenerator<impl Fn(&str) -> AppResult<String> + Send + Sync> {
    FnGenerator::new(|_| Err(AppError::LLMApi("quota exceeded".to_string())))
}

/// Generator that answers each kind of prompt with well-formed output
pub fn well_behaved_generator() -> FnGenerator<impl Fn(&str) -> AppResult<String> + Send + Sync> {
    FnGenerator::new(|prompt| {
        if prompt.contains("\"follow_up_query\"") {
            Ok(r#"```json
{"knowledge_gap": "performance", "follow_up_query": "rust ownership performance"}
```"#
                .to_string())
        } else if prompt.contains("\"rationale\"") {
            Ok(r#"{"query": "rust ownership rules", "aspect": "basics", "rationale": "start broad"}"#.to_string())
        } else {
            Ok("```\nOwnership governs memory.\n```".to_string())
        }
    })
}

/// Search backend returning the same hits (or the same failure) on every call
pub struct StaticSearch {
    hits: Vec<SearchHit>,
    failure: Option<String>,
    queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    pub fn returning(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            failure: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            hits: Vec::new(),
            failure: Some(message.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        match &self.failure {
            Some(message) => Err(SearchError::RequestFailed(message.clone())),
            None => Ok(self.hits.clone()),
        }
    }
}
