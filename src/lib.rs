// Research Agent - iterative web research: query, search, summarize, reflect, report

pub mod config;
pub mod models;
pub mod types;
pub mod llm;
pub mod search;    // Web search backends (Tavily, SerpAPI Google Light)
pub mod research;  // Research orchestration state machine
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use research::{Orchestrator, ResearchReport};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
