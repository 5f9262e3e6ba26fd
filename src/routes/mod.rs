//! API Routes
//!
//! - `POST /research` - Run a research loop for a topic (also served at `/api/research`)
//! - `GET /api/health` - Health check
//! - `GET /` - Liveness banner

pub mod health;
pub mod research;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let server_config = state.config.server.clone();
    let router = Router::new()
        .merge(research::router(state))
        .merge(health::router())
        .layer(TraceLayer::new_for_http());

    apply_cors(router, &server_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LLMConfig, ResearchConfig, SearchConfig, ServerConfig};
    use crate::research::testing::{well_behaved_generator, FnGenerator, StaticSearch};
    use crate::research::{Orchestrator, ResearchReport};
    use crate::search::SearchHit;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
                cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            },
            llm: LLMConfig {
                provider: "google".to_string(),
                model: "gemini-1.5-flash".to_string(),
                gemini_api_key: String::new(),
                openai_api_key: String::new(),
                groq_api_key: String::new(),
                temperature: 0.3,
                max_tokens: 2048,
                base_url: None,
                request_timeout_secs: 60,
            },
            search: SearchConfig {
                provider: "tavily".to_string(),
                tavily_api_key: String::new(),
                serpapi_key: String::new(),
                max_results: 5,
                base_url: None,
                request_timeout_secs: 30,
            },
            research: ResearchConfig { max_loops: 1 },
        }
    }

    fn app_with(orchestrator: Orchestrator) -> Router {
        create_router(AppState {
            config: test_config(),
            orchestrator: Arc::new(orchestrator),
        })
    }

    fn default_app() -> Router {
        app_with(
            Orchestrator::new(
                Arc::new(well_behaved_generator()),
                Arc::new(StaticSearch::returning(vec![SearchHit::new("Ownership", "http://x", "owners")])),
            )
            .with_max_loops(1),
        )
    }

    fn post_research(body: &str) -> Request<Body> {
        post_to("/research", body)
    }

    fn post_to(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_research_returns_report() {
        let response = default_app()
            .oneshot(post_research(r#"{"topic": "rust ownership"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let report: ResearchReport = serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(report.topic, "rust ownership");
        assert!(report.summary.contains("- Ownership (http://x)"));
        assert_eq!(report.sources.len(), 1);
    }

    #[tokio::test]
    async fn test_api_prefixed_path_is_an_alias() {
        let response = default_app()
            .oneshot(post_to("/api/research", r#"{"topic": "rust ownership"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let report: ResearchReport = serde_json::from_value(json_body(response).await).unwrap();
        assert_eq!(report.topic, "rust ownership");
    }

    #[tokio::test]
    async fn test_missing_or_blank_topic_is_bad_request() {
        for body in ["{}", r#"{"topic": "  "}"#, "not json"] {
            let response = default_app().oneshot(post_research(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(json_body(response).await, serde_json::json!({"error": "Topic required"}));
        }
    }

    #[tokio::test]
    async fn test_panicking_run_is_internal_error() {
        let app = app_with(Orchestrator::new(
            Arc::new(FnGenerator::new(|_| -> crate::types::AppResult<String> {
                panic!("generator bug")
            })),
            Arc::new(StaticSearch::returning(Vec::new())),
        ));

        let response = app
            .oneshot(post_research(r#"{"topic": "anything"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, serde_json::json!({"error": "Research failed"}));
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let response = default_app()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn test_health_and_root() {
        let response = default_app()
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");

        let response = default_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Hello from research-agent");
    }
}
