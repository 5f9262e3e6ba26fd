use axum::{response::Json as ResponseJson, routing::get, Router};

use crate::models::HealthResponse;

pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
}

async fn root() -> &'static str {
    "Hello from research-agent"
}

async fn health_check() -> ResponseJson<HealthResponse> {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    ResponseJson(response)
}
