use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json as ResponseJson,
    routing::post,
    Json, Router,
};
use tracing::{error, info, warn};

use crate::models::{AppState, ResearchRequest};
use crate::research::ResearchReport;
use crate::types::{AppError, AppResult};

const TOPIC_REQUIRED: &str = "Topic required";
const RESEARCH_FAILED: &str = "Research failed";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/research", post(start_research))
        .route("/api/research", post(start_research))
        .with_state(state)
}

async fn start_research(
    State(state): State<AppState>,
    payload: Result<Json<ResearchRequest>, JsonRejection>,
) -> AppResult<ResponseJson<ResearchReport>> {
    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "Rejected research request body");
        AppError::InvalidRequest(TOPIC_REQUIRED.to_string())
    })?;

    let topic = request
        .normalized_topic()
        .ok_or_else(|| AppError::InvalidRequest(TOPIC_REQUIRED.to_string()))?
        .to_string();

    info!(topic = %topic, "Received research request");

    // a panic inside the run surfaces here as a JoinError
    let orchestrator = state.orchestrator.clone();
    let report = tokio::spawn(async move { orchestrator.run(&topic).await })
        .await
        .map_err(|e| {
            error!(error = %e, "Research run aborted");
            AppError::Internal(RESEARCH_FAILED.to_string())
        })?;

    info!(sources = report.sources.len(), "Research response sent");
    Ok(Json(report))
}
