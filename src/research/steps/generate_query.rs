use serde::Deserialize;
use tracing::{info, warn};

use super::request_json;
use crate::llm::TextGenerator;
use crate::research::{prompts, ResearchState, Step, StepError, Transition};

#[derive(Debug, Deserialize)]
struct QueryPlan {
    query: String,
    #[serde(default)]
    aspect: Option<String>,
    #[serde(default)]
    rationale: Option<String>,
}

/// Write the first search query for the topic
pub async fn generate_query(state: &mut ResearchState, generator: &dyn TextGenerator) -> Transition {
    info!(topic = %state.topic(), "Generating query");

    let prompt = prompts::query_writer(state.topic());
    let plan = request_json::<QueryPlan>(generator, &prompt)
        .await
        .and_then(|plan| {
            if plan.query.trim().is_empty() {
                Err(StepError::Empty("query"))
            } else {
                Ok(plan)
            }
        });

    match plan {
        Ok(plan) => {
            info!(
                query = %plan.query,
                aspect = plan.aspect.as_deref().unwrap_or("-"),
                rationale = plan.rationale.as_deref().unwrap_or("-"),
                "Generated query"
            );
            state.search_query = Some(plan.query.trim().to_string());
            Transition::success(Step::Search)
        }
        Err(e) => {
            warn!(error = %e, "Query generation failed, searching without a query");
            state.search_query = None;
            Transition::degraded(Step::Search, e.to_string())
        }
    }
}
