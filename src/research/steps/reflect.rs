use serde::Deserialize;
use tracing::{info, warn};

use super::request_json;
use crate::llm::TextGenerator;
use crate::research::{prompts, ResearchState, Step, StepError, Transition};

#[derive(Debug, Deserialize)]
struct Reflection {
    #[serde(default)]
    knowledge_gap: Option<String>,
    follow_up_query: String,
}

/// Look for gaps in the summary and propose the next query
pub async fn reflect(state: &mut ResearchState, generator: &dyn TextGenerator) -> Transition {
    info!(topic = %state.topic(), "Reflecting");

    let summary = state.current_summary.as_deref().unwrap_or_default();
    let prompt = prompts::reflection(state.topic(), summary);
    let reflection = request_json::<Reflection>(generator, &prompt)
        .await
        .and_then(|r| {
            if r.follow_up_query.trim().is_empty() {
                Err(StepError::Empty("follow_up_query"))
            } else {
                Ok(r)
            }
        });

    match reflection {
        Ok(r) => {
            info!(
                knowledge_gap = r.knowledge_gap.as_deref().unwrap_or("-"),
                follow_up_query = %r.follow_up_query,
                "Reflected"
            );
            state.search_query = Some(r.follow_up_query.trim().to_string());
            Transition::success(Step::Decide)
        }
        Err(e) => {
            warn!(error = %e, "Reflection failed");
            state.search_query = None;
            Transition::degraded(Step::Decide, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::testing::{failing_generator, fixed_generator};

    #[tokio::test]
    async fn test_follow_up_becomes_next_query() {
        let generator = fixed_generator(
            "```json\n{\"knowledge_gap\": \"lifetimes\", \"follow_up_query\": \"rust lifetimes explained\"}\n```",
        );
        let mut state = ResearchState::new("rust ownership");
        state.current_summary = Some("Ownership governs memory.".to_string());

        let transition = reflect(&mut state, &generator).await;

        assert_eq!(transition, Transition::success(Step::Decide));
        assert_eq!(state.search_query.as_deref(), Some("rust lifetimes explained"));
        assert!(generator.prompts()[0].contains("Ownership governs memory."));
    }

    #[tokio::test]
    async fn test_failure_clears_query() {
        let mut state = ResearchState::new("topic");
        state.search_query = Some("previous query".to_string());

        let transition = reflect(&mut state, &failing_generator()).await;

        assert_eq!(transition.next, Step::Decide);
        assert!(transition.outcome.is_degraded());
        assert!(state.search_query.is_none());
    }

    #[tokio::test]
    async fn test_missing_follow_up_is_degraded() {
        let mut state = ResearchState::new("topic");
        state.search_query = Some("previous query".to_string());

        let transition = reflect(&mut state, &fixed_generator("{\"knowledge_gap\": \"x\"}")).await;

        assert!(transition.outcome.is_degraded());
        assert!(state.search_query.is_none());
    }
}
