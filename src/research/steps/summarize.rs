use tracing::{info, warn};

use crate::llm::TextGenerator;
use crate::research::{prompts, ResearchState, Step, StepError, Transition};
use crate::utils::strip_code_fences;

/// Stored as `current_summary` when summarization fails
pub const SUMMARY_FAILED: &str = "Error occurred during summarization";

/// Fold the latest search results into the running summary.
///
/// The generator does the merging: its output replaces the previous summary.
pub async fn summarize(state: &mut ResearchState, generator: &dyn TextGenerator) -> Transition {
    let results = state.latest_results.as_deref().unwrap_or_default();
    let prompt = match state.current_summary.as_deref() {
        Some(existing) => {
            info!(existing_len = existing.len(), "Extending summary");
            prompts::extend_summary(existing, results)
        }
        None => {
            info!(topic = %state.topic(), "Summarizing");
            prompts::new_summary(state.topic(), results)
        }
    };

    let summary = generator
        .generate_content(&prompt)
        .await
        .map_err(StepError::from)
        .map(|text| strip_code_fences(&text))
        .and_then(|text| {
            if text.is_empty() {
                Err(StepError::Empty("summary"))
            } else {
                Ok(text)
            }
        });

    match summary {
        Ok(text) => {
            info!(summary_len = text.len(), "Generated summary");
            state.current_summary = Some(text);
            Transition::success(Step::Reflect)
        }
        Err(e) => {
            warn!(error = %e, "Summarization failed");
            state.current_summary = Some(SUMMARY_FAILED.to_string());
            Transition::degraded(Step::Reflect, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::testing::{failing_generator, fixed_generator};

    #[tokio::test]
    async fn test_first_summary_uses_topic_prompt() {
        let generator = fixed_generator("```\n  Ownership governs memory.  \n```");
        let mut state = ResearchState::new("rust ownership");
        state.latest_results = Some("Ownership: owners".to_string());

        let transition = summarize(&mut state, &generator).await;

        assert_eq!(transition, Transition::success(Step::Reflect));
        assert_eq!(state.current_summary.as_deref(), Some("Ownership governs memory."));
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("TOPIC: rust ownership"));
        assert!(prompt.contains("Ownership: owners"));
        assert!(!prompt.contains("EXISTING SUMMARY"));
    }

    #[tokio::test]
    async fn test_existing_summary_is_extended_then_replaced() {
        let generator = fixed_generator("merged summary");
        let mut state = ResearchState::new("rust ownership");
        state.current_summary = Some("first pass".to_string());
        state.latest_results = Some("Borrowing: borrows".to_string());

        summarize(&mut state, &generator).await;

        assert_eq!(state.current_summary.as_deref(), Some("merged summary"));
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("EXISTING SUMMARY:\nfirst pass"));
        assert!(prompt.contains("Borrowing: borrows"));
    }

    #[tokio::test]
    async fn test_failure_sets_sentinel() {
        let mut state = ResearchState::new("topic");
        state.current_summary = Some("previous".to_string());

        let transition = summarize(&mut state, &failing_generator()).await;

        assert_eq!(transition.next, Step::Reflect);
        assert!(transition.outcome.is_degraded());
        assert_eq!(state.current_summary.as_deref(), Some(SUMMARY_FAILED));
    }

    #[tokio::test]
    async fn test_blank_output_is_degraded() {
        let mut state = ResearchState::new("topic");

        let transition = summarize(&mut state, &fixed_generator("```\n```")).await;

        assert!(transition.outcome.is_degraded());
        assert_eq!(state.current_summary.as_deref(), Some(SUMMARY_FAILED));
    }
}
