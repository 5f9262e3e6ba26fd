//! Research Orchestrator
//!
//! Drives one research run through the step handlers:
//!
//! ```text
//! generate_query → search → summarize → reflect → decide ─┬─→ finalize → stop
//!                    ▲                                     │
//!                    └──────────────── continue ───────────┘
//! ```
//!
//! The orchestrator owns the [`ResearchState`] for the whole run and is the only
//! place that changes which step runs next. Handlers never fail, so the loop
//! itself has no error path; termination is the [`LoopPolicy`]'s job.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::steps::{self, NO_SUMMARY};
use super::{
    LoopPolicy, MaxLoopsPolicy, ResearchState, Source, Step, StepOutcome, StepRecord, Transition,
    DEFAULT_MAX_LOOPS,
};
use crate::config::Config;
use crate::llm::{TextGenerator, LLM};
use crate::search::{self, SearchProvider};
use crate::types::AppResult;

/// What a finished run hands back to its caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub topic: String,
    pub summary: String,
    pub sources: Vec<Source>,
}

impl ResearchReport {
    fn from_state(state: ResearchState) -> Self {
        Self {
            summary: state
                .current_summary
                .clone()
                .unwrap_or_else(|| NO_SUMMARY.to_string()),
            sources: state.sources().to_vec(),
            topic: state.topic().to_string(),
        }
    }
}

/// Shared, stateless driver; every call to [`run`](Self::run) gets its own state
pub struct Orchestrator {
    generator: Arc<dyn TextGenerator>,
    search: Arc<dyn SearchProvider>,
    policy: Arc<dyn LoopPolicy>,
    max_loops: u32,
}

impl Orchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>, search: Arc<dyn SearchProvider>) -> Self {
        Self {
            generator,
            search,
            policy: Arc::new(MaxLoopsPolicy),
            max_loops: DEFAULT_MAX_LOOPS,
        }
    }

    /// Wire the configured LLM provider and search backend
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let generator = LLM::from_config(&config.llm)?;
        info!(
            provider = %generator.provider(),
            model = %generator.model(),
            search = %config.search.provider,
            max_loops = config.research.max_loops,
            "Research orchestrator configured"
        );

        Ok(Self::new(Arc::new(generator), search::from_config(&config.search)?)
            .with_max_loops(config.research.max_loops))
    }

    pub fn with_max_loops(mut self, max_loops: u32) -> Self {
        self.max_loops = max_loops;
        self
    }

    pub fn with_policy(mut self, policy: Arc<dyn LoopPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_loops(&self) -> u32 {
        self.max_loops
    }

    /// Research `topic` from scratch and return the final report
    pub async fn run(&self, topic: &str) -> ResearchReport {
        let run_id = Uuid::new_v4();
        let span = info_span!("research_run", %run_id, topic = %topic);

        async move {
            info!("Starting research run");
            let mut state = ResearchState::with_max_loops(topic, self.max_loops);
            let trace = self.drive(&mut state).await;

            let degraded = trace.iter().filter(|r| r.outcome.is_degraded()).count();
            info!(
                steps = trace.len(),
                degraded_steps = degraded,
                searches = state.loop_count(),
                sources = state.sources().len(),
                "Research run complete"
            );
            ResearchReport::from_state(state)
        }
        .instrument(span)
        .await
    }

    /// Run the step loop over a caller-owned state until `stop`.
    ///
    /// Returns every executed step with its outcome, in order.
    pub async fn drive(&self, state: &mut ResearchState) -> Vec<StepRecord> {
        let mut trace = Vec::new();
        let mut current = Step::INITIAL;

        while !current.is_terminal() {
            let transition = self.dispatch(current, state).await;
            if let StepOutcome::Degraded { reason } = &transition.outcome {
                warn!(step = %current, reason = %reason, "Step degraded");
            }
            debug!(step = %current, next = %transition.next, "Step complete");

            trace.push(StepRecord {
                step: current,
                outcome: transition.outcome,
            });
            current = transition.next;
        }

        trace
    }

    async fn dispatch(&self, step: Step, state: &mut ResearchState) -> Transition {
        match step {
            Step::GenerateQuery => steps::generate_query(state, self.generator.as_ref()).await,
            Step::Search => steps::search(state, self.search.as_ref()).await,
            Step::Summarize => steps::summarize(state, self.generator.as_ref()).await,
            Step::Reflect => steps::reflect(state, self.generator.as_ref()).await,
            Step::Decide => steps::decide(state, self.policy.as_ref()),
            Step::Finalize => steps::finalize(state),
            Step::Stop => Transition::success(Step::Stop),
        }
    }
}
