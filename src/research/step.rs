use serde::Serialize;
use thiserror::Error;

use crate::search::SearchError;
use crate::types::AppError;

/// The closed set of steps in a research run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    GenerateQuery,
    Search,
    Summarize,
    Reflect,
    Decide,
    Finalize,
    /// Terminal marker; never executed
    Stop,
}

impl Step {
    pub const INITIAL: Step = Step::GenerateQuery;

    pub fn name(&self) -> &'static str {
        match self {
            Step::GenerateQuery => "generate_query",
            Step::Search => "search",
            Step::Summarize => "summarize",
            Step::Reflect => "reflect",
            Step::Decide => "decide",
            Step::Finalize => "finalize",
            Step::Stop => "stop",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Stop)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a step's collaborator call went
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Success,
    /// The collaborator failed or returned unusable data; state holds a fallback value
    Degraded { reason: String },
}

impl StepOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, StepOutcome::Degraded { .. })
    }
}

/// What a step handler hands back to the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Step,
    pub outcome: StepOutcome,
}

impl Transition {
    pub fn success(next: Step) -> Self {
        Self {
            next,
            outcome: StepOutcome::Success,
        }
    }

    pub fn degraded(next: Step, reason: impl Into<String>) -> Self {
        Self {
            next,
            outcome: StepOutcome::Degraded {
                reason: reason.into(),
            },
        }
    }
}

/// One executed step in a run's trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Failures a step handler absorbs into a degraded outcome
#[derive(Debug, Error)]
pub enum StepError {
    #[error("generation failed: {0}")]
    Generation(#[from] AppError),

    #[error("unparseable model output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("empty {0} in model output")]
    Empty(&'static str),
}
