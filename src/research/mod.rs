//! Research Loop
//!
//! The research orchestration state machine: a [`ResearchState`] threaded
//! through a closed set of [`Step`]s by the [`Orchestrator`].
//!
//! - **generate_query**: writes the first search query for the topic
//! - **search**: runs the current query, collects results and sources
//! - **summarize**: folds new results into the running summary
//! - **reflect**: finds a knowledge gap and proposes a follow-up query
//! - **decide**: asks the [`LoopPolicy`] whether to search again
//! - **finalize**: renders the markdown report with citations

pub mod orchestrator;
pub mod policy;
pub mod prompts;
pub mod state;
pub mod step;
pub mod steps;

#[cfg(test)]
pub(crate) mod testing;

pub use orchestrator::{Orchestrator, ResearchReport};
pub use policy::{reached_max_loops, LoopDecision, LoopPolicy, MaxLoopsPolicy};
pub use state::{ResearchState, Source, DEFAULT_MAX_LOOPS, NO_URL, UNTITLED};
pub use step::{Step, StepError, StepOutcome, StepRecord, Transition};
pub use steps::{NO_SOURCES, NO_SUMMARY, SEARCH_FAILED, SUMMARY_FAILED};
