//! Step handlers.
//!
//! Every handler is total: collaborator failures are written into the state as
//! a fallback value and reported as [`StepOutcome::Degraded`](super::StepOutcome),
//! never returned as errors. Each handler names the step that should run next.

mod decide;
mod finalize;
mod generate_query;
mod reflect;
mod search;
mod summarize;

pub use decide::decide;
pub use finalize::{finalize, render_sources, NO_SOURCES, NO_SUMMARY};
pub use generate_query::generate_query;
pub use reflect::reflect;
pub use search::{flatten_hits, search, SEARCH_FAILED};
pub use summarize::{summarize, SUMMARY_FAILED};

use serde::de::DeserializeOwned;

use super::StepError;
use crate::llm::TextGenerator;
use crate::utils::parse_json_response;

/// Ask the generator for a JSON object and parse it
async fn request_json<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    prompt: &str,
) -> Result<T, StepError> {
    let raw = generator.generate_content(prompt).await?;
    Ok(parse_json_response(&raw)?)
}
