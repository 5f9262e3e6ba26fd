use tracing::info;

use crate::research::{LoopDecision, LoopPolicy, ResearchState, Step, Transition};

/// Route to another search iteration or to the final report
pub fn decide(state: &ResearchState, policy: &dyn LoopPolicy) -> Transition {
    let decision = policy.decide(state.loop_count(), state.max_loops());
    info!(
        loop_count = state.loop_count(),
        max_loops = state.max_loops(),
        decision = ?decision,
        "Deciding"
    );

    match decision {
        LoopDecision::Continue => Transition::success(Step::Search),
        LoopDecision::Finalize => Transition::success(Step::Finalize),
    }
}
