//! Termination policy for the search loop.
//!
//! `decide` is the only step that can end the loop, and it delegates the
//! actual choice here so the rule can be tested and swapped on its own.

/// Whether another search iteration should run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopDecision {
    Continue,
    Finalize,
}

pub trait LoopPolicy: Send + Sync {
    fn decide(&self, loop_count: u32, max_loops: u32) -> LoopDecision;
}

/// Finalize once `loop_count >= max_loops`
pub fn reached_max_loops(loop_count: u32, max_loops: u32) -> LoopDecision {
    if loop_count >= max_loops {
        LoopDecision::Finalize
    } else {
        LoopDecision::Continue
    }
}

/// Default policy, see [`reached_max_loops`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxLoopsPolicy;

impl LoopPolicy for MaxLoopsPolicy {
    fn decide(&self, loop_count: u32, max_loops: u32) -> LoopDecision {
        reached_max_loops(loop_count, max_loops)
    }
}

impl<F> LoopPolicy for F
where
    F: Fn(u32, u32) -> LoopDecision + Send + Sync,
{
    fn decide(&self, loop_count: u32, max_loops: u32) -> LoopDecision {
        self(loop_count, max_loops)
    }
}
