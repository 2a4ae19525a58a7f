//! Example retry-loop workflow built with Switchyard.
//!
//! A task node produces a candidate result and a validation node accepts
//! or rejects it. Rejection loops back to the task for another attempt,
//! under the executor's ceilings.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  Retry Loop                                      │
//! │                                                  │
//! │  ┌───────┐   ┌──────┐   ┌────────────┐   ┌─────┐ │
//! │  │ start │──▶│ task │──▶│ validation │──▶│ end │ │
//! │  └───────┘   └──────┘   └──────┬─────┘   └─────┘ │
//! │                  ▲            │ invalid          │
//! │                  └────────────┘                  │
//! └──────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use switchyard_graph::graph::{BuildError, Graph};
use switchyard_graph::node::{HandlerError, Node, NodeKey, NodeResult};
use tracing::debug;

/// State threaded through the retry loop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskState {
    /// The candidate result produced by the task node.
    pub result: u64,
    /// How many attempts the task node has made.
    pub attempts: u64,
    /// Whether the validation node accepted the current result.
    pub is_valid: bool,
}

/// Produces the next candidate result.
///
/// Deterministic on purpose so the demo always takes the same number of
/// loop iterations: the candidate is a multiple of 7, and validation
/// wants a multiple of 5, so the fifth attempt (35) is the first accepted.
pub async fn run_task(mut state: TaskState) -> Result<NodeResult<TaskState>, HandlerError> {
    state.attempts += 1;
    state.result = state.attempts * 7;
    state.is_valid = false;
    debug!(attempt = state.attempts, candidate = state.result, "produced candidate");
    Ok(NodeResult::new(state))
}

/// Accepts candidates that are a multiple of 5.
pub async fn validate(mut state: TaskState) -> Result<NodeResult<TaskState>, HandlerError> {
    state.is_valid = state.result % 5 == 0;
    debug!(candidate = state.result, accepted = state.is_valid, "validated candidate");
    Ok(NodeResult::new(state))
}

/// Routes the loop: end once validation accepted, otherwise retry.
pub fn should_end(result: &NodeResult<TaskState>) -> NodeKey {
    if result.state.is_valid {
        NodeKey::from("end")
    } else {
        NodeKey::from("task")
    }
}

/// Builds the retry-loop graph.
///
/// # Errors
///
/// Returns a [`BuildError`] if a key or edge is registered twice, which
/// with this fixed topology cannot happen.
pub fn build_graph() -> Result<Graph<TaskState>, BuildError> {
    let mut graph = Graph::new();
    graph
        .add_node("start", Node::Start)?
        .add_handler("task", run_task)?
        .add_handler("validation", validate)?
        .add_node("end", Node::End)?
        .add_edge("start", "task")?
        .add_edge("task", "validation")?
        .add_conditional_edge("validation", should_end)?;
    Ok(graph)
}
