//! Response envelope returned by an orchestrated run.

use serde::{Deserialize, Serialize};
use switchyard_graph::executor::ExecutionResult;

/// Outcome of an orchestrated run, discriminated by a `status` tag.
///
/// A run either completed (the graph reached an end marker) or failed
/// (validation, a ceiling, or a handler aborted it). Callers branch on
/// the tag instead of probing the payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunResponse {
    /// The graph reached an end marker.
    Completed {
        /// The terminal state, rendered as JSON.
        state: serde_json::Value,
        /// Handler executions during the run.
        nodes_executed: usize,
        /// Edge-condition evaluations during the run.
        edge_condition_calls: usize,
    },
    /// The run was aborted.
    Failed {
        /// Human-readable description of what aborted the run.
        error: String,
    },
}

impl RunResponse {
    /// Builds a completed envelope from an execution result.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if the terminal state cannot be
    /// rendered as JSON.
    pub fn completed<S: Serialize>(result: &ExecutionResult<S>) -> Result<Self, serde_json::Error> {
        Ok(RunResponse::Completed {
            state: serde_json::to_value(&result.state)?,
            nodes_executed: result.nodes_executed,
            edge_condition_calls: result.edge_condition_calls,
        })
    }

    /// Builds a failed envelope from anything displayable.
    pub fn failed(error: impl ToString) -> Self {
        RunResponse::Failed {
            error: error.to_string(),
        }
    }

    /// Returns `true` for [`RunResponse::Completed`].
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, RunResponse::Completed { .. })
    }
}
