//! Graph execution engine.
//!
//! The [`GraphExecutor`] walks a graph from an entry key to an end marker,
//! executing handlers and resolving edges, under the ceilings and the
//! concurrency gate configured in [`Limits`].
//!
//! # Example
//!
//! ```ignore
//! use switchyard_graph::{Graph, GraphExecutor, Limits};
//!
//! let executor = GraphExecutor::with_limits(Limits::new().with_max_node_executions(50));
//! let outcome = executor.execute(&graph, "task", TaskState::default()).await?;
//! println!("finished in {} executions", outcome.nodes_executed);
//! ```

use core::fmt;
use core::time::Duration;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::edge::Edge;
use crate::graph::{Graph, ValidationError};
use crate::limits::{LimitExceeded, Limits, RunCounters};
use crate::node::{HandlerError, Node, NodeKey, NodeResult};

/// Result of a completed graph run.
#[derive(Debug)]
pub struct ExecutionResult<S> {
    /// The terminal state, produced by the last handler before the end
    /// marker was reached.
    pub state: S,
    /// Number of handler executions during the run. Start and end markers
    /// are not counted.
    pub nodes_executed: usize,
    /// Number of edge-condition evaluations during the run. Unconditional
    /// edges never contribute.
    pub edge_condition_calls: usize,
    /// Total run duration.
    pub duration: Duration,
}

/// Errors that terminate a graph run.
#[derive(Debug)]
pub enum ExecutionError {
    /// The graph failed structural validation; nothing was executed.
    InvalidGraph(Vec<ValidationError>),
    /// A referenced node key is not registered.
    UnknownNode(NodeKey),
    /// A node was reached that has no outgoing edge.
    NoOutgoingEdge(NodeKey),
    /// A run-scoped ceiling was crossed.
    Limit(LimitExceeded),
    /// A handler reported a failure.
    Handler {
        /// The node whose handler failed.
        node: NodeKey,
        /// The handler's error.
        error: HandlerError,
    },
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::InvalidGraph(errors) => {
                write!(f, "invalid graph: ")?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            }
            ExecutionError::UnknownNode(key) => write!(f, "unknown node: '{key}'"),
            ExecutionError::NoOutgoingEdge(key) => {
                write!(f, "no outgoing edge from node '{key}'")
            }
            ExecutionError::Limit(limit) => write!(f, "{limit}"),
            ExecutionError::Handler { node, error } => {
                write!(f, "node '{node}' failed: {error}")
            }
        }
    }
}

impl core::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ExecutionError::Limit(limit) => Some(limit),
            ExecutionError::Handler { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Graph execution engine.
///
/// Configured once at construction with immutable [`Limits`]. The ceilings
/// are enforced per run through fresh [`RunCounters`]; the concurrency gate
/// lives on the executor and is shared by every run dispatched through it.
///
/// A single run is strictly sequential: every node has exactly one outgoing
/// edge, and the next node only becomes ready once its predecessor's result
/// is available. The gate therefore bounds handler executions *across*
/// concurrent runs on the same executor, queuing FIFO when saturated.
#[derive(Debug)]
pub struct GraphExecutor {
    limits: Limits,
    gate: Arc<Semaphore>,
}

impl Default for GraphExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphExecutor {
    /// Creates an executor with the default limits (10 concurrent
    /// executions, 100 node executions, 100 edge-condition calls).
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Creates an executor with the given limits.
    #[must_use]
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            gate: Arc::new(Semaphore::new(limits.max_concurrency)),
            limits,
        }
    }

    /// Returns the configured limits.
    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Executes a graph from `entry` with the given initial state, driving
    /// it until an end marker is reached or the run fails.
    ///
    /// The graph is validated before the first execution; a structurally
    /// invalid graph fails fast with zero node executions recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - validation fails ([`ExecutionError::InvalidGraph`])
    /// - a decision routes to an unregistered key ([`ExecutionError::UnknownNode`])
    /// - a ceiling is crossed ([`ExecutionError::Limit`])
    /// - a handler fails ([`ExecutionError::Handler`])
    pub async fn execute<S>(
        &self,
        graph: &Graph<S>,
        entry: impl Into<NodeKey>,
        initial: S,
    ) -> Result<ExecutionResult<S>, ExecutionError> {
        let mut current = entry.into();
        graph
            .validate(&current)
            .map_err(ExecutionError::InvalidGraph)?;

        let started = Instant::now();
        let counters = RunCounters::new();
        let mut state = initial;

        tracing::debug!(entry = %current, "starting graph run");

        loop {
            let node = graph
                .node(&current)
                .ok_or_else(|| ExecutionError::UnknownNode(current.clone()))?;

            match node {
                Node::End => {
                    let result = ExecutionResult {
                        state,
                        nodes_executed: counters.node_executions(),
                        edge_condition_calls: counters.edge_condition_calls(),
                        duration: started.elapsed(),
                    };
                    tracing::debug!(
                        end = %current,
                        nodes_executed = result.nodes_executed,
                        edge_condition_calls = result.edge_condition_calls,
                        "graph run completed"
                    );
                    return Ok(result);
                }
                Node::Start => {
                    // Markers carry no behavior; advancing through one is
                    // not a node execution.
                    current = self.next_after_marker(graph, &current)?;
                }
                Node::Handler(handler) => {
                    let ordinal = counters
                        .record_node_execution(self.limits.max_node_executions)
                        .map_err(ExecutionError::Limit)?;

                    // The executor owns the gate and never closes it.
                    let permit = self.gate.acquire().await.expect("semaphore closed");
                    let span = tracing::debug_span!(
                        "node_execution",
                        node = %current,
                        handler = handler.name(),
                        ordinal,
                    );
                    let outcome = handler.run(state).instrument(span).await;
                    drop(permit);

                    let result = outcome.map_err(|error| ExecutionError::Handler {
                        node: current.clone(),
                        error,
                    })?;

                    let next = self.resolve_next(graph, &current, &result, &counters)?;
                    state = result.state;
                    current = next;
                }
            }
        }
    }

    /// Advances through a structural marker via its unconditional edge.
    fn next_after_marker<S>(
        &self,
        graph: &Graph<S>,
        from: &NodeKey,
    ) -> Result<NodeKey, ExecutionError> {
        // validate() already rejects markers lacking an unconditional edge.
        match graph.edge(from) {
            Some(Edge::Unconditional(edge)) => Ok(edge.to.clone()),
            _ => Err(ExecutionError::NoOutgoingEdge(from.clone())),
        }
    }

    /// Resolves the next node key after a handler execution.
    ///
    /// Conditional resolution records an edge-condition call first; the
    /// decision function only runs if the ceiling allows it. The returned
    /// key must be registered.
    fn resolve_next<S>(
        &self,
        graph: &Graph<S>,
        from: &NodeKey,
        result: &NodeResult<S>,
        counters: &RunCounters,
    ) -> Result<NodeKey, ExecutionError> {
        let edge = graph
            .edge(from)
            .ok_or_else(|| ExecutionError::NoOutgoingEdge(from.clone()))?;

        let next = match edge {
            Edge::Unconditional(edge) => edge.to.clone(),
            Edge::Conditional(edge) => {
                let ordinal = counters
                    .record_edge_condition_call(self.limits.max_edge_condition_calls)
                    .map_err(ExecutionError::Limit)?;
                let span = tracing::debug_span!(
                    "edge_resolution",
                    edge = %edge.id,
                    from = %from,
                    ordinal,
                );
                let _entered = span.enter();
                edge.decision.decide(result)
            }
        };

        if !graph.has_node(&next) {
            return Err(ExecutionError::UnknownNode(next));
        }
        Ok(next)
    }
}
