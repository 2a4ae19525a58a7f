//! Orchestrator wrapper binding a graph, an executor, and an entry point.

use core::fmt;

use serde::Serialize;
use switchyard_graph::executor::GraphExecutor;
use switchyard_graph::graph::Graph;
use switchyard_graph::node::NodeKey;
use tracing::{Instrument, error, info, info_span};

use crate::response::RunResponse;

/// Factory producing a fresh initial state for each run.
pub type StateFactory<S> = Box<dyn Fn() -> S + Send + Sync>;

/// Owns a graph and drives runs through an executor, rendering each
/// outcome as a [`RunResponse`].
///
/// All collaborators are injected at construction: the graph, the
/// executor with its limits, the entry key, and a factory for the
/// initial state. Nothing is created behind the caller's back, so
/// tests can substitute any of them.
pub struct Orchestrator<S> {
    graph: Graph<S>,
    executor: GraphExecutor,
    entry: NodeKey,
    initial: StateFactory<S>,
}

impl<S> fmt::Debug for Orchestrator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("entry", &self.entry)
            .field("limits", self.executor.limits())
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .finish_non_exhaustive()
    }
}

impl<S> Orchestrator<S> {
    /// Creates an orchestrator over the given collaborators.
    pub fn new(
        graph: Graph<S>,
        executor: GraphExecutor,
        entry: impl Into<NodeKey>,
        initial: impl Fn() -> S + Send + Sync + 'static,
    ) -> Self {
        Self {
            graph,
            executor,
            entry: entry.into(),
            initial: Box::new(initial),
        }
    }

    /// Returns the graph driven by this orchestrator.
    #[must_use]
    pub fn graph(&self) -> &Graph<S> {
        &self.graph
    }

    /// Returns the executor in use.
    #[must_use]
    pub fn executor(&self) -> &GraphExecutor {
        &self.executor
    }

    /// Returns the entry key runs start from.
    #[must_use]
    pub fn entry(&self) -> &NodeKey {
        &self.entry
    }
}

impl<S> Orchestrator<S>
where
    S: Serialize + Send + 'static,
{
    /// Runs the graph from the entry key with a fresh initial state.
    ///
    /// Never returns an error: failures of any kind, from validation
    /// through ceilings to handler faults, are rendered into the
    /// [`RunResponse::Failed`] arm so the caller always holds a single
    /// envelope to encode.
    pub async fn run(&self) -> RunResponse {
        let span = info_span!("orchestrator_run", entry = %self.entry);
        let initial = (self.initial)();

        async {
            match self
                .executor
                .execute(&self.graph, self.entry.clone(), initial)
                .await
            {
                Ok(result) => {
                    info!(
                        nodes_executed = result.nodes_executed,
                        edge_condition_calls = result.edge_condition_calls,
                        duration = ?result.duration,
                        "run completed"
                    );
                    match RunResponse::completed(&result) {
                        Ok(response) => response,
                        Err(error) => {
                            error!(%error, "terminal state failed to serialize");
                            RunResponse::failed(error)
                        }
                    }
                }
                Err(error) => {
                    error!(%error, "run failed");
                    RunResponse::failed(error)
                }
            }
        }
        .instrument(span)
        .await
    }
}
