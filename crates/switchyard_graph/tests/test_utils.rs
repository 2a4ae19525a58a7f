//! Shared test utilities for `switchyard_graph` integration tests.
//!
//! Provides the task/validation retry-loop fixtures used across multiple
//! test files. Import via `mod test_utils;` in test files.

#![allow(
    dead_code,
    missing_docs,
    reason = "shared test utilities — not all items used in every test binary"
)]

use core::sync::atomic::{AtomicUsize, Ordering};
use core::time::Duration;
use std::sync::Arc;

use futures::future::BoxFuture;
use switchyard_graph::graph::Graph;
use switchyard_graph::node::{HandlerError, Node, NodeHandler, NodeKey, NodeResult};

// ─────────────────────────────────────────────────────────────────────────────
// Retry-loop state
// ─────────────────────────────────────────────────────────────────────────────

/// State threaded through the task/validation retry loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskState {
    pub result: u64,
    pub attempts: u64,
    pub is_valid: bool,
}

/// Decision used on the validation node: end once the result is valid,
/// otherwise route back to the task.
pub fn should_end(result: &NodeResult<TaskState>) -> NodeKey {
    if result.state.is_valid {
        NodeKey::from("end")
    } else {
        NodeKey::from("task")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Instrumented handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Task handler that counts its own invocations and produces a candidate
/// result derived from the attempt number.
#[derive(Clone, Default)]
pub struct CountingTask {
    invocations: Arc<AtomicUsize>,
}

impl CountingTask {
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl NodeHandler<TaskState> for CountingTask {
    fn run<'a>(
        &'a self,
        mut state: TaskState,
    ) -> BoxFuture<'a, Result<NodeResult<TaskState>, HandlerError>> {
        Box::pin(async move {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            state.attempts += 1;
            state.result = state.attempts * 7;
            state.is_valid = false;
            Ok(NodeResult::new(state))
        })
    }

    fn name(&self) -> &'static str {
        "counting_task"
    }
}

/// Validation handler that accepts the result once a fixed number of
/// attempts has been made. `required_attempts == 1` accepts immediately;
/// `required_attempts == usize::MAX` never accepts.
#[derive(Clone)]
pub struct ThresholdValidator {
    pub required_attempts: u64,
    invocations: Arc<AtomicUsize>,
}

impl ThresholdValidator {
    pub fn new(required_attempts: u64) -> Self {
        Self {
            required_attempts,
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A validator that never accepts, for ceiling tests.
    pub fn never() -> Self {
        Self::new(u64::MAX)
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl NodeHandler<TaskState> for ThresholdValidator {
    fn run<'a>(
        &'a self,
        mut state: TaskState,
    ) -> BoxFuture<'a, Result<NodeResult<TaskState>, HandlerError>> {
        Box::pin(async move {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            state.is_valid = state.attempts >= self.required_attempts;
            Ok(NodeResult::new(state))
        })
    }

    fn name(&self) -> &'static str {
        "threshold_validator"
    }
}

/// Handler that always fails, for error-propagation tests.
pub struct FailingHandler;

impl NodeHandler<TaskState> for FailingHandler {
    fn run<'a>(
        &'a self,
        _state: TaskState,
    ) -> BoxFuture<'a, Result<NodeResult<TaskState>, HandlerError>> {
        Box::pin(async move { Err(HandlerError::failed("intentional failure")) })
    }

    fn name(&self) -> &'static str {
        "failing_handler"
    }
}

/// Handler that records how many executions are in flight at once.
///
/// Sleeps briefly while holding the in-flight count so overlapping
/// executions are observable.
#[derive(Clone, Default)]
pub struct GateProbe {
    current: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl GateProbe {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl NodeHandler<u32> for GateProbe {
    fn run<'a>(&'a self, state: u32) -> BoxFuture<'a, Result<NodeResult<u32>, HandlerError>> {
        Box::pin(async move {
            let in_flight = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(in_flight, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            Ok(NodeResult::new(state))
        })
    }

    fn name(&self) -> &'static str {
        "gate_probe"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graph fixtures
// ─────────────────────────────────────────────────────────────────────────────

/// Builds the canonical retry loop:
/// `start -> task -> validation -> (valid ? end : task)`.
pub fn retry_loop(task: CountingTask, validator: ThresholdValidator) -> Graph<TaskState> {
    let mut graph = Graph::new();
    graph
        .add_node("start", Node::Start)
        .unwrap()
        .add_handler("task", task)
        .unwrap()
        .add_handler("validation", validator)
        .unwrap()
        .add_node("end", Node::End)
        .unwrap()
        .add_edge("start", "task")
        .unwrap()
        .add_edge("task", "validation")
        .unwrap()
        .add_conditional_edge("validation", should_end)
        .unwrap();
    graph
}

/// Builds `start -> probe -> end` over a shared [`GateProbe`].
pub fn probe_graph(probe: GateProbe) -> Graph<u32> {
    let mut graph = Graph::new();
    graph
        .add_node("start", Node::Start)
        .unwrap()
        .add_handler("probe", probe)
        .unwrap()
        .add_node("end", Node::End)
        .unwrap()
        .add_edge("start", "probe")
        .unwrap()
        .add_edge("probe", "end")
        .unwrap();
    graph
}
