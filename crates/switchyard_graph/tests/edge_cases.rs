//! Concurrency-gate behavior and counter-scoping edge cases.

mod test_utils;

use futures::future::join_all;
use switchyard_graph::executor::GraphExecutor;
use switchyard_graph::limits::Limits;
use test_utils::{CountingTask, GateProbe, TaskState, ThresholdValidator, probe_graph, retry_loop};

#[tokio::test]
async fn gate_bounds_concurrent_runs() {
    let probe = GateProbe::default();
    let graph = probe_graph(probe.clone());
    let executor = GraphExecutor::with_limits(Limits::new().with_max_concurrency(2));

    let runs = (0..8).map(|seed| executor.execute(&graph, "start", seed));
    let results = join_all(runs).await;

    for result in results {
        result.unwrap();
    }
    // Eight runs contended for two permits: overlap happened but never
    // exceeded the gate.
    assert_eq!(probe.peak(), 2);
}

#[tokio::test]
async fn gate_of_one_serializes_runs() {
    let probe = GateProbe::default();
    let graph = probe_graph(probe.clone());
    let executor = GraphExecutor::with_limits(Limits::new().with_max_concurrency(1));

    let runs = (0..4).map(|seed| executor.execute(&graph, "start", seed));
    for result in join_all(runs).await {
        result.unwrap();
    }
    assert_eq!(probe.peak(), 1);
}

#[tokio::test]
async fn counters_are_scoped_per_run() {
    // Two successive runs on one executor each get fresh counters. A
    // shared counter would push the second run over the ceiling.
    let graph = retry_loop(CountingTask::default(), ThresholdValidator::new(30));
    let executor = GraphExecutor::new();

    for _ in 0..2 {
        let result = executor
            .execute(&graph, "start", TaskState::default())
            .await
            .unwrap();
        assert_eq!(result.nodes_executed, 60);
        assert_eq!(result.edge_condition_calls, 30);
    }
}

#[tokio::test]
async fn concurrent_runs_do_not_share_counters() {
    let graph = retry_loop(CountingTask::default(), ThresholdValidator::new(40));
    let executor = GraphExecutor::new();

    // Any pair of these runs would exceed the 100-execution ceiling if
    // the counter were executor-wide.
    let runs = (0..4).map(|_| executor.execute(&graph, "start", TaskState::default()));
    for result in join_all(runs).await {
        let result = result.unwrap();
        assert_eq!(result.nodes_executed, 80);
    }
}

#[tokio::test]
async fn entry_at_handler_skips_the_start_marker() {
    let task = CountingTask::default();
    let graph = retry_loop(task.clone(), ThresholdValidator::new(1));
    let executor = GraphExecutor::new();

    let result = executor
        .execute(&graph, "task", TaskState::default())
        .await
        .unwrap();

    assert_eq!(task.invocations(), 1);
    assert_eq!(result.nodes_executed, 2);
}
