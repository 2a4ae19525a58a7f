//! Integration tests for graph assembly.

mod test_utils;

use switchyard_graph::graph::{BuildError, Graph};
use switchyard_graph::node::{Node, NodeKey};
use test_utils::{CountingTask, TaskState, ThresholdValidator, retry_loop, should_end};

#[test]
fn retry_loop_assembles() {
    let graph = retry_loop(CountingTask::default(), ThresholdValidator::new(1));

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    assert!(graph.has_node(&NodeKey::from("start")));
    assert!(graph.has_node(&NodeKey::from("task")));
    assert!(graph.has_node(&NodeKey::from("validation")));
    assert!(graph.has_node(&NodeKey::from("end")));
}

#[test]
fn markers_and_handlers_are_distinguishable() {
    let graph = retry_loop(CountingTask::default(), ThresholdValidator::new(1));

    assert!(matches!(
        graph.node(&NodeKey::from("start")),
        Some(Node::Start)
    ));
    assert!(matches!(graph.node(&NodeKey::from("end")), Some(Node::End)));
    assert!(matches!(
        graph.node(&NodeKey::from("task")),
        Some(Node::Handler(_))
    ));
    assert!(graph.node(&NodeKey::from("end")).is_some_and(Node::is_end));
    assert!(graph.node(&NodeKey::from("missing")).is_none());
}

#[test]
fn edge_kinds_are_distinguishable() {
    let graph = retry_loop(CountingTask::default(), ThresholdValidator::new(1));

    let unconditional = graph.edge(&NodeKey::from("task")).unwrap();
    assert!(!unconditional.is_conditional());
    assert_eq!(unconditional.from(), &NodeKey::from("task"));

    let conditional = graph.edge(&NodeKey::from("validation")).unwrap();
    assert!(conditional.is_conditional());
    assert_eq!(conditional.from(), &NodeKey::from("validation"));

    assert!(graph.edge(&NodeKey::from("end")).is_none());
}

#[test]
fn duplicate_node_key_rejected_across_node_kinds() {
    let mut graph: Graph<TaskState> = Graph::new();
    graph.add_node("task", Node::Start).unwrap();

    let err = graph.add_handler("task", CountingTask::default()).unwrap_err();
    assert_eq!(err, BuildError::DuplicateNode("task".into()));

    let err = graph.add_node("task", Node::End).unwrap_err();
    assert_eq!(err, BuildError::DuplicateNode("task".into()));

    assert_eq!(graph.node_count(), 1);
}

#[test]
fn single_outgoing_edge_per_node() {
    let mut graph: Graph<TaskState> = Graph::new();
    graph.add_edge("validation", "end").unwrap();

    // A second edge from the same source is rejected regardless of kind.
    let err = graph.add_conditional_edge("validation", should_end).unwrap_err();
    assert_eq!(err, BuildError::DuplicateEdge("validation".into()));

    let err = graph.add_edge("validation", "task").unwrap_err();
    assert_eq!(err, BuildError::DuplicateEdge("validation".into()));

    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn builder_chains_through_results() {
    fn build() -> Result<Graph<TaskState>, BuildError> {
        let mut graph = Graph::new();
        graph
            .add_node("start", Node::Start)?
            .add_handler("task", CountingTask::default())?
            .add_node("end", Node::End)?
            .add_edge("start", "task")?
            .add_edge("task", "end")?;
        Ok(graph)
    }

    let graph = build().unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn build_error_display() {
    assert_eq!(
        BuildError::DuplicateNode("task".into()).to_string(),
        "node 'task' is already registered"
    );
    assert_eq!(
        BuildError::DuplicateEdge("task".into()).to_string(),
        "node 'task' already has an outgoing edge"
    );
}
