//! Bounded graph execution primitives for Switchyard.
//!
//! `switchyard_graph` provides the core abstractions for running a directed
//! graph of asynchronous work units under global resource limits: a state
//! payload is threaded from node to node, conditional edges route on each
//! node's result, and ceilings on executions and condition calls bound
//! every run.
//!
//! # Core Concepts
//!
//! - [`Graph`] - Node registry plus edge table, with a builder API
//! - [`Node`] - Start/end markers and executable handlers
//! - [`Edge`] - Unconditional and decision-driven routing rules
//! - [`Limits`] - Execution ceilings and the concurrency gate width
//! - [`GraphExecutor`] - Runtime engine for graph traversal
//!
//! # Example
//!
//! ```ignore
//! use switchyard_graph::prelude::*;
//!
//! let mut graph = Graph::new();
//! graph
//!     .add_node("start", Node::Start)?
//!     .add_handler("task", run_task)?
//!     .add_handler("validation", validate)?
//!     .add_node("end", Node::End)?
//!     .add_edge("start", "task")?
//!     .add_edge("task", "validation")?
//!     .add_conditional_edge("validation", should_end)?;
//!
//! let executor = GraphExecutor::new();
//! let outcome = executor.execute(&graph, "task", TaskState::default()).await?;
//! ```

/// Edge types for connecting nodes in graphs.
pub mod edge;

/// Graph execution engine.
pub mod executor;

/// Graph structure and builder API.
pub mod graph;

/// Run-scoped resource limits and counters.
pub mod limits;

/// Node types for graph vertices.
pub mod node;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::edge::{
        BoxedDecision, ConditionalEdge, Decision, Edge, EdgeId, UnconditionalEdge,
    };
    pub use crate::executor::{ExecutionError, ExecutionResult, GraphExecutor};
    pub use crate::graph::{BuildError, Graph, ValidationError};
    pub use crate::limits::{LimitExceeded, Limits, RunCounters};
    pub use crate::node::{
        BoxedHandler, HandlerError, Node, NodeHandler, NodeKey, NodeResult,
    };
}

// Re-export key types at crate root for convenience
pub use executor::{ExecutionError, ExecutionResult, GraphExecutor};
pub use graph::{BuildError, Graph, ValidationError};
pub use limits::{LimitExceeded, Limits};
pub use node::{HandlerError, Node, NodeHandler, NodeKey, NodeResult};
