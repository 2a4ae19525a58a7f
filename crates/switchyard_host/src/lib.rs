//! Host-facing orchestration layer for Switchyard.
//!
//! `switchyard_host` wraps a built [`Graph`](switchyard_graph::graph::Graph)
//! and a [`GraphExecutor`](switchyard_graph::executor::GraphExecutor) behind
//! an [`Orchestrator`] that drives runs and renders every outcome as a
//! [`RunResponse`] envelope, ready for JSON encoding at whatever boundary
//! the host exposes.
//!
//! # Example
//!
//! ```ignore
//! use switchyard_host::prelude::*;
//!
//! let orchestrator = Orchestrator::new(graph, GraphExecutor::new(), "start", TaskState::default);
//! let response = orchestrator.run().await;
//! println!("{}", serde_json::to_string_pretty(&response)?);
//! ```

/// Orchestrator wrapper binding a graph to an executor.
pub mod orchestrator;

/// Discriminated response envelope.
pub mod response;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::orchestrator::{Orchestrator, StateFactory};
    pub use crate::response::RunResponse;
}

pub use orchestrator::{Orchestrator, StateFactory};
pub use response::RunResponse;
