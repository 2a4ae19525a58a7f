//! Example retry-loop CLI.
//!
//! Builds the task/validation retry loop, runs it through an
//! [`Orchestrator`], and prints the response envelope as JSON.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug retry_loop
//! ```

use example::{TaskState, build_graph};
use switchyard_graph::GraphExecutor;
use switchyard_host::Orchestrator;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let graph = match build_graph() {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let orchestrator = Orchestrator::new(graph, GraphExecutor::new(), "start", TaskState::default);
    let response = orchestrator.run().await;

    match serde_json::to_string_pretty(&response) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
