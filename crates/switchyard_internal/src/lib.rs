//! # Switchyard Internal Library
//!
//! Re-exports the core Switchyard crates for convenience.

/// Layer 1: Bounded graph execution primitives.
pub use switchyard_graph;

/// Layer 2: Orchestrator wrapper and response envelope.
pub use switchyard_host;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use switchyard_graph::prelude::*;
    pub use switchyard_host::prelude::*;
}
