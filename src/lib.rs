//! A bounded, stateful orchestrator for directed graphs of asynchronous work units.
//!

pub use switchyard_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use switchyard_internal::prelude::*;
}
