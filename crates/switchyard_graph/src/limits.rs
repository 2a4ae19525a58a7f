//! Run-scoped resource limits and their enforcement counters.
//!
//! Three independent bounds protect a run: a ceiling on total node
//! executions, a ceiling on total edge-condition evaluations, and a gate on
//! concurrently in-flight executions. The two ceilings are the only liveness
//! guards against infinite loops (e.g. an always-false validator); reaching
//! either one is a hard, non-retryable failure of the whole run.

use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Immutable limit configuration, set once at executor construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Width of the concurrency gate: how many node executions may be
    /// simultaneously dispatched.
    pub max_concurrency: usize,
    /// Ceiling on total node executions per run.
    pub max_node_executions: usize,
    /// Ceiling on total edge-condition evaluations per run.
    pub max_edge_condition_calls: usize,
}

impl Limits {
    /// Default concurrency gate width.
    pub const DEFAULT_MAX_CONCURRENCY: usize = 10;
    /// Default node-execution ceiling.
    pub const DEFAULT_MAX_NODE_EXECUTIONS: usize = 100;
    /// Default edge-condition-call ceiling.
    pub const DEFAULT_MAX_EDGE_CONDITION_CALLS: usize = 100;

    /// Creates the default limit configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the concurrency gate width.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero; a zero-width gate could never dispatch.
    #[must_use]
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        assert!(max > 0, "max_concurrency must be positive");
        self.max_concurrency = max;
        self
    }

    /// Sets the node-execution ceiling.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero.
    #[must_use]
    pub fn with_max_node_executions(mut self, max: usize) -> Self {
        assert!(max > 0, "max_node_executions must be positive");
        self.max_node_executions = max;
        self
    }

    /// Sets the edge-condition-call ceiling.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero.
    #[must_use]
    pub fn with_max_edge_condition_calls(mut self, max: usize) -> Self {
        assert!(max > 0, "max_edge_condition_calls must be positive");
        self.max_edge_condition_calls = max;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_concurrency: Self::DEFAULT_MAX_CONCURRENCY,
            max_node_executions: Self::DEFAULT_MAX_NODE_EXECUTIONS,
            max_edge_condition_calls: Self::DEFAULT_MAX_EDGE_CONDITION_CALLS,
        }
    }
}

/// A limit ceiling was crossed during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitExceeded {
    /// The node-execution ceiling was crossed.
    NodeExecutions {
        /// The configured ceiling.
        limit: usize,
    },
    /// The edge-condition-call ceiling was crossed.
    EdgeConditionCalls {
        /// The configured ceiling.
        limit: usize,
    },
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitExceeded::NodeExecutions { limit } => {
                write!(f, "node execution limit ({limit}) exceeded")
            }
            LimitExceeded::EdgeConditionCalls { limit } => {
                write!(f, "edge condition call limit ({limit}) exceeded")
            }
        }
    }
}

impl core::error::Error for LimitExceeded {}

/// Monotonic counters scoped to one graph run.
///
/// Counters start at zero and are never decremented. They are the only
/// state shared across concurrently in-flight executions, so enforcement is
/// increment-then-check: the atomic add happens first and the boundary test
/// uses its return value, never a separate load. Two racing executions can
/// therefore never both pass the same boundary.
#[derive(Debug, Default)]
pub struct RunCounters {
    node_executions: AtomicUsize,
    edge_condition_calls: AtomicUsize,
}

impl RunCounters {
    /// Creates zeroed counters for a fresh run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one node execution against the given ceiling.
    ///
    /// Returns the execution's ordinal (1-based) on success.
    ///
    /// # Errors
    ///
    /// Returns [`LimitExceeded::NodeExecutions`] if this execution would
    /// cross the ceiling.
    pub fn record_node_execution(&self, ceiling: usize) -> Result<usize, LimitExceeded> {
        let ordinal = self.node_executions.fetch_add(1, Ordering::SeqCst) + 1;
        if ordinal > ceiling {
            return Err(LimitExceeded::NodeExecutions { limit: ceiling });
        }
        Ok(ordinal)
    }

    /// Records one edge-condition evaluation against the given ceiling.
    ///
    /// Returns the call's ordinal (1-based) on success.
    ///
    /// # Errors
    ///
    /// Returns [`LimitExceeded::EdgeConditionCalls`] if this call would
    /// cross the ceiling.
    pub fn record_edge_condition_call(&self, ceiling: usize) -> Result<usize, LimitExceeded> {
        let ordinal = self.edge_condition_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if ordinal > ceiling {
            return Err(LimitExceeded::EdgeConditionCalls { limit: ceiling });
        }
        Ok(ordinal)
    }

    /// Total node executions recorded so far, including an increment that
    /// was rejected at the boundary.
    #[must_use]
    pub fn node_executions(&self) -> usize {
        self.node_executions.load(Ordering::SeqCst)
    }

    /// Total edge-condition calls recorded so far.
    #[must_use]
    pub fn edge_condition_calls(&self) -> usize {
        self.edge_condition_calls.load(Ordering::SeqCst)
    }
}
