//! Edge types for orchestration graphs.
//!
//! Edges are directed routing rules from one node key to the next. An edge
//! is either unconditional (fixed successor) or conditional (a decision
//! function routes on the source node's most recent result).

use core::fmt;
use std::sync::Arc;

use crate::node::{NodeKey, NodeResult};

/// Unique identifier for an edge.
///
/// Edge IDs are generated with nanoid, providing globally unique values
/// without coordination between graph instances. Internally uses `Arc<str>`
/// for cheap cloning (reference count bump only).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeId(Arc<str>);

impl EdgeId {
    /// Creates a new edge ID with a unique nanoid.
    #[must_use]
    pub fn new() -> Self {
        Self(nanoid::nanoid!().into())
    }

    /// Creates an edge ID from a specific string value.
    ///
    /// Primarily useful for tests.
    #[must_use]
    pub fn from_string(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge_{}", self.0)
    }
}

/// A routing decision evaluated against the source node's result.
///
/// Decisions must be pure with respect to engine state: they only read the
/// [`NodeResult`] and return the next node key. Any configuration a decision
/// needs is captured explicitly at assembly time; there is no ambient
/// context. Invoking the same decision twice with an identical result must
/// yield an identical key.
///
/// Plain functions and closures of the shape
/// `Fn(&NodeResult<S>) -> NodeKey` implement this trait via the blanket
/// impl below.
pub trait Decision<S>: Send + Sync {
    /// Returns the key of the node to execute next.
    fn decide(&self, result: &NodeResult<S>) -> NodeKey;
}

impl<S, F> Decision<S> for F
where
    F: Fn(&NodeResult<S>) -> NodeKey + Send + Sync,
{
    fn decide(&self, result: &NodeResult<S>) -> NodeKey {
        (self)(result)
    }
}

/// Type alias for boxed decisions stored in conditional edges.
pub type BoxedDecision<S> = Box<dyn Decision<S>>;

/// A directed routing rule out of a node.
///
/// Every non-end node has exactly one outgoing edge; re-entrant targets
/// (routing back to an earlier node) are how retry loops are expressed.
pub enum Edge<S> {
    /// Fixed successor: `from` always routes to `to`.
    Unconditional(UnconditionalEdge),
    /// Data-dependent successor: a decision inspects the source node's
    /// result and returns the next key.
    Conditional(ConditionalEdge<S>),
}

impl<S> Edge<S> {
    /// Returns the edge's ID.
    #[must_use]
    pub fn id(&self) -> EdgeId {
        match self {
            Edge::Unconditional(edge) => edge.id.clone(),
            Edge::Conditional(edge) => edge.id.clone(),
        }
    }

    /// Returns the source node key.
    #[must_use]
    pub fn from(&self) -> &NodeKey {
        match self {
            Edge::Unconditional(edge) => &edge.from,
            Edge::Conditional(edge) => &edge.from,
        }
    }

    /// Returns true if resolving this edge invokes a decision function.
    #[must_use]
    pub fn is_conditional(&self) -> bool {
        matches!(self, Edge::Conditional(_))
    }
}

impl<S> fmt::Debug for Edge<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Unconditional(edge) => fmt::Debug::fmt(edge, f),
            Edge::Conditional(edge) => fmt::Debug::fmt(edge, f),
        }
    }
}

/// An unconditional edge: `from` -> `to`.
#[derive(Debug)]
pub struct UnconditionalEdge {
    /// Unique identifier for this edge.
    pub id: EdgeId,
    /// Source node key.
    pub from: NodeKey,
    /// Destination node key.
    pub to: NodeKey,
}

impl UnconditionalEdge {
    /// Creates a new unconditional edge.
    #[must_use]
    pub fn new(from: NodeKey, to: NodeKey) -> Self {
        Self {
            id: EdgeId::new(),
            from,
            to,
        }
    }
}

/// A conditional edge: `from` -> `decision(result)`.
pub struct ConditionalEdge<S> {
    /// Unique identifier for this edge.
    pub id: EdgeId,
    /// Source node key.
    pub from: NodeKey,
    /// The decision routing on the source node's result.
    pub decision: BoxedDecision<S>,
}

impl<S> ConditionalEdge<S> {
    /// Creates a new conditional edge.
    #[must_use]
    pub fn new(from: NodeKey, decision: impl Decision<S> + 'static) -> Self {
        Self {
            id: EdgeId::new(),
            from,
            decision: Box::new(decision),
        }
    }
}

impl<S> fmt::Debug for ConditionalEdge<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalEdge")
            .field("id", &self.id)
            .field("from", &self.from)
            .finish()
    }
}
