//! Graph structure and builder API.
//!
//! A [`Graph`] pairs a node registry (key -> marker or handler) with an edge
//! table (key -> outgoing routing rule). Assembly is declarative; all
//! structural errors are surfaced either at registration time
//! ([`BuildError`]) or by [`Graph::validate`] before the first execution.

use core::fmt;

use hashbrown::HashMap;

use crate::edge::{ConditionalEdge, Decision, Edge, EdgeId, UnconditionalEdge};
use crate::node::{Node, NodeHandler, NodeKey};

/// A directed graph of asynchronous work units.
///
/// # Example
///
/// ```ignore
/// let mut graph = Graph::new();
/// graph
///     .add_node("start", Node::Start)?
///     .add_handler("task", run_task)?
///     .add_handler("validation", validate)?
///     .add_node("end", Node::End)?
///     .add_edge("start", "task")?
///     .add_edge("task", "validation")?
///     .add_conditional_edge("validation", should_end)?;
/// ```
pub struct Graph<S> {
    /// Node registry: exclusive owner of the key -> node mapping.
    nodes: HashMap<NodeKey, Node<S>>,
    /// Edge table: at most one outgoing edge per source key.
    edges: HashMap<NodeKey, Edge<S>>,
}

impl<S> Default for Graph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Graph<S> {
    /// Creates a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    /// Returns the number of registered nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of registered edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if a node is registered under `key`.
    #[must_use]
    pub fn has_node(&self, key: &NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Resolves a node by key.
    #[must_use]
    pub fn node(&self, key: &NodeKey) -> Option<&Node<S>> {
        self.nodes.get(key)
    }

    /// Resolves the outgoing edge of a node by its source key.
    #[must_use]
    pub fn edge(&self, from: &NodeKey) -> Option<&Edge<S>> {
        self.edges.get(from)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Builder API
    // ─────────────────────────────────────────────────────────────────────

    /// Registers a node under a unique key.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateNode`] if `key` is already taken.
    pub fn add_node(
        &mut self,
        key: impl Into<NodeKey>,
        node: Node<S>,
    ) -> Result<&mut Self, BuildError> {
        let key = key.into();
        if self.nodes.contains_key(&key) {
            return Err(BuildError::DuplicateNode(key));
        }
        self.nodes.insert(key, node);
        Ok(self)
    }

    /// Registers an executable handler under a unique key.
    ///
    /// Convenience wrapper over [`add_node`](Self::add_node) for the common
    /// case.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateNode`] if `key` is already taken.
    pub fn add_handler(
        &mut self,
        key: impl Into<NodeKey>,
        handler: impl NodeHandler<S> + 'static,
    ) -> Result<&mut Self, BuildError> {
        self.add_node(key, Node::handler(handler))
    }

    /// Registers an unconditional edge `from` -> `to`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateEdge`] if `from` already has an
    /// outgoing edge.
    pub fn add_edge(
        &mut self,
        from: impl Into<NodeKey>,
        to: impl Into<NodeKey>,
    ) -> Result<&mut Self, BuildError> {
        let from = from.into();
        if self.edges.contains_key(&from) {
            return Err(BuildError::DuplicateEdge(from));
        }
        let edge = Edge::Unconditional(UnconditionalEdge::new(from.clone(), to.into()));
        self.edges.insert(from, edge);
        Ok(self)
    }

    /// Registers a conditional edge whose decision routes on the result of
    /// `from`'s most recent execution.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateEdge`] if `from` already has an
    /// outgoing edge.
    pub fn add_conditional_edge(
        &mut self,
        from: impl Into<NodeKey>,
        decision: impl Decision<S> + 'static,
    ) -> Result<&mut Self, BuildError> {
        let from = from.into();
        if self.edges.contains_key(&from) {
            return Err(BuildError::DuplicateEdge(from));
        }
        let edge = Edge::Conditional(ConditionalEdge::new(from.clone(), decision));
        self.edges.insert(from, edge);
        Ok(self)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Validation API
    // ─────────────────────────────────────────────────────────────────────

    /// Validates the graph structure against an intended entry key.
    ///
    /// Checks, before any execution:
    /// - the entry key is registered
    /// - at least one handler node is registered (a marker-only graph has
    ///   no work to run)
    /// - every non-end node has an outgoing edge (edge completeness)
    /// - no end node has an outgoing edge
    /// - every edge source is a registered node
    /// - every unconditional edge target is a registered node
    /// - no conditional edge leaves a start marker (there is no prior
    ///   result to route on)
    ///
    /// Conditional edge *targets* are dynamic and are checked against the
    /// registry at resolution time instead.
    ///
    /// # Errors
    ///
    /// Returns every violation found, so a misconfigured graph is reported
    /// in one pass.
    pub fn validate(&self, entry: &NodeKey) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !self.nodes.contains_key(entry) {
            errors.push(ValidationError::UnknownEntry(entry.clone()));
        }

        if !self
            .nodes
            .values()
            .any(|node| matches!(node, Node::Handler(_)))
        {
            errors.push(ValidationError::NoHandlers);
        }

        for (key, node) in &self.nodes {
            match (node.is_end(), self.edges.contains_key(key)) {
                (false, false) => errors.push(ValidationError::MissingOutgoingEdge(key.clone())),
                (true, true) => errors.push(ValidationError::EdgeFromEnd(key.clone())),
                _ => {}
            }
        }

        for (from, edge) in &self.edges {
            match self.nodes.get(from) {
                None => errors.push(ValidationError::UnknownEdgeSource {
                    edge: edge.id(),
                    from: from.clone(),
                }),
                Some(Node::Start) if edge.is_conditional() => {
                    errors.push(ValidationError::ConditionalEdgeFromStart {
                        edge: edge.id(),
                        from: from.clone(),
                    });
                }
                Some(_) => {}
            }

            if let Edge::Unconditional(unconditional) = edge {
                if !self.nodes.contains_key(&unconditional.to) {
                    errors.push(ValidationError::UnknownEdgeTarget {
                        edge: unconditional.id.clone(),
                        from: from.clone(),
                        to: unconditional.to.clone(),
                    });
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl<S> fmt::Debug for Graph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .finish()
    }
}

/// Errors raised while assembling a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A node key was registered twice.
    DuplicateNode(NodeKey),
    /// A source key was given a second outgoing edge.
    DuplicateEdge(NodeKey),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DuplicateNode(key) => {
                write!(f, "node '{key}' is already registered")
            }
            BuildError::DuplicateEdge(from) => {
                write!(f, "node '{from}' already has an outgoing edge")
            }
        }
    }
}

impl core::error::Error for BuildError {}

/// Structural violations detected by [`Graph::validate`].
///
/// These are configuration errors: the graph must not be allowed to start,
/// and no node execution is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The entry key is not registered.
    UnknownEntry(NodeKey),
    /// No handler node is registered; the graph contains only markers.
    NoHandlers,
    /// A non-end node has no outgoing edge.
    MissingOutgoingEdge(NodeKey),
    /// An end marker has an outgoing edge.
    EdgeFromEnd(NodeKey),
    /// An edge's source key is not registered.
    UnknownEdgeSource {
        /// The edge ID.
        edge: EdgeId,
        /// The unregistered source key.
        from: NodeKey,
    },
    /// An unconditional edge's target key is not registered.
    UnknownEdgeTarget {
        /// The edge ID.
        edge: EdgeId,
        /// The source key.
        from: NodeKey,
        /// The unregistered target key.
        to: NodeKey,
    },
    /// A conditional edge leaves a start marker.
    ConditionalEdgeFromStart {
        /// The edge ID.
        edge: EdgeId,
        /// The start marker's key.
        from: NodeKey,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownEntry(key) => {
                write!(f, "entry node '{key}' is not registered")
            }
            ValidationError::NoHandlers => {
                write!(f, "graph has no handler nodes")
            }
            ValidationError::MissingOutgoingEdge(key) => {
                write!(f, "node '{key}' has no outgoing edge")
            }
            ValidationError::EdgeFromEnd(key) => {
                write!(f, "end node '{key}' has an outgoing edge")
            }
            ValidationError::UnknownEdgeSource { edge, from } => {
                write!(f, "{edge} leaves unregistered node '{from}'")
            }
            ValidationError::UnknownEdgeTarget { edge, from, to } => {
                write!(f, "{edge} from '{from}' targets unregistered node '{to}'")
            }
            ValidationError::ConditionalEdgeFromStart { edge, from } => {
                write!(
                    f,
                    "{edge} is conditional but leaves start marker '{from}', which produces no result to route on"
                )
            }
        }
    }
}

impl core::error::Error for ValidationError {}
