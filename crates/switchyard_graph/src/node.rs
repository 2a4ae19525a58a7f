//! Node types for orchestration graphs.
//!
//! Nodes are the vertices of a graph. A node is either a structural marker
//! (start/end) or an executable handler that transforms the run state.

use core::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

/// Unique string key identifying a node in the graph.
///
/// Keys are supplied by the caller at registration time ("task",
/// "validation", ...). Internally uses `Arc<str>` for cheap cloning
/// (reference count bump only).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey(Arc<str>);

impl NodeKey {
    /// Creates a node key from a string value.
    #[must_use]
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The output of one node execution.
///
/// Carries the new state derived from the previous one. A `NodeResult` is
/// produced fresh per execution, consumed by the immediately following edge
/// resolution, and then discarded; its state payload survives into the next
/// step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeResult<S> {
    /// The state produced by this execution.
    pub state: S,
}

impl<S> NodeResult<S> {
    /// Wraps a new state value.
    #[must_use]
    pub fn new(state: S) -> Self {
        Self { state }
    }
}

/// Errors reported by node handlers.
///
/// Handlers are external collaborators; the engine does not retry them.
/// A failing handler fails the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The handler reported a failure.
    Failed(String),
}

impl HandlerError {
    /// Creates a failure from any displayable message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::Failed(message) => write!(f, "handler failed: {message}"),
        }
    }
}

impl core::error::Error for HandlerError {}

/// An executable unit of work.
///
/// Given the current state by value, a handler asynchronously produces a
/// [`NodeResult`] holding the next state. Implementations are supplied by
/// the caller at graph-assembly time; the engine never constructs them.
///
/// Plain async functions of the shape
/// `async fn step(state: S) -> Result<NodeResult<S>, HandlerError>`
/// implement this trait via the blanket impl below.
pub trait NodeHandler<S>: Send + Sync {
    /// Executes the handler against the given state.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] if the work itself fails. The error
    /// propagates immediately as a run failure.
    fn run<'a>(&'a self, state: S) -> BoxFuture<'a, Result<NodeResult<S>, HandlerError>>;

    /// Returns the handler's name for tracing and error messages.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl<S, F, Fut> NodeHandler<S> for F
where
    S: Send + 'static,
    F: Fn(S) -> Fut + Send + Sync,
    Fut: Future<Output = Result<NodeResult<S>, HandlerError>> + Send + 'static,
{
    fn run<'a>(&'a self, state: S) -> BoxFuture<'a, Result<NodeResult<S>, HandlerError>> {
        Box::pin((self)(state))
    }

    fn name(&self) -> &'static str {
        core::any::type_name::<F>()
    }
}

/// Type alias for boxed handlers stored in the node registry.
pub type BoxedHandler<S> = Box<dyn NodeHandler<S>>;

/// A node in the graph.
///
/// Start and end markers carry no executable behavior; they exist purely as
/// graph anchors. Matching on the variant replaces runtime type inspection.
pub enum Node<S> {
    /// Structural start marker.
    Start,
    /// Structural end marker; reaching it completes the run.
    End,
    /// An executable handler.
    Handler(BoxedHandler<S>),
}

impl<S> Node<S> {
    /// Wraps a handler in a node.
    #[must_use]
    pub fn handler(handler: impl NodeHandler<S> + 'static) -> Self {
        Node::Handler(Box::new(handler))
    }

    /// Returns the node's name for tracing.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Node::Start => "start",
            Node::End => "end",
            Node::Handler(handler) => handler.name(),
        }
    }

    /// Returns true if this node is the end marker.
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Node::End)
    }
}

// Handlers are not Debug, so the impl is written by hand.
impl<S> fmt::Debug for Node<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Start => f.write_str("Start"),
            Node::End => f.write_str("End"),
            Node::Handler(handler) => f
                .debug_struct("Handler")
                .field("name", &handler.name())
                .finish(),
        }
    }
}
