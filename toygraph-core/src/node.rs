use crate::connection::Connection;
use std::fmt;

/// Capability set shared by every node a [`Graph`](crate::Graph) can drive.
///
/// Nodes never call each other; the graph decides the order. `forward` may assume
/// every upstream node already ran its own `forward` in the current pass, and
/// `backward` may assume every downstream consumer already added its contribution
/// into this node's gradient.
pub trait Node {
    /// Recomputes this node's result from the current upstream values.
    fn forward(&mut self);

    /// Adds this node's gradient contributions into its upstream accumulators.
    fn backward(&mut self);

    /// Resets this node's own gradient to the additive identity.
    fn zero_grad(&mut self);

    /// Short label used in log output.
    fn kind(&self) -> &'static str {
        "node"
    }
}

/// Position of a node in its graph's construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Returned by every node constructor once the node is registered.
///
/// A handle is the only source of [`Connection`]s. Because handles exist only for
/// nodes that are already in the graph, a new node can never be wired to one that
/// comes later in construction order.
#[derive(Debug)]
pub struct NodeHandle<T> {
    id: NodeId,
    conn: Connection<T>,
}

impl<T> NodeHandle<T> {
    pub(crate) fn new(id: NodeId, conn: Connection<T>) -> Self {
        NodeHandle { id, conn }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The connection downstream nodes and callers use to reach this node's buffers.
    pub fn conn(&self) -> &Connection<T> {
        &self.conn
    }
}

impl<T> Clone for NodeHandle<T> {
    fn clone(&self) -> Self {
        NodeHandle {
            id: self.id,
            conn: self.conn.clone(),
        }
    }
}
