use crate::node::{Node, NodeId};
use log::{debug, trace};

/// Ordered registry of nodes.
///
/// Insertion order is construction order, and since a node can only be wired to
/// nodes that already exist, it is also a valid topological order. No sorting or
/// cycle detection happens here.
///
/// # Caller contract
/// Gradients accumulate. Call [`Graph::all_zero_grads`] before every
/// [`Graph::all_backward`], otherwise the gradients of the previous pass are
/// silently added to the new ones.
#[derive(Default)]
pub struct Graph {
    nodes: Vec<Box<dyn Node>>,
}

impl Graph {
    pub fn new() -> Self {
        Graph { nodes: Vec::new() }
    }

    /// Appends `node` and returns its position. No deduplication.
    pub fn add(&mut self, node: Box<dyn Node>) -> NodeId {
        let id = NodeId(self.nodes.len());
        debug!("Graph: registered {} node {} (graph size {})", node.kind(), id, id.0 + 1);
        self.nodes.push(node);
        id
    }

    /// Runs `forward` on every node in insertion order.
    pub fn all_forward(&mut self) {
        trace!("Graph: forward pass over {} nodes", self.nodes.len());
        for node in self.nodes.iter_mut() {
            node.forward();
        }
    }

    /// Runs `backward` on every node in reverse insertion order.
    pub fn all_backward(&mut self) {
        trace!("Graph: backward pass over {} nodes", self.nodes.len());
        for node in self.nodes.iter_mut().rev() {
            node.backward();
        }
    }

    /// Runs `zero_grad` on every node.
    pub fn all_zero_grads(&mut self) {
        trace!("Graph: zeroing gradients of {} nodes", self.nodes.len());
        for node in self.nodes.iter_mut() {
            node.zero_grad();
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<&'static str> = self.nodes.iter().map(|n| n.kind()).collect();
        f.debug_struct("Graph").field("nodes", &kinds).finish()
    }
}
