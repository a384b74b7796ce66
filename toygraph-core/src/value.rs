use crate::allocator::Allocator;
use crate::connection::{Connection, Slot};
use crate::graph::Graph;
use crate::node::{Node, NodeHandle};
use std::rc::Rc;

/// Leaf node holding a caller-settable value and its gradient.
///
/// It computes nothing: it is the source of values for downstream nodes and the
/// sink for gradients flowing back from them. Its gradient is reset by
/// `zero_grad` like any other node.
pub struct ValueNode<T> {
    slot: Rc<Slot<T>>,
}

impl<T: 'static> ValueNode<T> {
    /// Allocates the value and gradient buffers, registers the node in `graph`
    /// and returns its handle.
    pub fn register<A>(graph: &mut Graph, alloc: A) -> NodeHandle<T>
    where
        A: Allocator<T> + 'static,
    {
        let slot = Rc::new(Slot::new(Box::new(alloc)));
        let conn = Connection::new(Rc::clone(&slot));
        let id = graph.add(Box::new(ValueNode { slot }));
        NodeHandle::new(id, conn)
    }
}

impl<T> Node for ValueNode<T> {
    fn forward(&mut self) {}

    fn backward(&mut self) {}

    fn zero_grad(&mut self) {
        self.slot.zero_grad();
    }

    fn kind(&self) -> &'static str {
        "value"
    }
}
