use crate::allocator::Allocator;
use crate::connection::{Connection, Slot};
use crate::graph::Graph;
use crate::node::{Node, NodeHandle};
use std::rc::Rc;

/// Strategy for a node with one input of type `T` and a result of type `U`.
pub trait UnaryOp<T, U> {
    /// Writes `f(input)` into `result`. Must not depend on the previous content
    /// of `result`.
    fn compute_forward(&mut self, input: &T, result: &mut U);

    /// Adds `result_grad * f'(input)` into `input_grad`.
    ///
    /// Implementations must add, never overwrite: other consumers of the same
    /// input contribute to the same accumulator.
    fn compute_grad(&mut self, input: &T, input_grad: &mut T, result: &U, result_grad: &U);
}

/// Node applying a [`UnaryOp`] to one upstream connection.
pub struct UnaryNode<T, U, O> {
    op: O,
    input: Connection<T>,
    slot: Rc<Slot<U>>,
}

impl<T, U, O> UnaryNode<T, U, O>
where
    T: 'static,
    U: 'static,
    O: UnaryOp<T, U> + 'static,
{
    /// Allocates the result and gradient buffers with `alloc`, registers the node
    /// in `graph` and returns its handle.
    pub fn register<A>(graph: &mut Graph, alloc: A, op: O, input: &Connection<T>) -> NodeHandle<U>
    where
        A: Allocator<U> + 'static,
    {
        let slot = Rc::new(Slot::new(Box::new(alloc)));
        let conn = Connection::new(Rc::clone(&slot));
        let node = UnaryNode {
            op,
            input: input.clone(),
            slot,
        };
        let id = graph.add(Box::new(node));
        NodeHandle::new(id, conn)
    }
}

impl<T, U, O> Node for UnaryNode<T, U, O>
where
    O: UnaryOp<T, U>,
{
    fn forward(&mut self) {
        let input = self.input.slot().value();
        let mut result = self.slot.value_mut();
        self.op.compute_forward(&input, &mut result);
    }

    fn backward(&mut self) {
        let upstream = self.input.slot();
        let input = upstream.value();
        let mut input_grad = upstream.grad_mut();
        let result = self.slot.value();
        let result_grad = self.slot.grad();
        self.op.compute_grad(&input, &mut input_grad, &result, &result_grad);
    }

    fn zero_grad(&mut self) {
        self.slot.zero_grad();
    }

    fn kind(&self) -> &'static str {
        "unary"
    }
}
