use crate::allocator::Allocator;
use crate::connection::{Connection, Slot};
use crate::graph::Graph;
use crate::node::{Node, NodeHandle};
use std::rc::Rc;

/// Strategy for a node combining inputs of types `T` and `U` into a `V`.
///
/// The gradient step is split per operand. A backward pass calls both methods, so
/// both accumulators always receive their contribution, and the two calls never
/// need the same accumulator at once (which matters for `x * x`).
pub trait BinaryOp<T, U, V> {
    /// Writes `f(a, b)` into `result`.
    fn compute_forward(&mut self, a: &T, b: &U, result: &mut V);

    /// Adds `result_grad * ∂f/∂a` into `a_grad`.
    fn compute_grad_a(&mut self, a: &T, a_grad: &mut T, b: &U, result: &V, result_grad: &V);

    /// Adds `result_grad * ∂f/∂b` into `b_grad`.
    fn compute_grad_b(&mut self, a: &T, b: &U, b_grad: &mut U, result: &V, result_grad: &V);
}

/// Node applying a [`BinaryOp`] to two upstream connections.
pub struct BinaryNode<T, U, V, O> {
    op: O,
    a: Connection<T>,
    b: Connection<U>,
    slot: Rc<Slot<V>>,
}

impl<T, U, V, O> BinaryNode<T, U, V, O>
where
    T: 'static,
    U: 'static,
    V: 'static,
    O: BinaryOp<T, U, V> + 'static,
{
    /// Allocates the result and gradient buffers with `alloc`, registers the node
    /// in `graph` and returns its handle.
    ///
    /// `a` and `b` may be the same connection.
    pub fn register<A>(
        graph: &mut Graph,
        alloc: A,
        op: O,
        a: &Connection<T>,
        b: &Connection<U>,
    ) -> NodeHandle<V>
    where
        A: Allocator<V> + 'static,
    {
        let slot = Rc::new(Slot::new(Box::new(alloc)));
        let conn = Connection::new(Rc::clone(&slot));
        let node = BinaryNode {
            op,
            a: a.clone(),
            b: b.clone(),
            slot,
        };
        let id = graph.add(Box::new(node));
        NodeHandle::new(id, conn)
    }
}

impl<T, U, V, O> Node for BinaryNode<T, U, V, O>
where
    O: BinaryOp<T, U, V>,
{
    fn forward(&mut self) {
        let a = self.a.slot().value();
        let b = self.b.slot().value();
        let mut result = self.slot.value_mut();
        self.op.compute_forward(&a, &b, &mut result);
    }

    fn backward(&mut self) {
        let result = self.slot.value();
        let result_grad = self.slot.grad();
        let (a_slot, b_slot) = (self.a.slot(), self.b.slot());
        {
            let a = a_slot.value();
            let b = b_slot.value();
            let mut a_grad = a_slot.grad_mut();
            self.op.compute_grad_a(&a, &mut a_grad, &b, &result, &result_grad);
        }
        let a = a_slot.value();
        let b = b_slot.value();
        let mut b_grad = b_slot.grad_mut();
        self.op.compute_grad_b(&a, &b, &mut b_grad, &result, &result_grad);
    }

    fn zero_grad(&mut self) {
        self.slot.zero_grad();
    }

    fn kind(&self) -> &'static str {
        "binary"
    }
}
