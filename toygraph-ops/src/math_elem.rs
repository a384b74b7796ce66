//! Element-wise lifting of scalar unary operations to vectors and matrices.

use crate::alloc::{MatAllocator, VecAllocator};
use crate::scalar::{Cos, Exp, Sin};
use ndarray::{Array, Array1, Array2, Dimension, Zip};
use num_traits::Float;
use toygraph_core::{Allocator, Connection, Graph, NodeHandle, UnaryNode, UnaryOp};

/// Applies a scalar [`UnaryOp`] to every element of an array, for the forward
/// result and the gradient alike.
#[derive(Debug, Clone, Copy, Default)]
pub struct Elementwise<O> {
    op: O,
}

impl<O> Elementwise<O> {
    pub fn new(op: O) -> Self {
        Elementwise { op }
    }
}

impl<A, D, O> UnaryOp<Array<A, D>, Array<A, D>> for Elementwise<O>
where
    D: Dimension,
    O: UnaryOp<A, A>,
{
    fn compute_forward(&mut self, input: &Array<A, D>, result: &mut Array<A, D>) {
        let op = &mut self.op;
        Zip::from(result)
            .and(input)
            .for_each(|r, x| op.compute_forward(x, r));
    }

    fn compute_grad(
        &mut self,
        input: &Array<A, D>,
        input_grad: &mut Array<A, D>,
        result: &Array<A, D>,
        result_grad: &Array<A, D>,
    ) {
        let op = &mut self.op;
        Zip::from(input_grad)
            .and(input)
            .and(result)
            .and(result_grad)
            .for_each(|g, x, r, rg| op.compute_grad(x, g, r, rg));
    }
}

fn elementwise<A, D, O, Al>(
    graph: &mut Graph,
    alloc: Al,
    op: O,
    input: &Connection<Array<A, D>>,
) -> NodeHandle<Array<A, D>>
where
    A: 'static,
    D: Dimension + 'static,
    O: UnaryOp<A, A> + 'static,
    Al: Allocator<Array<A, D>> + 'static,
{
    UnaryNode::register(graph, alloc, Elementwise::new(op), input)
}

fn vec_elementwise<A, O>(graph: &mut Graph, op: O, input: &Connection<Array1<A>>) -> NodeHandle<Array1<A>>
where
    A: Float + 'static,
    O: UnaryOp<A, A> + 'static,
{
    let alloc = VecAllocator::like(&*input.value());
    elementwise(graph, alloc, op, input)
}

fn mat_elementwise<A, O>(graph: &mut Graph, op: O, input: &Connection<Array2<A>>) -> NodeHandle<Array2<A>>
where
    A: Float + 'static,
    O: UnaryOp<A, A> + 'static,
{
    let alloc = MatAllocator::like(&*input.value());
    elementwise(graph, alloc, op, input)
}

/// Element-wise `e^x` over a vector.
pub fn vec_exp<A: Float + 'static>(graph: &mut Graph, input: &Connection<Array1<A>>) -> NodeHandle<Array1<A>> {
    vec_elementwise(graph, Exp, input)
}

/// Element-wise `sin(x)` over a vector.
pub fn vec_sin<A: Float + 'static>(graph: &mut Graph, input: &Connection<Array1<A>>) -> NodeHandle<Array1<A>> {
    vec_elementwise(graph, Sin, input)
}

/// Element-wise `cos(x)` over a vector.
pub fn vec_cos<A: Float + 'static>(graph: &mut Graph, input: &Connection<Array1<A>>) -> NodeHandle<Array1<A>> {
    vec_elementwise(graph, Cos, input)
}

/// Element-wise `e^x` over a matrix.
pub fn mat_exp<A: Float + 'static>(graph: &mut Graph, input: &Connection<Array2<A>>) -> NodeHandle<Array2<A>> {
    mat_elementwise(graph, Exp, input)
}

/// Element-wise `sin(x)` over a matrix.
pub fn mat_sin<A: Float + 'static>(graph: &mut Graph, input: &Connection<Array2<A>>) -> NodeHandle<Array2<A>> {
    mat_elementwise(graph, Sin, input)
}

/// Element-wise `cos(x)` over a matrix.
pub fn mat_cos<A: Float + 'static>(graph: &mut Graph, input: &Connection<Array2<A>>) -> NodeHandle<Array2<A>> {
    mat_elementwise(graph, Cos, input)
}
