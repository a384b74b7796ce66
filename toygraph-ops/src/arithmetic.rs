//! Element-wise binary arithmetic over vectors and matrices.

use crate::alloc::{MatAllocator, VecAllocator};
use ndarray::{Array, Array1, Array2, Dimension, NdFloat, Zip};
use toygraph_core::{Allocator, BinaryNode, BinaryOp, Connection, Graph, NodeHandle, ToyGraphError};

/// Element-wise `a + b`. The downstream gradient flows unchanged to both operands.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayAdd;

impl<A, D> BinaryOp<Array<A, D>, Array<A, D>, Array<A, D>> for ArrayAdd
where
    A: NdFloat,
    D: Dimension,
{
    fn compute_forward(&mut self, a: &Array<A, D>, b: &Array<A, D>, result: &mut Array<A, D>) {
        Zip::from(result)
            .and(a)
            .and(b)
            .for_each(|r, &x, &y| *r = x + y);
    }

    fn compute_grad_a(
        &mut self,
        _a: &Array<A, D>,
        a_grad: &mut Array<A, D>,
        _b: &Array<A, D>,
        _result: &Array<A, D>,
        result_grad: &Array<A, D>,
    ) {
        *a_grad += result_grad;
    }

    fn compute_grad_b(
        &mut self,
        _a: &Array<A, D>,
        _b: &Array<A, D>,
        b_grad: &mut Array<A, D>,
        _result: &Array<A, D>,
        result_grad: &Array<A, D>,
    ) {
        *b_grad += result_grad;
    }
}

/// Element-wise (Hadamard) `a * b`.
///
/// Each operand receives `result_grad * other`. The product is formed in a
/// scratch buffer allocated once, at construction.
#[derive(Debug, Clone)]
pub struct ArrayMulElem<A, D: Dimension> {
    scratch: Array<A, D>,
}

impl<A: NdFloat, D: Dimension> ArrayMulElem<A, D> {
    /// Creates the operation with a scratch buffer shaped like `operand`.
    pub fn like(operand: &Array<A, D>) -> Self {
        ArrayMulElem {
            scratch: Array::zeros(operand.raw_dim()),
        }
    }
}

impl<A, D> BinaryOp<Array<A, D>, Array<A, D>, Array<A, D>> for ArrayMulElem<A, D>
where
    A: NdFloat,
    D: Dimension,
{
    fn compute_forward(&mut self, a: &Array<A, D>, b: &Array<A, D>, result: &mut Array<A, D>) {
        Zip::from(result)
            .and(a)
            .and(b)
            .for_each(|r, &x, &y| *r = x * y);
    }

    fn compute_grad_a(
        &mut self,
        _a: &Array<A, D>,
        a_grad: &mut Array<A, D>,
        b: &Array<A, D>,
        _result: &Array<A, D>,
        result_grad: &Array<A, D>,
    ) {
        Zip::from(&mut self.scratch)
            .and(result_grad)
            .and(b)
            .for_each(|s, &g, &y| *s = g * y);
        *a_grad += &self.scratch;
    }

    fn compute_grad_b(
        &mut self,
        a: &Array<A, D>,
        _b: &Array<A, D>,
        b_grad: &mut Array<A, D>,
        _result: &Array<A, D>,
        result_grad: &Array<A, D>,
    ) {
        Zip::from(&mut self.scratch)
            .and(result_grad)
            .and(a)
            .for_each(|s, &g, &x| *s = g * x);
        *b_grad += &self.scratch;
    }
}

fn check_same_shape<A, D: Dimension>(
    a: &Connection<Array<A, D>>,
    b: &Connection<Array<A, D>>,
    operation: &str,
) -> Result<(), ToyGraphError> {
    let a_shape = a.value().shape().to_vec();
    let b_shape = b.value().shape().to_vec();
    if a_shape != b_shape {
        return Err(ToyGraphError::shape_mismatch(a_shape, b_shape, operation));
    }
    Ok(())
}

fn elementwise_binary<A, D, O, Al>(
    graph: &mut Graph,
    alloc: Al,
    op: O,
    a: &Connection<Array<A, D>>,
    b: &Connection<Array<A, D>>,
) -> NodeHandle<Array<A, D>>
where
    A: 'static,
    D: Dimension + 'static,
    O: BinaryOp<Array<A, D>, Array<A, D>, Array<A, D>> + 'static,
    Al: Allocator<Array<A, D>> + 'static,
{
    BinaryNode::register(graph, alloc, op, a, b)
}

/// Registers a node computing the element-wise sum of two vectors.
///
/// # Errors
/// [`ToyGraphError::ShapeMismatch`] if the vectors differ in length.
pub fn vec_add<A: NdFloat>(
    graph: &mut Graph,
    a: &Connection<Array1<A>>,
    b: &Connection<Array1<A>>,
) -> Result<NodeHandle<Array1<A>>, ToyGraphError> {
    check_same_shape(a, b, "vec_add")?;
    let alloc = VecAllocator::like(&*a.value());
    Ok(elementwise_binary(graph, alloc, ArrayAdd, a, b))
}

/// Registers a node computing the element-wise product of two vectors.
///
/// # Errors
/// [`ToyGraphError::ShapeMismatch`] if the vectors differ in length.
pub fn vec_mul_elem<A: NdFloat>(
    graph: &mut Graph,
    a: &Connection<Array1<A>>,
    b: &Connection<Array1<A>>,
) -> Result<NodeHandle<Array1<A>>, ToyGraphError> {
    check_same_shape(a, b, "vec_mul_elem")?;
    let (alloc, op) = {
        let a_val = a.value();
        (VecAllocator::like(&*a_val), ArrayMulElem::like(&*a_val))
    };
    Ok(elementwise_binary(graph, alloc, op, a, b))
}

/// Registers a node computing the element-wise sum of two matrices.
///
/// # Errors
/// [`ToyGraphError::ShapeMismatch`] if the matrices differ in dimensions.
pub fn mat_add<A: NdFloat>(
    graph: &mut Graph,
    a: &Connection<Array2<A>>,
    b: &Connection<Array2<A>>,
) -> Result<NodeHandle<Array2<A>>, ToyGraphError> {
    check_same_shape(a, b, "mat_add")?;
    let alloc = MatAllocator::like(&*a.value());
    Ok(elementwise_binary(graph, alloc, ArrayAdd, a, b))
}

/// Registers a node computing the element-wise product of two matrices.
///
/// # Errors
/// [`ToyGraphError::ShapeMismatch`] if the matrices differ in dimensions.
pub fn mat_mul_elem<A: NdFloat>(
    graph: &mut Graph,
    a: &Connection<Array2<A>>,
    b: &Connection<Array2<A>>,
) -> Result<NodeHandle<Array2<A>>, ToyGraphError> {
    check_same_shape(a, b, "mat_mul_elem")?;
    let (alloc, op) = {
        let a_val = a.value();
        (MatAllocator::like(&*a_val), ArrayMulElem::like(&*a_val))
    };
    Ok(elementwise_binary(graph, alloc, op, a, b))
}
