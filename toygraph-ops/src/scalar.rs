//! Scalar allocator and operations, generic over `num_traits` numbers.

use num_traits::{Float, Num, NumAssign};
use std::marker::PhantomData;
use toygraph_core::{
    Allocator, BinaryNode, BinaryOp, Connection, Graph, NodeHandle, ToyGraphError, UnaryNode,
    UnaryOp, ValueNode,
};

/// Allocator for plain numbers. Every scalar has the same (empty) shape, so
/// [`Allocator::allowed`] always succeeds.
#[derive(Debug, Clone, Copy)]
pub struct ScalarAllocator<T> {
    _marker: PhantomData<T>,
}

impl<T> ScalarAllocator<T> {
    pub fn new() -> Self {
        ScalarAllocator { _marker: PhantomData }
    }
}

impl<T> Default for ScalarAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Num + Copy> Allocator<T> for ScalarAllocator<T> {
    fn allocate(&self) -> T {
        T::zero()
    }

    fn zero(&self, buf: &mut T) {
        *buf = T::zero();
    }

    fn allowed(&self, _buf: &T) -> Result<(), ToyGraphError> {
        Ok(())
    }
}

// --- Unary operations ---

/// `e^x`
#[derive(Debug, Clone, Copy, Default)]
pub struct Exp;

impl<T: Float> UnaryOp<T, T> for Exp {
    fn compute_forward(&mut self, input: &T, result: &mut T) {
        *result = input.exp();
    }

    fn compute_grad(&mut self, input: &T, input_grad: &mut T, _result: &T, result_grad: &T) {
        *input_grad = *input_grad + input.exp() * *result_grad;
    }
}

/// `sin(x)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Sin;

impl<T: Float> UnaryOp<T, T> for Sin {
    fn compute_forward(&mut self, input: &T, result: &mut T) {
        *result = input.sin();
    }

    fn compute_grad(&mut self, input: &T, input_grad: &mut T, _result: &T, result_grad: &T) {
        *input_grad = *input_grad + input.cos() * *result_grad;
    }
}

/// `cos(x)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Cos;

impl<T: Float> UnaryOp<T, T> for Cos {
    fn compute_forward(&mut self, input: &T, result: &mut T) {
        *result = input.cos();
    }

    fn compute_grad(&mut self, input: &T, input_grad: &mut T, _result: &T, result_grad: &T) {
        *input_grad = *input_grad - input.sin() * *result_grad;
    }
}

// --- Binary operations ---

/// `a + b`
#[derive(Debug, Clone, Copy, Default)]
pub struct Add;

impl<T: NumAssign + Copy> BinaryOp<T, T, T> for Add {
    fn compute_forward(&mut self, a: &T, b: &T, result: &mut T) {
        *result = *a + *b;
    }

    fn compute_grad_a(&mut self, _a: &T, a_grad: &mut T, _b: &T, _result: &T, result_grad: &T) {
        *a_grad += *result_grad;
    }

    fn compute_grad_b(&mut self, _a: &T, _b: &T, b_grad: &mut T, _result: &T, result_grad: &T) {
        *b_grad += *result_grad;
    }
}

/// `a * b`
#[derive(Debug, Clone, Copy, Default)]
pub struct Mul;

impl<T: NumAssign + Copy> BinaryOp<T, T, T> for Mul {
    fn compute_forward(&mut self, a: &T, b: &T, result: &mut T) {
        *result = *a * *b;
    }

    fn compute_grad_a(&mut self, _a: &T, a_grad: &mut T, b: &T, _result: &T, result_grad: &T) {
        *a_grad += *result_grad * *b;
    }

    fn compute_grad_b(&mut self, a: &T, _b: &T, b_grad: &mut T, _result: &T, result_grad: &T) {
        *b_grad += *result_grad * *a;
    }
}

// --- Builders ---

/// Registers a scalar [`ValueNode`].
pub fn scalar_value<T>(graph: &mut Graph) -> NodeHandle<T>
where
    T: Num + Copy + 'static,
{
    ValueNode::register(graph, ScalarAllocator::<T>::new())
}

fn scalar_unary<T, O>(graph: &mut Graph, op: O, input: &Connection<T>) -> NodeHandle<T>
where
    T: Float + 'static,
    O: UnaryOp<T, T> + 'static,
{
    UnaryNode::register(graph, ScalarAllocator::<T>::new(), op, input)
}

/// Registers a node computing `e^x`.
pub fn exp<T: Float + 'static>(graph: &mut Graph, input: &Connection<T>) -> NodeHandle<T> {
    scalar_unary(graph, Exp, input)
}

/// Registers a node computing `sin(x)`.
pub fn sin<T: Float + 'static>(graph: &mut Graph, input: &Connection<T>) -> NodeHandle<T> {
    scalar_unary(graph, Sin, input)
}

/// Registers a node computing `cos(x)`.
pub fn cos<T: Float + 'static>(graph: &mut Graph, input: &Connection<T>) -> NodeHandle<T> {
    scalar_unary(graph, Cos, input)
}

/// Registers a node computing `a + b`.
pub fn add<T>(graph: &mut Graph, a: &Connection<T>, b: &Connection<T>) -> NodeHandle<T>
where
    T: NumAssign + Copy + 'static,
{
    BinaryNode::register(graph, ScalarAllocator::<T>::new(), Add, a, b)
}

/// Registers a node computing `a * b`.
pub fn mul<T>(graph: &mut Graph, a: &Connection<T>, b: &Connection<T>) -> NodeHandle<T>
where
    T: NumAssign + Copy + 'static,
{
    BinaryNode::register(graph, ScalarAllocator::<T>::new(), Mul, a, b)
}
