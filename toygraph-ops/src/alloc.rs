//! Shape-carrying allocators for `ndarray` vectors and matrices, and the value
//! node builders that use them.

use ndarray::{Array1, Array2};
use num_traits::Zero;
use toygraph_core::{Allocator, Graph, NodeHandle, ToyGraphError, ValueNode};

/// Allocates vectors of a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VecAllocator {
    size: usize,
}

impl VecAllocator {
    pub fn new(size: usize) -> Self {
        VecAllocator { size }
    }

    /// An allocator producing vectors as long as `v`.
    pub fn like<A>(v: &Array1<A>) -> Self {
        VecAllocator { size: v.len() }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl<A: Clone + Zero> Allocator<Array1<A>> for VecAllocator {
    fn allocate(&self) -> Array1<A> {
        Array1::zeros(self.size)
    }

    fn zero(&self, buf: &mut Array1<A>) {
        buf.fill(A::zero());
    }

    fn allowed(&self, buf: &Array1<A>) -> Result<(), ToyGraphError> {
        if buf.len() != self.size {
            return Err(ToyGraphError::shape_mismatch(
                vec![self.size],
                buf.shape().to_vec(),
                "set vector",
            ));
        }
        Ok(())
    }
}

/// Allocates matrices of fixed dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatAllocator {
    rows: usize,
    cols: usize,
}

impl MatAllocator {
    pub fn new(rows: usize, cols: usize) -> Self {
        MatAllocator { rows, cols }
    }

    /// An allocator producing matrices with the dimensions of `m`.
    pub fn like<A>(m: &Array2<A>) -> Self {
        let (rows, cols) = m.dim();
        MatAllocator { rows, cols }
    }

    /// `(rows, cols)`
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl<A: Clone + Zero> Allocator<Array2<A>> for MatAllocator {
    fn allocate(&self) -> Array2<A> {
        Array2::zeros((self.rows, self.cols))
    }

    fn zero(&self, buf: &mut Array2<A>) {
        buf.fill(A::zero());
    }

    fn allowed(&self, buf: &Array2<A>) -> Result<(), ToyGraphError> {
        if buf.dim() != (self.rows, self.cols) {
            return Err(ToyGraphError::shape_mismatch(
                vec![self.rows, self.cols],
                buf.shape().to_vec(),
                "set matrix",
            ));
        }
        Ok(())
    }
}

/// Registers a [`ValueNode`] holding a vector of length `size`.
pub fn vec_value<A>(graph: &mut Graph, size: usize) -> NodeHandle<Array1<A>>
where
    A: Clone + Zero + 'static,
{
    ValueNode::register(graph, VecAllocator::new(size))
}

/// Registers a [`ValueNode`] holding a `rows` x `cols` matrix.
pub fn mat_value<A>(graph: &mut Graph, rows: usize, cols: usize) -> NodeHandle<Array2<A>>
where
    A: Clone + Zero + 'static,
{
    ValueNode::register(graph, MatAllocator::new(rows, cols))
}
