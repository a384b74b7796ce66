//! Matrix-vector product.

use crate::alloc::VecAllocator;
use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array1, Array2, NdFloat};
use toygraph_core::{BinaryNode, BinaryOp, Connection, Graph, NodeHandle, ToyGraphError};

/// `result = m · v` for an `r x c` matrix `m` and a length-`c` vector `v`.
///
/// Gradients:
/// * `v_grad += mᵀ · result_grad`
/// * `m_grad += result_grad ⊗ v` (outer product)
///
/// Both terms are formed in scratch buffers allocated at construction.
#[derive(Debug, Clone)]
pub struct MatMulVec<A> {
    mat_scratch: Array2<A>,
    vec_scratch: Array1<A>,
}

impl<A: NdFloat> MatMulVec<A> {
    pub fn new(rows: usize, cols: usize) -> Self {
        MatMulVec {
            mat_scratch: Array2::zeros((rows, cols)),
            vec_scratch: Array1::zeros(cols),
        }
    }
}

impl<A: NdFloat> BinaryOp<Array2<A>, Array1<A>, Array1<A>> for MatMulVec<A> {
    fn compute_forward(&mut self, m: &Array2<A>, v: &Array1<A>, result: &mut Array1<A>) {
        general_mat_vec_mul(A::one(), m, v, A::zero(), result);
    }

    fn compute_grad_a(
        &mut self,
        _m: &Array2<A>,
        m_grad: &mut Array2<A>,
        v: &Array1<A>,
        _result: &Array1<A>,
        result_grad: &Array1<A>,
    ) {
        for (mut row, &g) in self.mat_scratch.rows_mut().into_iter().zip(result_grad.iter()) {
            row.zip_mut_with(v, |s, &x| *s = g * x);
        }
        *m_grad += &self.mat_scratch;
    }

    fn compute_grad_b(
        &mut self,
        m: &Array2<A>,
        _v: &Array1<A>,
        v_grad: &mut Array1<A>,
        _result: &Array1<A>,
        result_grad: &Array1<A>,
    ) {
        general_mat_vec_mul(A::one(), &m.t(), result_grad, A::zero(), &mut self.vec_scratch);
        *v_grad += &self.vec_scratch;
    }
}

/// Registers a node computing `m · v`.
///
/// # Errors
/// [`ToyGraphError::ShapeMismatch`] if the matrix column count differs from the
/// vector length.
pub fn mat_mul_vec<A: NdFloat>(
    graph: &mut Graph,
    m: &Connection<Array2<A>>,
    v: &Connection<Array1<A>>,
) -> Result<NodeHandle<Array1<A>>, ToyGraphError> {
    let (rows, cols) = m.value().dim();
    let len = v.value().len();
    if cols != len {
        return Err(ToyGraphError::shape_mismatch(vec![cols], vec![len], "mat_mul_vec"));
    }
    Ok(BinaryNode::register(
        graph,
        VecAllocator::new(rows),
        MatMulVec::new(rows, cols),
        m,
        v,
    ))
}
