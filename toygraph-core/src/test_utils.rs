//! Small allocators and operations over plain `f64` / `Vec<f64>` buffers used by
//! the unit tests of this crate.

use crate::allocator::Allocator;
use crate::binary::BinaryOp;
use crate::error::ToyGraphError;
use crate::unary::UnaryOp;

pub(crate) struct F64Alloc;

impl Allocator<f64> for F64Alloc {
    fn allocate(&self) -> f64 {
        0.0
    }

    fn zero(&self, buf: &mut f64) {
        *buf = 0.0;
    }

    fn allowed(&self, _buf: &f64) -> Result<(), ToyGraphError> {
        Ok(())
    }
}

pub(crate) struct VecF64Alloc(pub usize);

impl Allocator<Vec<f64>> for VecF64Alloc {
    fn allocate(&self) -> Vec<f64> {
        vec![0.0; self.0]
    }

    fn zero(&self, buf: &mut Vec<f64>) {
        buf.iter_mut().for_each(|x| *x = 0.0);
    }

    fn allowed(&self, buf: &Vec<f64>) -> Result<(), ToyGraphError> {
        if buf.len() != self.0 {
            return Err(ToyGraphError::shape_mismatch(vec![self.0], vec![buf.len()], "set vector"));
        }
        Ok(())
    }
}

pub(crate) struct Exp;

impl UnaryOp<f64, f64> for Exp {
    fn compute_forward(&mut self, input: &f64, result: &mut f64) {
        *result = input.exp();
    }

    fn compute_grad(&mut self, input: &f64, input_grad: &mut f64, _result: &f64, result_grad: &f64) {
        *input_grad += input.exp() * result_grad;
    }
}

/// Sums a vector into a scalar.
pub(crate) struct Sum;

impl UnaryOp<Vec<f64>, f64> for Sum {
    fn compute_forward(&mut self, input: &Vec<f64>, result: &mut f64) {
        *result = input.iter().sum();
    }

    fn compute_grad(&mut self, _input: &Vec<f64>, input_grad: &mut Vec<f64>, _result: &f64, result_grad: &f64) {
        input_grad.iter_mut().for_each(|g| *g += result_grad);
    }
}

pub(crate) struct Add;

impl BinaryOp<f64, f64, f64> for Add {
    fn compute_forward(&mut self, a: &f64, b: &f64, result: &mut f64) {
        *result = a + b;
    }

    fn compute_grad_a(&mut self, _a: &f64, a_grad: &mut f64, _b: &f64, _result: &f64, result_grad: &f64) {
        *a_grad += result_grad;
    }

    fn compute_grad_b(&mut self, _a: &f64, _b: &f64, b_grad: &mut f64, _result: &f64, result_grad: &f64) {
        *b_grad += result_grad;
    }
}

pub(crate) struct Mul;

impl BinaryOp<f64, f64, f64> for Mul {
    fn compute_forward(&mut self, a: &f64, b: &f64, result: &mut f64) {
        *result = a * b;
    }

    fn compute_grad_a(&mut self, _a: &f64, a_grad: &mut f64, b: &f64, _result: &f64, result_grad: &f64) {
        *a_grad += result_grad * b;
    }

    fn compute_grad_b(&mut self, a: &f64, _b: &f64, b_grad: &mut f64, _result: &f64, result_grad: &f64) {
        *b_grad += result_grad * a;
    }
}

/// Scales a vector by a scalar: `result = s * v`.
pub(crate) struct Scale;

impl BinaryOp<f64, Vec<f64>, Vec<f64>> for Scale {
    fn compute_forward(&mut self, s: &f64, v: &Vec<f64>, result: &mut Vec<f64>) {
        for (r, x) in result.iter_mut().zip(v) {
            *r = s * x;
        }
    }

    fn compute_grad_a(&mut self, _s: &f64, s_grad: &mut f64, v: &Vec<f64>, _result: &Vec<f64>, result_grad: &Vec<f64>) {
        *s_grad += v.iter().zip(result_grad).map(|(x, g)| x * g).sum::<f64>();
    }

    fn compute_grad_b(&mut self, s: &f64, _v: &Vec<f64>, v_grad: &mut Vec<f64>, _result: &Vec<f64>, result_grad: &Vec<f64>) {
        for (vg, g) in v_grad.iter_mut().zip(result_grad) {
            *vg += s * g;
        }
    }
}
