use ndarray::{Array1, Array2};
use thiserror::Error;
use toygraph_core::{get, get_grad, set, set_grad, Connection, Graph, ToyGraphError};

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed at element index {element_index}: Analytical grad {analytical:?} != Numerical grad {numerical:?}. Difference: {difference:?}")]
    GradientMismatch {
        element_index: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite at element index {element_index}")]
    NonFiniteNumerical { element_index: usize },

    #[error("Graph error during gradient check: {0}")]
    Graph(#[from] ToyGraphError),
}

/// Tolerances for [`check_grad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckConfig {
    /// Perturbation applied to each input element.
    pub epsilon: f64,
    /// Accepted absolute and relative difference between analytical and
    /// numerical gradients.
    pub tolerance: f64,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        GradCheckConfig {
            epsilon: 1e-6,
            tolerance: 1e-4,
        }
    }
}

impl GradCheckConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Flat, index-based access to the `f64` elements of a buffer.
pub trait Elements: Clone {
    fn num_elements(&self) -> usize;
    fn element(&self, index: usize) -> f64;
    fn set_element(&mut self, index: usize, value: f64);
}

impl Elements for f64 {
    fn num_elements(&self) -> usize {
        1
    }

    fn element(&self, _index: usize) -> f64 {
        *self
    }

    fn set_element(&mut self, _index: usize, value: f64) {
        *self = value;
    }
}

impl Elements for Array1<f64> {
    fn num_elements(&self) -> usize {
        self.len()
    }

    fn element(&self, index: usize) -> f64 {
        self[index]
    }

    fn set_element(&mut self, index: usize, value: f64) {
        self[index] = value;
    }
}

// Row-major indexing, independent of the memory layout.
impl Elements for Array2<f64> {
    fn num_elements(&self) -> usize {
        self.len()
    }

    fn element(&self, index: usize) -> f64 {
        let cols = self.ncols();
        self[[index / cols, index % cols]]
    }

    fn set_element(&mut self, index: usize, value: f64) {
        let cols = self.ncols();
        self[[index / cols, index % cols]] = value;
    }
}

/// Checks the analytical gradient of the scalar `output` with respect to `input`
/// against central finite differences.
///
/// `input` should belong to a value node; the value of any other node would be
/// overwritten by the forward passes. The graph is left with `input` restored,
/// a fresh forward pass, and the analytical gradients of a single backward pass
/// seeded with `1`.
pub fn check_grad<T: Elements>(
    graph: &mut Graph,
    input: &Connection<T>,
    output: &Connection<f64>,
    config: GradCheckConfig,
) -> Result<(), GradCheckError> {
    let base = get(input);

    graph.all_forward();
    graph.all_zero_grads();
    set_grad(output, 1.0)?;
    graph.all_backward();
    let analytical = get_grad(input);

    let mut mismatch = None;
    for i in 0..base.num_elements() {
        let x = base.element(i);

        let mut plus = base.clone();
        plus.set_element(i, x + config.epsilon);
        set(input, plus)?;
        graph.all_forward();
        let loss_plus = get(output);

        let mut minus = base.clone();
        minus.set_element(i, x - config.epsilon);
        set(input, minus)?;
        graph.all_forward();
        let loss_minus = get(output);

        let numerical = (loss_plus - loss_minus) / (2.0 * config.epsilon);
        if !numerical.is_finite() {
            mismatch = Some(GradCheckError::NonFiniteNumerical { element_index: i });
            break;
        }
        let grad = analytical.element(i);
        if !approx::relative_eq!(
            grad,
            numerical,
            epsilon = config.tolerance,
            max_relative = config.tolerance
        ) {
            mismatch = Some(GradCheckError::GradientMismatch {
                element_index: i,
                analytical: grad,
                numerical,
                difference: (grad - numerical).abs(),
            });
            break;
        }
    }

    set(input, base)?;
    graph.all_forward();
    graph.all_zero_grads();
    set_grad(output, 1.0)?;
    graph.all_backward();

    match mismatch {
        Some(err) => {
            log::debug!("check_grad: {}", err);
            Err(err)
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_matrix_elements_are_row_major() {
        let mut m = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(m.num_elements(), 4);
        assert_eq!(m.element(1), 2.0);
        assert_eq!(m.element(2), 3.0);
        m.set_element(3, -4.0);
        assert_eq!(m[[1, 1]], -4.0);

        let t = m.t().to_owned();
        assert_eq!(t.element(1), 3.0);
    }

    #[test]
    fn test_config_builders() {
        let config = GradCheckConfig::default().with_epsilon(1e-3).with_tolerance(1e-2);
        assert_eq!(config.epsilon, 1e-3);
        assert_eq!(config.tolerance, 1e-2);
    }
}
