use thiserror::Error;

/// Error type for the toygraph engine.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ToyGraphError {
    /// A buffer handed to a node does not have the shape its allocator produces.
    ///
    /// Shapes are dimension lists: `[]` for scalars, `[len]` for vectors and
    /// `[rows, cols]` for matrices.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },
}

impl ToyGraphError {
    /// Shorthand used by allocators and node builders.
    pub fn shape_mismatch(
        expected: impl Into<Vec<usize>>,
        actual: impl Into<Vec<usize>>,
        operation: impl Into<String>,
    ) -> Self {
        ToyGraphError::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
            operation: operation.into(),
        }
    }
}
