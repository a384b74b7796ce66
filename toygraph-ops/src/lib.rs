//! Allocators and operations plugging scalars, vectors and matrices into a
//! [`toygraph_core::Graph`].
//!
//! Scalars are any `num_traits` number; vectors and matrices are `ndarray`
//! `Array1` / `Array2`. Every builder registers its node in the graph and returns
//! the node's handle:
//!
//! ```
//! use toygraph_core::{get, set, Graph};
//! use toygraph_ops::scalar::{exp, scalar_value};
//!
//! let mut graph = Graph::new();
//! let x = scalar_value::<f64>(&mut graph);
//! let y = exp(&mut graph, x.conn());
//! set(x.conn(), 0.0).unwrap();
//! graph.all_forward();
//! assert_eq!(get(y.conn()), 1.0);
//! ```

pub mod alloc;
pub mod arithmetic;
pub mod grad_check;
pub mod linalg;
pub mod math_elem;
pub mod scalar;

pub use alloc::{mat_value, vec_value, MatAllocator, VecAllocator};
pub use arithmetic::{mat_add, mat_mul_elem, vec_add, vec_mul_elem, ArrayAdd, ArrayMulElem};
pub use grad_check::{check_grad, Elements, GradCheckConfig, GradCheckError};
pub use linalg::{mat_mul_vec, MatMulVec};
pub use math_elem::{mat_cos, mat_exp, mat_sin, vec_cos, vec_exp, vec_sin, Elementwise};
pub use scalar::ScalarAllocator;
