//! Minimal reverse-mode automatic differentiation graph.
//!
//! A [`Graph`] holds value, unary and binary nodes in construction order. Callers
//! wire nodes through [`Connection`]s, run [`Graph::all_forward`], seed an output
//! gradient with [`set_grad`], then run [`Graph::all_zero_grads`] and
//! [`Graph::all_backward`] to accumulate gradients through the chain rule.
//!
//! The engine never inspects buffers itself. Shapes are handled by an
//! [`Allocator`] per node, and the arithmetic by [`UnaryOp`] / [`BinaryOp`]
//! strategies, so the same graph works over scalars, vectors and matrices.

pub mod accessors;
pub mod allocator;
pub mod binary;
pub mod connection;
pub mod error;
pub mod graph;
pub mod node;
pub mod unary;
pub mod value;

pub use accessors::{get, get_grad, set, set_grad};
pub use allocator::Allocator;
pub use binary::{BinaryNode, BinaryOp};
pub use connection::Connection;
pub use error::ToyGraphError;
pub use graph::Graph;
pub use node::{Node, NodeHandle, NodeId};
pub use unary::{UnaryNode, UnaryOp};
pub use value::ValueNode;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod graph_test;
