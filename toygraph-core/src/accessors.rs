//! The sanctioned way for callers to read and write node state.
//!
//! Writes are validated against the node's allocator first; a rejected buffer
//! leaves the node untouched.

use crate::connection::Connection;
use crate::error::ToyGraphError;
use log::debug;

/// Overwrites the value behind `conn` with `val`.
///
/// # Errors
/// Returns [`ToyGraphError::ShapeMismatch`] when `val` does not have the node's
/// shape. Nothing is written in that case.
pub fn set<T>(conn: &Connection<T>, val: T) -> Result<(), ToyGraphError> {
    if let Err(e) = conn.allowed(&val) {
        debug!("set rejected: {}", e);
        return Err(e);
    }
    *conn.slot().value_mut() = val;
    Ok(())
}

/// Overwrites the gradient accumulator behind `conn` with `val`.
///
/// Typically used to seed the output gradient before a backward pass.
///
/// # Errors
/// Same as [`set`].
pub fn set_grad<T>(conn: &Connection<T>, val: T) -> Result<(), ToyGraphError> {
    if let Err(e) = conn.allowed(&val) {
        debug!("set_grad rejected: {}", e);
        return Err(e);
    }
    *conn.slot().grad_mut() = val;
    Ok(())
}

/// Returns a copy of the current value behind `conn`.
pub fn get<T: Clone>(conn: &Connection<T>) -> T {
    conn.value().clone()
}

/// Returns a copy of the current gradient behind `conn`.
pub fn get_grad<T: Clone>(conn: &Connection<T>) -> T {
    conn.grad().clone()
}
