use crate::error::ToyGraphError;

/// Shape-aware factory for the buffers a node works on.
///
/// Every node owns one allocator for the buffers it creates. The allocator only
/// carries shape metadata (for example the length of the vectors it produces) and
/// never changes after construction.
///
/// Implementations must uphold one invariant: every buffer returned by
/// [`Allocator::allocate`] passes [`Allocator::allowed`] on the same allocator.
pub trait Allocator<T> {
    /// Creates a new zero-filled buffer of the allocator's shape.
    fn allocate(&self) -> T;

    /// Resets an existing buffer to the additive identity, in place.
    fn zero(&self, buf: &mut T);

    /// Checks that `buf` has the shape this allocator produces.
    ///
    /// # Errors
    /// Returns [`ToyGraphError::ShapeMismatch`] naming the expected and actual
    /// shapes when they differ.
    fn allowed(&self, buf: &T) -> Result<(), ToyGraphError>;
}
