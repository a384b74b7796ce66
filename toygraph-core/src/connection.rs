use crate::allocator::Allocator;
use crate::error::ToyGraphError;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// The buffers owned by one node: its value (or result), its gradient accumulator,
/// and the allocator that created both.
///
/// Value and gradient live in separate cells so that a consumer can read a node's
/// value while adding into that same node's gradient.
pub(crate) struct Slot<T> {
    value: RefCell<T>,
    grad: RefCell<T>,
    alloc: Box<dyn Allocator<T>>,
}

impl<T> Slot<T> {
    pub(crate) fn new(alloc: Box<dyn Allocator<T>>) -> Self {
        Slot {
            value: RefCell::new(alloc.allocate()),
            grad: RefCell::new(alloc.allocate()),
            alloc,
        }
    }

    pub(crate) fn value(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    pub(crate) fn value_mut(&self) -> RefMut<'_, T> {
        self.value.borrow_mut()
    }

    pub(crate) fn grad(&self) -> Ref<'_, T> {
        self.grad.borrow()
    }

    pub(crate) fn grad_mut(&self) -> RefMut<'_, T> {
        self.grad.borrow_mut()
    }

    pub(crate) fn zero_grad(&self) {
        self.alloc.zero(&mut self.grad.borrow_mut());
    }

    pub(crate) fn allowed(&self, buf: &T) -> Result<(), ToyGraphError> {
        self.alloc.allowed(buf)
    }
}

/// Read/write accessor to one node's value, gradient accumulator and validator.
///
/// A connection never owns the buffers: it shares them with the node that created
/// them, so writes through the connection are visible to the node and the other
/// way around. Connections are only handed out by [`NodeHandle`](crate::NodeHandle)s,
/// which only exist for nodes already registered in a graph.
pub struct Connection<T> {
    slot: Rc<Slot<T>>,
}

impl<T> Connection<T> {
    pub(crate) fn new(slot: Rc<Slot<T>>) -> Self {
        Connection { slot }
    }

    pub(crate) fn slot(&self) -> &Slot<T> {
        &self.slot
    }

    /// Borrows the current value without copying it.
    ///
    /// The borrow must be released before the next graph pass; holding it across
    /// `all_forward` panics when the owning node writes its result.
    pub fn value(&self) -> Ref<'_, T> {
        self.slot.value()
    }

    /// Borrows the current gradient accumulator without copying it.
    pub fn grad(&self) -> Ref<'_, T> {
        self.slot.grad()
    }

    /// Validates `buf` against the owning node's allocator.
    pub fn allowed(&self, buf: &T) -> Result<(), ToyGraphError> {
        self.slot.allowed(buf)
    }

    /// True when both connections refer to the same node.
    pub fn same_node(&self, other: &Connection<T>) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<T> Clone for Connection<T> {
    fn clone(&self) -> Self {
        Connection {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Connection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("value", &*self.slot.value())
            .field("grad", &*self.slot.grad())
            .finish()
    }
}
