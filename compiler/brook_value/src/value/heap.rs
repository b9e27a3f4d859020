//! Shared, immutable heap storage for values.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted storage for heap-backed `Value` variants.
///
/// The constructor is crate-private: values are built through the `Value::`
/// factory methods, never by wrapping an `Arc` by hand.
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    #[inline]
    pub(crate) fn from_arc(inner: Arc<T>) -> Self {
        Heap(inner)
    }

    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
