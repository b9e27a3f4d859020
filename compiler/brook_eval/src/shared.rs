//! Registries shared between template contexts.
//!
//! A host configures its filters and member accessors once and then builds
//! many [`TemplateContext`](crate::TemplateContext)s from them, often one per
//! request and on different threads. Cloning either wrapper hands out the
//! same registry; no context ever owns a private copy.

use std::fmt;
use std::sync::Arc;

/// A registry fixed before rendering starts, such as the
/// [`FilterRegistry`](crate::FilterRegistry).
///
/// Contexts read it through `Deref` without locking.
pub struct SharedRegistry<T>(Arc<T>);

impl<T> SharedRegistry<T> {
    pub fn new(registry: T) -> Self {
        SharedRegistry(Arc::new(registry))
    }

    /// Whether both handles point at the same registry.
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for SharedRegistry<T> {
    fn clone(&self) -> Self {
        SharedRegistry(Arc::clone(&self.0))
    }
}

impl<T> std::ops::Deref for SharedRegistry<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedRegistry").field(&*self.0).finish()
    }
}

/// A registry the host may keep extending while templates render, such as
/// the [`MemberAccessStrategy`](crate::MemberAccessStrategy).
///
/// Member resolution takes the read lock once per member segment, so an
/// accessor registered through any clone is seen by the next lookup in
/// every context.
pub struct SharedMutableRegistry<T>(Arc<parking_lot::RwLock<T>>);

impl<T> SharedMutableRegistry<T> {
    pub fn new(registry: T) -> Self {
        SharedMutableRegistry(Arc::new(parking_lot::RwLock::new(registry)))
    }

    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, T> {
        self.0.read()
    }

    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, T> {
        self.0.write()
    }

    /// Run `register` with the write lock held, releasing it afterwards.
    pub fn update<R>(&self, register: impl FnOnce(&mut T) -> R) -> R {
        register(&mut self.0.write())
    }

    /// Whether both handles point at the same registry.
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for SharedMutableRegistry<T> {
    fn clone(&self) -> Self {
        SharedMutableRegistry(Arc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedMutableRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedMutableRegistry")
            .field(&*self.0.read())
            .finish()
    }
}
