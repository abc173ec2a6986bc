// src/pool/guard.rs
//! Scoped checkout of a pooled value.

use super::core::Pool;
use std::fmt;
use std::ops::{Deref, DerefMut};

const TAKEN: &str = "pooled value is only taken when the guard is consumed";

/// A value borrowed from a [`Pool`].
///
/// On drop the value is handed back with [`Pool::put`]. Use
/// [`into_inner`](Self::into_inner) or [`discard`](Self::discard) to opt out
/// of automatic return.
pub struct Pooled<'a, T: Send + 'static> {
    value: Option<T>,
    pool: &'a Pool<T>,
}

impl<'a, T: Send + 'static> Pooled<'a, T> {
    pub(crate) fn new(value: T, pool: &'a Pool<T>) -> Self {
        Self {
            value: Some(value),
            pool,
        }
    }

    /// Extracts the value without returning it to the pool.
    pub fn into_inner(mut self) -> T {
        self.value.take().expect(TAKEN)
    }

    /// Drops the value immediately, bypassing pool return.
    pub fn discard(mut self) {
        drop(self.value.take());
    }
}

impl<T: Send + 'static> Deref for Pooled<'_, T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        self.value.as_ref().expect(TAKEN)
    }
}

impl<T: Send + 'static> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value.as_mut().expect(TAKEN)
    }
}

impl<T: Send + 'static> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.put(value);
        }
    }
}

impl<T: Send + fmt::Debug + 'static> fmt::Debug for Pooled<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pooled").field(&self.value).finish()
    }
}
