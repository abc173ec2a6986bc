// src/pool/builder.rs
//! Builder for pools that need more than a factory.

use super::config::PoolConfig;
use super::core::{Pool, Reset, Source};
use crate::error::{PoolError, Result};
use std::fmt;
use zeroize::Zeroize;

/// Configures and builds a [`Pool`].
///
/// Obtained from [`Pool::builder`]. A value source is mandatory: either
/// [`factory`](Self::factory) or, for `T: Default`,
/// [`default_values`](Self::default_values).
pub struct PoolBuilder<T> {
    config: PoolConfig,
    source: Option<Source<T>>,
    reset: Option<Reset<T>>,
}

impl<T: Send + 'static> PoolBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            config: PoolConfig::default(),
            source: None,
            reset: None,
        }
    }

    /// Replaces the default [`PoolConfig`].
    pub fn config(mut self, config: PoolConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the function called whenever the pool is empty.
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.source = Some(Source::Factory(Box::new(factory)));
        self
    }

    /// Sets a hook run on every value handed to [`Pool::put`] before it is
    /// stored, so the next holder never sees the previous one's contents.
    pub fn reset<F>(mut self, reset: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.reset = Some(Box::new(reset));
        self
    }

    /// Validates the configuration and builds the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::MissingSource`] if no value source was chosen, or
    /// any error from [`PoolConfig::validate`].
    pub fn build(self) -> Result<Pool<T>> {
        let source = self.source.ok_or(PoolError::MissingSource)?;
        self.config.validate()?;
        Ok(Pool::from_parts(self.config, source, self.reset))
    }
}

impl<T: Default + Send + 'static> PoolBuilder<T> {
    /// Answers misses with `T::default()` instead of calling a factory.
    pub fn default_values(mut self) -> Self {
        self.source = Some(Source::Default(T::default));
        self
    }
}

impl<T: Zeroize + Send + 'static> PoolBuilder<T> {
    /// Securely zeroes every value on [`Pool::put`] via [`Zeroize`].
    ///
    /// Zeroizing a `Vec` also truncates it to length zero; fixed-size arrays
    /// keep their length.
    ///
    /// ```rust
    /// use zeropool::Pool;
    ///
    /// let pool = Pool::builder()
    ///     .factory(|| [0u8; 32])
    ///     .zeroize_on_put()
    ///     .build()?;
    ///
    /// let mut key = pool.get();
    /// key.copy_from_slice(&[0xAA; 32]);
    /// pool.put(key);
    /// assert_eq!(pool.get(), [0u8; 32]);
    /// # Ok::<(), zeropool::PoolError>(())
    /// ```
    pub fn zeroize_on_put(self) -> Self {
        self.reset(|value: &mut T| value.zeroize())
    }
}

impl<T> fmt::Debug for PoolBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolBuilder")
            .field("config", &self.config)
            .field("has_source", &self.source.is_some())
            .field("has_reset", &self.reset.is_some())
            .finish()
    }
}
