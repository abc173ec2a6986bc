// src/pool/core.rs
//! The typed pool and its get/put cycle.
//!
//! # Indirection-cell reuse
//!
//! [`Recycler`] only stores opaque [`Slot`]s, so every pooled value lives in a
//! heap cell (`Box<Option<T>>`). Boxing each value on `put()` would allocate
//! on every call, so the pool keeps a second recycler of drained cells:
//!
//! - `get()` takes a cell from `items`, moves the value out (leaving `None`)
//!   and parks the empty cell in `spares`.
//! - `put()` takes an empty cell from `spares`, writes the value into it and
//!   hands it to `items`. Only if `spares` is empty is a new cell allocated.
//!
//! Once a pool has seen one get/put cycle per concurrent holder, neither path
//! allocates as long as the idle items and spare cells each fit in
//! [`PoolConfig::fast_slots`]. Past that, the overflow queues allocate segments
//! even in a warm steady state; pools with many simultaneous holders should use
//! [`PoolConfig::large()`] or a larger `fast_slots`.
//!
//! A drained cell holds `None`, so the previous holder's value can never be
//! read back out of a spare cell.

use super::builder::PoolBuilder;
use super::config::PoolConfig;
use super::guard::Pooled;
use super::stats::{PoolCounters, PoolStats};
use crate::recycler::{Recycler, Slot};
use std::fmt;
use std::sync::atomic::Ordering;

// ---------------------------------------------------------------------------
// Value sources
// ---------------------------------------------------------------------------

/// Produces a fresh value when the pool is empty.
pub(crate) type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Scrubs a value on its way back into the pool.
pub(crate) type Reset<T> = Box<dyn Fn(&mut T) + Send + Sync>;

/// An indirection cell. `None` once its value has been taken.
type Cell<T> = Box<Option<T>>;

/// Where values come from when the pool has none to hand out.
pub(crate) enum Source<T> {
    /// A caller-supplied constructor
    Factory(Factory<T>),
    /// `T::default`, for pools built without a factory
    Default(fn() -> T),
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

/// Thread-safe, type-safe object pool whose steady-state get/put cycle
/// performs no heap allocation while its idle set fits in
/// [`PoolConfig::fast_slots`].
///
/// Share it by reference or through an `Arc`; it is not `Clone`.
///
/// # Example
///
/// ```rust
/// use zeropool::Pool;
///
/// let pool = Pool::new(|| vec![0u8; 1024]);
///
/// let mut buf = pool.get();
/// assert_eq!(buf.len(), 1024);
/// buf[0] = 42;
/// pool.put(buf);
///
/// let buf = pool.get();
/// assert_eq!(buf[0], 42);
/// ```
///
/// A pool built with [`Default`] hands out `T::default()` whenever it is
/// empty:
///
/// ```rust
/// use zeropool::Pool;
///
/// let pool: Pool<Vec<u8>> = Pool::default();
/// assert!(pool.get().is_empty());
/// ```
pub struct Pool<T> {
    items: Recycler,
    spares: Recycler,
    source: Source<T>,
    reset: Option<Reset<T>>,
    counters: PoolCounters,
    config: PoolConfig,
}

impl<T: Send + 'static> Pool<T> {
    /// Creates a pool with the default configuration that calls `factory`
    /// whenever it is empty.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::from_parts(
            PoolConfig::default(),
            Source::Factory(Box::new(factory)),
            None,
        )
    }

    /// Starts building a pool with a custom configuration or reset hook.
    ///
    /// ```rust
    /// use zeropool::{Pool, PoolConfig};
    ///
    /// let pool = Pool::builder()
    ///     .config(PoolConfig::small())
    ///     .factory(|| String::with_capacity(256))
    ///     .reset(|s: &mut String| s.clear())
    ///     .build()?;
    ///
    /// let mut s = pool.get();
    /// s.push_str("scratch");
    /// pool.put(s);
    /// assert!(pool.get().is_empty());
    /// # Ok::<(), zeropool::PoolError>(())
    /// ```
    pub fn builder() -> PoolBuilder<T> {
        PoolBuilder::new()
    }

    /// `config` must already have passed [`PoolConfig::validate`].
    pub(crate) fn from_parts(
        config: PoolConfig,
        source: Source<T>,
        reset: Option<Reset<T>>,
    ) -> Self {
        tracing::debug!(
            fast_slots = config.fast_slots,
            retain_limit = ?config.retain_limit,
            prewarm = config.prewarm,
            has_factory = matches!(source, Source::Factory(_)),
            "creating pool"
        );

        let pool = Self {
            items: Recycler::new_unchecked(config.fast_slots, config.retain_limit),
            spares: Recycler::new_unchecked(config.fast_slots, config.retain_limit),
            source,
            reset,
            counters: PoolCounters::default(),
            config,
        };
        if pool.config.prewarm > 0 {
            pool.warm(pool.config.prewarm);
        }
        pool
    }

    /// Takes a value out of the pool, producing a fresh one if it is empty.
    ///
    /// The caller owns the value until it is handed back with [`put`](Self::put)
    /// or simply dropped. Never blocks.
    #[inline]
    pub fn get(&self) -> T {
        if let Some(mut cell) = self.items.acquire().and_then(Self::open) {
            let item = cell.take();
            self.spares.release(cell);
            if let Some(item) = item {
                PoolCounters::bump(&self.counters.reused);
                return item;
            }
        }
        self.miss()
    }

    /// Hands a value back to the pool for reuse.
    ///
    /// Never blocks and never fails, though the pool may quietly drop the
    /// value instead of keeping it.
    #[inline]
    pub fn put(&self, mut item: T) {
        if let Some(reset) = &self.reset {
            reset(&mut item);
        }
        PoolCounters::bump(&self.counters.returned);
        self.items.release(self.fill_cell(item));
    }

    /// Takes a value out of the pool behind a guard that puts it back on drop.
    ///
    /// ```rust
    /// use zeropool::Pool;
    ///
    /// let pool = Pool::new(|| vec![0u8; 16]);
    /// {
    ///     let mut buf = pool.checkout();
    ///     buf[0] = 1;
    /// } // returned here
    /// assert_eq!(pool.available(), 1);
    /// ```
    pub fn checkout(&self) -> Pooled<'_, T> {
        Pooled::new(self.get(), self)
    }

    /// Produces values until about `target` items are idle, capped at the
    /// retain limit.
    ///
    /// Idle count and production are not atomic; concurrent calls may
    /// overshoot slightly.
    pub fn warm(&self, target: usize) {
        let wanted = match self.config.retain_limit {
            Some(limit) => target.min(limit),
            None => target,
        };
        let current = self.items.len();
        for _ in current..wanted {
            let item = self.produce();
            PoolCounters::bump(&self.counters.warmed);
            self.items.release(self.fill_cell(item));
        }
        tracing::debug!(wanted, produced = wanted.saturating_sub(current), "warmed pool");
    }

    /// Drops every idle item and spare cell, returning the number of items
    /// dropped.
    pub fn clear(&self) -> usize {
        let items = self.items.clear();
        let cells = self.spares.clear();
        tracing::debug!(items, cells, "cleared pool");
        items
    }

    /// Approximate number of idle items.
    #[inline]
    pub fn available(&self) -> usize {
        self.items.len()
    }

    /// The configuration this pool was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns a snapshot of pool statistics.
    pub fn stats(&self) -> PoolStats {
        let c = &self.counters;
        PoolStats {
            created: c.created.load(Ordering::Relaxed),
            defaulted: c.defaulted.load(Ordering::Relaxed),
            warmed: c.warmed.load(Ordering::Relaxed),
            reused: c.reused.load(Ordering::Relaxed),
            returned: c.returned.load(Ordering::Relaxed),
            cells_allocated: c.cells_allocated.load(Ordering::Relaxed),
            cells_reused: c.cells_reused.load(Ordering::Relaxed),
            discarded: self.items.discarded() + self.spares.discarded(),
            available: self.items.len(),
        }
    }

    /// Both recyclers are private to this pool and only ever receive
    /// `Cell<T>`, so the downcast cannot fail in practice.
    #[inline]
    fn open(slot: Slot) -> Option<Cell<T>> {
        slot.downcast::<Option<T>>().ok()
    }

    /// Wraps `item` in a spare cell, allocating one only if none is idle.
    #[inline]
    fn fill_cell(&self, item: T) -> Cell<T> {
        match self.spares.acquire().and_then(Self::open) {
            Some(mut cell) => {
                *cell = Some(item);
                PoolCounters::bump(&self.counters.cells_reused);
                cell
            }
            None => self.new_cell(item),
        }
    }

    #[cold]
    fn miss(&self) -> T {
        match &self.source {
            Source::Factory(_) => {
                PoolCounters::bump(&self.counters.created);
                tracing::trace!("pool empty, invoking factory");
            }
            Source::Default(_) => {
                PoolCounters::bump(&self.counters.defaulted);
                tracing::trace!("pool empty, returning default value");
            }
        }
        self.produce()
    }

    fn produce(&self) -> T {
        match &self.source {
            Source::Factory(factory) => factory(),
            Source::Default(default) => default(),
        }
    }

    #[cold]
    fn new_cell(&self, item: T) -> Cell<T> {
        PoolCounters::bump(&self.counters.cells_allocated);
        tracing::trace!("no spare cell, allocating");
        Box::new(Some(item))
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<T: Default + Send + 'static> Default for Pool<T> {
    /// An initially empty pool that falls back to `T::default()`.
    fn default() -> Self {
        Self::from_parts(PoolConfig::default(), Source::Default(T::default), None)
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            Source::Factory(_) => "factory",
            Source::Default(_) => "default",
        };
        f.debug_struct("Pool")
            .field("source", &source)
            .field("items", &self.items)
            .field("spares", &self.spares)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
