// src/pool/stats.rs
//! Statistics tracking for object pools.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Event counters shared by a pool's operations.
///
/// Pure bookkeeping: nothing in the pool reads these to decide whether to
/// produce a value or allocate a cell.
#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    pub(crate) created: AtomicUsize,
    pub(crate) defaulted: AtomicUsize,
    pub(crate) warmed: AtomicUsize,
    pub(crate) reused: AtomicUsize,
    pub(crate) returned: AtomicUsize,
    pub(crate) cells_allocated: AtomicUsize,
    pub(crate) cells_reused: AtomicUsize,
}

impl PoolCounters {
    #[inline]
    pub(crate) fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Snapshot of a pool's counters.
///
/// All counters use `Relaxed` ordering; values are eventually consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of `get()` calls answered by the factory
    pub created: usize,
    /// Number of `get()` calls answered with `T::default()`
    pub defaulted: usize,
    /// Number of values produced ahead of demand by prewarming
    pub warmed: usize,
    /// Number of `get()` calls answered from the pool
    pub reused: usize,
    /// Number of `put()` calls
    pub returned: usize,
    /// Number of indirection cells allocated
    pub cells_allocated: usize,
    /// Number of `put()` calls that reused a spare cell
    pub cells_reused: usize,
    /// Number of items and cells dropped by the containers' retain limit
    pub discarded: usize,
    /// Approximate number of idle items
    pub available: usize,
}

impl PoolStats {
    /// Total number of `get()` calls.
    pub fn gets(&self) -> usize {
        self.created + self.defaulted + self.reused
    }

    /// Number of `get()` calls that could not be answered from the pool.
    pub fn misses(&self) -> usize {
        self.created + self.defaulted
    }

    /// Returns the pool hit rate as a percentage (0.0-100.0).
    ///
    /// # Examples
    ///
    /// ```
    /// use zeropool::Pool;
    ///
    /// let pool = Pool::new(|| vec![0u8; 64]);
    /// let buf = pool.get();
    /// pool.put(buf);
    /// let _buf = pool.get();
    ///
    /// assert_eq!(pool.stats().hit_rate(), 50.0);
    /// ```
    pub fn hit_rate(&self) -> f64 {
        let gets = self.gets();
        if gets == 0 {
            return 0.0;
        }
        (self.reused as f64 / gets as f64) * 100.0
    }

    /// Returns the share of stored values that went into a recycled cell
    /// rather than a fresh one, as a percentage (0.0-100.0).
    ///
    /// A rate near 100 means `put()` is running allocation-free.
    pub fn cell_reuse_rate(&self) -> f64 {
        let puts = self.cells_allocated + self.cells_reused;
        if puts == 0 {
            return 0.0;
        }
        (self.cells_reused as f64 / puts as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> PoolStats {
        PoolStats {
            created: 0,
            defaulted: 0,
            warmed: 0,
            reused: 0,
            returned: 0,
            cells_allocated: 0,
            cells_reused: 0,
            discarded: 0,
            available: 0,
        }
    }

    #[test]
    fn test_empty_rates() {
        let s = stats();
        assert_eq!(s.hit_rate(), 0.0);
        assert_eq!(s.cell_reuse_rate(), 0.0);
        assert_eq!(s.gets(), 0);
    }

    #[test]
    fn test_rates() {
        let s = PoolStats {
            created: 1,
            defaulted: 1,
            reused: 6,
            cells_allocated: 1,
            cells_reused: 3,
            ..stats()
        };
        assert_eq!(s.gets(), 8);
        assert_eq!(s.misses(), 2);
        assert_eq!(s.hit_rate(), 75.0);
        assert_eq!(s.cell_reuse_rate(), 75.0);
    }

    #[test]
    fn test_bump() {
        let counters = PoolCounters::default();
        PoolCounters::bump(&counters.reused);
        PoolCounters::bump(&counters.reused);
        assert_eq!(counters.reused.load(Ordering::Relaxed), 2);
    }
}
