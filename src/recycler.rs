// src/recycler.rs
//! Type-erased, lock-free, best-effort slot recycler.
//!
//! # Architecture
//!
//! Release and acquire follow a two-tier cascade:
//!
//! 1. **Fast ring** (`crossbeam::queue::ArrayQueue`, preallocated, never
//!    allocates on push or pop)
//! 2. **Overflow queue** (`crossbeam::queue::SegQueue`, unbounded, allocates
//!    a new segment every few dozen pushes)
//!
//! A slot only spills into the overflow queue while the ring is full, so a
//! workload whose idle set fits the ring never touches the allocator. Once
//! more slots are idle than the ring holds, releases keep landing in the
//! overflow queue and allocate segments even in a warm steady state; size the
//! ring for the expected number of idle slots.
//!
//! # Best-effort retention
//!
//! When a retain limit is configured, releases beyond it are dropped on the
//! floor. [`Recycler::clear`] sheds everything at once. Neither is reported to
//! the caller; only [`Recycler::discarded`] keeps count.
//!
//! The size counter and the queues are **not** updated in one transaction, so
//! [`Recycler::len`] may be briefly stale and the limit may be exceeded by a
//! small constant under heavy concurrency.

use crate::error::Result;
use crate::pool::config::validate_fast_slots;
use crossbeam::queue::{ArrayQueue, SegQueue};
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

// ---------------------------------------------------------------------------
// Recycler
// ---------------------------------------------------------------------------

/// An opaque indirection cell holding exactly one payload.
pub type Slot = Box<dyn Any + Send>;

/// Concurrent recycling container for opaque [`Slot`]s.
///
/// This is the untyped primitive [`crate::Pool`] is layered on. It never
/// inspects what a slot holds.
///
/// # Example
///
/// ```rust
/// use zeropool::{Recycler, Slot};
///
/// let recycler = Recycler::new(64, None)?;
/// recycler.release(Box::new(7u32) as Slot);
///
/// let slot = recycler.acquire().expect("slot was just released");
/// assert_eq!(slot.downcast_ref::<u32>(), Some(&7));
/// assert!(recycler.acquire().is_none());
/// # Ok::<(), zeropool::PoolError>(())
/// ```
pub struct Recycler {
    fast: ArrayQueue<Slot>,
    overflow: SegQueue<Slot>,
    size: AtomicUsize,
    discarded: AtomicUsize,
    retain_limit: Option<usize>,
}

impl Recycler {
    /// Creates an empty recycler with a ring of `fast_slots` and an optional
    /// cap on the number of held slots.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PoolError::ZeroCapacity`] or
    /// [`crate::PoolError::CapacityTooLarge`] if `fast_slots` is out of range.
    pub fn new(fast_slots: usize, retain_limit: Option<usize>) -> Result<Self> {
        validate_fast_slots(fast_slots)?;
        Ok(Self::new_unchecked(fast_slots, retain_limit))
    }

    /// `fast_slots` must already have passed validation.
    pub(crate) fn new_unchecked(fast_slots: usize, retain_limit: Option<usize>) -> Self {
        Self {
            fast: ArrayQueue::new(fast_slots),
            overflow: SegQueue::new(),
            size: AtomicUsize::new(0),
            discarded: AtomicUsize::new(0),
            retain_limit,
        }
    }

    /// Takes a held slot, or returns `None` if the recycler is empty.
    ///
    /// Never blocks and never allocates.
    #[inline]
    pub fn acquire(&self) -> Option<Slot> {
        let slot = self.fast.pop().or_else(|| self.overflow.pop())?;
        self.size.fetch_sub(1, Ordering::Relaxed);
        Some(slot)
    }

    /// Hands a slot back for future reuse.
    ///
    /// The slot is dropped instead if the retain limit has been reached.
    #[inline]
    pub fn release(&self, slot: Slot) {
        if let Some(limit) = self.retain_limit {
            if self.size.load(Ordering::Relaxed) >= limit {
                self.discarded.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(limit, "recycler at retain limit, discarding slot");
                return;
            }
        }

        // Counted before the slot becomes visible so a racing acquire can
        // never drive the counter below zero.
        self.size.fetch_add(1, Ordering::Relaxed);
        if let Err(slot) = self.fast.push(slot) {
            self.overflow.push(slot);
        }
    }

    /// Approximate number of held slots. May be briefly stale.
    #[inline]
    pub fn len(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }

    /// Whether the recycler currently appears empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of slots dropped at release time because of the retain
    /// limit.
    pub fn discarded(&self) -> usize {
        self.discarded.load(Ordering::Relaxed)
    }

    /// Drops every held slot and returns how many were dropped.
    ///
    /// Slots released concurrently with the drain may survive it.
    pub fn clear(&self) -> usize {
        let mut dropped = 0;
        while self.acquire().is_some() {
            dropped += 1;
        }
        dropped
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

impl fmt::Debug for Recycler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recycler")
            .field("len", &self.len())
            .field("fast_capacity", &self.fast.capacity())
            .field("retain_limit", &self.retain_limit)
            .field("discarded", &self.discarded())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn recycler(fast_slots: usize, retain_limit: Option<usize>) -> Recycler {
        Recycler::new(fast_slots, retain_limit).unwrap()
    }

    #[test]
    fn test_empty_acquire() {
        let r = recycler(4, None);
        assert!(r.acquire().is_none());
        assert!(r.is_empty());
    }

    #[test]
    fn test_release_then_acquire() {
        let r = recycler(4, None);
        r.release(Box::new(String::from("cell")));
        assert_eq!(r.len(), 1);

        let slot = r.acquire().unwrap();
        assert_eq!(slot.downcast_ref::<String>().unwrap(), "cell");
        assert!(r.is_empty());
    }

    #[test]
    fn test_overflow_beyond_ring() {
        let r = recycler(2, None);
        for i in 0..10u32 {
            r.release(Box::new(i));
        }
        assert_eq!(r.len(), 10);
        assert_eq!(r.discarded(), 0);

        let mut seen: Vec<u32> = std::iter::from_fn(|| r.acquire())
            .map(|slot| *slot.downcast::<u32>().unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_retain_limit_discards() {
        let r = recycler(8, Some(3));
        for i in 0..5u8 {
            r.release(Box::new(i));
        }
        assert_eq!(r.len(), 3);
        assert_eq!(r.discarded(), 2);
    }

    #[test]
    fn test_zero_retain_limit_keeps_nothing() {
        let r = recycler(8, Some(0));
        r.release(Box::new(1u8));
        assert!(r.acquire().is_none());
        assert_eq!(r.discarded(), 1);
    }

    #[test]
    fn test_clear() {
        let r = recycler(2, None);
        for i in 0..5u64 {
            r.release(Box::new(i));
        }
        assert_eq!(r.clear(), 5);
        assert!(r.is_empty());
        assert!(r.acquire().is_none());
    }

    #[test]
    fn test_rejects_invalid_ring_size() {
        use crate::error::PoolError;
        use crate::pool::MAX_FAST_SLOTS;

        assert_eq!(Recycler::new(0, None).unwrap_err(), PoolError::ZeroCapacity);
        assert_eq!(
            Recycler::new(MAX_FAST_SLOTS + 1, None).unwrap_err(),
            PoolError::CapacityTooLarge {
                requested: MAX_FAST_SLOTS + 1,
                max: MAX_FAST_SLOTS,
            }
        );
    }

    #[test]
    fn test_limit_below_ring_is_accepted() {
        // Nothing ties the retain limit to the ring size.
        let r = Recycler::new(16, Some(2)).unwrap();
        for i in 0..4u8 {
            r.release(Box::new(i));
        }
        assert_eq!(r.len(), 2);
        assert_eq!(r.discarded(), 2);
    }

    #[test]
    fn test_concurrent_release_acquire() {
        use std::sync::Arc;
        use std::thread;

        let r = Arc::new(recycler(16, None));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let r = Arc::clone(&r);
                thread::spawn(move || {
                    for i in 0..1000usize {
                        r.release(Box::new(t * 1000 + i));
                        let _ = r.acquire();
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(r.len(), r.clear());
    }
}
