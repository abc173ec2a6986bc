// src/lib.rs
//! # Allocation-Free Object Pool
//!
//! A type-safe, lock-free object pool for values that are repeatedly acquired,
//! used and released on a hot path (buffers, scratch structures).
//!
//! Features:
//! - Fully typed `get`/`put`: callers never see an untyped handle or downcast
//! - Steady-state get/put performs no heap allocation, for the value **or**
//!   the indirection cell that stores it, while the idle set fits in
//!   [`PoolConfig::fast_slots`] (see [`PoolConfig::large()`] for busy pools)
//! - Lock-free recycling built on `crossbeam` queues
//! - `Default` pools that fall back to `T::default()` when empty
//! - Optional reset hook, including secure scrubbing via `zeroize`
//! - RAII checkout guards and relaxed-atomic statistics
//!
//! ```rust
//! use zeropool::Pool;
//!
//! let pool = Pool::new(|| vec![0u8; 1024]);
//!
//! let a = pool.get();
//! let b = pool.get();
//! assert_eq!(a.len(), 1024);
//! assert_eq!(b.len(), 1024);
//!
//! pool.put(a);
//! pool.put(b);
//! assert_eq!(pool.get().len(), 1024);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod pool;
pub mod recycler;

// Re-export main types
pub use error::{PoolError, Result};
pub use pool::{Pool, PoolBuilder, PoolConfig, PoolStats, Pooled};
pub use recycler::{Recycler, Slot};

/// Commonly used imports.
pub mod prelude {
    pub use crate::error::{PoolError, Result};
    pub use crate::pool::{Pool, PoolBuilder, PoolConfig, PoolStats, Pooled};
}
