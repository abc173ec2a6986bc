// src/error.rs
//! Error types for pool construction and configuration.
//!
//! `get` and `put` never fail; only the configuration surfaces do.

use std::fmt;

/// Errors that can occur while configuring or building a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// `fast_slots` was zero
    ZeroCapacity,
    /// `fast_slots` exceeds the supported maximum
    CapacityTooLarge {
        /// Requested ring capacity
        requested: usize,
        /// Largest accepted ring capacity
        max: usize,
    },
    /// More items were asked to be prewarmed than the pool may retain
    PrewarmExceedsLimit {
        /// Requested prewarm count
        prewarm: usize,
        /// Configured retention limit
        limit: usize,
    },
    /// The builder was given neither a factory nor default values
    MissingSource,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "Fast slot capacity must be non-zero"),
            Self::CapacityTooLarge { requested, max } => {
                write!(f, "Fast slot capacity {} exceeds maximum {}", requested, max)
            }
            Self::PrewarmExceedsLimit { prewarm, limit } => {
                write!(f, "Prewarm count {} exceeds retain limit {}", prewarm, limit)
            }
            Self::MissingSource => write!(f, "Pool has neither a factory nor default values"),
        }
    }
}

impl std::error::Error for PoolError {}

/// Recover a PoolError from an anyhow::Error that wraps one.
///
/// `PoolError` already converts into `anyhow::Error` through anyhow's blanket
/// impl for `std::error::Error`. Errors of any other type are handed back.
#[cfg(feature = "anyhow")]
impl TryFrom<anyhow::Error> for PoolError {
    type Error = anyhow::Error;

    fn try_from(err: anyhow::Error) -> std::result::Result<Self, Self::Error> {
        err.downcast::<PoolError>()
    }
}

/// Result type alias for pool configuration.
///
/// Note: When using with other Result types (like anyhow::Result),
/// either qualify the type (`zeropool::Result<T>`) or convert with `?`.
pub type Result<T> = std::result::Result<T, PoolError>;
