// src/pool/mod.rs
//! Typed object pool layered on two slot recyclers.

pub(crate) mod builder;
pub(crate) mod config;
pub(crate) mod core;
pub(crate) mod guard;
pub(crate) mod stats;

pub use self::core::Pool;
pub use builder::PoolBuilder;
pub use config::{MAX_FAST_SLOTS, PoolConfig};
pub use guard::Pooled;
pub use stats::PoolStats;
