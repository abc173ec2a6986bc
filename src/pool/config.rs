// src/pool/config.rs
//! Configuration for object pools

use crate::error::{PoolError, Result};

/// Largest accepted [`PoolConfig::fast_slots`] value.
pub const MAX_FAST_SLOTS: usize = 1 << 20;

/// Configuration for pool behavior.
///
/// Each pool owns two containers (idle items and spare cells); the sizes below
/// apply to each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Capacity of each container's preallocated lock-free ring
    pub fast_slots: usize,
    /// Maximum number of slots a container keeps (`None` = unbounded)
    pub retain_limit: Option<usize>,
    /// Number of items to produce and pool at construction
    pub prewarm: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            fast_slots: 64,
            retain_limit: None,
            prewarm: 0,
        }
    }
}

impl PoolConfig {
    /// Configuration for memory-constrained use: a short ring and a hard cap.
    pub fn small() -> Self {
        Self {
            fast_slots: 16,
            retain_limit: Some(64),
            prewarm: 0,
        }
    }

    /// Configuration for high-throughput servers with many concurrent holders.
    pub fn large() -> Self {
        Self {
            fast_slots: 1024,
            retain_limit: None,
            prewarm: 0,
        }
    }

    /// Checks that the configuration can be used to build a pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use zeropool::{PoolConfig, PoolError};
    ///
    /// assert!(PoolConfig::default().validate().is_ok());
    ///
    /// let config = PoolConfig { fast_slots: 0, ..PoolConfig::default() };
    /// assert_eq!(config.validate(), Err(PoolError::ZeroCapacity));
    /// ```
    pub fn validate(&self) -> Result<()> {
        validate_fast_slots(self.fast_slots)?;
        if let Some(limit) = self.retain_limit {
            if self.prewarm > limit {
                return Err(PoolError::PrewarmExceedsLimit {
                    prewarm: self.prewarm,
                    limit,
                });
            }
        }
        Ok(())
    }
}

/// Checks a ring capacity against `1..=MAX_FAST_SLOTS`.
pub(crate) fn validate_fast_slots(fast_slots: usize) -> Result<()> {
    if fast_slots == 0 {
        return Err(PoolError::ZeroCapacity);
    }
    if fast_slots > MAX_FAST_SLOTS {
        return Err(PoolError::CapacityTooLarge {
            requested: fast_slots,
            max: MAX_FAST_SLOTS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(PoolConfig::default().validate().is_ok());
        assert!(PoolConfig::small().validate().is_ok());
        assert!(PoolConfig::large().validate().is_ok());
    }

    #[test]
    fn test_capacity_bounds() {
        let config = PoolConfig {
            fast_slots: MAX_FAST_SLOTS + 1,
            ..PoolConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(PoolError::CapacityTooLarge {
                requested: MAX_FAST_SLOTS + 1,
                max: MAX_FAST_SLOTS,
            })
        );

        let config = PoolConfig {
            fast_slots: MAX_FAST_SLOTS,
            ..PoolConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prewarm_limit() {
        let config = PoolConfig {
            fast_slots: 8,
            retain_limit: Some(4),
            prewarm: 5,
        };
        assert_eq!(
            config.validate(),
            Err(PoolError::PrewarmExceedsLimit {
                prewarm: 5,
                limit: 4
            })
        );

        // Unbounded pools accept any prewarm count.
        let config = PoolConfig {
            fast_slots: 8,
            retain_limit: None,
            prewarm: 500,
        };
        assert!(config.validate().is_ok());
    }
}
