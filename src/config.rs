//! # Configuration Module
//!
//! Settings used when a collaborator builds a [`SharedRingBuffer`].
//!
//! ## Plain English Explanation
//!
//! A replay importer usually knows roughly how many records it is about to
//! load, and how much memory it is willing to spend. These settings let it
//! say so up front:
//!
//! - How many slots to allocate right away
//! - The largest the buffer is ever allowed to grow
//!
//! [`SharedRingBuffer`]: crate::buffer::SharedRingBuffer

use std::mem;

use thiserror::Error;

// ============================================
// MAIN CONFIGURATION
// ============================================

/// Capacity settings for a ring buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingConfig {
    /// Slots to allocate at construction time.
    ///
    /// ## Plain English
    /// `1` means "allocate nothing until the first push". One slot is always
    /// kept free, so a buffer with `n` slots holds `n - 1` records before it
    /// has to grow.
    ///
    /// ## Limits
    /// Must be a power of two.
    pub initial_capacity: usize,

    /// Largest capacity the buffer may grow to, or `None` for no ceiling.
    ///
    /// ## Limits
    /// Must be a power of two and at least `initial_capacity`.
    pub max_capacity: Option<usize>,
}

impl RingConfig {
    /// Lazy allocation, no ceiling.
    pub fn unbounded() -> Self {
        Self {
            initial_capacity: 1,
            max_capacity: None,
        }
    }

    /// Allocates room for at least `records` elements immediately.
    ///
    /// ## When to Use
    /// When the record count is known ahead of time, e.g. from a replay
    /// header, so the import never pays for intermediate growth.
    pub fn preallocated(records: usize) -> Self {
        Self {
            initial_capacity: slots_for(records),
            ..Self::unbounded()
        }
    }

    /// Caps growth at the smallest power of two holding `records` elements.
    pub fn bounded(records: usize) -> Self {
        Self {
            max_capacity: Some(slots_for(records)),
            ..Self::unbounded()
        }
    }

    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.initial_capacity.is_power_of_two() {
            errors.push(ConfigError::NotPowerOfTwo {
                field: "initial_capacity",
                value: self.initial_capacity,
            });
        }

        if let Some(max) = self.max_capacity {
            if !max.is_power_of_two() {
                errors.push(ConfigError::NotPowerOfTwo {
                    field: "max_capacity",
                    value: max,
                });
            }
            if max < self.initial_capacity {
                errors.push(ConfigError::MaxBelowInitial {
                    initial: self.initial_capacity,
                    max,
                });
            }
        }

        errors
    }

    /// Bytes reserved up front for elements of type `T`.
    pub fn estimated_memory_bytes<T>(&self) -> usize {
        if self.initial_capacity <= 1 {
            // Nothing is allocated until the first push.
            return 0;
        }
        self.initial_capacity
            .saturating_mul(mem::size_of::<Option<T>>())
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Smallest power-of-two slot count that holds `records` elements.
fn slots_for(records: usize) -> usize {
    records
        .saturating_add(1)
        .checked_next_power_of_two()
        .unwrap_or(1 << (usize::BITS - 1))
}

// ============================================
// CONFIGURATION ERRORS
// ============================================

/// Errors that can occur with configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A capacity field is zero or not a power of two
    #[error("{field} = {value} is not a power of two")]
    NotPowerOfTwo { field: &'static str, value: usize },

    /// The ceiling is smaller than what is allocated at startup
    #[error("max_capacity {max} is below initial_capacity {initial}")]
    MaxBelowInitial { initial: usize, max: usize },
}

// ============================================
// TESTS
// ============================================
