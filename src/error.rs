//! # Error Types Module
//!
//! This module defines the error types used throughout the crate.
//!
//! ## Plain English Explanation
//!
//! A ring buffer can only go wrong in a handful of ways:
//!
//! - "OutOfMemory: there was no room to grow"
//! - "InvalidIndex: you asked for slot 7 of a 3-element buffer"
//! - "InvalidElementSize: that record is the wrong width"
//!
//! Every one of these is returned to the caller. The buffer is never left
//! half-modified when an operation fails.
//!
//! Popping or peeking an empty buffer is not an error: those calls return
//! `None`.

use thiserror::Error;

use crate::config::ConfigError;

// ============================================
// MAIN ERROR
// ============================================

/// The error type for all fallible ring buffer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    /// Growing the backing storage failed.
    ///
    /// ## What This Means
    /// The allocator refused the request, or `requested` slots would not fit
    /// in the address space. The buffer still holds all of its old data.
    #[error("out of memory while growing ring buffer to {requested} slots")]
    OutOfMemory { requested: usize },

    /// Growing would pass the configured capacity ceiling.
    #[error("capacity {requested} exceeds the configured maximum of {max} slots")]
    CapacityExceeded { requested: usize, max: usize },

    /// `grow_to` was given a capacity that is not a larger power of two.
    #[error("invalid capacity {requested}: must be a power of two greater than {current}")]
    InvalidCapacity { requested: usize, current: usize },

    /// A logical index was outside the range the operation accepts.
    #[error("index {index} is out of range for ring buffer of length {len}")]
    InvalidIndex { index: usize, len: usize },

    /// A byte record did not match the buffer's fixed element width.
    #[error("element of {actual} bytes does not match element size {expected}")]
    InvalidElementSize { expected: usize, actual: usize },

    /// Byte ring buffers need a non-zero element width.
    #[error("element size must be at least one byte")]
    ZeroElementSize,

    /// The configuration used to build a buffer was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

// ============================================
// RESULT TYPE ALIAS
// ============================================

/// A Result type that uses [`RingError`].
pub type RingResult<T> = Result<T, RingError>;

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RingError::InvalidIndex { index: 7, len: 3 };
        let message = err.to_string();
        assert!(message.contains("index 7"));
        assert!(message.contains("length 3"));
    }

    #[test]
    fn test_config_error_conversion() {
        let config_err = ConfigError::MaxBelowInitial {
            initial: 16,
            max: 8,
        };
        let err: RingError = config_err.clone().into();

        match err {
            RingError::Config(inner) => assert_eq!(inner, config_err),
            other => panic!("Expected Config variant, got {other:?}"),
        }
    }
}
