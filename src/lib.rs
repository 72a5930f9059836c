//! # Replay Ring
//!
//! The buffering core of a fighting-game replay importer and reviewer: a
//! growable double-ended ring buffer that replay records are loaded into,
//! scrubbed through, edited in place and trimmed from either end.
//!
//! ## Architecture Overview
//!
//! The crate is structured into independent modules:
//!
//! - `buffer`: The ring buffers (typed and fixed-width byte records) and a
//!   lock-protected shared wrapper
//! - `config`: Capacity configuration
//! - `error`: Error types
//!
//! ## Example
//!
//! ```
//! use replay_ring::RingBuffer;
//!
//! let mut frames = RingBuffer::new();
//! frames.push_back("jab").unwrap();
//! frames.push_back("sweep").unwrap();
//! frames.push_front("dash").unwrap();
//!
//! assert_eq!(frames.pop_front(), Some("dash"));
//! assert_eq!(frames.to_vec(), vec!["jab", "sweep"]);
//! ```

// ============================================
// MODULE DECLARATIONS
// ============================================

pub mod buffer;
pub mod config;
pub mod error;

// ============================================
// RE-EXPORTS
// ============================================

pub use buffer::{ByteRingBuffer, RingBuffer, SharedRingBuffer};
pub use config::{ConfigError, RingConfig};
pub use error::{RingError, RingResult};

/// Initialize logging for the host application.
///
/// Logs at `info` unless `RUST_LOG` says otherwise. Safe to call more than
/// once; only the first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();
}

// ============================================
// TESTS
// ============================================
