//! # Buffer Module
//!
//! The growable double-ended ring buffers, plus a lock-protected wrapper for
//! callers that share one between threads.
//!
//! ## Plain English Explanation
//!
//! A replay importer loads thousands of frame records; a reviewer scrubs
//! back and forth through them, splices in corrected frames, and drops old
//! ones off the front. All of that is a queue you can touch at both ends
//! and in the middle, which is what [`RingBuffer`] is.
//!
//! The buffers themselves never lock anything. If two threads need the same
//! buffer, wrap it in a [`SharedRingBuffer`].

mod byte_ring;
mod cursor;
mod ring_buffer;

pub use byte_ring::ByteRingBuffer;
pub use ring_buffer::{Iter, RingBuffer};

use log::{debug, info, warn};
use parking_lot::RwLock;

use crate::config::RingConfig;
use crate::error::{RingError, RingResult};

// ============================================
// SHARED RING BUFFER
// Thread-safe wrapper for our ring buffer
// ============================================

/// A ring buffer that can be shared across threads
///
/// ## Plain English Explanation
///
/// The importer thread WRITES records while the review UI READS them to
/// draw the timeline. This wrapper uses a read-write lock so many readers
/// can look at once, but a writer gets the buffer to itself. Growth moves
/// the storage, so it always happens under the write lock.
pub struct SharedRingBuffer<T> {
    inner: RwLock<RingBuffer<T>>,
}

impl<T> SharedRingBuffer<T> {
    /// Creates a shared buffer from a validated configuration.
    ///
    /// The first configuration problem found is returned as an error.
    pub fn new(config: &RingConfig) -> RingResult<Self> {
        if let Some(err) = config.validate().into_iter().next() {
            return Err(RingError::Config(err));
        }

        info!(
            "Creating ring buffer: {} initial slots, max {:?}",
            config.initial_capacity, config.max_capacity
        );

        let mut buffer = RingBuffer::new();
        buffer.set_max_capacity(config.max_capacity);
        if config.initial_capacity > 1 {
            buffer.grow_to(config.initial_capacity)?;
        }

        Ok(Self {
            inner: RwLock::new(buffer),
        })
    }

    /// Runs a mutating operation under the write lock and logs growth.
    fn write_logged<R>(
        &self,
        op: &str,
        f: impl FnOnce(&mut RingBuffer<T>) -> RingResult<R>,
    ) -> RingResult<R> {
        let mut buffer = self.inner.write();
        let before = buffer.capacity();
        let result = f(&mut buffer);

        match &result {
            Ok(_) if buffer.capacity() != before => {
                debug!(
                    "{}: ring buffer grew from {} to {} slots",
                    op,
                    before,
                    buffer.capacity()
                );
            }
            Err(err @ (RingError::OutOfMemory { .. } | RingError::CapacityExceeded { .. })) => {
                warn!("{}: ring buffer could not grow: {}", op, err);
            }
            _ => {}
        }
        result
    }

    pub fn push_back(&self, value: T) -> RingResult<()> {
        self.write_logged("push_back", |buffer| buffer.push_back(value))
    }

    pub fn push_front(&self, value: T) -> RingResult<()> {
        self.write_logged("push_front", |buffer| buffer.push_front(value))
    }

    pub fn insert_at(&self, index: usize, value: T) -> RingResult<()> {
        self.write_logged("insert_at", |buffer| buffer.insert_at(index, value))
    }

    pub fn erase_at(&self, index: usize) -> RingResult<T> {
        self.inner.write().erase_at(index)
    }

    pub fn pop_front(&self) -> Option<T> {
        self.inner.write().pop_front()
    }

    pub fn pop_back(&self) -> Option<T> {
        self.inner.write().pop_back()
    }

    /// Runs `f` with shared access, for reads that must see one consistent state.
    pub fn with_read<R>(&self, f: impl FnOnce(&RingBuffer<T>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive access, for compound edits done under one lock.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut RingBuffer<T>) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Returns how full the current allocation is (0.0 = empty).
    ///
    /// Never reaches 1.0: one slot is always free, and the buffer grows
    /// instead of filling it.
    pub fn fill_percentage(&self) -> f32 {
        let buffer = self.inner.read();
        buffer.len() as f32 / buffer.capacity() as f32
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Removes every element. Storage is kept.
    pub fn clear(&self) {
        self.inner.write().clear();
    }
}

impl<T: Clone> SharedRingBuffer<T> {
    /// Takes a snapshot of all current elements, front first.
    ///
    /// The buffer itself is not modified, so importing can continue.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.read().to_vec()
    }
}

// ============================================
// TESTS
// ============================================
