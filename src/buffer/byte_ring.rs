//! # Byte Ring Buffer
//!
//! The same growable double-ended buffer as [`RingBuffer`], but for records
//! whose width is only known at runtime. Elements are plain byte slices of
//! exactly `element_size` bytes, copied in and out.
//!
//! ## Plain English
//!
//! A replay file tells us "each frame record is 24 bytes" in its header.
//! We can't name a Rust type for that at compile time, so this buffer just
//! stores 24-byte chunks back to back in one block of memory.
//!
//! [`RingBuffer`]: super::RingBuffer

use std::ops::Range;

use super::cursor::Cursors;
use crate::error::{RingError, RingResult};

/// A growable ring buffer of fixed-width byte records.
#[derive(Debug, Clone)]
pub struct ByteRingBuffer {
    /// `capacity * element_size` bytes once anything has been allocated
    buffer: Vec<u8>,
    element_size: usize,
    cursors: Cursors,
}

impl ByteRingBuffer {
    /// Creates an empty buffer of `element_size`-byte records.
    ///
    /// Nothing is allocated until the first push.
    pub fn new(element_size: usize) -> RingResult<Self> {
        if element_size == 0 {
            return Err(RingError::ZeroElementSize);
        }
        Ok(Self {
            buffer: Vec::new(),
            element_size,
            cursors: Cursors::new(),
        })
    }

    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Releases the backing storage and returns to the freshly created state.
    pub fn deinit(&mut self) {
        self.buffer = Vec::new();
        self.cursors = Cursors::new();
    }

    fn byte_range(&self, slot: usize) -> Range<usize> {
        let start = slot * self.element_size;
        start..start + self.element_size
    }

    fn check_width(&self, value: &[u8]) -> RingResult<()> {
        if value.len() != self.element_size {
            return Err(RingError::InvalidElementSize {
                expected: self.element_size,
                actual: value.len(),
            });
        }
        Ok(())
    }

    fn copy_slot(&mut self, from: usize, to: usize) {
        let source = self.byte_range(from);
        let dest = to * self.element_size;
        self.buffer.copy_within(source, dest);
    }

    // ----------------------------------------
    // GROWTH
    // ----------------------------------------

    /// Grows the buffer to `new_capacity` records.
    ///
    /// Same contract as [`RingBuffer::grow_to`](super::RingBuffer::grow_to):
    /// a larger power of two, allocated before anything moves, and a wrapped
    /// prefix relocated past the old end.
    pub fn grow_to(&mut self, new_capacity: usize) -> RingResult<()> {
        let old_capacity = self.cursors.capacity();
        if !new_capacity.is_power_of_two() || new_capacity <= old_capacity {
            return Err(RingError::InvalidCapacity {
                requested: new_capacity,
                current: old_capacity,
            });
        }

        let out_of_memory = RingError::OutOfMemory {
            requested: new_capacity,
        };
        let new_bytes = new_capacity
            .checked_mul(self.element_size)
            .ok_or_else(|| out_of_memory.clone())?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(new_bytes)
            .map_err(|_| out_of_memory)?;

        let prefix_bytes = self.cursors.wrapped_prefix() * self.element_size;
        buffer.extend_from_slice(&self.buffer);
        buffer.resize(new_bytes, 0);
        buffer.copy_within(0..prefix_bytes, old_capacity * self.element_size);

        self.buffer = buffer;
        self.cursors.grow(new_capacity);
        Ok(())
    }

    fn reserve_one(&mut self) -> RingResult<()> {
        if !self.cursors.is_full() {
            return Ok(());
        }
        let current = self.cursors.capacity();
        let doubled = current
            .checked_mul(2)
            .ok_or(RingError::OutOfMemory { requested: current })?;
        self.grow_to(doubled)
    }

    // ----------------------------------------
    // INSERTION
    // ----------------------------------------

    pub fn push_back(&mut self, value: &[u8]) -> RingResult<()> {
        self.check_width(value)?;
        self.emplace_back()?.copy_from_slice(value);
        Ok(())
    }

    pub fn push_front(&mut self, value: &[u8]) -> RingResult<()> {
        self.check_width(value)?;
        self.emplace_front()?.copy_from_slice(value);
        Ok(())
    }

    /// Reserves a zeroed record at the back and returns it for filling in.
    pub fn emplace_back(&mut self) -> RingResult<&mut [u8]> {
        self.reserve_one()?;
        let slot = self.cursors.push_back();
        let range = self.byte_range(slot);
        let record = &mut self.buffer[range];
        record.fill(0);
        Ok(record)
    }

    /// Reserves a zeroed record at the front and returns it for filling in.
    pub fn emplace_front(&mut self) -> RingResult<&mut [u8]> {
        self.reserve_one()?;
        let slot = self.cursors.push_front();
        let range = self.byte_range(slot);
        let record = &mut self.buffer[range];
        record.fill(0);
        Ok(record)
    }

    /// Inserts `value` at logical position `index` (`0..=len()`), shifting
    /// later records one slot towards the tail.
    pub fn insert_at(&mut self, index: usize, value: &[u8]) -> RingResult<()> {
        self.check_width(value)?;
        let len = self.len();
        if index > len {
            return Err(RingError::InvalidIndex { index, len });
        }
        self.reserve_one()?;

        self.cursors.push_back();
        for pos in (index..len).rev() {
            self.copy_slot(self.cursors.slot(pos), self.cursors.slot(pos + 1));
        }
        let range = self.byte_range(self.cursors.slot(index));
        self.buffer[range].copy_from_slice(value);
        Ok(())
    }

    // ----------------------------------------
    // REMOVAL
    // ----------------------------------------

    /// Removes the first record and returns its bytes, or `None` if empty.
    ///
    /// The slice points at the vacated slot and stays valid until the next
    /// mutation.
    pub fn pop_front(&mut self) -> Option<&[u8]> {
        if self.is_empty() {
            return None;
        }
        let slot = self.cursors.pop_front();
        let range = self.byte_range(slot);
        Some(&self.buffer[range])
    }

    /// Removes the last record and returns its bytes, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<&[u8]> {
        if self.is_empty() {
            return None;
        }
        let slot = self.cursors.pop_back();
        let range = self.byte_range(slot);
        Some(&self.buffer[range])
    }

    /// Removes the record at logical position `index`, closing the gap from
    /// the tail side. The removed bytes are overwritten, so nothing is
    /// returned; peek first if they are needed.
    pub fn erase_at(&mut self, index: usize) -> RingResult<()> {
        let len = self.len();
        if index >= len {
            return Err(RingError::InvalidIndex { index, len });
        }
        for pos in index..len - 1 {
            self.copy_slot(self.cursors.slot(pos + 1), self.cursors.slot(pos));
        }
        self.cursors.pop_back();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cursors.clear();
    }

    // ----------------------------------------
    // ACCESS
    // ----------------------------------------

    pub fn peek_front(&self) -> Option<&[u8]> {
        self.peek_at(0)
    }

    pub fn peek_back(&self) -> Option<&[u8]> {
        if self.is_empty() {
            return None;
        }
        Some(&self.buffer[self.byte_range(self.cursors.back_slot())])
    }

    pub fn peek_at(&self, index: usize) -> Option<&[u8]> {
        if index >= self.len() {
            return None;
        }
        Some(&self.buffer[self.byte_range(self.cursors.slot(index))])
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn count(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cursors.is_full()
    }

    /// Number of record slots, always a power of two.
    pub fn capacity(&self) -> usize {
        self.cursors.capacity()
    }

    /// Iterates over records from front to back.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &[u8]> + ExactSizeIterator + '_ {
        (0..self.len()).map(move |pos| &self.buffer[self.byte_range(self.cursors.slot(pos))])
    }
}

// ============================================
// TESTS
// ============================================
