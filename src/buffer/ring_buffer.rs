//! # Ring Buffer Implementation
//!
//! A growable double-ended circular buffer.
//!
//! ## Plain English
//!
//! Picture a circular track with numbered parking spots, and two markers:
//! one at the first parked car, one at the first free spot after the last.
//! Cars can join or leave at either marker. When only one free spot is
//! left, the track is rebuilt twice as long before the next car arrives,
//! and any cars that had wrapped round past the start are moved so the
//! queue stays in one piece.

use std::iter::FusedIterator;

use super::cursor::Cursors;
use crate::error::{RingError, RingResult};

/// A growable ring buffer with insertion and removal at both ends.
///
/// ## Properties
/// - Power-of-two capacity, starting at 1 with nothing allocated
/// - Amortized O(1) push and pop at either end
/// - O(len - index) insertion and removal in the middle
/// - One slot is always free; `capacity() - 1` elements fit before growth
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Exactly `capacity` slots once anything has been allocated
    slots: Vec<Option<T>>,

    cursors: Cursors,

    /// Growth ceiling, if any
    max_capacity: Option<usize>,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer. No memory is allocated until the first push.
    ///
    /// ## Example
    /// ```
    /// # use replay_ring::RingBuffer;
    /// let buffer: RingBuffer<i32> = RingBuffer::new();
    /// assert_eq!(buffer.capacity(), 1);
    /// assert!(buffer.is_empty());
    /// ```
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            cursors: Cursors::new(),
            max_capacity: None,
        }
    }

    /// Creates an empty buffer with at least `capacity` slots allocated.
    ///
    /// The slot count is rounded up to a power of two. Remember the free
    /// slot: `with_capacity(8)` holds seven elements before growing.
    pub fn with_capacity(capacity: usize) -> RingResult<Self> {
        let mut buffer = Self::new();
        let slots = capacity
            .checked_next_power_of_two()
            .ok_or(RingError::OutOfMemory { requested: capacity })?;
        if slots > 1 {
            buffer.grow_to(slots)?;
        }
        Ok(buffer)
    }

    /// Limits how far the buffer may grow. `None` removes the limit.
    ///
    /// Does not shrink a buffer that is already larger.
    pub fn set_max_capacity(&mut self, max_capacity: Option<usize>) {
        self.max_capacity = max_capacity;
    }

    pub fn max_capacity(&self) -> Option<usize> {
        self.max_capacity
    }

    /// Releases the backing storage and returns to the freshly created state.
    ///
    /// Any stored elements are dropped. The growth ceiling is kept.
    pub fn deinit(&mut self) {
        self.slots = Vec::new();
        self.cursors = Cursors::new();
    }

    // ----------------------------------------
    // GROWTH
    // ----------------------------------------

    /// Grows the buffer to `new_capacity` slots.
    ///
    /// `new_capacity` must be a power of two larger than the current
    /// capacity. The new storage is allocated before anything is touched, so
    /// on any error the buffer is exactly as it was.
    ///
    /// ## What Happens (Plain English)
    ///
    /// If the elements sit in one run (`read <= write`) they stay where they
    /// are. If they wrap round the end of storage, the part at the start is
    /// moved to just past the old end, so the run is unbroken again.
    pub fn grow_to(&mut self, new_capacity: usize) -> RingResult<()> {
        let old_capacity = self.cursors.capacity();
        if !new_capacity.is_power_of_two() || new_capacity <= old_capacity {
            return Err(RingError::InvalidCapacity {
                requested: new_capacity,
                current: old_capacity,
            });
        }
        if let Some(max) = self.max_capacity {
            if new_capacity > max {
                return Err(RingError::CapacityExceeded {
                    requested: new_capacity,
                    max,
                });
            }
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(new_capacity)
            .map_err(|_| RingError::OutOfMemory {
                requested: new_capacity,
            })?;

        let prefix = self.cursors.wrapped_prefix();
        slots.extend(self.slots.drain(..));
        slots.resize_with(new_capacity, || None);
        for slot in 0..prefix {
            slots.swap(slot, old_capacity + slot);
        }

        self.slots = slots;
        self.cursors.grow(new_capacity);
        Ok(())
    }

    /// Doubles the capacity if the next insertion would need the free slot.
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

    /// Appends `value` after the last element.
    pub fn push_back(&mut self, value: T) -> RingResult<()> {
        self.reserve_one()?;
        let slot = self.cursors.push_back();
        self.slots[slot] = Some(value);
        Ok(())
    }

    /// Prepends `value` before the first element.
    pub fn push_front(&mut self, value: T) -> RingResult<()> {
        self.reserve_one()?;
        let slot = self.cursors.push_front();
        self.slots[slot] = Some(value);
        Ok(())
    }

    /// Appends a default value and returns it for in-place initialisation.
    pub fn emplace_back(&mut self) -> RingResult<&mut T>
    where
        T: Default,
    {
        self.reserve_one()?;
        let slot = self.cursors.push_back();
        Ok(self.slots[slot].insert(T::default()))
    }

    /// Prepends a default value and returns it for in-place initialisation.
    pub fn emplace_front(&mut self) -> RingResult<&mut T>
    where
        T: Default,
    {
        self.reserve_one()?;
        let slot = self.cursors.push_front();
        Ok(self.slots[slot].insert(T::default()))
    }

    /// Inserts `value` so that it ends up at logical position `index`.
    ///
    /// `index` may equal `len()`, which appends. Elements from `index` on
    /// move one slot towards the tail; the shift always starts from the tail
    /// side, so the worst case is O(len).
    pub fn insert_at(&mut self, index: usize, value: T) -> RingResult<()> {
        let len = self.len();
        if index > len {
            return Err(RingError::InvalidIndex { index, len });
        }
        self.reserve_one()?;

        let tail = self.cursors.push_back();
        self.slots[tail] = Some(value);
        for pos in (index..len).rev() {
            let (from, to) = (self.cursors.slot(pos), self.cursors.slot(pos + 1));
            self.slots.swap(from, to);
        }
        Ok(())
    }

    // ----------------------------------------
    // REMOVAL
    // ----------------------------------------

    /// Removes and returns the first element, or `None` if empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.cursors.pop_front();
        self.slots[slot].take()
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.cursors.pop_back();
        self.slots[slot].take()
    }

    /// Removes and returns the element at logical position `index`.
    ///
    /// Later elements move one slot towards the head.
    pub fn erase_at(&mut self, index: usize) -> RingResult<T> {
        let len = self.len();
        if index >= len {
            return Err(RingError::InvalidIndex { index, len });
        }

        let removed = self.slots[self.cursors.slot(index)].take();
        for pos in index..len - 1 {
            let (to, from) = (self.cursors.slot(pos), self.cursors.slot(pos + 1));
            self.slots.swap(to, from);
        }
        self.cursors.pop_back();
        removed.ok_or(RingError::InvalidIndex { index, len })
    }

    /// Drops the `count` oldest elements (all of them if `count >= len()`).
    pub fn truncate_front(&mut self, count: usize) {
        for _ in 0..count.min(self.len()) {
            self.pop_front();
        }
    }

    /// Empties the buffer, dropping the elements. Storage is kept for reuse.
    pub fn clear(&mut self) {
        for pos in 0..self.len() {
            let slot = self.cursors.slot(pos);
            self.slots[slot] = None;
        }
        self.cursors.clear();
    }

    // ----------------------------------------
    // ACCESS
    // ----------------------------------------

    pub fn peek_front(&self) -> Option<&T> {
        self.peek_at(0)
    }

    pub fn peek_back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.cursors.back_slot()].as_ref()
    }

    /// Returns the element at logical position `index`, or `None` if out of range.
    pub fn peek_at(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        self.slots[self.cursors.slot(index)].as_ref()
    }

    pub fn peek_at_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len() {
            return None;
        }
        let slot = self.cursors.slot(index);
        self.slots[slot].as_mut()
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// Same as [`len`](Self::len).
    pub fn count(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    /// True when only the reserved slot is free; the next insertion grows.
    pub fn is_full(&self) -> bool {
        self.cursors.is_full()
    }

    /// Number of slots, always a power of two.
    pub fn capacity(&self) -> usize {
        self.cursors.capacity()
    }

    /// Iterates from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            cursors: self.cursors,
            front: 0,
            back: self.len(),
        }
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Returns cloned copies of all elements, front first.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================
// ITERATOR
// ============================================

/// Borrowing iterator over a [`RingBuffer`], front to back.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
    cursors: Cursors,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let slot = self.cursors.slot(self.front);
        self.front += 1;
        self.slots[slot].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.slots[self.cursors.slot(self.back)].as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

// ============================================
// TESTS
// ============================================
