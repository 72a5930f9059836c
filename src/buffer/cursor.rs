//! Read/write cursor arithmetic shared by both ring buffer flavours.
//!
//! Cursors are signed and only masked when a slot is addressed, so they may
//! run past `capacity`. Fullness is decided by the one slot that is always
//! left unused, never by a separate counter.

/// Read and write positions plus the power-of-two slot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursors {
    read: isize,
    write: isize,
    capacity: usize,
}

impl Cursors {
    pub(crate) const fn new() -> Self {
        Self {
            read: 0,
            write: 0,
            capacity: 1,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    fn mask(&self) -> usize {
        self.capacity - 1
    }

    /// Physical slot for a raw cursor value.
    pub(crate) fn wrap(&self, index: isize) -> usize {
        (index as usize) & self.mask()
    }

    pub(crate) fn len(&self) -> usize {
        (self.write.wrapping_sub(self.read) as usize) & self.mask()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.wrap(self.read) == self.wrap(self.write)
    }

    pub(crate) fn is_full(&self) -> bool {
        self.wrap(self.write.wrapping_add(1)) == self.wrap(self.read)
    }

    /// Physical slot holding the element at `logical` (0 = front).
    pub(crate) fn slot(&self, logical: usize) -> usize {
        self.wrap(self.read.wrapping_add(logical as isize))
    }

    pub(crate) fn back_slot(&self) -> usize {
        self.wrap(self.write.wrapping_sub(1))
    }

    /// Claims the slot after the tail. Caller ensures the buffer is not full.
    pub(crate) fn push_back(&mut self) -> usize {
        let slot = self.wrap(self.write);
        self.write = self.write.wrapping_add(1);
        slot
    }

    /// Claims the slot before the head. Caller ensures the buffer is not full.
    pub(crate) fn push_front(&mut self) -> usize {
        self.read = self.read.wrapping_sub(1);
        self.wrap(self.read)
    }

    /// Releases the head slot. Caller ensures the buffer is not empty.
    pub(crate) fn pop_front(&mut self) -> usize {
        let slot = self.wrap(self.read);
        self.read = self.read.wrapping_add(1);
        slot
    }

    /// Releases the tail slot. Caller ensures the buffer is not empty.
    pub(crate) fn pop_back(&mut self) -> usize {
        self.write = self.write.wrapping_sub(1);
        self.wrap(self.write)
    }

    pub(crate) fn clear(&mut self) {
        self.read = self.write;
    }

    /// Number of slots at the physical start of storage that belong to the
    /// logical tail. Zero unless the sequence wraps.
    pub(crate) fn wrapped_prefix(&self) -> usize {
        let read = self.wrap(self.read);
        let write = self.wrap(self.write);
        if read > write {
            write
        } else {
            0
        }
    }

    /// Re-bases the cursors onto `new_capacity` slots once storage has been
    /// resized and the wrapped prefix copied to `[old_capacity, ..)`.
    pub(crate) fn grow(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity;
        let read = self.wrap(self.read);
        let write = self.wrap(self.write);

        self.read = read as isize;
        self.write = if read > write {
            (write + old_capacity) as isize
        } else {
            write as isize
        };
        self.capacity = new_capacity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursors(read: isize, write: isize, capacity: usize) -> Cursors {
        Cursors {
            read,
            write,
            capacity,
        }
    }

    #[test]
    fn test_initial_state_is_empty_and_full() {
        // A single slot can never hold anything: it is the reserved one.
        let c = Cursors::new();
        assert!(c.is_empty());
        assert!(c.is_full());
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn test_unmasked_cursors() {
        let c = cursors(10, 13, 8);
        assert_eq!(c.len(), 3);
        assert_eq!(c.slot(0), 2);
        assert_eq!(c.back_slot(), 4);
        assert!(!c.is_full());
        assert_eq!(c.wrapped_prefix(), 0);
    }

    #[test]
    fn test_negative_read_cursor() {
        let mut c = cursors(0, 0, 4);
        assert_eq!(c.push_front(), 3);
        assert_eq!(c.push_front(), 2);
        assert_eq!(c.len(), 2);
        assert_eq!(c.slot(0), 2);
        assert_eq!(c.wrapped_prefix(), 0);
    }

    #[test]
    fn test_full_keeps_one_slot_free() {
        let mut c = cursors(0, 0, 4);
        for _ in 0..3 {
            assert!(!c.is_full());
            c.push_back();
        }
        assert!(c.is_full());
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_grow_wrapped() {
        // read=6, write=2 in capacity 8: slots 6,7,0,1 hold the sequence.
        let mut c = cursors(6, 10, 8);
        assert_eq!(c.wrapped_prefix(), 2);

        c.grow(16);
        assert_eq!(c, cursors(6, 10, 16));
        assert_eq!(c.len(), 4);
        assert_eq!(c.slot(3), 9);
    }

    #[test]
    fn test_grow_not_wrapped_normalizes() {
        let mut c = cursors(-6, -3, 8);
        assert_eq!(c.wrapped_prefix(), 0);

        c.grow(16);
        assert_eq!(c, cursors(2, 5, 16));
        assert_eq!(c.len(), 3);
    }
}
