// SPDX-License-Identifier: MPL-2.0
//! Fixed-size event ring.

pub use crate::domain::coalescing::BufferCapacity;

/// Ring of the most recent `capacity` entries.
///
/// Storage is allocated lazily up to capacity; once full, each push
/// overwrites the oldest slot and bumps [`EventRing::overwritten`].
///
/// # Example
///
/// ```
/// use scholar_toast::diagnostics::{BufferCapacity, EventRing};
///
/// let mut ring = EventRing::new(BufferCapacity::new(10));
/// for i in 0..12 {
///     ring.push(i);
/// }
///
/// assert_eq!(ring.iter().next(), Some(&2));
/// assert_eq!(ring.overwritten(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EventRing<T> {
    slots: Vec<T>,
    /// Index of the oldest entry once the ring is full.
    head: usize,
    capacity: usize,
    overwritten: u64,
}

impl<T> EventRing<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Unvalidated capacity, for tests that need tiny rings.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::new(),
            head: 0,
            capacity,
            overwritten: 0,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(item);
            return;
        }
        self.slots[self.head] = item;
        self.head = (self.head + 1) % self.capacity;
        self.overwritten += 1;
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries lost to overwrites since creation or the last clear.
    #[must_use]
    pub fn overwritten(&self) -> u64 {
        self.overwritten
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
        self.overwritten = 0;
    }
}
