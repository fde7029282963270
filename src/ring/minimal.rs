//! Minimal ring buffer
//!
//! Two counters and a slot array. `tail` counts writes and `head` counts
//! reads since the last reset; there is no index wraparound. A write into a
//! full buffer drops every unread sample and starts over at slot 0.
//! Reads never clear slots, they only advance `head`.

use tracing::debug;

use super::{allocate_slots, BufferState, Policy, RingBuffer};
use crate::errors::RingError;

#[derive(Debug, Clone)]
pub struct MinimalRingBuffer<T> {
    slots: Box<[T]>,
    head: usize,
    tail: usize,
}

impl<T: Copy + Default> MinimalRingBuffer<T> {
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        Ok(Self {
            slots: allocate_slots(capacity, T::default())?,
            head: 0,
            tail: 0,
        })
    }

    /// Store `value`. A full buffer is reset first, losing all unread data.
    pub fn put(&mut self, value: T) {
        if self.tail == self.slots.len() {
            debug!(
                capacity = self.slots.len(),
                discarded = self.tail - self.head,
                "buffer full, resetting"
            );
            self.reset();
        }
        self.slots[self.tail] = value;
        self.tail += 1;
    }

    pub fn get(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        let value = self.slots[self.head];
        self.head += 1;
        Some(value)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// True once every slot has been written since the last reset.
    pub fn is_full(&self) -> bool {
        self.tail == self.slots.len()
    }

    /// Samples written and not yet read.
    pub fn len(&self) -> usize {
        self.tail - self.head
    }

    /// Samples consumed since the last reset.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Samples written since the last reset.
    pub fn tail(&self) -> usize {
        self.tail
    }

    pub fn slots(&self) -> &[T] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.slots.fill(T::default());
    }
}

impl<T: Copy + Default> RingBuffer<T> for MinimalRingBuffer<T> {
    fn put(&mut self, value: T) {
        MinimalRingBuffer::put(self, value)
    }

    fn get(&mut self) -> Option<T> {
        MinimalRingBuffer::get(self)
    }

    fn capacity(&self) -> usize {
        MinimalRingBuffer::capacity(self)
    }

    fn is_empty(&self) -> bool {
        MinimalRingBuffer::is_empty(self)
    }

    fn clear(&mut self) {
        MinimalRingBuffer::clear(self)
    }

    fn state(&self) -> BufferState<T> {
        BufferState {
            policy: Policy::Minimal,
            capacity: self.slots.len(),
            slots: self.slots.iter().copied().map(Some).collect(),
            head: Some(self.head),
            tail: Some(self.tail),
            wrapped: None,
        }
    }

    fn policy(&self) -> Policy {
        Policy::Minimal
    }
}
