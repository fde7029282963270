//! Tracking ring buffer
//!
//! Keeps the reader in step with the writer: when a write lands on the
//! oldest unread slot, the read cursor is pushed ahead so the next `get`
//! returns the oldest sample that is still intact.
//!
//! State is two cursors and a lap flag, with no element count:
//!
//! ```text
//!   head ──► last slot consumed   (next read is head + 1)
//!   tail ──► last slot written
//!   wrapped  tail has lapped slot capacity-1 since the reader caught up
//! ```
//!
//! `head == tail == Unset` exactly when nothing is left to read.

use tracing::{debug, trace};

use super::{allocate_slots, BufferState, Cursor, Policy, RingBuffer};
use crate::errors::RingError;

/// Overwriting SPSC ring buffer that evicts instead of returning stale data.
#[derive(Debug, Clone)]
pub struct TrackingRingBuffer<T> {
    slots: Box<[Option<T>]>,
    head: Cursor,
    tail: Cursor,
    wrapped: bool,
}

impl<T: Copy> TrackingRingBuffer<T> {
    /// Create a buffer with `capacity` empty slots.
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        Ok(Self {
            slots: allocate_slots(capacity, None)?,
            head: Cursor::Unset,
            tail: Cursor::Unset,
            wrapped: false,
        })
    }

    /// Store `value`, evicting the oldest unread sample if it would be
    /// overwritten.
    pub fn put(&mut self, value: T) {
        let capacity = self.slots.len();

        // The very first write lands on slot 0 without counting as a lap.
        let mut tail = self.tail.successor();
        if tail == capacity {
            tail = 0;
            if self.wrapped {
                // Second lap with the reader still behind: everything past
                // slot 0 has been rewritten at least once more.
                debug!(capacity, "writer lapped reader again, read cursor reset to slot 0");
                self.head = Cursor::At(0);
            } else {
                self.wrapped = true;
            }
        }

        if self.wrapped && self.head.trails(tail) {
            let head = self.head.successor() % capacity;
            trace!(slot = head, tail, "evicting oldest unread sample");
            self.head = Cursor::At(head);
        }

        self.tail = Cursor::At(tail);
        self.slots[tail] = Some(value);
    }

    /// Take the oldest unread sample. An empty buffer is left untouched.
    pub fn get(&mut self) -> Option<T> {
        let capacity = self.slots.len();
        let candidate = self.head.successor();
        let slot = candidate % capacity;

        let value = self.slots[slot].take()?;
        self.head = Cursor::At(slot);

        // Reader finished its own lap, so overwrites are no longer pending.
        if candidate == capacity {
            self.wrapped = false;
        }

        if self.head == self.tail {
            self.head = Cursor::Unset;
            self.tail = Cursor::Unset;
        }

        Some(value)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_unset() && self.tail.is_unset()
    }

    /// Last consumed slot.
    pub fn head(&self) -> Cursor {
        self.head
    }

    /// Last written slot.
    pub fn tail(&self) -> Cursor {
        self.tail
    }

    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Raw slot contents, `None` for free slots.
    pub fn slots(&self) -> &[Option<T>] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.head = Cursor::Unset;
        self.tail = Cursor::Unset;
        self.wrapped = false;
    }
}

impl<T: Copy> RingBuffer<T> for TrackingRingBuffer<T> {
    fn put(&mut self, value: T) {
        TrackingRingBuffer::put(self, value)
    }

    fn get(&mut self) -> Option<T> {
        TrackingRingBuffer::get(self)
    }

    fn capacity(&self) -> usize {
        TrackingRingBuffer::capacity(self)
    }

    fn is_empty(&self) -> bool {
        TrackingRingBuffer::is_empty(self)
    }

    fn clear(&mut self) {
        TrackingRingBuffer::clear(self)
    }

    fn state(&self) -> BufferState<T> {
        BufferState {
            policy: Policy::Tracking,
            capacity: self.slots.len(),
            slots: self.slots.to_vec(),
            head: self.head.index(),
            tail: self.tail.index(),
            wrapped: Some(self.wrapped),
        }
    }

    fn policy(&self) -> Policy {
        Policy::Tracking
    }
}
