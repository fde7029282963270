//! Fixed-capacity ring buffers for one producer and one consumer
//!
//! Two overflow policies share the same `put`/`get` contract:
//! - **Tracking**: a write that would clobber the oldest unread sample moves
//!   the read cursor forward instead, so a reader never sees stale data
//! - **Minimal**: a write into a full buffer throws away everything unread
//!   and starts again from slot 0
//!
//! Neither policy ever fails on `put` or blocks on `get`. The only error is
//! asking for a buffer with zero slots.
//!
//! # Example
//!
//! ```
//! use overrun::ring::{Policy, AnyRingBuffer, RingBuffer};
//!
//! let mut buffer = AnyRingBuffer::with_policy(Policy::Tracking, 3).unwrap();
//! for sample in 1..=4 {
//!     buffer.put(sample);
//! }
//! assert_eq!(buffer.drain(), vec![2, 3, 4]);
//! assert_eq!(buffer.get(), None);
//! ```

pub mod minimal;
pub mod tracking;

pub use minimal::MinimalRingBuffer;
pub use tracking::TrackingRingBuffer;

use serde::{Deserialize, Serialize};

use crate::errors::RingError;

/// Canonical payload: a fixed-width signed sample, as produced by most ADCs.
pub type Sample = i32;

/// Largest number of slots a buffer may be built with.
pub const MAX_CAPACITY: usize = 1 << 24;

/// Allocate `capacity` slots filled with `fill`, reporting bad sizes and
/// allocation failure instead of aborting.
pub(crate) fn allocate_slots<T: Clone>(capacity: usize, fill: T) -> Result<Box<[T]>, RingError> {
    if capacity == 0 {
        return Err(RingError::InvalidCapacity { capacity });
    }
    if capacity > MAX_CAPACITY {
        return Err(RingError::CapacityTooLarge {
            capacity,
            max: MAX_CAPACITY,
        });
    }
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| RingError::AllocationFailed { capacity })?;
    slots.resize(capacity, fill);
    Ok(slots.into_boxed_slice())
}

/// Read or write position inside a tracking buffer.
///
/// `Unset` means no cursor has been established yet: the buffer has never
/// held data or was just drained. For linear comparisons it sits one step
/// before slot 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Unset,
    At(usize),
}

impl Cursor {
    /// Slot index, if the cursor is established.
    pub fn index(self) -> Option<usize> {
        match self {
            Cursor::Unset => None,
            Cursor::At(i) => Some(i),
        }
    }

    pub fn is_unset(self) -> bool {
        self == Cursor::Unset
    }

    /// Next position before reducing modulo capacity. `Unset` steps to 0.
    pub(crate) fn successor(self) -> usize {
        match self {
            Cursor::Unset => 0,
            Cursor::At(i) => i + 1,
        }
    }

    /// True when this cursor is strictly behind `slot` in linear order.
    pub(crate) fn trails(self, slot: usize) -> bool {
        match self {
            Cursor::Unset => true,
            Cursor::At(i) => i < slot,
        }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cursor::Unset => write!(f, "none"),
            Cursor::At(i) => write!(f, "{}", i),
        }
    }
}

/// Overflow policy, chosen once when the buffer is built.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Evict the oldest unread sample on overflow (default)
    #[default]
    Tracking,
    /// Discard all unread samples on overflow
    Minimal,
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Tracking => write!(f, "tracking"),
            Policy::Minimal => write!(f, "minimal"),
        }
    }
}

/// Point-in-time view of a buffer, used for tracing and printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BufferState<T> {
    pub policy: Policy,
    pub capacity: usize,
    /// Physical slots. The minimal policy reports every slot as occupied.
    pub slots: Vec<Option<T>>,
    /// Tracking: last consumed slot. Minimal: samples consumed since reset.
    pub head: Option<usize>,
    /// Tracking: last written slot. Minimal: samples written since reset.
    pub tail: Option<usize>,
    /// Lap flag; the minimal policy has none.
    pub wrapped: Option<bool>,
}

/// The producer/consumer contract both policies implement.
pub trait RingBuffer<T: Copy> {
    /// Store a sample. Never fails; may evict or reset depending on policy.
    fn put(&mut self, value: T);

    /// Take the oldest unread sample, or `None` when there is nothing to read.
    fn get(&mut self) -> Option<T>;

    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool;

    /// Return to the freshly constructed state.
    fn clear(&mut self);

    fn state(&self) -> BufferState<T>;

    fn policy(&self) -> Policy;

    /// Read until the buffer reports empty.
    fn drain(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.capacity());
        while let Some(value) = self.get() {
            out.push(value);
        }
        out
    }
}

/// A buffer whose policy is picked at runtime.
#[derive(Debug, Clone)]
pub enum AnyRingBuffer<T> {
    Tracking(TrackingRingBuffer<T>),
    Minimal(MinimalRingBuffer<T>),
}

impl<T: Copy + Default> AnyRingBuffer<T> {
    pub fn with_policy(policy: Policy, capacity: usize) -> Result<Self, RingError> {
        Ok(match policy {
            Policy::Tracking => AnyRingBuffer::Tracking(TrackingRingBuffer::new(capacity)?),
            Policy::Minimal => AnyRingBuffer::Minimal(MinimalRingBuffer::new(capacity)?),
        })
    }
}

impl<T: Copy + Default> RingBuffer<T> for AnyRingBuffer<T> {
    fn put(&mut self, value: T) {
        match self {
            AnyRingBuffer::Tracking(b) => b.put(value),
            AnyRingBuffer::Minimal(b) => b.put(value),
        }
    }

    fn get(&mut self) -> Option<T> {
        match self {
            AnyRingBuffer::Tracking(b) => b.get(),
            AnyRingBuffer::Minimal(b) => b.get(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            AnyRingBuffer::Tracking(b) => b.capacity(),
            AnyRingBuffer::Minimal(b) => b.capacity(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            AnyRingBuffer::Tracking(b) => b.is_empty(),
            AnyRingBuffer::Minimal(b) => b.is_empty(),
        }
    }

    fn clear(&mut self) {
        match self {
            AnyRingBuffer::Tracking(b) => b.clear(),
            AnyRingBuffer::Minimal(b) => b.clear(),
        }
    }

    fn state(&self) -> BufferState<T> {
        match self {
            AnyRingBuffer::Tracking(b) => RingBuffer::state(b),
            AnyRingBuffer::Minimal(b) => RingBuffer::state(b),
        }
    }

    fn policy(&self) -> Policy {
        match self {
            AnyRingBuffer::Tracking(_) => Policy::Tracking,
            AnyRingBuffer::Minimal(_) => Policy::Minimal,
        }
    }
}
