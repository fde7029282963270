//! overrun - ring buffers for producers that outrun their consumers
//!
//! Fixed-capacity single-producer/single-consumer buffers for streams of
//! samples where writes may outpace reads indefinitely.
//!
//! - **Tracking**: overflow evicts the oldest unread sample, readers never
//!   see overwritten data
//! - **Minimal**: overflow discards everything unread and starts over
//! - **Trace driver**: replay `put`/`get` scripts and inspect every state
//!
//! # Quick Start
//!
//! ```
//! use overrun::ring::TrackingRingBuffer;
//!
//! let mut buffer = TrackingRingBuffer::new(3)?;
//! for sample in [1, 2, 3, 4] {
//!     buffer.put(sample);
//! }
//! assert_eq!(buffer.get(), Some(2));
//! # Ok::<(), overrun::errors::RingError>(())
//! ```

// ─── Core ──────────────────────────────────────────────────────────
pub mod errors;
pub mod ring;

// ─── Trace driver ──────────────────────────────────────────────────
pub mod cli;
pub mod config;
pub mod output;
pub mod telemetry;
pub mod trace;

pub use errors::{OverrunError, RingError, Result};
pub use ring::{
    AnyRingBuffer, BufferState, Cursor, MinimalRingBuffer, Policy, RingBuffer, Sample,
    TrackingRingBuffer,
};
