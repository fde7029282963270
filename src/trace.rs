//! Trace driver
//!
//! Replays a small operation script against a buffer and records the
//! buffer state after every step. This is an ordinary consumer of the
//! public `put`/`get` API and is what the `overrun` binary prints.
//!
//! Script grammar, one operation per line or `;`-separated:
//!
//! ```text
//! put 4          # store one sample
//! put 1..=6      # store 1, 2, ..., 6
//! get            # read one sample
//! drain          # read until empty
//! ```

use serde::Serialize;
use std::convert::Infallible;
use tracing::{debug, info_span};

use crate::errors::{OverrunError, TraceError};
use crate::ring::{AnyRingBuffer, BufferState, Policy, RingBuffer, Sample};

/// Most values a single `put a..=b` range may expand to.
pub const MAX_RANGE_LEN: u64 = 1_000_000;

/// Most operations a whole script may expand to.
pub const MAX_SCRIPT_OPS: usize = 4_000_000;

/// Demonstration sequence: two overflow laps, a partial read, then a full
/// drain followed by reads of an empty buffer.
pub const DEMO_SCRIPT: &str = "\
put 1..=6
get
put 7
get
put 8
get; get
put 9
get; get
get; get
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "value", rename_all = "lowercase")]
pub enum Op {
    Put(Sample),
    Get,
    Drain,
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Put(v) => write!(f, "put {}", v),
            Op::Get => write!(f, "get"),
            Op::Drain => write!(f, "drain"),
        }
    }
}

/// What an operation returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Outcome {
    Stored,
    Read(Option<Sample>),
    Drained(Vec<Sample>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    /// 1-based position in the replayed sequence
    pub step: usize,
    pub op: Op,
    pub outcome: Outcome,
    pub state: BufferState<Sample>,
}

/// Parse a script into operations. Ranges are expanded here.
pub fn parse_script(script: &str) -> Result<Vec<Op>, TraceError> {
    let mut ops = Vec::new();
    for (idx, raw) in script.lines().enumerate() {
        let line = idx + 1;
        let code = raw.split('#').next().unwrap_or_default();
        for segment in code.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            parse_segment(segment, line, &mut ops)?;
            if ops.len() > MAX_SCRIPT_OPS {
                return Err(TraceError::TooManyOperations {
                    line,
                    limit: MAX_SCRIPT_OPS,
                });
            }
        }
    }
    Ok(ops)
}

fn parse_segment(segment: &str, line: usize, ops: &mut Vec<Op>) -> Result<(), TraceError> {
    let mut tokens = segment.split_whitespace();
    let keyword = tokens.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = tokens.collect();

    match (keyword.as_str(), args.as_slice()) {
        ("put", []) => Err(TraceError::MissingValue { line }),
        ("put", [arg]) => match arg.split_once("..=") {
            Some((start, end)) => {
                let (start, end) = parse_range(start, end).ok_or_else(|| {
                    TraceError::InvalidRange {
                        line,
                        range: arg.to_string(),
                    }
                })?;
                ops.extend((start..=end).map(Op::Put));
                Ok(())
            }
            None => {
                let value = arg.parse::<Sample>().map_err(|_| TraceError::InvalidValue {
                    line,
                    value: arg.to_string(),
                })?;
                ops.push(Op::Put(value));
                Ok(())
            }
        },
        ("put", rest) => Err(TraceError::InvalidValue {
            line,
            value: rest.join(" "),
        }),
        ("get", []) => {
            ops.push(Op::Get);
            Ok(())
        }
        ("drain", []) => {
            ops.push(Op::Drain);
            Ok(())
        }
        _ => Err(TraceError::UnknownOperation {
            line,
            op: segment.to_string(),
        }),
    }
}

fn parse_range(start: &str, end: &str) -> Option<(Sample, Sample)> {
    let start = start.trim().parse::<Sample>().ok()?;
    let end = end.trim().parse::<Sample>().ok()?;
    if start > end {
        return None;
    }
    let count = (i64::from(end) - i64::from(start)) as u64 + 1;
    (count <= MAX_RANGE_LEN).then_some((start, end))
}

/// Apply one operation and report what it returned.
pub fn apply<B>(buffer: &mut B, op: Op) -> Outcome
where
    B: RingBuffer<Sample> + ?Sized,
{
    match op {
        Op::Put(value) => {
            buffer.put(value);
            Outcome::Stored
        }
        Op::Get => Outcome::Read(buffer.get()),
        Op::Drain => Outcome::Drained(buffer.drain()),
    }
}

/// Replay `ops` in order, collecting a snapshot after each one.
pub fn replay<B>(buffer: &mut B, ops: &[Op]) -> Vec<TraceStep>
where
    B: RingBuffer<Sample> + ?Sized,
{
    let mut steps = Vec::with_capacity(ops.len());
    let collected = replay_with(buffer, ops, |step| {
        steps.push(step);
        Ok::<(), Infallible>(())
    });
    match collected {
        Ok(()) => steps,
        Err(never) => match never {},
    }
}

/// Replay `ops` in order, handing each step to `on_step` as soon as it is
/// applied. Stops at the first error from `on_step`.
pub fn replay_with<B, E, F>(buffer: &mut B, ops: &[Op], mut on_step: F) -> Result<(), E>
where
    B: RingBuffer<Sample> + ?Sized,
    F: FnMut(TraceStep) -> Result<(), E>,
{
    let span = info_span!(
        "trace.replay",
        policy = %buffer.policy(),
        capacity = buffer.capacity(),
        ops = ops.len(),
    );
    let _enter = span.enter();

    for (i, &op) in ops.iter().enumerate() {
        let outcome = apply(buffer, op);
        debug!(step = i + 1, %op, ?outcome, "applied");
        on_step(TraceStep {
            step: i + 1,
            op,
            outcome,
            state: buffer.state(),
        })?;
    }
    Ok(())
}

/// Build a buffer with `policy` and `capacity`, then replay `script` on it.
pub fn run_script(
    policy: Policy,
    capacity: usize,
    script: &str,
) -> Result<Vec<TraceStep>, OverrunError> {
    let ops = parse_script(script)?;
    let mut buffer = AnyRingBuffer::<Sample>::with_policy(policy, capacity)?;
    Ok(replay(&mut buffer, &ops))
}
