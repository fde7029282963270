//! Trace rendering
//!
//! Text output is one line per step:
//!
//! ```text
//!   4  put 4      stored   [4, 2, 3]  head=0 tail=0 wrapped=true
//!   7  get        -> 4     [_, 5, 6]  head=0 tail=2 wrapped=false
//! ```
//!
//! Free slots print as `_`. JSON output is a single array of steps.
//! [`TraceWriter`] emits each step as soon as it is produced.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;

use crate::config::OutputFormat;
use crate::ring::{BufferState, Sample};
use crate::trace::{Outcome, TraceStep};

/// Streams trace steps to `out` in the chosen format.
pub struct TraceWriter<W: Write> {
    out: W,
    format: OutputFormat,
    color: bool,
    written: usize,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W, format: OutputFormat, color: bool) -> Self {
        Self {
            out,
            format,
            color,
            written: 0,
        }
    }

    pub fn write_step(&mut self, step: &TraceStep) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", render_step(step, self.color))
                .context("Failed to write trace step")?,
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(step).context("Failed to serialize trace step")?;
                let sep = if self.written == 0 { "[\n" } else { ",\n" };
                write!(self.out, "{}{}", sep, json).context("Failed to write trace step")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Close the JSON array if needed and flush. Returns the inner writer.
    pub fn finish(mut self) -> Result<W> {
        if self.format == OutputFormat::Json {
            let tail = if self.written == 0 { "[]\n" } else { "\n]\n" };
            self.out
                .write_all(tail.as_bytes())
                .context("Failed to write trace")?;
        }
        self.out.flush().context("Failed to flush trace output")?;
        Ok(self.out)
    }
}

pub fn render(steps: &[TraceStep], format: OutputFormat, color: bool) -> Result<String> {
    let mut writer = TraceWriter::new(Vec::new(), format, color);
    for step in steps {
        writer.write_step(step)?;
    }
    let bytes = writer.finish()?;
    String::from_utf8(bytes).context("Trace output is not UTF-8")
}

pub fn render_json(steps: &[TraceStep]) -> Result<String> {
    serde_json::to_string_pretty(steps).context("Failed to serialize trace")
}

pub fn render_text(steps: &[TraceStep], color: bool) -> String {
    let mut out = String::new();
    for step in steps {
        out.push_str(&render_step(step, color));
        out.push('\n');
    }
    out
}

pub fn render_step(step: &TraceStep, color: bool) -> String {
    let outcome = format!("{:<10}", format_outcome(&step.outcome));
    let outcome = if !color {
        outcome
    } else {
        match &step.outcome {
            Outcome::Stored => outcome.dimmed().to_string(),
            Outcome::Read(Some(_)) | Outcome::Drained(_) => outcome.green().to_string(),
            Outcome::Read(None) => outcome.yellow().to_string(),
        }
    };
    let op = format!("{:<12}", step.op.to_string());
    let op = if color { op.bold().to_string() } else { op };

    format!(
        "{:>3}  {} {} {}  {}",
        step.step,
        op,
        outcome,
        format_slots(&step.state.slots),
        format_cursors(&step.state)
    )
}

pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Stored => "stored".to_string(),
        Outcome::Read(Some(v)) => format!("-> {}", v),
        Outcome::Read(None) => "-> empty".to_string(),
        Outcome::Drained(values) => format!("-> {}", format_values(values)),
    }
}

pub fn format_slots(slots: &[Option<Sample>]) -> String {
    let cells: Vec<String> = slots
        .iter()
        .map(|s| s.map_or_else(|| "_".to_string(), |v| v.to_string()))
        .collect();
    format!("[{}]", cells.join(", "))
}

fn format_values(values: &[Sample]) -> String {
    let cells: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", cells.join(", "))
}

pub fn format_cursors(state: &BufferState<Sample>) -> String {
    let cursor = |c: Option<usize>| c.map_or_else(|| "none".to_string(), |i| i.to_string());
    let mut line = format!("head={} tail={}", cursor(state.head), cursor(state.tail));
    if let Some(wrapped) = state.wrapped {
        line.push_str(&format!(" wrapped={}", wrapped));
    }
    line
}
