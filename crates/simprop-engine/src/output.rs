//! Recording of particle states.
//!
//! The engine emits one record per iteration through an [`OutputSink`].
//! [`TextSink`] writes the line format
//!
//! ```text
//! {pid} {z:e} {gamma:e} {tag}
//! ```
//!
//! whitespace-separated, one record per line.

use std::io::{self, Write};

use simprop_core::Particle;

/// Event tag written after each particle state.
///
/// Tags 1 and 2 are reserved for continuous and interaction outcomes;
/// those are reported through
/// [`RunMetrics`](crate::metrics::RunMetrics) rather than the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EventKind {
    /// State at the start of an iteration, before the step is chosen.
    None = 0,
    /// The particle broke a step invariant and was set aside.
    Quarantined = 3,
}

impl EventKind {
    /// Integer tag used in the text format.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// Consumer of particle states emitted by the engine.
pub trait OutputSink {
    /// Record `particle` with event tag `kind`.
    fn record(&mut self, particle: &Particle, kind: EventKind) -> io::Result<()>;
}

/// Line-oriented text output over any [`Write`].
#[derive(Debug)]
pub struct TextSink<W: Write> {
    writer: W,
    lines: u64,
}

impl<W: Write> TextSink<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Lines written so far.
    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> OutputSink for TextSink<W> {
    fn record(&mut self, particle: &Particle, kind: EventKind) -> io::Result<()> {
        writeln!(self.writer, "{particle} {}", kind.tag())?;
        self.lines += 1;
        Ok(())
    }
}

/// In-memory sink keeping every record, for inspection after a run.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Vec<(Particle, EventKind)>,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in emission order.
    pub fn records(&self) -> &[(Particle, EventKind)] {
        &self.records
    }
}

impl OutputSink for MemorySink {
    fn record(&mut self, particle: &Particle, kind: EventKind) -> io::Result<()> {
        self.records.push((*particle, kind));
        Ok(())
    }
}
