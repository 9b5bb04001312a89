//! Destinations for progress events.
//!
//! The orchestrator only knows the [`ProgressSink`] trait. Closures,
//! [`ChannelSink`] and the writer-backed sinks below all implement it, so
//! any front end can receive the same stream.

use std::io::Write;
use std::sync::mpsc::Sender;
use tracing::warn;
use crate::core::ProgressEvent;

/// Receives progress events in the order they happen.
pub trait ProgressSink {
    fn report(&mut self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressEvent),
{
    fn report(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

/// Forwards events over a channel, e.g. to a UI thread.
pub struct ChannelSink(pub Sender<ProgressEvent>);

impl ProgressSink for ChannelSink {
    fn report(&mut self, event: &ProgressEvent) {
        // A dropped receiver means nobody is listening any more
        let _ = self.0.send(event.clone());
    }
}

/// Writes human-readable lines: an initial/final size pair per file and a
/// summary block at the end.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &ProgressEvent) -> std::io::Result<()> {
        match event {
            ProgressEvent::BatchStarted { folder, total } => {
                writeln!(self.out, "Compressing {total} file(s) in {}", folder.display())?;
            }
            ProgressEvent::FileStarted { file_name, initial_size, .. } => {
                writeln!(self.out, "{file_name} Initial Size: {initial_size}")?;
            }
            ProgressEvent::FileFinished { report, .. } => {
                writeln!(
                    self.out,
                    "{} Final Size: {} ({}, {} iteration(s))",
                    report.file_name, report.size_after, report.outcome, report.iterations
                )?;
                if let Some(error) = &report.error {
                    writeln!(self.out, "{} Error: {error}", report.file_name)?;
                }
            }
            ProgressEvent::BatchFinished { summary } => {
                writeln!(self.out, "Files compressed:")?;
                writeln!(self.out, "  converged:            {}", summary.converged)?;
                writeln!(self.out, "  already under target: {}", summary.already_under_target)?;
                writeln!(self.out, "  bound exceeded:       {}", summary.bound_exceeded)?;
                writeln!(self.out, "  failed:               {}", summary.failed)?;
                if summary.cancelled {
                    writeln!(
                        self.out,
                        "  cancelled:            {} ({} skipped)",
                        summary.cancelled_files, summary.skipped
                    )?;
                }
                writeln!(
                    self.out,
                    "  total bytes:          {} -> {}",
                    summary.bytes_before, summary.bytes_after
                )?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> ProgressSink for TextSink<W> {
    fn report(&mut self, event: &ProgressEvent) {
        if let Err(e) = self.write_event(event) {
            warn!("Failed to write progress line: {}", e);
        }
    }
}

/// Writes one JSON object per event (JSON lines).
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for JsonSink<W> {
    fn report(&mut self, event: &ProgressEvent) {
        let result = serde_json::to_writer(&mut self.out, event)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.out))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            warn!("Failed to write progress record: {}", e);
        }
    }
}
