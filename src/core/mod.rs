//! Core types shared by the engine, the orchestrator and front ends.
//!
//! - [`CompressionJob`]: a validated batch request
//! - [`CompressionSettings`]: tuning for the re-encode loop
//! - [`CompressionAttempt`] and [`Outcome`]: what happened to one file
//! - [`ProgressEvent`], [`FileReport`], [`BatchSummary`]: what sinks receive
//! - [`CancelFlag`]: cooperative cancellation

mod cancel;
mod progress;
mod sink;
mod types;

pub use cancel::CancelFlag;
pub use progress::{BatchSummary, FileReport, ProgressEvent};
pub use sink::{ChannelSink, JsonSink, ProgressSink, TextSink};
pub use types::{CompressionAttempt, CompressionJob, CompressionSettings, ImageFile, Outcome};
