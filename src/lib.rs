// Module declarations
pub mod cli;
pub mod commands;
pub mod core;
pub mod processing;
pub mod utils;

// Public exports for external consumers
pub use crate::core::{
    BatchSummary, CancelFlag, CompressionAttempt, CompressionJob, CompressionSettings, Outcome,
    ProgressEvent, ProgressSink,
};
pub use crate::processing::{Codec, CompressionEngine, JpegCodec, Orchestrator};
pub use crate::utils::{CompressorError, CompressorResult};
pub use crate::commands::*;

// This library file is used as a public API for consuming this crate as a library.
// The actual application entry point is in main.rs.
