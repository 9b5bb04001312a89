//! File discovery, the per-file re-encode loop and the batch driver.
//!
//! - [`list_matching_files`]: non-recursive glob listing of a folder
//! - [`Codec`] / [`JpegCodec`]: decode and re-encode at a quality level
//! - [`CompressionEngine`]: bounded, stall-detecting loop for one file
//! - [`Orchestrator`]: runs a [`crate::core::CompressionJob`] and reports progress

mod codec;
mod engine;
mod enumerator;
mod orchestrator;

pub use codec::{Codec, CodecError, JpegCodec, codec_for};
pub use engine::CompressionEngine;
pub use enumerator::{compile_pattern, list_matching_files};
pub use orchestrator::Orchestrator;
