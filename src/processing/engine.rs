//! The per-file re-encode loop.
//!
//! Each iteration reads the file, re-encodes it, replaces it on disk and
//! measures the result. The loop ends when the file fits the target, when the
//! iteration cap is reached, or when the size has stopped going down for
//! `stall_limit` iterations in a row. Re-encoding at a fixed quality tends to
//! settle at a stable size, so the cap and the stall check are what guarantee
//! termination.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::core::{CancelFlag, CompressionAttempt, CompressionSettings, ImageFile, Outcome};
use crate::utils::{CompressorError, CompressorResult, display_name, file_size, write_atomically};

use super::codec::Codec;

/// Drives one file at a time towards a target size.
pub struct CompressionEngine<'a, C: Codec + ?Sized> {
    codec: &'a C,
    settings: &'a CompressionSettings,
    cancel: &'a CancelFlag,
}

impl<'a, C: Codec + ?Sized> CompressionEngine<'a, C> {
    pub fn new(codec: &'a C, settings: &'a CompressionSettings, cancel: &'a CancelFlag) -> Self {
        Self { codec, settings, cancel }
    }

    /// Probes `path` and compresses it; see [`Self::compress_file`].
    ///
    /// Only the initial probe can fail (`NotFound` / `Access`); everything
    /// after it is folded into the returned attempt.
    pub fn compress(&self, path: &Path, target: u64) -> CompressorResult<CompressionAttempt> {
        let file = ImageFile::probe(path)?;
        Ok(self.compress_file(file, target))
    }

    /// Compresses an already probed file in place until it is at most
    /// `target` bytes.
    ///
    /// A file already within the target is left untouched. A `Decode`,
    /// `Encode` or `Access` error ends the loop with [`Outcome::Failed`]; the
    /// attempt still carries the iterations that completed before it and the
    /// size now on disk.
    pub fn compress_file(&self, file: ImageFile, target: u64) -> CompressionAttempt {
        let name = display_name(&file.path);

        if file.size <= target {
            debug!("'{}' already within target ({} <= {})", name, file.size, target);
            return CompressionAttempt::already_under_target(file, self.settings.quality);
        }

        let mut progress = LoopState {
            quality: self.settings.quality,
            last_quality: self.settings.quality,
            size: file.size,
            iterations: 0,
        };

        let (outcome, error) = match self.run_loop(&file.path, &name, target, &mut progress) {
            Ok(outcome) => (outcome, None),
            Err(e) => {
                debug!("'{}' failed after {} iteration(s): {}", name, progress.iterations, e);
                // A failed re-measure leaves the last known size in place
                if let Ok(size) = file_size(&file.path) {
                    progress.size = size;
                }
                (Outcome::Failed, Some(e.to_string()))
            }
        };

        CompressionAttempt {
            file: file.path,
            iterations: progress.iterations,
            size_before: file.size,
            size_after: progress.size,
            outcome,
            final_quality: progress.last_quality,
            error,
        }
    }

    fn run_loop(
        &self,
        path: &Path,
        name: &str,
        target: u64,
        progress: &mut LoopState,
    ) -> CompressorResult<Outcome> {
        let mut stalls = 0u32;

        loop {
            if self.cancel.is_cancelled() {
                debug!("'{}' cancelled after {} iteration(s)", name, progress.iterations);
                return Ok(Outcome::Cancelled);
            }

            let bytes = fs::read(path).map_err(|e| CompressorError::from_io(path, e))?;
            let encoded = self.codec.reencode(&bytes, progress.quality).map_err(|e| e.at(path))?;
            write_atomically(path, &encoded)?;
            progress.iterations += 1;
            progress.last_quality = progress.quality;

            let new_size = file_size(path)?;
            debug!(
                "'{}' iteration {}: {} -> {} bytes at quality {}",
                name, progress.iterations, progress.size, new_size, progress.quality
            );

            if new_size >= progress.size {
                stalls += 1;
            } else {
                stalls = 0;
            }
            progress.size = new_size;

            if progress.size <= target {
                return Ok(Outcome::Converged);
            }
            if stalls >= self.settings.stall_limit {
                debug!("'{}' stalled at {} bytes", name, progress.size);
                return Ok(Outcome::BoundExceeded);
            }
            if progress.iterations >= self.settings.max_iterations {
                debug!("'{}' hit the iteration cap at {} bytes", name, progress.size);
                return Ok(Outcome::BoundExceeded);
            }
            if stalls > 0 && self.settings.quality_step > 0 {
                progress.quality = progress
                    .quality
                    .saturating_sub(self.settings.quality_step)
                    .max(self.settings.min_quality);
            }
        }
    }
}

/// What the loop has done so far; survives an error so it can be reported.
struct LoopState {
    quality: u8,
    last_quality: u8,
    size: u64,
    iterations: u32,
}
