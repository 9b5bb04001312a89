//! Batch driver: enumerate, compress each file, report.
//!
//! Files are processed one after another. A per-file error is logged and
//! recorded as [`Outcome::Failed`](crate::core::Outcome::Failed), then the
//! batch moves on. Only a bad folder or pattern stops the batch, and that
//! happens before any file is touched.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::core::{
    BatchSummary, CancelFlag, CompressionAttempt, CompressionJob, FileReport, ImageFile,
    ProgressEvent, ProgressSink,
};
use crate::utils::{CompressorResult, display_name};

use super::codec::Codec;
use super::engine::CompressionEngine;
use super::enumerator::list_matching_files;

/// Runs compression jobs with one codec.
pub struct Orchestrator<C: Codec> {
    codec: C,
    cancel: CancelFlag,
}

impl<C: Codec> Orchestrator<C> {
    pub fn new(codec: C) -> Self {
        Self { codec, cancel: CancelFlag::new() }
    }

    /// Uses an existing flag so the caller can cancel from elsewhere.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Compresses every matching file in the job folder.
    ///
    /// Emits `BatchStarted`, a `FileStarted`/`FileFinished` pair per file and
    /// `BatchFinished`. Files are visited in name order. Returns `NotFound` or
    /// `InvalidConfig` for a bad folder or pattern; per-file problems only
    /// show up in the summary.
    pub fn run(
        &self,
        job: &CompressionJob,
        sink: &mut dyn ProgressSink,
    ) -> CompressorResult<BatchSummary> {
        let mut names = list_matching_files(job.folder(), job.pattern())?;
        names.sort();

        let total = names.len();
        info!(
            "Compressing {} file(s) in {} to at most {} bytes",
            total,
            job.folder().display(),
            job.target_max_size()
        );
        sink.report(&ProgressEvent::BatchStarted {
            folder: job.folder().to_path_buf(),
            total,
        });

        let engine = CompressionEngine::new(&self.codec, job.settings(), &self.cancel);
        let mut summary = BatchSummary::new(total);

        for (idx, name) in names.iter().enumerate() {
            if self.cancel.is_cancelled() {
                summary.cancel_remaining();
                warn!("Batch cancelled, {} file(s) skipped", summary.skipped);
                break;
            }

            let path = job.resolve(name);
            let attempt = self.compress_one(&engine, job, &path, idx, total, sink);
            summary.record(&attempt);

            sink.report(&ProgressEvent::FileFinished {
                report: FileReport::from(&attempt),
                completed: idx + 1,
                total,
            });
        }

        if summary.failed > 0 {
            warn!(
                "Batch completed with {} failed file(s) out of {}",
                summary.failed, total
            );
        } else {
            info!(
                "Batch completed: {} converged, {} already under target, {} bound exceeded",
                summary.converged, summary.already_under_target, summary.bound_exceeded
            );
        }

        sink.report(&ProgressEvent::BatchFinished { summary: summary.clone() });
        Ok(summary)
    }

    /// Probes once, reports the start, and hands the probed file to the
    /// engine. A failed probe becomes a failed attempt here.
    fn compress_one(
        &self,
        engine: &CompressionEngine<'_, C>,
        job: &CompressionJob,
        path: &Path,
        idx: usize,
        total: usize,
        sink: &mut dyn ProgressSink,
    ) -> CompressionAttempt {
        let quality = job.settings().quality;
        let probe = ImageFile::probe(path);

        sink.report(&ProgressEvent::FileStarted {
            file_name: display_name(path),
            index: idx,
            total,
            initial_size: probe.as_ref().map(|f| f.size).unwrap_or(0),
        });

        let file = match probe {
            Ok(file) => file,
            Err(e) => {
                warn!("Cannot read {}: {}", path.display(), e);
                let file = ImageFile { path: path.to_path_buf(), size: 0 };
                return CompressionAttempt::failed(file, quality, e);
            }
        };

        let attempt = engine.compress_file(file, job.target_max_size());
        match &attempt.error {
            Some(e) => warn!(
                "Compression failed for {} after {} iteration(s): {}",
                path.display(),
                attempt.iterations,
                e
            ),
            None => debug!(
                "'{}' {} after {} iteration(s): {} -> {} bytes",
                display_name(path),
                attempt.outcome,
                attempt.iterations,
                attempt.size_before,
                attempt.size_after
            ),
        }
        attempt
    }
}
