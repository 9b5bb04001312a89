use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::core::{CompressionAttempt, Outcome};
use crate::utils::display_name;

/// Per-file progress record delivered to sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file_name: String,
    pub size_before: u64,
    pub size_after: u64,
    pub outcome: Outcome,
    pub iterations: u32,
    pub final_quality: u8,
    #[serde(default)]
    pub error: Option<String>,
    /// Bytes saved (can be negative if the file grew)
    pub saved_bytes: i64,
    /// Bytes saved as a percentage of the original size
    pub compression_ratio: f64,
}

impl From<&CompressionAttempt> for FileReport {
    fn from(attempt: &CompressionAttempt) -> Self {
        let saved_bytes = attempt.size_before as i64 - attempt.size_after as i64;
        let compression_ratio = if attempt.size_before > 0 {
            saved_bytes as f64 / attempt.size_before as f64 * 100.0
        } else {
            0.0
        };

        Self {
            file_name: display_name(&attempt.file),
            size_before: attempt.size_before,
            size_after: attempt.size_after,
            outcome: attempt.outcome,
            iterations: attempt.iterations,
            final_quality: attempt.final_quality,
            error: attempt.error.clone(),
            saved_bytes,
            compression_ratio,
        }
    }
}

/// Aggregate counts for one batch.
///
/// `total` always equals the sum of the per-outcome counts plus `skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub converged: usize,
    pub already_under_target: usize,
    pub bound_exceeded: usize,
    pub failed: usize,
    pub cancelled_files: usize,
    /// Files never started because the batch was cancelled
    pub skipped: usize,
    pub cancelled: bool,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

impl BatchSummary {
    pub fn new(total: usize) -> Self {
        Self { total, ..Default::default() }
    }

    pub fn record(&mut self, attempt: &CompressionAttempt) {
        match attempt.outcome {
            Outcome::Converged => self.converged += 1,
            Outcome::AlreadyUnderTarget => self.already_under_target += 1,
            Outcome::BoundExceeded => self.bound_exceeded += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Cancelled => {
                self.cancelled_files += 1;
                self.cancelled = true;
            }
        }
        self.bytes_before += attempt.size_before;
        self.bytes_after += attempt.size_after;
    }

    /// Marks the batch cancelled and counts everything not yet recorded as skipped.
    pub fn cancel_remaining(&mut self) {
        self.cancelled = true;
        self.skipped = self.total - self.processed();
    }

    /// Files that reached a terminal outcome
    pub fn processed(&self) -> usize {
        self.converged
            + self.already_under_target
            + self.bound_exceeded
            + self.failed
            + self.cancelled_files
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Converged => self.converged,
            Outcome::AlreadyUnderTarget => self.already_under_target,
            Outcome::BoundExceeded => self.bound_exceeded,
            Outcome::Failed => self.failed,
            Outcome::Cancelled => self.cancelled_files,
        }
    }
}

/// Progress message emitted by the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ProgressEvent {
    #[serde(rename_all = "camelCase")]
    BatchStarted { folder: PathBuf, total: usize },
    #[serde(rename_all = "camelCase")]
    FileStarted {
        file_name: String,
        index: usize,
        total: usize,
        initial_size: u64,
    },
    #[serde(rename_all = "camelCase")]
    FileFinished {
        report: FileReport,
        completed: usize,
        total: usize,
    },
    #[serde(rename_all = "camelCase")]
    BatchFinished { summary: BatchSummary },
}

impl ProgressEvent {
    /// Progress percentage (0-100) of the batch at this event
    pub fn percentage(&self) -> usize {
        let (done, total) = match self {
            Self::BatchStarted { .. } => (0, 1),
            Self::FileStarted { index, total, .. } => (*index, *total),
            Self::FileFinished { completed, total, .. } => (*completed, *total),
            Self::BatchFinished { .. } => (1, 1),
        };
        if total > 0 { (done * 100) / total } else { 0 }
    }
}
