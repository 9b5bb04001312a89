//! Core types for compression jobs, settings and per-file attempts.

use std::fmt;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::utils::{
    CompressorResult, ImageFormat, file_size, validate_settings, validate_target_size,
};

/// Tuning for the re-encode loop.
///
/// The defaults reproduce a fixed-quality loop with a safety cap: quality 80,
/// at most 10 iterations, and a stop after 2 iterations that fail to shrink
/// the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressionSettings {
    /// Encoder quality (1-100) used for the first iteration
    pub quality: u8,
    /// Upper bound on re-encodes per file
    pub max_iterations: u32,
    /// Consecutive non-shrinking iterations that end the loop
    pub stall_limit: u32,
    /// Quality decrease applied after a non-shrinking iteration (0 keeps quality fixed)
    pub quality_step: u8,
    /// Floor for the quality step-down
    pub min_quality: u8,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            quality: ImageFormat::JPEG.default_quality(),
            max_iterations: 10,
            stall_limit: 2,
            quality_step: 0,
            min_quality: 10,
        }
    }
}

/// One batch request: which folder, which files, and how small they must get.
///
/// Constructed only through [`CompressionJob::new`], which validates every
/// field, and immutable afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionJob {
    folder: PathBuf,
    pattern: String,
    target_max_size: u64,
    format: ImageFormat,
    settings: CompressionSettings,
}

impl CompressionJob {
    /// Creates a validated job.
    ///
    /// `target_max_size` is signed so that zero and negative inputs from a
    /// command line surface as `InvalidConfig` rather than parse failures.
    pub fn new(
        folder: impl Into<PathBuf>,
        pattern: impl Into<String>,
        target_max_size: i64,
        settings: CompressionSettings,
    ) -> CompressorResult<Self> {
        let target_max_size = validate_target_size(target_max_size)?;
        validate_settings(&settings)?;
        let pattern = pattern.into();
        let format = ImageFormat::from_pattern(&pattern)?;

        Ok(Self {
            folder: folder.into(),
            pattern,
            target_max_size,
            format,
            settings,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn target_max_size(&self) -> u64 {
        self.target_max_size
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn settings(&self) -> &CompressionSettings {
        &self.settings
    }

    /// Resolves a file name from the enumerator against the job folder.
    pub fn resolve(&self, name: &Path) -> PathBuf {
        self.folder.join(name)
    }
}

/// An image on disk and its size at the moment it was probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub size: u64,
}

impl ImageFile {
    pub fn probe(path: impl Into<PathBuf>) -> CompressorResult<Self> {
        let path = path.into();
        let size = file_size(&path)?;
        Ok(Self { path, size })
    }
}

/// Terminal state of one file's compression loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// Size dropped to or below the target
    Converged,
    /// Already small enough; the file was not touched
    AlreadyUnderTarget,
    /// Iteration cap hit or the loop stalled above the target
    BoundExceeded,
    /// Decode, encode or read error
    Failed,
    /// Stopped at an iteration boundary by a cancellation request
    Cancelled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Converged => "converged",
            Self::AlreadyUnderTarget => "already under target",
            Self::BoundExceeded => "bound exceeded",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Result of running the engine on one file. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionAttempt {
    pub file: PathBuf,
    pub iterations: u32,
    pub size_before: u64,
    pub size_after: u64,
    pub outcome: Outcome,
    /// Quality used by the last re-encode (the configured quality when none ran)
    pub final_quality: u8,
    pub error: Option<String>,
}

impl CompressionAttempt {
    pub fn already_under_target(file: ImageFile, quality: u8) -> Self {
        Self {
            size_after: file.size,
            size_before: file.size,
            file: file.path,
            iterations: 0,
            outcome: Outcome::AlreadyUnderTarget,
            final_quality: quality,
            error: None,
        }
    }

    /// A failed attempt; the size after is whatever is on disk now.
    pub fn failed(file: ImageFile, quality: u8, error: impl fmt::Display) -> Self {
        let size_after = file_size(&file.path).unwrap_or(file.size);
        Self {
            size_before: file.size,
            size_after,
            file: file.path,
            iterations: 0,
            outcome: Outcome::Failed,
            final_quality: quality,
            error: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::CompressorError;

    #[test]
    fn test_job_rejects_non_positive_target() {
        for target in [0, -1, -1_500_000] {
            let err = CompressionJob::new("/tmp", "*.jpg", target, CompressionSettings::default())
                .unwrap_err();
            assert!(matches!(err, CompressorError::InvalidConfig(_)));
        }
    }

    #[test]
    fn test_job_rejects_unsupported_pattern() {
        let err = CompressionJob::new("/tmp", "*.png", 1000, CompressionSettings::default())
            .unwrap_err();
        assert!(matches!(err, CompressorError::InvalidConfig(_)));
    }

    #[test]
    fn test_job_resolves_names_against_folder() {
        let job = CompressionJob::new("/photos", "*.jpg", 1000, CompressionSettings::default())
            .unwrap();
        assert_eq!(job.resolve(Path::new("a.jpg")), PathBuf::from("/photos/a.jpg"));
        assert_eq!(job.target_max_size(), 1000);
        assert_eq!(job.format(), ImageFormat::JPEG);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: CompressionSettings =
            serde_json::from_str(r#"{"qualityStep": 5}"#).unwrap();
        assert_eq!(settings.quality_step, 5);
        assert_eq!(settings.quality, 80);
        assert_eq!(settings.max_iterations, 10);
    }
}
