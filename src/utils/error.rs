//! Error types for the image compressor.
//!
//! Provides a single error enum using `thiserror`. Job-level errors
//! (`NotFound`, `InvalidConfig`) abort a batch before any file is touched;
//! per-file errors (`Access`, `Decode`, `Encode`) are recorded against the
//! file and the batch moves on.

use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for the compressor.
#[derive(Error, Debug)]
pub enum CompressorError {
    /// Folder or file does not exist (or the folder is not a directory)
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Permission or IO failure while reading
    #[error("Access error on {}: {message}", .path.display())]
    Access { path: PathBuf, message: String },

    /// Non-positive target size, bad pattern, or out-of-range settings
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// File matched by extension is not a valid image of the expected codec
    #[error("Decode error in {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    /// Re-encode or overwrite failed
    #[error("Encode error in {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },
}

/// Convenience result type for compressor operations.
pub type CompressorResult<T> = Result<T, CompressorError>;

// Helper methods for error creation
impl CompressorError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    pub fn access(path: impl Into<PathBuf>, msg: impl Display) -> Self {
        Self::Access {
            path: path.into(),
            message: msg.to_string(),
        }
    }

    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn decode(path: impl Into<PathBuf>, msg: impl Display) -> Self {
        Self::Decode {
            path: path.into(),
            message: msg.to_string(),
        }
    }

    pub fn encode(path: impl Into<PathBuf>, msg: impl Display) -> Self {
        Self::Encode {
            path: path.into(),
            message: msg.to_string(),
        }
    }

    /// Maps an IO error raised while reading `path`.
    ///
    /// A missing file becomes `NotFound`; everything else is `Access`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::not_found(path),
            _ => Self::access(path, err),
        }
    }

    /// Whether this error must abort the whole batch.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidConfig(_))
    }
}
