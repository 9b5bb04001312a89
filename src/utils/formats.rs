use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::utils::CompressorError;

/// Lossy formats the compressor can re-encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
}

impl ImageFormat {
    /// Get the default re-encode quality for this format
    pub fn default_quality(&self) -> u8 {
        match self {
            Self::JPEG => 80,
        }
    }

    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
        }
    }

    /// Selects the format named by the extension part of a glob pattern.
    ///
    /// `*.jpg` and `IMG_*.JPEG` select JPEG, as does `*.{jpg,jpeg}` since both
    /// alternatives agree. Patterns without an extension, or whose
    /// alternatives name different formats, are rejected.
    pub fn from_pattern(pattern: &str) -> Result<Self, CompressorError> {
        let ext = pattern
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| CompressorError::invalid_config(format!(
                "Pattern '{pattern}' has no file extension to select a codec from"
            )))?;

        let alternatives = ext
            .strip_prefix('{')
            .and_then(|e| e.strip_suffix('}'))
            .map(|inner| inner.split(',').collect::<Vec<_>>())
            .unwrap_or_else(|| vec![ext]);

        let mut selected = None;
        for alt in alternatives {
            let format = Self::from_str(alt.trim())?;
            match selected {
                Some(prev) if prev != format => {
                    return Err(CompressorError::invalid_config(format!(
                        "Pattern '{pattern}' mixes image formats"
                    )));
                }
                _ => selected = Some(format),
            }
        }

        selected.ok_or_else(|| CompressorError::invalid_config(format!(
            "Pattern '{pattern}' names no image format"
        )))
    }
}

impl FromStr for ImageFormat {
    type Err = CompressorError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            e if Self::JPEG.extensions().contains(&e) => Ok(Self::JPEG),
            _ => Err(CompressorError::invalid_config(format!(
                "Unsupported image format: {}", ext
            ))),
        }
    }
}
