//! Lossy re-encoding behind the [`Codec`] trait.
//!
//! The engine hands a codec the file's current bytes and a quality level and
//! gets the re-encoded bytes back; it never touches pixels itself.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat as DecodeFormat};
use thiserror::Error;
use crate::utils::{CompressorError, ImageFormat};
use std::path::Path;

/// Codec failure, before it is attached to a file path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Encode(String),
}

impl CodecError {
    pub fn at(self, path: &Path) -> CompressorError {
        match self {
            Self::Decode(msg) => CompressorError::decode(path, msg),
            Self::Encode(msg) => CompressorError::encode(path, msg),
        }
    }
}

/// Decodes an image and encodes it again at `quality` (1-100).
pub trait Codec: Send + Sync {
    fn reencode(&self, bytes: &[u8], quality: u8) -> Result<Vec<u8>, CodecError>;
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    fn reencode(&self, bytes: &[u8], quality: u8) -> Result<Vec<u8>, CodecError> {
        (**self).reencode(bytes, quality)
    }
}

/// Baseline JPEG via the `image` crate.
///
/// Grayscale and RGB images are encoded as-is; anything else (alpha,
/// 16-bit) is flattened to 8-bit RGB first since JPEG cannot carry it.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCodec;

impl Codec for JpegCodec {
    fn reencode(&self, bytes: &[u8], quality: u8) -> Result<Vec<u8>, CodecError> {
        let image = image::load_from_memory_with_format(bytes, DecodeFormat::Jpeg)
            .map_err(|e| CodecError::Decode(format!("Failed to decode JPEG: {e}")))?;

        let image = match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        };

        let mut out = Vec::with_capacity(bytes.len());
        let encoder = JpegEncoder::new_with_quality(&mut out, quality);
        image
            .write_with_encoder(encoder)
            .map_err(|e| CodecError::Encode(format!("JPEG encode failed: {e}")))?;
        Ok(out)
    }
}

/// Returns the codec for a lossy format.
pub fn codec_for(format: ImageFormat) -> Box<dyn Codec> {
    match format {
        ImageFormat::JPEG => Box::new(JpegCodec),
    }
}
