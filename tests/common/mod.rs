#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image_compressor_lib::core::ProgressEvent;
use image_compressor_lib::processing::{Codec, CodecError};

/// Prefix marking a file the stub codec refuses to decode.
pub const CORRUPT: &[u8] = b"CORRUPT";

/// Codec stub whose output size is a function of the input size.
pub struct StubCodec<F> {
    resize: F,
    corrupt_output: bool,
}

impl<F> StubCodec<F>
where
    F: Fn(usize) -> usize + Send + Sync,
{
    pub fn new(resize: F) -> Self {
        Self { resize, corrupt_output: false }
    }

    /// Marks every output as corrupt, so the next pass over it fails to decode.
    pub fn corrupting_output(mut self) -> Self {
        self.corrupt_output = true;
        self
    }
}

impl<F> Codec for StubCodec<F>
where
    F: Fn(usize) -> usize + Send + Sync,
{
    fn reencode(&self, bytes: &[u8], _quality: u8) -> Result<Vec<u8>, CodecError> {
        if bytes.starts_with(CORRUPT) {
            return Err(CodecError::Decode("not an image".to_string()));
        }
        let mut out = vec![0xFF; (self.resize)(bytes.len())];
        if self.corrupt_output && out.len() >= CORRUPT.len() {
            out[..CORRUPT.len()].copy_from_slice(CORRUPT);
        }
        Ok(out)
    }
}

pub fn write_image(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![0x11; len]).unwrap();
    path
}

pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut bytes = CORRUPT.to_vec();
    bytes.resize(50_000, 0);
    fs::write(&path, bytes).unwrap();
    path
}

/// Collects every event so tests can inspect the stream afterwards.
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<ProgressEvent>,
}

impl Recorder {
    pub fn sink(&mut self) -> impl FnMut(&ProgressEvent) + '_ {
        move |event: &ProgressEvent| self.events.push(event.clone())
    }

    pub fn finished(&self) -> Vec<&image_compressor_lib::core::FileReport> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::FileFinished { report, .. } => Some(report),
                _ => None,
            })
            .collect()
    }
}
