//! Command-line arguments.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use crate::core::{CompressionJob, CompressionSettings};
use crate::utils::CompressorResult;

#[derive(Parser, Debug)]
#[command(name = "image-compressor", version, about = "Shrink images in place until they fit a size limit")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Re-encode every matching image in FOLDER until it is at most MAX_SIZE_BYTES
    Compress(CompressArgs),
}

#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Folder containing the images (not searched recursively)
    pub folder: PathBuf,

    /// Target maximum size per file, in bytes
    #[arg(allow_negative_numbers = true)]
    pub max_size_bytes: i64,

    /// Glob selecting the files to compress; its extension picks the codec
    #[arg(long, env = "COMPRESSOR_PATTERN", default_value = "*.jpg")]
    pub pattern: String,

    /// Encoder quality for re-encoding (1-100)
    #[arg(long, env = "COMPRESSOR_QUALITY")]
    pub quality: Option<u8>,

    /// Maximum re-encodes per file
    #[arg(long, env = "COMPRESSOR_MAX_ITERATIONS")]
    pub max_iterations: Option<u32>,

    /// Lower quality by this much after each iteration that fails to shrink the file
    #[arg(long, env = "COMPRESSOR_QUALITY_STEP")]
    pub quality_step: Option<u8>,

    /// Consecutive iterations without shrinkage before a file is given up on
    #[arg(long, env = "COMPRESSOR_STALL_LIMIT")]
    pub stall_limit: Option<u32>,

    /// Lowest quality the step-down may reach
    #[arg(long, env = "COMPRESSOR_MIN_QUALITY")]
    pub min_quality: Option<u8>,

    /// Print progress as JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

impl CompressArgs {
    /// Settings from flags and environment, falling back to the defaults.
    pub fn settings(&self) -> CompressionSettings {
        let defaults = CompressionSettings::default();
        CompressionSettings {
            quality: self.quality.unwrap_or(defaults.quality),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            quality_step: self.quality_step.unwrap_or(defaults.quality_step),
            stall_limit: self.stall_limit.unwrap_or(defaults.stall_limit),
            min_quality: self.min_quality.unwrap_or(defaults.min_quality),
        }
    }

    pub fn to_job(&self) -> CompressorResult<CompressionJob> {
        CompressionJob::new(
            self.folder.clone(),
            self.pattern.clone(),
            self.max_size_bytes,
            self.settings(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::CompressorError;

    fn compress_args(argv: &[&str]) -> CompressArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Compress(args) => args,
        }
    }

    #[test]
    fn test_positional_arguments() {
        let args = compress_args(&["image-compressor", "compress", "/photos", "1500000"]);
        assert_eq!(args.folder, PathBuf::from("/photos"));
        assert_eq!(args.max_size_bytes, 1_500_000);
        assert!(!args.json);
        assert_eq!(args.settings(), CompressionSettings::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = compress_args(&[
            "image-compressor", "compress", "/photos", "1000",
            "--quality", "70", "--quality-step", "5", "--max-iterations", "4",
        ]);
        let settings = args.settings();
        assert_eq!(settings.quality, 70);
        assert_eq!(settings.quality_step, 5);
        assert_eq!(settings.max_iterations, 4);
        assert_eq!(settings.min_quality, CompressionSettings::default().min_quality);
    }

    #[test]
    fn test_stall_limit_flag() {
        let args = compress_args(&[
            "image-compressor", "compress", "/photos", "1000", "--stall-limit", "5",
        ]);
        assert_eq!(args.settings().stall_limit, 5);

        let args = compress_args(&[
            "image-compressor", "compress", "/photos", "1000", "--stall-limit", "0",
        ]);
        assert!(matches!(args.to_job(), Err(CompressorError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_size_parses_then_fails_validation() {
        let args = compress_args(&["image-compressor", "compress", "/photos", "-5"]);
        assert_eq!(args.max_size_bytes, -5);
        assert!(matches!(args.to_job(), Err(CompressorError::InvalidConfig(_))));
    }

    #[test]
    fn test_non_numeric_size_is_usage_error() {
        assert!(Cli::try_parse_from(["image-compressor", "compress", "/photos", "big"]).is_err());
    }
}
