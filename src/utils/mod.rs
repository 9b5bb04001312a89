pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{CompressorError, CompressorResult};
pub use validation::{validate_folder, validate_settings, validate_target_size};
pub use formats::ImageFormat;
pub use fs::{display_name, file_size, write_atomically};
