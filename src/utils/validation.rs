use std::path::Path;
use crate::core::CompressionSettings;
use crate::utils::{CompressorError, CompressorResult};

/// Validates the job folder: it must exist and be a directory
pub fn validate_folder(path: &Path) -> CompressorResult<()> {
    if !path.is_dir() {
        return Err(CompressorError::not_found(path));
    }
    Ok(())
}

/// Validates the target size and converts it to an unsigned byte count
pub fn validate_target_size(target: i64) -> CompressorResult<u64> {
    u64::try_from(target)
        .ok()
        .filter(|&t| t > 0)
        .ok_or_else(|| CompressorError::invalid_config(
            format!("Target size must be a positive number of bytes, got {target}")
        ))
}

/// Validates compression loop settings
pub fn validate_settings(settings: &CompressionSettings) -> CompressorResult<()> {
    if settings.quality == 0 || settings.quality > 100 {
        return Err(CompressorError::invalid_config(
            format!("Invalid quality value: {}. Must be between 1 and 100", settings.quality)
        ));
    }

    if settings.max_iterations == 0 {
        return Err(CompressorError::invalid_config("Max iterations cannot be 0"));
    }

    if settings.stall_limit == 0 {
        return Err(CompressorError::invalid_config("Stall limit cannot be 0"));
    }

    if settings.min_quality == 0 || settings.min_quality > settings.quality {
        return Err(CompressorError::invalid_config(format!(
            "Invalid min quality: {}. Must be between 1 and the starting quality ({})",
            settings.min_quality, settings.quality
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_target_size() {
        assert_eq!(validate_target_size(1_500_000).unwrap(), 1_500_000);
        assert!(validate_target_size(0).is_err());
        assert!(validate_target_size(-5).is_err());
    }

    #[test]
    fn test_settings_bounds() {
        assert!(validate_settings(&CompressionSettings::default()).is_ok());

        let bad = [
            CompressionSettings { quality: 0, ..Default::default() },
            CompressionSettings { quality: 101, ..Default::default() },
            CompressionSettings { max_iterations: 0, ..Default::default() },
            CompressionSettings { stall_limit: 0, ..Default::default() },
            CompressionSettings { min_quality: 90, ..Default::default() },
        ];
        for settings in bad {
            let err = validate_settings(&settings).unwrap_err();
            assert!(matches!(err, CompressorError::InvalidConfig(_)), "{settings:?}");
        }
    }

    #[test]
    fn test_folder() {
        let dir = TempDir::new().unwrap();
        assert!(validate_folder(dir.path()).is_ok());

        let file = dir.path().join("a.jpg");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(validate_folder(&file), Err(CompressorError::NotFound(_))));
        assert!(matches!(
            validate_folder(&dir.path().join("missing")),
            Err(CompressorError::NotFound(_))
        ));
    }
}
