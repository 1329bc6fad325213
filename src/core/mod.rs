// mediafile/src/core/mod.rs
pub mod extensions;

use image::imageops::FilterType;
use std::path::PathBuf;
use thiserror::Error;

pub use extensions::{is_image_extension, is_movie_extension, is_recognized_extension};

/// Long side used by `MediaFile::resize` when the caller does not pick one.
pub const DEFAULT_LONG_SIDE: u32 = 1000;

pub(crate) const MAX_DIMENSION: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    #[default]
    Lanczos3,
}

impl ResizeAlgorithm {
    pub fn filter_type(self) -> FilterType {
        match self {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResizeOptions {
    pub long_side: u32,
    pub quality: u8,
    pub algorithm: ResizeAlgorithm,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            long_side: DEFAULT_LONG_SIDE,
            quality: 85,
            algorithm: ResizeAlgorithm::Lanczos3,
        }
    }
}

impl ResizeOptions {
    pub fn with_long_side(long_side: u32) -> Self {
        Self {
            long_side,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.long_side == 0 {
            return Err(MediaError::InvalidParameter(
                "Long side must be at least 1 pixel".to_string(),
            ));
        }

        if self.long_side > MAX_DIMENSION {
            return Err(MediaError::InvalidParameter(format!(
                "Long side too large (max {} pixels)",
                MAX_DIMENSION
            )));
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(MediaError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("EXIF error: {0}")]
    Exif(#[from] exif::Error),

    #[error("Not a valid media file")]
    InvalidFile,

    #[error("Not an image: {0}")]
    NotAnImage(PathBuf),

    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Output directory does not exist: {0}")]
    OutputDirMissing(PathBuf),

    #[error("Destination is the source file: {0}")]
    SameFile(PathBuf),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, MediaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        let options = ResizeOptions::default();
        assert_eq!(options.long_side, 1000);
        assert_eq!(options.algorithm, ResizeAlgorithm::Lanczos3);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_zero_long_side() {
        let options = ResizeOptions::with_long_side(0);
        assert!(matches!(
            options.validate(),
            Err(MediaError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_quality() {
        let mut options = ResizeOptions::default();
        options.quality = 0;
        assert!(options.validate().is_err());
        options.quality = 101;
        assert!(options.validate().is_err());
        options.quality = 100;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn lanczos_maps_to_windowed_sinc_filter() {
        assert_eq!(ResizeAlgorithm::Lanczos3.filter_type(), FilterType::Lanczos3);
        assert_eq!(ResizeAlgorithm::Bicubic.filter_type(), FilterType::CatmullRom);
    }
}
