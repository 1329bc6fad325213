// mediafile/src/processors/loader.rs
use crate::core::{MediaError, Result, MAX_DIMENSION};
use image::{DynamicImage, GenericImageView, ImageDecoder, ImageFormat, ImageReader};
use std::path::Path;

const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// Pixel buffer plus the metadata the decoder handed back with it.
#[derive(Debug)]
pub struct DecodedImage {
    image: DynamicImage,
    format: ImageFormat,
    exif: Option<Vec<u8>>,
}

impl DecodedImage {
    pub fn new(image: DynamicImage, format: ImageFormat, exif: Option<Vec<u8>>) -> Self {
        Self {
            image,
            format,
            exif,
        }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw TIFF-structured EXIF block, without the APP1 `Exif\0\0` header.
    pub fn exif_block(&self) -> Option<&[u8]> {
        self.exif.as_deref()
    }
}

#[derive(Clone)]
pub struct Loader {
    max_dimensions: (u32, u32),
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: (MAX_DIMENSION, MAX_DIMENSION),
        }
    }

    pub fn decode(&self, path: &Path) -> Result<DecodedImage> {
        log::debug!("Decoding image from: {}", path.display());

        self.validate_path(path)?;

        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let format = reader
            .format()
            .ok_or_else(|| MediaError::UnsupportedFormat(path.display().to_string()))?;

        let mut decoder = reader.into_decoder().map_err(|e| decode_error(path, e))?;
        let exif = decoder
            .exif_metadata()
            .map_err(|e| decode_error(path, e))?
            .map(strip_exif_header);
        let image = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(path, e))?;

        let (width, height) = image.dimensions();
        let (max_w, max_h) = self.max_dimensions;
        if width > max_w || height > max_h {
            return Err(MediaError::InvalidParameter(format!(
                "Image dimensions {}x{} exceed maximum {}x{}",
                width, height, max_w, max_h
            )));
        }

        log::info!(
            "Decoded image: {}x{} pixels, format: {:?}, exif: {}",
            width,
            height,
            format,
            exif.as_ref().map_or(0, Vec::len)
        );

        Ok(DecodedImage::new(image, format, exif))
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        let metadata = path.metadata()?;
        if metadata.len() == 0 {
            return Err(MediaError::Decode {
                path: path.to_path_buf(),
                reason: "file is empty".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, err: image::ImageError) -> MediaError {
    MediaError::Decode {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

fn strip_exif_header(mut block: Vec<u8>) -> Vec<u8> {
    if block.starts_with(EXIF_HEADER) {
        block.drain(..EXIF_HEADER.len());
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_app1_header_when_present() {
        let mut block = EXIF_HEADER.to_vec();
        block.extend_from_slice(b"MM\0*");
        assert_eq!(strip_exif_header(block), b"MM\0*".to_vec());
        assert_eq!(strip_exif_header(b"II*\0".to_vec()), b"II*\0".to_vec());
    }

    #[test]
    fn empty_file_is_a_decode_failure() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = Loader::new().decode(file.path());
        assert!(matches!(result, Err(MediaError::Decode { .. })));
    }
}
