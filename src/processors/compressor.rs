// mediafile/src/processors/compressor.rs
use crate::core::{MediaError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const EXIF_HEADER: &[u8] = b"Exif\0\0";
const MAX_SEGMENT_PAYLOAD: usize = u16::MAX as usize - 2;

pub struct Compressor {
    quality: u8,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Encodes `image` in `format`, embedding `exif` (TIFF bytes, no header).
    pub fn encode(
        &self,
        image: &DynamicImage,
        format: ImageFormat,
        exif: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        match format {
            ImageFormat::Jpeg => self.encode_jpeg(image, exif),
            other => Err(MediaError::UnsupportedFormat(format!("{:?}", other))),
        }
    }

    fn encode_jpeg(&self, image: &DynamicImage, exif: Option<&[u8]>) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);

        // JPEG only carries 8-bit gray or RGB.
        match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => {
                image.write_with_encoder(encoder)?
            }
            _ => DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?,
        }

        match exif {
            Some(block) => insert_exif_segment(&buffer, block),
            None => Ok(buffer),
        }
    }

    /// Writes `bytes` to a temporary file next to `path` and renames it into
    /// place. On failure the temporary file is dropped and whatever was at
    /// `path` is left as it was.
    pub fn write(&self, bytes: &[u8], path: &Path) -> Result<()> {
        log::debug!(
            "Writing {} bytes to {} (quality {})",
            bytes.len(),
            path.display(),
            self.quality
        );

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(bytes)?;
        staged.flush()?;
        staged.persist(path).map_err(|e| e.error)?;

        log::info!("Saved image: {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(85)
    }
}

/// Places an APP1 Exif segment after SOI and any JFIF APP0 segment.
fn insert_exif_segment(jpeg: &[u8], tiff: &[u8]) -> Result<Vec<u8>> {
    if !jpeg.starts_with(&SOI) {
        return Err(MediaError::UnsupportedFormat(
            "encoded stream is missing the JPEG SOI marker".to_string(),
        ));
    }

    let payload_len = EXIF_HEADER.len() + tiff.len();
    if payload_len > MAX_SEGMENT_PAYLOAD {
        return Err(MediaError::InvalidParameter(format!(
            "EXIF block of {} bytes does not fit in one APP1 segment",
            tiff.len()
        )));
    }

    let mut insert_at = SOI.len();
    if jpeg.len() >= insert_at + 4 && jpeg[insert_at] == 0xFF && jpeg[insert_at + 1] == APP0 {
        let len = u16::from_be_bytes([jpeg[insert_at + 2], jpeg[insert_at + 3]]) as usize;
        insert_at += 2 + len;
    }
    let insert_at = insert_at.min(jpeg.len());

    let segment_len = (payload_len + 2) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + payload_len + 4);
    out.extend_from_slice(&jpeg[..insert_at]);
    out.extend_from_slice(&[0xFF, APP1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(EXIF_HEADER);
    out.extend_from_slice(tiff);
    out.extend_from_slice(&jpeg[insert_at..]);
    Ok(out)
}
