// mediafile/src/file/media.rs
use super::GenericFile;
use crate::core::{
    is_image_extension, is_movie_extension, is_recognized_extension, MediaError, ResizeOptions,
    Result,
};
use crate::processors::{
    ascii_value, Compressor, DecodedImage, ExifEditor, ExifFields, Loader, MetadataProcessor,
    Resizer,
};
use crate::utils::{copy_preserving_times, is_same_file, preserve_times};
use chrono::{DateTime, Local, NaiveDateTime};
use std::path::Path;

/// Tags tried in order when looking for the capture date.
pub const CAPTURE_DATE_TAGS: &[&str] = &["DateTimeOriginal", "DateTimeDigitized", "DateTime"];

const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

#[derive(Debug, Default)]
enum DecodeState {
    #[default]
    Pending,
    Decoded(DecodedImage),
    Failed(String),
}

/// An image or movie file.
///
/// Validity follows [`GenericFile`], narrowed to the recognized image and
/// movie extensions. Images are decoded on first use by [`MediaFile::open`]
/// and the decoded buffer lives as long as the handle. Movies are never
/// decoded, so their pixel and EXIF queries return `None`.
#[derive(Debug, Default)]
pub struct MediaFile {
    file: GenericFile,
    decoded: DecodeState,
    capture_date: Option<NaiveDateTime>,
}

impl MediaFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::from_generic(GenericFile::new(path))
    }

    pub fn from_optional<P: AsRef<Path>>(path: Option<P>) -> Self {
        Self::from_generic(GenericFile::from_optional(path))
    }

    pub fn from_generic(file: GenericFile) -> Self {
        let mut media = Self {
            file,
            ..Default::default()
        };
        let recognized = media
            .file
            .extension()
            .is_some_and(is_recognized_extension);
        if !recognized {
            media.clear();
        }
        media
    }

    pub fn as_generic(&self) -> &GenericFile {
        &self.file
    }

    pub fn clear(&mut self) {
        self.file.clear();
        self.decoded = DecodeState::Pending;
        self.capture_date = None;
    }

    pub fn is_valid(&self) -> bool {
        self.file.is_valid()
    }

    pub fn is_invalid(&self) -> bool {
        self.file.is_invalid()
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.path()
    }

    pub fn name(&self) -> Option<&str> {
        self.file.name()
    }

    pub fn extension(&self) -> Option<&str> {
        self.file.extension()
    }

    pub fn modification_date(&self) -> Option<DateTime<Local>> {
        self.file.modification_date()
    }

    pub fn modification_date_iso(&self) -> Option<String> {
        self.file.modification_date_iso()
    }

    pub fn is_image(&self) -> bool {
        self.extension().is_some_and(is_image_extension)
    }

    pub fn is_movie(&self) -> bool {
        self.extension().is_some_and(is_movie_extension)
    }

    /// Whether a decode has succeeded and its buffer is cached.
    pub fn is_decoded(&self) -> bool {
        matches!(self.decoded, DecodeState::Decoded(_))
    }

    /// Decodes the image if that has not been tried yet. Invalid handles and
    /// movies are left alone; a decode failure is logged and remembered.
    pub fn open(&mut self) {
        if let Err(e) = self.try_open() {
            log::debug!("No decoded image: {}", e);
        }
    }

    pub fn try_open(&mut self) -> Result<&DecodedImage> {
        let path = self.path().ok_or(MediaError::InvalidFile)?.to_path_buf();
        if !self.is_image() {
            return Err(MediaError::NotAnImage(path));
        }

        if matches!(self.decoded, DecodeState::Pending) {
            self.decoded = match Loader::new().decode(&path) {
                Ok(image) => DecodeState::Decoded(image),
                Err(e) => DecodeState::Failed(e.to_string()),
            };
        }

        match &self.decoded {
            DecodeState::Decoded(image) => Ok(image),
            DecodeState::Failed(reason) => Err(MediaError::Decode {
                path,
                reason: reason.clone(),
            }),
            DecodeState::Pending => Err(MediaError::Decode {
                path,
                reason: "decode was not attempted".to_string(),
            }),
        }
    }

    pub fn dimensions(&mut self) -> Option<(u32, u32)> {
        self.open();
        match &self.decoded {
            DecodeState::Decoded(image) => Some(image.dimensions()),
            _ => None,
        }
    }

    pub fn width(&mut self) -> Option<u32> {
        self.dimensions().map(|(w, _)| w)
    }

    pub fn height(&mut self) -> Option<u32> {
        self.dimensions().map(|(_, h)| h)
    }

    /// EXIF fields of the decoded image whose tag name is in `names`.
    /// `None` when there is no decoded image or its EXIF block is unreadable;
    /// an image without EXIF gives an empty set.
    pub fn exif_fields(&mut self, names: &[&str]) -> Option<ExifFields> {
        match self.try_exif_fields(names) {
            Ok(fields) => Some(fields),
            Err(e) => {
                log::debug!("No EXIF fields: {}", e);
                None
            }
        }
    }

    pub fn try_exif_fields(&mut self, names: &[&str]) -> Result<ExifFields> {
        let decoded = self.try_open()?;
        match decoded.exif_block() {
            Some(raw) => MetadataProcessor::new().fields_named(raw, names),
            None => Ok(ExifFields::default()),
        }
    }

    pub fn capture_date(&mut self) -> Option<NaiveDateTime> {
        if let Some(date) = self.capture_date {
            return Some(date);
        }

        let fields = self.exif_fields(CAPTURE_DATE_TAGS)?;
        let date = CAPTURE_DATE_TAGS
            .iter()
            .filter_map(|tag| fields.get(tag))
            .filter_map(ascii_value)
            .find_map(|s| NaiveDateTime::parse_from_str(&s, EXIF_DATE_FORMAT).ok())?;

        self.capture_date = Some(date);
        Some(date)
    }

    /// Resizes into `output_dir` so the long side is at most `long_side`.
    /// See [`MediaFile::try_resize`].
    pub fn resize<P: AsRef<Path>>(&mut self, output_dir: P, long_side: u32) -> Option<MediaFile> {
        self.resize_with(output_dir, &ResizeOptions::with_long_side(long_side))
    }

    pub fn resize_with<P: AsRef<Path>>(
        &mut self,
        output_dir: P,
        options: &ResizeOptions,
    ) -> Option<MediaFile> {
        match self.try_resize(output_dir, options) {
            Ok(resized) => Some(resized),
            Err(e) => {
                log::debug!("Resize skipped: {}", e);
                None
            }
        }
    }

    /// Writes a copy named like this file into `output_dir`.
    ///
    /// Images already smaller than `long_side` on both sides are copied byte
    /// for byte. Larger ones are resampled so the long side equals
    /// `long_side`, their EXIF XResolution/YResolution become the new pixel
    /// counts over 1, and they are re-encoded in the source format. Either
    /// way the output keeps the source modification time and the source is
    /// never touched.
    pub fn try_resize<P: AsRef<Path>>(
        &mut self,
        output_dir: P,
        options: &ResizeOptions,
    ) -> Result<MediaFile> {
        options.validate()?;
        let output_dir = output_dir.as_ref();

        let (source, name) = match (self.path(), self.name()) {
            (Some(path), Some(name)) => (path.to_path_buf(), name.to_string()),
            _ => return Err(MediaError::InvalidFile),
        };

        let (width, height) = self.try_open()?.dimensions();

        if !output_dir.is_dir() {
            return Err(MediaError::OutputDirMissing(output_dir.to_path_buf()));
        }

        let destination = output_dir.join(name);
        if is_same_file(&source, &destination) {
            return Err(MediaError::SameFile(destination));
        }

        if Resizer::fits_within(width, height, options.long_side) {
            log::info!(
                "{}x{} already within {}, copying to {}",
                width,
                height,
                options.long_side,
                destination.display()
            );
            copy_preserving_times(&source, &destination)?;
            return Ok(MediaFile::new(destination));
        }

        let (new_width, new_height) =
            Resizer::long_side_dimensions(width, height, options.long_side);
        let decoded = self.try_open()?;
        let resized =
            Resizer::new(options.algorithm).resample(decoded.image(), new_width, new_height);

        let mut exif = match decoded.exif_block() {
            Some(raw) => MetadataProcessor::new().parse(raw).unwrap_or_else(|e| {
                log::warn!(
                    "Unreadable EXIF in {}, writing a fresh block: {}",
                    source.display(),
                    e
                );
                ExifEditor::empty()
            }),
            None => ExifEditor::empty(),
        };
        exif.set_resolution(new_width, new_height);
        let exif_bytes = exif.serialize()?;

        let compressor = Compressor::new(options.quality);
        let encoded =
            compressor.encode(&resized, decoded.format(), Some(exif_bytes.as_slice()))?;
        compressor.write(&encoded, &destination)?;

        if let Err(e) = preserve_times(&source, &destination) {
            log::warn!("Failed to keep permissions and timestamps on {}: {}", destination.display(), e);
        }

        Ok(MediaFile::new(destination))
    }
}
