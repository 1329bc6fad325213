mod cli;
mod core;
mod file;
mod processors;
mod utils;

pub use cli::{Algorithm, Cli, Commands};
pub use crate::core::{
    is_image_extension, is_movie_extension, is_recognized_extension,
    MediaError, ResizeAlgorithm, ResizeOptions, Result, DEFAULT_LONG_SIDE,
};
pub use crate::core::extensions::{IMAGE_EXTENSIONS, MOVIE_EXTENSIONS};
pub use file::{GenericFile, MediaFile, CAPTURE_DATE_TAGS};
pub use processors::{
    ascii_value, tag_name, Compressor, DecodedImage, ExifEditor, ExifFields, Loader,
    MetadataProcessor, Resizer,
};
pub use utils::{copy_preserving_times, format_file_size, is_regular_file, is_same_file};

pub mod prelude {
    pub use crate::{GenericFile, MediaError, MediaFile, ResizeAlgorithm, ResizeOptions};
}

// Re-export commonly used types
pub use exif::{Tag, Value};
pub use image::DynamicImage;
