// mediafile/src/processors/mod.rs
mod compressor;
mod loader;
mod metadata;
mod resizer;

pub use compressor::Compressor;
pub use loader::{DecodedImage, Loader};
pub use metadata::{ascii_value, tag_name, ExifEditor, ExifFields, MetadataProcessor};
pub use resizer::Resizer;
