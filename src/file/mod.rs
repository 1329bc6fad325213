// mediafile/src/file/mod.rs
mod generic;
mod media;

pub use generic::GenericFile;
pub use media::{MediaFile, CAPTURE_DATE_TAGS};
