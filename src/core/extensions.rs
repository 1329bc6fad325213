// mediafile/src/core/extensions.rs
//! Suffixes that make a path a `MediaFile`. Matching is exact: only the
//! casings listed here are accepted.

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "JPG", "jpeg", "JPEG"];

pub const MOVIE_EXTENSIONS: &[&str] = &["mov", "MOV", "mp4", "MP4", "m4a", "M4A", "m4v", "M4V"];

pub fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

pub fn is_movie_extension(ext: &str) -> bool {
    MOVIE_EXTENSIONS.contains(&ext)
}

pub fn is_recognized_extension(ext: &str) -> bool {
    is_image_extension(ext) || is_movie_extension(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_and_movie_sets_are_disjoint() {
        for ext in IMAGE_EXTENSIONS {
            assert!(!is_movie_extension(ext), "{} is in both sets", ext);
        }
    }

    #[test]
    fn accepts_listed_casings_only() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(!is_image_extension("Jpg"));
        assert!(is_movie_extension("MOV"));
        assert!(is_movie_extension("m4v"));
        assert!(!is_recognized_extension("png"));
        assert!(!is_recognized_extension(""));
    }
}
