// mediafile/src/processors/resizer.rs
use crate::core::ResizeAlgorithm;
use image::DynamicImage;

pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    /// True when both sides are already strictly below `long_side`.
    pub fn fits_within(width: u32, height: u32, long_side: u32) -> bool {
        width < long_side && height < long_side
    }

    /// Scales so the longer side becomes exactly `long_side`; the other side
    /// is truncated and never drops below one pixel.
    pub fn long_side_dimensions(width: u32, height: u32, long_side: u32) -> (u32, u32) {
        let longest = u64::from(width.max(height));
        if longest == 0 {
            return (width, height);
        }

        let scale = |side: u32| -> u32 {
            let scaled = u64::from(side) * u64::from(long_side) / longest;
            u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
        };

        (scale(width), scale(height))
    }

    pub fn resample(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        if width == image.width() && height == image.height() {
            log::debug!("Image dimensions unchanged, skipping resample");
            return image.clone();
        }

        log::debug!(
            "Resampling image from {}x{} to {}x{} with {:?}",
            image.width(),
            image.height(),
            width,
            height,
            self.algorithm
        );

        image.resize_exact(width, height, self.algorithm.filter_type())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_long_side_maps_exactly() {
        assert_eq!(Resizer::long_side_dimensions(4000, 3000, 1000), (1000, 750));
    }

    #[test]
    fn portrait_long_side_maps_exactly() {
        assert_eq!(Resizer::long_side_dimensions(3000, 4000, 1000), (750, 1000));
    }

    #[test]
    fn short_side_is_truncated() {
        // 1000 * 999 / 1001 = 998.001...
        assert_eq!(Resizer::long_side_dimensions(1001, 999, 1000), (1000, 998));
    }

    #[test]
    fn extreme_aspect_keeps_one_pixel() {
        assert_eq!(Resizer::long_side_dimensions(20000, 1, 1000), (1000, 1));
    }

    #[test]
    fn large_inputs_do_not_overflow() {
        assert_eq!(
            Resizer::long_side_dimensions(100_000, 50_000, 100_000),
            (100_000, 50_000)
        );
    }

    #[test]
    fn fits_within_requires_both_sides_strictly_smaller() {
        assert!(Resizer::fits_within(999, 500, 1000));
        assert!(!Resizer::fits_within(1000, 500, 1000));
        assert!(!Resizer::fits_within(500, 1200, 1000));
    }

    #[test]
    fn resample_produces_requested_size() {
        let image = DynamicImage::new_rgb8(40, 30);
        let resized = Resizer::default().resample(&image, 20, 15);
        assert_eq!((resized.width(), resized.height()), (20, 15));
    }
}
