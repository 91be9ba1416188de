//! Exact-size resampling

use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

use crate::config::TargetSize;
use crate::error::Result;

/// Resizer forcing images to an exact size with a Lanczos3 filter
///
/// Aspect ratio is not preserved; there is no cropping or padding.
pub struct ImageResizer {
    target: TargetSize,
}

impl ImageResizer {
    /// Create a resizer for the given target, rejecting invalid sizes
    pub fn new(target: TargetSize) -> Result<Self> {
        target.validate()?;
        Ok(Self { target })
    }

    pub fn target(&self) -> TargetSize {
        self.target
    }

    /// Resize an image to the target dimensions
    pub fn resize(&self, image: &DynamicImage) -> DynamicImage {
        let TargetSize { width, height } = self.target;

        debug!(
            "Resizing {}x{} -> {}x{} using Lanczos3",
            image.width(),
            image.height(),
            width,
            height
        );

        image.resize_exact(width, height, FilterType::Lanczos3)
    }
}
