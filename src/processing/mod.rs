//! Core image processing functionality

use std::path::Path;
use std::time::Instant;

use image::io::Reader as ImageReader;
use tracing::debug;

use crate::config::TargetSize;
use crate::error::{Result, SeqResizeError};

pub mod formats;
pub mod resize;

pub use formats::*;
pub use resize::*;

/// Decodes, resizes and re-encodes one image at a time
pub struct ProcessingEngine {
    resizer: ImageResizer,
}

impl ProcessingEngine {
    /// Create a new processing engine for the given target size
    pub fn new(target: TargetSize) -> Result<Self> {
        Ok(Self {
            resizer: ImageResizer::new(target)?,
        })
    }

    pub fn target(&self) -> TargetSize {
        self.resizer.target()
    }

    /// Resize the image at `input_path` and write it to `output_path`
    ///
    /// The output encoding follows `output_path`'s extension.
    pub fn process_file(&self, input_path: &Path, output_path: &Path) -> Result<ProcessingResult> {
        let start_time = Instant::now();

        debug!("Processing file: {:?} -> {:?}", input_path, output_path);

        let image = self.load_image(input_path)?;
        let original = (image.width(), image.height());

        let resized = self.resizer.resize(&image);

        let output_size = self.save_image(&resized, output_path)?;

        debug!("Processed {:?} in {:?}", input_path, start_time.elapsed());
        Ok(ProcessingResult {
            original_dimensions: original,
            output_size,
        })
    }

    /// Load an image, detecting its format from the content
    fn load_image(&self, path: &Path) -> Result<image::DynamicImage> {
        debug!("Loading image: {:?}", path);

        let image = ImageReader::open(path)
            .map_err(|e| SeqResizeError::decode(path, image::ImageError::IoError(e)))?
            .with_guessed_format()
            .map_err(|e| SeqResizeError::decode(path, image::ImageError::IoError(e)))?
            .decode()
            .map_err(|e| SeqResizeError::decode(path, e))?;

        debug!("Loaded image: {}x{}", image.width(), image.height());
        Ok(image)
    }

    /// Save an image, returning the written file size
    fn save_image(&self, image: &image::DynamicImage, output_path: &Path) -> Result<u64> {
        debug!("Saving image: {:?} as {:?}", output_path, output_format(output_path));

        image.save(output_path)
            .map_err(|e| SeqResizeError::encode(output_path, e))?;

        let metadata = std::fs::metadata(output_path)
            .map_err(|e| SeqResizeError::encode(output_path, image::ImageError::IoError(e)))?;
        Ok(metadata.len())
    }
}

/// Result of processing an image
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub original_dimensions: (u32, u32),
    pub output_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    fn write_test_image(path: &Path, width: u32, height: u32) {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 255) as u8, (y % 255) as u8, 128])
        });
        img.save(path).unwrap();
    }

    #[test]
    fn test_process_file_forces_target_size() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("wide.png");
        let output = dir.path().join("1_wide.png");
        write_test_image(&input, 300, 120);

        let engine = ProcessingEngine::new(TargetSize::new(50, 50)).unwrap();
        let result = engine.process_file(&input, &output).unwrap();

        assert_eq!(result.original_dimensions, (300, 120));
        assert!(result.output_size > 0);

        let reloaded = image::open(&output).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (50, 50));
    }

    #[test]
    fn test_output_format_follows_extension() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("photo.png");
        let output = dir.path().join("1_photo.bmp");
        write_test_image(&input, 20, 20);

        let engine = ProcessingEngine::new(TargetSize::new(10, 10)).unwrap();
        engine.process_file(&input, &output).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"BM"));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.jpg");
        std::fs::write(&input, b"definitely not a jpeg").unwrap();

        let engine = ProcessingEngine::new(TargetSize::new(10, 10)).unwrap();
        let err = engine
            .process_file(&input, &dir.path().join("1_broken.jpg"))
            .unwrap_err();

        assert!(matches!(err, SeqResizeError::Decode { .. }));
        assert!(err.is_recoverable());
        assert!(!dir.path().join("1_broken.jpg").exists());
    }

    #[test]
    fn test_unwritable_output_is_encode_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.png");
        let output = dir.path().join("1_a.png");
        write_test_image(&input, 20, 20);
        std::fs::create_dir(&output).unwrap();

        let engine = ProcessingEngine::new(TargetSize::new(10, 10)).unwrap();
        let err = engine.process_file(&input, &output).unwrap_err();

        assert!(matches!(err, SeqResizeError::Encode { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let engine = ProcessingEngine::new(TargetSize::new(10, 10)).unwrap();
        let err = engine
            .process_file(&dir.path().join("gone.png"), &dir.path().join("1_gone.png"))
            .unwrap_err();
        assert!(matches!(err, SeqResizeError::Decode { .. }));
    }
}
