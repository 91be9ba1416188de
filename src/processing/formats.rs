//! Eligible extensions and output file naming

use std::path::Path;

/// Extensions (with the leading dot) accepted as input, lowercase
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".bmp", ".webp", ".tiff"];

/// Split a file name at its last `.`
///
/// The extension keeps its dot and original case. A name without a dot has
/// an empty extension.
pub fn split_filename(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(dot_pos) => filename.split_at(dot_pos),
        None => (filename, ""),
    }
}

/// Check if a file name carries one of the supported extensions, ignoring case
pub fn is_supported_filename(filename: &str) -> bool {
    let (_, extension) = split_filename(filename);
    !extension.is_empty()
        && SUPPORTED_EXTENSIONS
            .iter()
            .any(|&ext| ext.eq_ignore_ascii_case(extension))
}

/// Output name for the file ranked `index`: `{index}_{base}{ext}`
pub fn sequenced_filename(index: usize, filename: &str) -> String {
    let (base_name, extension) = split_filename(filename);
    format!("{}_{}{}", index, base_name, extension)
}

/// Output format implied by a path's extension, if the encoder knows it
pub fn output_format<P: AsRef<Path>>(path: P) -> Option<image::ImageFormat> {
    image::ImageFormat::from_path(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_filename() {
        assert_eq!(split_filename("photo.JPG"), ("photo", ".JPG"));
        assert_eq!(split_filename("archive.tar.png"), ("archive.tar", ".png"));
        assert_eq!(split_filename("README"), ("README", ""));
        assert_eq!(split_filename(".png"), ("", ".png"));
    }

    #[test]
    fn test_supported_filenames() {
        assert!(is_supported_filename("a.png"));
        assert!(is_supported_filename("IMG.PNG"));
        assert!(is_supported_filename("scan.TiFf"));
        assert!(is_supported_filename("x.jpeg"));
        assert!(!is_supported_filename("scan.tif"));
        assert!(!is_supported_filename("notes.txt"));
        assert!(!is_supported_filename("png"));
        assert!(!is_supported_filename("image.png.bak"));
    }

    #[test]
    fn test_sequenced_filename() {
        assert_eq!(sequenced_filename(3, "photo.JPG"), "3_photo.JPG");
        assert_eq!(sequenced_filename(1, "a.b.gif"), "1_a.b.gif");
        assert_eq!(sequenced_filename(12, "noext"), "12_noext");
    }

    #[test]
    fn test_output_format() {
        assert_eq!(output_format("1_a.PNG"), Some(image::ImageFormat::Png));
        assert_eq!(output_format("2_b.jpeg"), Some(image::ImageFormat::Jpeg));
        assert_eq!(output_format("3_c.tiff"), Some(image::ImageFormat::Tiff));
        assert_eq!(output_format("4_d"), None);
    }
}
