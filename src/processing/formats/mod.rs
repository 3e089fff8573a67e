use image::RgbaImage;
use std::path::Path;

use super::ProcessError;

pub mod jpeg;
pub mod png;

/// Save a composited image, dispatching on the destination extension.
///
/// JPEG targets are flattened onto white first since the format carries no
/// alpha channel; everything else is written as PNG with alpha preserved.
pub fn save(image: &RgbaImage, path: &Path, jpeg_quality: u8) -> Result<(), ProcessError> {
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);

    if is_jpeg {
        jpeg::save(image, path, jpeg_quality)
    } else {
        png::save(image, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_save_dispatches_on_extension() {
        let temp_dir = TempDir::new().unwrap();
        let image = RgbaImage::from_pixel(16, 16, Rgba([120, 10, 10, 255]));

        for name in ["out.jpg", "out.JPEG", "out.png", "out.PNG"] {
            let path = temp_dir.path().join(name);
            save(&image, &path, 90).unwrap();

            let reader = image::ImageReader::open(&path)
                .unwrap()
                .with_guessed_format()
                .unwrap();
            let expected = if name.to_lowercase().contains("jp") {
                image::ImageFormat::Jpeg
            } else {
                image::ImageFormat::Png
            };
            assert_eq!(reader.format(), Some(expected), "wrong format for {}", name);
        }
    }
}
