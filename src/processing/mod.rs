use ab_glyph::FontVec;
use image::{DynamicImage, RgbImage, RgbaImage, imageops};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::compositor::{self, Position};
use crate::watermark::create_watermark;

pub mod formats;

/// Opacity applied to every watermark.
const WATERMARK_OPACITY: f32 = 0.55;
/// Edge padding when watermarking the full-size original.
const ORIGINAL_PADDING: u32 = 20;
/// Edge padding when watermarking the thumbnail.
const THUMBNAIL_PADDING: u32 = 10;
/// JPEG quality for the overwritten original.
const ORIGINAL_JPEG_QUALITY: u8 = 95;
/// JPEG quality for the thumbnail.
const THUMBNAIL_JPEG_QUALITY: u8 = 90;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid image path")]
    InvalidPath,
}

/// A source image loaded and normalized to opaque RGB.
///
/// Both output files derive from this one decode: the watermarked original
/// and the thumbnail, which is resized from the pre-watermark pixels.
pub struct LoadedImage {
    pub path: PathBuf,
    pub image: RgbImage,
}

/// Applies the watermark + thumbnail pipeline to individual files.
pub struct Processor {
    logo: RgbaImage,
    font: Option<FontVec>,
    thumbnail_width: u32,
    position: Position,
}

impl Processor {
    pub fn new(logo: RgbaImage, font: Option<FontVec>, thumbnail_width: u32) -> Self {
        Self {
            logo,
            font,
            thumbnail_width,
            position: Position::default(),
        }
    }

    /// Load an image, compositing any transparency onto a white background.
    pub fn load(&self, path: &Path) -> Result<LoadedImage, ProcessError> {
        let image = image::open(path)?;
        let image = if image.color().has_alpha() {
            compositor::flatten_onto_white(&image.to_rgba8())
        } else {
            image.to_rgb8()
        };

        Ok(LoadedImage {
            path: path.to_path_buf(),
            image,
        })
    }

    /// Watermark the full-size image and overwrite the source file.
    pub fn watermark_original(&self, loaded: &LoadedImage) -> Result<(), ProcessError> {
        let watermark = create_watermark(
            &self.logo,
            loaded.image.width(),
            WATERMARK_OPACITY,
            self.font.as_ref(),
        );
        let base = DynamicImage::ImageRgb8(loaded.image.clone());
        let composited =
            compositor::apply_watermark(&base, &watermark, self.position, ORIGINAL_PADDING);
        formats::save(&composited, &loaded.path, ORIGINAL_JPEG_QUALITY)
    }

    /// Resize the pre-watermark image, watermark the copy, and save it
    /// beside the source with a `-thumb` suffix.
    pub fn write_thumbnail(&self, loaded: &LoadedImage) -> Result<PathBuf, ProcessError> {
        let (width, height) = self.thumbnail_size(loaded.image.dimensions());
        let resized = imageops::resize(
            &loaded.image,
            width,
            height,
            imageops::FilterType::Lanczos3,
        );
        let watermark = create_watermark(&self.logo, width, WATERMARK_OPACITY, self.font.as_ref());
        let composited = compositor::apply_watermark(
            &DynamicImage::ImageRgb8(resized),
            &watermark,
            self.position,
            THUMBNAIL_PADDING,
        );

        let thumbnail = thumbnail_path(&loaded.path)?;
        formats::save(&composited, &thumbnail, THUMBNAIL_JPEG_QUALITY)?;
        Ok(thumbnail)
    }

    /// Thumbnail dimensions at the configured width, height preserving the
    /// source aspect ratio.
    pub fn thumbnail_size(&self, (width, height): (u32, u32)) -> (u32, u32) {
        let aspect = height as f64 / width as f64;
        let thumbnail_height = ((self.thumbnail_width as f64 * aspect) as u32).max(1);
        (self.thumbnail_width, thumbnail_height)
    }
}

/// `photo.jpg` becomes `photo-thumb.jpg` next to the original.
pub fn thumbnail_path(path: &Path) -> Result<PathBuf, ProcessError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or(ProcessError::InvalidPath)?;
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(ProcessError::InvalidPath)?;

    Ok(path.with_file_name(format!("{}-thumb.{}", stem, extension)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, Rgba};
    use tempfile::TempDir;

    fn test_processor(thumbnail_width: u32) -> Processor {
        let logo = RgbaImage::from_pixel(80, 40, Rgba([30, 60, 90, 255]));
        Processor::new(logo, None, thumbnail_width)
    }

    #[test]
    fn test_thumbnail_size_preserves_aspect_ratio() {
        let processor = test_processor(400);
        assert_eq!(processor.thumbnail_size((1600, 1000)), (400, 250));
        assert_eq!(processor.thumbnail_size((800, 600)), (400, 300));
        assert_eq!(processor.thumbnail_size((400, 400)), (400, 400));
    }

    #[test]
    fn test_thumbnail_size_never_zero_height() {
        let processor = test_processor(400);
        let (_, height) = processor.thumbnail_size((10000, 1));
        assert_eq!(height, 1);
    }

    #[test]
    fn test_thumbnail_path_naming() {
        let path = thumbnail_path(Path::new("photos/trip/photo.jpg")).unwrap();
        assert_eq!(path, Path::new("photos/trip/photo-thumb.jpg"));

        let path = thumbnail_path(Path::new("image.PNG")).unwrap();
        assert_eq!(path, Path::new("image-thumb.PNG"));
    }

    #[test]
    fn test_thumbnail_path_requires_extension() {
        assert!(matches!(
            thumbnail_path(Path::new("noext")),
            Err(ProcessError::InvalidPath)
        ));
    }

    #[test]
    fn test_load_flattens_transparency_onto_white() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transparent.png");
        let img = RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 0]));
        img.save(&path).unwrap();

        let processor = test_processor(400);
        let loaded = processor.load(&path).unwrap();
        assert_eq!(loaded.image.get_pixel(10, 10), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_watermark_original_overwrites_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.png");
        let img = image::RgbImage::from_pixel(400, 300, Rgb([0, 128, 0]));
        img.save(&path).unwrap();

        let processor = test_processor(200);
        let loaded = processor.load(&path).unwrap();
        processor.watermark_original(&loaded).unwrap();

        let rewritten = image::open(&path).unwrap();
        // Same dimensions, but the top-right corner now carries the logo.
        assert_eq!(rewritten.dimensions(), (400, 300));
        let region = rewritten.to_rgb8();
        let changed = (320..380).any(|x| (25..60).any(|y| region.get_pixel(x, y) != &Rgb([0, 128, 0])));
        assert!(changed, "watermark left no trace in the top-right region");
    }

    #[test]
    fn test_write_thumbnail_dimensions_and_location() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");
        let img = image::RgbImage::from_pixel(1600, 1000, Rgb([90, 90, 200]));
        img.save(&path).unwrap();

        let processor = test_processor(400);
        let loaded = processor.load(&path).unwrap();
        let thumbnail = processor.write_thumbnail(&loaded).unwrap();

        assert_eq!(thumbnail, temp_dir.path().join("photo-thumb.jpg"));
        let thumb = image::open(&thumbnail).unwrap();
        assert_eq!(thumb.dimensions(), (400, 250));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let processor = test_processor(400);
        assert!(processor.load(Path::new("/no/such/image.png")).is_err());
    }
}
