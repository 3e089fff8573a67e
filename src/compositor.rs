use image::{DynamicImage, Rgba, RgbaImage, imageops};

/// Named anchor for watermark placement on a base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl Position {
    /// Top-left paste coordinates for a watermark of `overlay` dimensions on
    /// a base of `base` dimensions.
    ///
    /// Computed in `i64` so a watermark larger than the base clamps at the
    /// blend instead of underflowing.
    pub fn anchor(&self, base: (u32, u32), overlay: (u32, u32), padding: u32) -> (i64, i64) {
        let (base_width, base_height) = (base.0 as i64, base.1 as i64);
        let (overlay_width, overlay_height) = (overlay.0 as i64, overlay.1 as i64);
        let padding = padding as i64;

        match self {
            Position::TopLeft => (padding, padding),
            Position::TopRight => (base_width - overlay_width - padding, padding),
            Position::BottomLeft => (padding, base_height - overlay_height - padding),
            Position::BottomRight => (
                base_width - overlay_width - padding,
                base_height - overlay_height - padding,
            ),
            Position::Center => (
                (base_width - overlay_width) / 2,
                (base_height - overlay_height) / 2,
            ),
        }
    }
}

/// Alpha-composite `watermark` onto a copy of `image` at the given anchor.
pub fn apply_watermark(
    image: &DynamicImage,
    watermark: &RgbaImage,
    position: Position,
    padding: u32,
) -> RgbaImage {
    let mut base = image.to_rgba8();
    let (x, y) = position.anchor(base.dimensions(), watermark.dimensions(), padding);
    imageops::overlay(&mut base, watermark, x, y);
    base
}

/// Flatten an alpha-carrying image onto a white background.
///
/// Used both to normalize transparent sources before processing and to
/// prepare RGBA pixels for JPEG output.
pub fn flatten_onto_white(image: &RgbaImage) -> image::RgbImage {
    let (width, height) = image.dimensions();
    let mut background = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut background, image, 0, 0);
    DynamicImage::ImageRgba8(background).to_rgb8()
}
