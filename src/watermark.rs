use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_text_mut, text_size};

/// Text drawn beneath the logo in every watermark.
pub const LABEL_TEXT: &str = "Blackline Studio";

/// Watermark bounding width as a fraction of the target image width.
const BOUNDING_RATIO: f32 = 0.20;
/// Logo width as a fraction of the bounding width.
const LOGO_RATIO: f32 = 0.8;
/// Initial label font size as a fraction of the bounding width.
const FONT_RATIO: f32 = 0.15;
/// Padding around the watermark contents as a fraction of the bounding width.
const PADDING_RATIO: f32 = 0.10;
/// Vertical gap between logo and label as a fraction of the bounding width.
const SPACING_RATIO: f32 = 0.05;

const SHADOW_OFFSET: i32 = 1;
const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 200]);
const LABEL_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Build a semi-transparent logo + label watermark sized for an image of
/// `image_width` pixels.
///
/// The layout scales with the target width so the watermark keeps the same
/// visual weight on originals and thumbnails. When `font` is `None` the
/// label row is omitted entirely. The uniform `opacity` is applied last by
/// scaling the alpha channel point-wise.
pub fn create_watermark(
    logo: &RgbaImage,
    image_width: u32,
    opacity: f32,
    font: Option<&FontVec>,
) -> RgbaImage {
    let bounding_width = ((image_width as f32 * BOUNDING_RATIO) as u32).max(1);

    // Scale the logo to its share of the bounding width, keeping aspect.
    let logo_aspect = logo.width() as f32 / logo.height() as f32;
    let logo_width = ((bounding_width as f32 * LOGO_RATIO) as u32).max(1);
    let logo_height = ((logo_width as f32 / logo_aspect) as u32).max(1);
    let scaled_logo = imageops::resize(
        logo,
        logo_width,
        logo_height,
        imageops::FilterType::Lanczos3,
    );

    // Measure the label, shrinking the font once if it overflows the
    // bounding width.
    let label = font.map(|font| {
        let mut size = bounding_width as f32 * FONT_RATIO;
        let (mut text_width, mut text_height) = text_size(PxScale::from(size), font, LABEL_TEXT);
        if text_width > bounding_width {
            size *= bounding_width as f32 / text_width as f32 * 0.9;
            let remeasured = text_size(PxScale::from(size), font, LABEL_TEXT);
            text_width = remeasured.0;
            text_height = remeasured.1;
        }
        (PxScale::from(size), text_width, text_height)
    });

    let padding = (bounding_width as f32 * PADDING_RATIO) as u32;
    let (spacing, text_width, text_height) = match label {
        Some((_, text_width, text_height)) => (
            (bounding_width as f32 * SPACING_RATIO) as u32,
            text_width,
            text_height,
        ),
        None => (0, 0, 0),
    };

    let canvas_width = scaled_logo.width().max(text_width) + padding * 2;
    let canvas_height = scaled_logo.height() + spacing + text_height + padding * 2;
    let mut canvas = RgbaImage::from_pixel(canvas_width, canvas_height, Rgba([0, 0, 0, 0]));

    // Logo centered at the top, label centered below it.
    let logo_x = (canvas_width - scaled_logo.width()) / 2;
    imageops::overlay(&mut canvas, &scaled_logo, logo_x as i64, padding as i64);

    if let (Some(font), Some((scale, text_width, _))) = (font, label) {
        let text_x = ((canvas_width - text_width) / 2) as i32;
        let text_y = (padding + scaled_logo.height() + spacing) as i32;
        draw_text_mut(
            &mut canvas,
            SHADOW_COLOR,
            text_x + SHADOW_OFFSET,
            text_y + SHADOW_OFFSET,
            scale,
            font,
            LABEL_TEXT,
        );
        draw_text_mut(
            &mut canvas,
            LABEL_COLOR,
            text_x,
            text_y,
            scale,
            font,
            LABEL_TEXT,
        );
    }

    // Uniform opacity over logo and label alike.
    for pixel in canvas.pixels_mut() {
        pixel[3] = (pixel[3] as f32 * opacity) as u8;
    }

    canvas
}
