use image::{ImageEncoder, RgbaImage, codecs::jpeg::JpegEncoder};
use std::path::Path;
use tracing::debug;

use crate::compositor::flatten_onto_white;
use crate::processing::ProcessError;

/// Save an image as JPEG at the given quality.
///
/// JPEG doesn't support an alpha channel, so remaining transparency is
/// flattened onto white before encoding.
pub fn save(image: &RgbaImage, path: &Path, quality: u8) -> Result<(), ProcessError> {
    let rgb_image = flatten_onto_white(image);
    let output = std::fs::File::create(path)?;

    let encoder = JpegEncoder::new_with_quality(output, quality);
    encoder.write_image(
        &rgb_image,
        rgb_image.width(),
        rgb_image.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    debug!("JPEG written at quality {}: {:?}", quality, path);

    Ok(())
}
