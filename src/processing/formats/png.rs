use image::{RgbaImage, codecs::png::PngEncoder};
use std::path::Path;

use crate::processing::ProcessError;

/// Save an image as PNG, keeping the alpha channel.
pub fn save(image: &RgbaImage, path: &Path) -> Result<(), ProcessError> {
    let output = std::fs::File::create(path)?;
    let encoder = PngEncoder::new(output);
    image.write_with_encoder(encoder)?;
    Ok(())
}
