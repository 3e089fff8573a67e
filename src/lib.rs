use std::path::PathBuf;

pub mod batch;
pub mod compositor;
pub mod fonts;
pub mod processing;
pub mod watermark;

/// Settings for one batch run, as collected from the command line.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory tree to scan for images.
    pub root: PathBuf,
    /// Logo image composited into every watermark.
    pub logo: PathBuf,
    /// Width of generated thumbnails in pixels.
    pub thumbnail_width: u32,
}

impl BatchConfig {
    pub fn new(root: PathBuf, logo: PathBuf, thumbnail_width: u32) -> Self {
        Self {
            root,
            logo,
            thumbnail_width,
        }
    }
}
