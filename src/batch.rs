use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::BatchConfig;
use crate::fonts;
use crate::processing::Processor;

/// Extensions eligible for processing, matched exactly as spelled on disk.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];
/// Stem marker identifying already-generated thumbnails.
const THUMBNAIL_MARKER: &str = "-thumb";

/// Errors that abort the whole run before any image is touched.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("logo file not found: {}", .0.display())]
    LogoNotFound(PathBuf),

    #[error("failed to load logo {}: {source}", .path.display())]
    LogoUnreadable {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Per-run counters returned to the caller. Individual failures are
/// reported inline and never change the process exit status.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchSummary {
    pub found: usize,
    pub watermarked: usize,
    pub thumbnails: usize,
    pub failed: usize,
}

/// Walk the configured tree and watermark every discovered image,
/// generating a thumbnail beside each one.
pub fn run(config: &BatchConfig) -> Result<BatchSummary, BatchError> {
    if !config.logo.exists() {
        return Err(BatchError::LogoNotFound(config.logo.clone()));
    }

    // Decode the logo once up front; a broken logo is fatal, not a
    // per-file condition.
    let logo = image::open(&config.logo)
        .map_err(|source| BatchError::LogoUnreadable {
            path: config.logo.clone(),
            source,
        })?
        .to_rgba8();

    let files = find_image_files(&config.root);
    if files.is_empty() {
        println!("No image files found to process.");
        return Ok(BatchSummary::default());
    }

    println!("Found {} image(s) to process.", files.len());
    println!("Using logo: {}", config.logo.display());
    println!("Thumbnail width: {}px\n", config.thumbnail_width);

    let font = fonts::load_label_font();
    let processor = Processor::new(logo, font, config.thumbnail_width);

    let mut summary = BatchSummary {
        found: files.len(),
        ..BatchSummary::default()
    };

    for (index, path) in files.iter().enumerate() {
        println!(
            "[{}/{}] Processing: {}",
            index + 1,
            files.len(),
            path.display()
        );

        let loaded = match processor.load(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                println!("✗ Error processing {}: {}", path.display(), e);
                summary.failed += 1;
                continue;
            }
        };

        match processor.watermark_original(&loaded) {
            Ok(()) => {
                println!("✓ Watermarked: {}", path.display());
                summary.watermarked += 1;
            }
            Err(e) => {
                println!("✗ Error processing {}: {}", path.display(), e);
                summary.failed += 1;
                continue;
            }
        }

        match processor.write_thumbnail(&loaded) {
            Ok(thumbnail) => {
                println!("✓ Thumbnail: {}", thumbnail.display());
                summary.thumbnails += 1;
            }
            Err(e) => {
                // The original has already been overwritten at this point;
                // only the thumbnail file is missing.
                println!("✗ Error processing {}: {}", path.display(), e);
                summary.failed += 1;
            }
        }
    }

    println!("\n✓ Completed processing {} image(s).", files.len());
    Ok(summary)
}

/// Recursively collect image files under `root`, skipping generated
/// thumbnails. Results are sorted for a stable progress order.
pub fn find_image_files(root: &Path) -> Vec<PathBuf> {
    debug!("Scanning {} for images", root.display());

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| is_image_file(path) && !is_thumbnail(path))
        .collect();
    files.sort();
    files
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

fn is_thumbnail(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|stem| stem.contains(THUMBNAIL_MARKER))
        .unwrap_or(false)
}
