use ab_glyph::FontVec;
use std::path::Path;
use tracing::debug;

/// System font files probed for the watermark label, in preference order.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:/Windows/Fonts/arial.ttf",
];

/// Load the first candidate font that exists and parses.
///
/// Returns `None` when no candidate resolves; the watermark is then built
/// without its text label rather than failing the run.
pub fn load_label_font() -> Option<FontVec> {
    for candidate in FONT_CANDIDATES {
        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }

        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                debug!("Failed to read font file {}: {}", candidate, e);
                continue;
            }
        };

        match FontVec::try_from_vec(data) {
            Ok(font) => {
                debug!("Loaded label font from {}", candidate);
                return Some(font);
            }
            Err(e) => {
                debug!("Failed to parse font file {}: {}", candidate, e);
            }
        }
    }

    debug!("No label font found, watermarks will omit the text label");
    None
}
