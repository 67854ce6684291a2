//! Font resolution for text watermarks.
//!
//! Resolution is an explicit two-step lookup with a typed result:
//!
//! 1. Try the configured font file, then a list of common platform fonts,
//!    parsing each with `ab_glyph`.
//! 2. Fall back to the built-in bitmap font when none of them load.
//!
//! Nothing is cached globally; the caller owns the [`ResolvedFont`] and
//! reuses it for every image in a run.

use super::bitmap_font::BitmapFont;
use super::FontConfig;
use ab_glyph::FontVec;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fonts tried, in order, after the configured path.
const PLATFORM_FONT_CANDIDATES: &[&str] = &[
    "arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// The face chosen for rendering.
pub enum FontFace {
    /// A parsed TrueType/OpenType font loaded from `path`.
    Outline { font: FontVec, path: PathBuf },
    /// The built-in bitmap font.
    Builtin(BitmapFont),
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { path, .. } => f.debug_struct("Outline").field("path", path).finish(),
            Self::Builtin(font) => f.debug_tuple("Builtin").field(font).finish(),
        }
    }
}

/// A font ready to render at a fixed pixel size.
#[derive(Debug)]
pub struct ResolvedFont {
    pub face: FontFace,
    pub size: f32,
}

impl ResolvedFont {
    /// Use the built-in bitmap font at the scale closest to `size`.
    pub fn builtin(size: f32) -> Self {
        Self {
            face: FontFace::Builtin(BitmapFont::for_pixel_size(size)),
            size,
        }
    }

    /// Use an already parsed outline font.
    pub fn outline(font: FontVec, path: PathBuf, size: f32) -> Self {
        Self {
            face: FontFace::Outline { font, path },
            size,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, FontFace::Builtin(_))
    }

    pub fn describe(&self) -> String {
        match &self.face {
            FontFace::Outline { path, .. } => path.display().to_string(),
            FontFace::Builtin(font) => format!("built-in bitmap font (scale {})", font.scale()),
        }
    }
}

/// Try to load a font file. Returns `None` when the file is missing or unparsable.
pub fn load_font_file(path: &Path) -> Option<FontVec> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Font file not readable");
            return None;
        }
    };

    match FontVec::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Font file is not a valid font");
            None
        }
    }
}

/// Ordered list of font files tried for `config`.
pub fn font_candidates(config: &FontConfig) -> Vec<PathBuf> {
    config
        .path
        .iter()
        .cloned()
        .chain(PLATFORM_FONT_CANDIDATES.iter().map(PathBuf::from))
        .collect()
}

/// Resolve the font for text watermarks.
pub fn resolve_font(config: &FontConfig) -> ResolvedFont {
    resolve_font_from(&font_candidates(config), config.size)
}

/// Resolve from an explicit candidate list, falling back to the bitmap font.
pub fn resolve_font_from(candidates: &[PathBuf], size: f32) -> ResolvedFont {
    let resolved = candidates
        .iter()
        .find_map(|path| load_font_file(path).map(|font| (font, path.clone())))
        .map(|(font, path)| ResolvedFont::outline(font, path, size))
        .unwrap_or_else(|| ResolvedFont::builtin(size));

    info!(
        font = %resolved.describe(),
        size = resolved.size,
        "Resolved watermark font"
    );

    resolved
}
