//! Text watermark rendering.
//!
//! Renders a single line of text in white onto an RGBA canvas. Measurement
//! reports the tight ink box (left/top bearings included), and drawing places
//! that ink box exactly at the requested position.
//!
//! # Example
//!
//! ```
//! use watermark_wizard::watermark::font::ResolvedFont;
//! use watermark_wizard::watermark::text_renderer::{draw_text, measure_text};
//! use watermark_wizard::watermark::{Opacity, PlacementPosition};
//! use image::RgbaImage;
//!
//! let font = ResolvedFont::builtin(36.0);
//! let bounds = measure_text(&font, "AB").unwrap();
//! assert_eq!((bounds.width, bounds.height), (44, 28));
//!
//! let mut canvas = RgbaImage::new(100, 50);
//! draw_text(&mut canvas, &font, "AB", PlacementPosition::new(10, 10), Opacity::new(128)).unwrap();
//! ```

use super::bitmap_font::InkBounds;
use super::font::{FontFace, ResolvedFont};
use super::{Opacity, PlacementPosition, WatermarkDimensions, WatermarkError};
use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

/// Text is always drawn in white; opacity only affects alpha.
const TEXT_RGB: [u8; 3] = [255, 255, 255];

/// Tight ink box of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    /// Ink box offset from the pen origin (left/top bearing).
    pub offset_x: i32,
    pub offset_y: i32,
    pub width: u32,
    pub height: u32,
}

impl TextBounds {
    pub fn dimensions(&self) -> WatermarkDimensions {
        WatermarkDimensions {
            width: self.width,
            height: self.height,
        }
    }

    fn from_ink(ink: Option<InkBounds>) -> Self {
        match ink {
            Some(ink) => Self {
                offset_x: ink.min_x,
                offset_y: ink.min_y,
                width: ink.width(),
                height: ink.height(),
            },
            None => Self {
                offset_x: 0,
                offset_y: 0,
                width: 0,
                height: 0,
            },
        }
    }
}

/// Lay out glyphs on a baseline at `ascent`, starting from x = 0.
fn layout_glyphs(font: &FontVec, size: f32, text: &str) -> Vec<Glyph> {
    let scale = PxScale::from(size);
    let scaled_font = font.as_scaled(scale);
    let baseline_y = scaled_font.ascent();

    let mut glyphs = Vec::with_capacity(text.len());
    let mut cursor_x = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);

        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        glyphs.push(glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y)));

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    glyphs
}

fn outline_ink_bounds(font: &FontVec, glyphs: &[Glyph]) -> Option<InkBounds> {
    glyphs
        .iter()
        .filter_map(|glyph| font.outline_glyph(glyph.clone()))
        .map(|outlined| {
            let bounds = outlined.px_bounds();
            InkBounds {
                min_x: bounds.min.x.floor() as i32,
                min_y: bounds.min.y.floor() as i32,
                max_x: bounds.max.x.ceil() as i32,
                max_y: bounds.max.y.ceil() as i32,
            }
        })
        .reduce(InkBounds::union)
}

fn check_text(text: &str) -> Result<(), WatermarkError> {
    if text.is_empty() {
        return Err(WatermarkError::RenderError(
            "Cannot render empty text".to_string(),
        ));
    }
    if text.contains(['\n', '\r']) {
        return Err(WatermarkError::RenderError(
            "Text watermarks must be a single line".to_string(),
        ));
    }
    Ok(())
}

/// Measure the tight ink box of `text`.
///
/// Text made only of blank characters measures 0x0.
pub fn measure_text(font: &ResolvedFont, text: &str) -> Result<TextBounds, WatermarkError> {
    check_text(text)?;

    let ink = match &font.face {
        FontFace::Outline { font: face, .. } => {
            outline_ink_bounds(face, &layout_glyphs(face, font.size, text))
        }
        FontFace::Builtin(bitmap) => bitmap.ink_bounds(text),
    };

    Ok(TextBounds::from_ink(ink))
}

/// Write a text pixel, keeping the strongest coverage where glyphs overlap.
fn plot(canvas: &mut RgbaImage, x: i32, y: i32, alpha: u8) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }

    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    if alpha > pixel[3] {
        *pixel = Rgba([TEXT_RGB[0], TEXT_RGB[1], TEXT_RGB[2], alpha]);
    }
}

/// Draw `text` so its ink box's top-left lands on `position`.
///
/// Pixels falling outside the canvas are clipped. Returns the measured bounds.
pub fn draw_text(
    canvas: &mut RgbaImage,
    font: &ResolvedFont,
    text: &str,
    position: PlacementPosition,
    opacity: Opacity,
) -> Result<TextBounds, WatermarkError> {
    let bounds = measure_text(font, text)?;

    // Shift so the ink box, not the pen origin, starts at `position`.
    let shift_x = position.x - bounds.offset_x;
    let shift_y = position.y - bounds.offset_y;

    match &font.face {
        FontFace::Outline { font: face, .. } => {
            for glyph in layout_glyphs(face, font.size, text) {
                let Some(outlined) = face.outline_glyph(glyph) else {
                    continue;
                };
                let px_bounds = outlined.px_bounds();
                let origin_x = px_bounds.min.x.floor() as i32 + shift_x;
                let origin_y = px_bounds.min.y.floor() as i32 + shift_y;

                outlined.draw(|gx, gy, coverage| {
                    let alpha = (coverage.clamp(0.0, 1.0) * opacity.value() as f32).round() as u8;
                    plot(canvas, origin_x + gx as i32, origin_y + gy as i32, alpha);
                });
            }
        }
        FontFace::Builtin(bitmap) => {
            let alpha = opacity.value();
            bitmap.rasterize(text, |x, y| plot(canvas, x + shift_x, y + shift_y, alpha));
        }
    }

    Ok(bounds)
}
