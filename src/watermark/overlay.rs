//! Overlay layer construction.
//!
//! An overlay is a fully transparent canvas the size of the base image that
//! holds only the watermark's pixels. The builder allocates and fills the
//! canvas, then hands ownership to the caller as an immutable [`OverlayLayer`].

use super::font::{resolve_font, ResolvedFont};
use super::logo::{load_logo, prepare_logo};
use super::position::{
    calculate_position, fits_within_margin, ImageDimensions, PlacementPosition,
    WatermarkDimensions,
};
use super::text_renderer::{draw_text, measure_text};
use super::{Anchor, FontConfig, Opacity, WatermarkContent, WatermarkError, DEFAULT_MARGIN};
use image::RgbaImage;
use tracing::warn;

/// Transparent canvas holding only the watermark pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct OverlayLayer {
    image: RgbaImage,
}

impl std::fmt::Debug for OverlayLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayLayer")
            .field("dimensions", &self.image.dimensions())
            .finish()
    }
}

impl OverlayLayer {
    /// Wrap an existing RGBA buffer as an overlay.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::of(&self.image)
    }
}

/// Watermark content with its expensive parts resolved once per run.
#[derive(Debug)]
pub enum PreparedWatermark {
    Text { text: String, font: ResolvedFont },
    Logo { logo: RgbaImage },
}

impl PreparedWatermark {
    /// Resolve the font or decode the logo for `content`.
    ///
    /// Fails with [`WatermarkError::LogoDecode`] when the logo cannot be read.
    pub fn prepare(content: &WatermarkContent, fonts: &FontConfig) -> Result<Self, WatermarkError> {
        match content {
            WatermarkContent::Text(text) => {
                // Surface empty or multi-line text before any image is touched.
                let font = resolve_font(fonts);
                measure_text(&font, text)?;
                Ok(Self::Text {
                    text: text.clone(),
                    font,
                })
            }
            WatermarkContent::Logo(path) => Ok(Self::Logo {
                logo: load_logo(path)?,
            }),
        }
    }
}

/// Paste `logo` onto `canvas` at `position`, clipping to the canvas.
///
/// The canvas is fully transparent, so compositing the logo over it with its
/// own alpha as mask reduces to a straight copy. Logo alpha is copied, not
/// applied, so the compositor applies it exactly once; also masking with it
/// here would square it.
fn paste(canvas: &mut RgbaImage, logo: &RgbaImage, position: PlacementPosition) {
    let canvas_w = canvas.width() as i64;
    let canvas_h = canvas.height() as i64;

    let x_start = (position.x as i64).max(0);
    let y_start = (position.y as i64).max(0);
    let x_end = (position.x as i64 + logo.width() as i64).min(canvas_w);
    let y_end = (position.y as i64 + logo.height() as i64).min(canvas_h);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let lx = (tx - position.x as i64) as u32;
            let ly = (ty - position.y as i64) as u32;
            canvas.put_pixel(tx as u32, ty as u32, *logo.get_pixel(lx, ly));
        }
    }
}

fn warn_if_oversized(base: &ImageDimensions, watermark: &WatermarkDimensions) {
    if !fits_within_margin(base, watermark, DEFAULT_MARGIN) {
        warn!(
            base_width = base.width,
            base_height = base.height,
            watermark_width = watermark.width,
            watermark_height = watermark.height,
            "Watermark does not fit inside the image margin and will be clipped"
        );
    }
}

/// Build the overlay for a base image of size `base`.
pub fn build_overlay(
    base: ImageDimensions,
    watermark: &PreparedWatermark,
    anchor: Anchor,
    opacity: Opacity,
) -> Result<OverlayLayer, WatermarkError> {
    let mut canvas = RgbaImage::new(base.width, base.height);

    match watermark {
        PreparedWatermark::Text { text, font } => {
            let size = measure_text(font, text)?.dimensions();
            warn_if_oversized(&base, &size);
            let position = calculate_position(anchor, &base, &size, DEFAULT_MARGIN);
            draw_text(&mut canvas, font, text, position, opacity)?;
        }
        PreparedWatermark::Logo { logo } => {
            let logo = prepare_logo(logo, base.width, opacity)?;
            let size = WatermarkDimensions {
                width: logo.width(),
                height: logo.height(),
            };
            warn_if_oversized(&base, &size);
            let position = calculate_position(anchor, &base, &size, DEFAULT_MARGIN);
            paste(&mut canvas, &logo, position);
        }
    }

    Ok(OverlayLayer::from_image(canvas))
}

/// Prepare `content` and build its overlay in one call.
pub fn build(
    base: ImageDimensions,
    content: &WatermarkContent,
    anchor: Anchor,
    opacity: Opacity,
    fonts: &FontConfig,
) -> Result<OverlayLayer, WatermarkError> {
    let prepared = PreparedWatermark::prepare(content, fonts)?;
    build_overlay(base, &prepared, anchor, opacity)
}
