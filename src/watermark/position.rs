//! Position calculation for watermark placement.
//!
//! This module maps a named anchor, the base image size and the watermark
//! size to the top-left coordinate where the watermark is drawn.
//!
//! # Anchors
//!
//! - **Corners**: TopLeft, TopRight, BottomLeft, BottomRight, each inset by
//!   the margin on both axes
//! - **Center**: centered on both axes, margin ignored
//!
//! Coordinates are signed and never clamped. A watermark larger than the
//! image yields negative or out-of-canvas coordinates; drawing clips it.
//!
//! # Example
//!
//! ```
//! use watermark_wizard::watermark::position::{calculate_position, ImageDimensions, WatermarkDimensions};
//! use watermark_wizard::watermark::Anchor;
//!
//! let image = ImageDimensions { width: 800, height: 600 };
//! let watermark = WatermarkDimensions { width: 100, height: 50 };
//!
//! let pos = calculate_position(Anchor::BottomRight, &image, &watermark, 10);
//! assert_eq!((pos.x, pos.y), (690, 540)); // 800 - 100 - 10, 600 - 50 - 10
//! ```

use super::{Anchor, WatermarkError};

/// Dimensions of the target image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn of<I: image::GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }
}

/// Dimensions of the watermark to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkDimensions {
    pub width: u32,
    pub height: u32,
}

/// Top-left corner where a watermark should be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Calculate the position for a watermark placement.
///
/// # Arguments
///
/// * `anchor` - Where on the image the watermark goes
/// * `image` - Dimensions of the target image
/// * `watermark` - Dimensions of the watermark
/// * `margin` - Margin from edges in pixels (ignored for `Center`)
///
/// # Returns
///
/// The (x, y) coordinates where the watermark should be placed.
/// Coordinates may be negative if the watermark is larger than the image.
pub fn calculate_position(
    anchor: Anchor,
    image: &ImageDimensions,
    watermark: &WatermarkDimensions,
    margin: u32,
) -> PlacementPosition {
    let img_w = image.width as i32;
    let img_h = image.height as i32;
    let wm_w = watermark.width as i32;
    let wm_h = watermark.height as i32;
    let m = margin as i32;

    match anchor {
        Anchor::TopLeft => PlacementPosition::new(m, m),
        Anchor::TopRight => PlacementPosition::new(img_w - wm_w - m, m),
        Anchor::BottomLeft => PlacementPosition::new(m, img_h - wm_h - m),
        Anchor::BottomRight => PlacementPosition::new(img_w - wm_w - m, img_h - wm_h - m),
        // i32 division truncates toward zero
        Anchor::Center => PlacementPosition::new((img_w - wm_w) / 2, (img_h - wm_h) / 2),
    }
}

/// Resolve a position from an anchor name.
///
/// Fails with [`WatermarkError::UnsupportedAnchor`] when `anchor` is not one
/// of the five supported names.
pub fn resolve_position(
    anchor: &str,
    image: &ImageDimensions,
    watermark: &WatermarkDimensions,
    margin: u32,
) -> Result<PlacementPosition, WatermarkError> {
    let anchor: Anchor = anchor.parse()?;
    Ok(calculate_position(anchor, image, watermark, margin))
}

/// Check whether the watermark fits inside the image once the margin is
/// taken off every side.
pub fn fits_within_margin(
    image: &ImageDimensions,
    watermark: &WatermarkDimensions,
    margin: u32,
) -> bool {
    let margin = margin as u64 * 2;
    watermark.width as u64 + margin <= image.width as u64
        && watermark.height as u64 + margin <= image.height as u64
}
