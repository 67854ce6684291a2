//! Watermark compositor for blending overlays onto images.
//!
//! Uses straight (un-premultiplied) alpha and the "over" operator. The base
//! image is treated as opaque and the result is always opaque, since outputs
//! are flattened to RGB when saved.
//!
//! # Example
//!
//! ```
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use watermark_wizard::watermark::compositor::composite;
//! use watermark_wizard::watermark::overlay::OverlayLayer;
//!
//! let base = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
//! let overlay = OverlayLayer::from_image(RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255])));
//!
//! let result = composite(&base, &overlay).unwrap();
//! assert_eq!(*result.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
//! ```

use super::overlay::OverlayLayer;
use super::WatermarkError;
use image::{DynamicImage, Rgba, RgbaImage};

/// Blend one overlay pixel over one base pixel.
///
/// `out = (fg * a + bg * (255 - a)) / 255`, rounded, with opaque output.
/// The base alpha is ignored.
pub fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    let alpha = foreground[3] as u32;
    let inv_alpha = 255 - alpha;

    let blend_channel =
        |fg: u8, bg: u8| -> u8 { ((fg as u32 * alpha + bg as u32 * inv_alpha + 127) / 255) as u8 };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        255,
    ])
}

/// Composite `overlay` onto `base`, returning a new opaque RGBA image.
///
/// Neither input is modified. Fails with [`WatermarkError::DimensionMismatch`]
/// when the two images differ in size; nothing is cropped or resized.
pub fn composite(base: &DynamicImage, overlay: &OverlayLayer) -> Result<RgbaImage, WatermarkError> {
    let overlay = overlay.image();
    let base_dims = (base.width(), base.height());
    let overlay_dims = overlay.dimensions();

    if base_dims != overlay_dims {
        return Err(WatermarkError::DimensionMismatch {
            base: base_dims,
            overlay: overlay_dims,
        });
    }

    let mut result = base.to_rgba8();
    for (target, watermark) in result.pixels_mut().zip(overlay.pixels()) {
        *target = blend_pixels(*target, *watermark);
    }

    Ok(result)
}
