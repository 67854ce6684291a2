//! Logo watermark loading and preparation.
//!
//! The logo is decoded once per run. For every base image it is scaled down
//! to fit a fifth of the base width and its alpha channel is dimmed by the
//! configured opacity.

use super::{Opacity, WatermarkError, LOGO_SCALE_DIVISOR};
use fast_image_resize::{FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use image::RgbaImage;
use std::num::NonZeroU32;
use std::path::Path;
use tracing::debug;

/// Decode a logo file and convert it to RGBA.
pub fn load_logo(path: &Path) -> Result<RgbaImage, WatermarkError> {
    let logo = image::open(path).map_err(|e| WatermarkError::LogoDecode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let logo = logo.to_rgba8();
    debug!(
        path = %path.display(),
        width = logo.width(),
        height = logo.height(),
        "Loaded logo watermark"
    );
    Ok(logo)
}

/// Longest side allowed for a logo on a base image of `base_width`.
pub fn logo_bound(base_width: u32) -> u32 {
    (base_width / LOGO_SCALE_DIVISOR).max(1)
}

/// Size of a `width` x `height` logo fitted inside a `bound` x `bound` box.
///
/// Aspect ratio is preserved and the logo is never enlarged.
pub fn fit_within(width: u32, height: u32, bound: u32) -> (u32, u32) {
    if width <= bound && height <= bound {
        return (width, height);
    }

    let scale_side = |long: u32, short: u32| -> u32 {
        ((short as f64 * bound as f64 / long as f64).round() as u32).clamp(1, bound)
    };

    if width >= height {
        (bound, scale_side(width, height))
    } else {
        (scale_side(height, width), bound)
    }
}

/// Resize an RGBA image using fast-image-resize with Lanczos3 filter.
///
/// Alpha is premultiplied during resampling so transparent pixels do not
/// bleed color into the logo's edges.
fn resize_rgba(img: &RgbaImage, target_w: u32, target_h: u32) -> Result<RgbaImage, WatermarkError> {
    let resize_err = WatermarkError::ResizeError;

    let src_width = NonZeroU32::new(img.width())
        .ok_or_else(|| resize_err("Source width is 0".to_string()))?;
    let src_height = NonZeroU32::new(img.height())
        .ok_or_else(|| resize_err("Source height is 0".to_string()))?;
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| resize_err("Target width is 0".to_string()))?;
    let dst_height =
        NonZeroU32::new(target_h).ok_or_else(|| resize_err("Target height is 0".to_string()))?;

    let mut src_image = Image::from_vec_u8(
        src_width,
        src_height,
        img.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|e| resize_err(format!("Failed to create source image: {:?}", e)))?;

    let alpha_mul_div = MulDiv::default();
    alpha_mul_div
        .multiply_alpha_inplace(&mut src_image.view_mut())
        .map_err(|e| resize_err(format!("Failed to premultiply alpha: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);
    let mut dst_view = dst_image.view_mut();

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));
    resizer
        .resize(&src_image.view(), &mut dst_view)
        .map_err(|e| resize_err(format!("Resize operation failed: {:?}", e)))?;

    alpha_mul_div
        .divide_alpha_inplace(&mut dst_view)
        .map_err(|e| resize_err(format!("Failed to restore alpha: {:?}", e)))?;

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| resize_err("Failed to create output image buffer".to_string()))
}

/// Scale `logo` for a base image of `base_width`, never upscaling.
pub fn scale_logo(logo: &RgbaImage, base_width: u32) -> Result<RgbaImage, WatermarkError> {
    let (width, height) = fit_within(logo.width(), logo.height(), logo_bound(base_width));
    if (width, height) == logo.dimensions() {
        return Ok(logo.clone());
    }
    resize_rgba(logo, width, height)
}

/// Multiply the logo's existing alpha by `opacity / 255`.
///
/// Existing transparency (soft edges) is kept, just dimmer.
pub fn apply_opacity(logo: &mut RgbaImage, opacity: Opacity) {
    if opacity.is_opaque() {
        return;
    }
    for pixel in logo.pixels_mut() {
        pixel[3] = opacity.scale_alpha(pixel[3]);
    }
}

/// Scale and dim the logo for one base image.
pub fn prepare_logo(
    logo: &RgbaImage,
    base_width: u32,
    opacity: Opacity,
) -> Result<RgbaImage, WatermarkError> {
    let mut scaled = scale_logo(logo, base_width)?;
    apply_opacity(&mut scaled, opacity);
    Ok(scaled)
}
