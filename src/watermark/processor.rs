//! Watermark processor for applying watermarks to images.
//!
//! This module provides the high-level API used by the batch driver: the
//! watermark is prepared once, then applied to any number of images.
//!
//! # Example
//!
//! ```no_run
//! use watermark_wizard::watermark::{Anchor, FontConfig, Opacity, WatermarkContent, WatermarkProcessor};
//!
//! let processor = WatermarkProcessor::new(
//!     WatermarkContent::Text("Copyright 2025".to_string()),
//!     Anchor::BottomRight,
//!     Opacity::new(128),
//!     &FontConfig::default(),
//! )?;
//!
//! let image = image::open("photo.jpg").unwrap();
//! let watermarked = processor.apply(&image)?;
//! # Ok::<(), watermark_wizard::watermark::WatermarkError>(())
//! ```

use super::compositor::composite;
use super::overlay::{build_overlay, PreparedWatermark};
use super::position::ImageDimensions;
use super::{Anchor, FontConfig, Opacity, WatermarkContent, WatermarkError};
use image::{DynamicImage, RgbaImage};
use tracing::{debug, info};

/// Applies one configured watermark to images.
#[derive(Debug)]
pub struct WatermarkProcessor {
    watermark: PreparedWatermark,
    anchor: Anchor,
    opacity: Opacity,
}

impl WatermarkProcessor {
    /// Prepare `content` for repeated use.
    ///
    /// Logo decoding happens here, so a bad logo fails before any image is
    /// processed.
    pub fn new(
        content: WatermarkContent,
        anchor: Anchor,
        opacity: Opacity,
        fonts: &FontConfig,
    ) -> Result<Self, WatermarkError> {
        let watermark = PreparedWatermark::prepare(&content, fonts)?;
        info!(
            kind = content.kind(),
            anchor = %anchor,
            opacity = opacity.value(),
            "Watermark prepared"
        );
        Ok(Self::from_prepared(watermark, anchor, opacity))
    }

    /// Build a processor from an already prepared watermark.
    pub fn from_prepared(watermark: PreparedWatermark, anchor: Anchor, opacity: Opacity) -> Self {
        Self {
            watermark,
            anchor,
            opacity,
        }
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn opacity(&self) -> Opacity {
        self.opacity
    }

    /// Watermark `image`, returning a new opaque RGBA image.
    pub fn apply(&self, image: &DynamicImage) -> Result<RgbaImage, WatermarkError> {
        let dims = ImageDimensions::of(image);
        let overlay = build_overlay(dims, &self.watermark, self.anchor, self.opacity)?;
        debug!(width = dims.width, height = dims.height, "Compositing watermark");
        composite(image, &overlay)
    }
}
