//! Watermark module for applying text and logo watermarks to images.
//!
//! The engine has three stages:
//!
//! - **Position resolution** ([`position`]): anchor + image size + watermark
//!   size to a top-left coordinate, 10px from the edges.
//! - **Overlay building** ([`overlay`]): a transparent canvas the size of the
//!   base image holding either white text ([`text_renderer`], [`font`]) or a
//!   scaled, dimmed logo ([`logo`]).
//! - **Compositing** ([`compositor`]): straight-alpha "over" blend of the
//!   overlay onto the base image, producing an opaque result.
//!
//! [`WatermarkProcessor`] ties the stages together for batch use.
//!
//! # Anchors
//!
//! `top-left`, `top-right`, `bottom-left`, `bottom-right` (default), `center`.

pub mod bitmap_font;
pub mod compositor;
pub mod config;
pub mod error;
pub mod font;
pub mod logo;
pub mod overlay;
pub mod position;
pub mod processor;
pub mod text_renderer;

// Re-export main types for convenience
pub use compositor::{blend_pixels, composite};
pub use config::{
    Anchor, FontConfig, Opacity, WatermarkContent, DEFAULT_FONT_SIZE, DEFAULT_MARGIN,
    DEFAULT_TEXT, LOGO_SCALE_DIVISOR,
};
pub use error::WatermarkError;
pub use font::{resolve_font, FontFace, ResolvedFont};
pub use logo::{load_logo, prepare_logo, scale_logo};
pub use overlay::{build, build_overlay, OverlayLayer, PreparedWatermark};
pub use position::{
    calculate_position, fits_within_margin, resolve_position, ImageDimensions, PlacementPosition,
    WatermarkDimensions,
};
pub use processor::WatermarkProcessor;
pub use text_renderer::{draw_text, measure_text, TextBounds};
