//! Watermark error types.
//!
//! Defines errors that can occur while placing, building and compositing
//! watermarks.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur during watermark processing.
#[derive(Debug)]
pub enum WatermarkError {
    /// Anchor name is not one of the supported placements
    UnsupportedAnchor(String),

    /// Opacity outside the 0-255 range
    InvalidOpacity(i64),

    /// Logo file could not be opened or decoded
    LogoDecode { path: PathBuf, message: String },

    /// Overlay and base image sizes differ
    DimensionMismatch {
        base: (u32, u32),
        overlay: (u32, u32),
    },

    /// Failed to render text watermark
    RenderError(String),

    /// Failed to rescale the logo
    ResizeError(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedAnchor(name) => write!(
                f,
                "Unsupported position '{}': expected one of top-left, top-right, bottom-left, bottom-right, center",
                name
            ),
            Self::InvalidOpacity(value) => {
                write!(f, "Invalid opacity {}: must be between 0 and 255", value)
            }
            Self::LogoDecode { path, message } => {
                write!(f, "Failed to load logo {}: {}", path.display(), message)
            }
            Self::DimensionMismatch { base, overlay } => write!(
                f,
                "Overlay size {}x{} does not match base image size {}x{}",
                overlay.0, overlay.1, base.0, base.1
            ),
            Self::RenderError(msg) => write!(f, "Failed to render text watermark: {}", msg),
            Self::ResizeError(msg) => write!(f, "Failed to resize logo: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}
