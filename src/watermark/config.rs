//! Watermark configuration types.
//!
//! This module defines the values that describe a single watermarking run:
//! - The anchor the watermark is placed at
//! - The opacity applied to the watermark's alpha channel
//! - The watermark content, either text or a logo file
//! - Font preferences for text watermarks

use super::WatermarkError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Distance in pixels kept between the watermark and the image edge.
pub const DEFAULT_MARGIN: u32 = 10;

/// Pixel size used for text watermarks unless configured otherwise.
pub const DEFAULT_FONT_SIZE: f32 = 36.0;

/// Text used when no text or logo is configured.
pub const DEFAULT_TEXT: &str = "Watermark";

/// Logos are scaled so their longest side is at most `base width / LOGO_SCALE_DIVISOR`.
pub const LOGO_SCALE_DIVISOR: u32 = 5;

/// Watermark position on the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Center,
}

impl Anchor {
    /// All supported anchors, in the order they are listed in help output.
    pub const ALL: [Anchor; 5] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::Center,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Center => "center",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = WatermarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|anchor| anchor.as_str() == s)
            .ok_or_else(|| WatermarkError::UnsupportedAnchor(s.to_string()))
    }
}

/// Alpha intensity applied uniformly to the watermark (0 = invisible, 255 = opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Opacity(u8);

impl Opacity {
    pub const TRANSPARENT: Opacity = Opacity(0);
    pub const OPAQUE: Opacity = Opacity(255);

    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_opaque(self) -> bool {
        self.0 == u8::MAX
    }

    /// Scale an 8-bit alpha value by this opacity, rounding to nearest.
    pub fn scale_alpha(self, alpha: u8) -> u8 {
        ((alpha as u32 * self.0 as u32 + 127) / 255) as u8
    }
}

impl Default for Opacity {
    fn default() -> Self {
        Self(128)
    }
}

impl TryFrom<i64> for Opacity {
    type Error = WatermarkError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| WatermarkError::InvalidOpacity(value))
    }
}

impl From<Opacity> for i64 {
    fn from(opacity: Opacity) -> Self {
        opacity.0 as i64
    }
}

impl fmt::Display for Opacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Watermark content: rendered text or a logo image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkContent {
    Text(String),
    Logo(PathBuf),
}

impl WatermarkContent {
    /// Pick the content for a run. A logo, when present, takes precedence over text.
    pub fn select(text: Option<String>, logo: Option<PathBuf>) -> Self {
        match (logo, text) {
            (Some(path), _) => Self::Logo(path),
            (None, Some(text)) => Self::Text(text),
            (None, None) => Self::Text(DEFAULT_TEXT.to_string()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Logo(_) => "logo",
        }
    }
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

/// Font preferences for text watermarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Preferred font file, tried before the platform defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Font size in pixels (default: 36)
    #[serde(default = "default_font_size")]
    pub size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            size: DEFAULT_FONT_SIZE,
        }
    }
}
