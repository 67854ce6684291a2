// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::batch::DEFAULT_JPEG_QUALITY;
use crate::watermark::{Anchor, FontConfig, Opacity, WatermarkContent};

/// Top-level configuration, usually loaded from a YAML file.
///
/// Every section is optional; missing keys take the built-in defaults.
///
/// ```yaml
/// watermark:
///   text: "Copyright ${USER}"
///   position: bottom-right
///   opacity: 128
/// font:
///   path: /usr/share/fonts/truetype/dejavu/DejaVuSans.ttf
///   size: 36
/// output:
///   jpeg_quality: 90
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub watermark: WatermarkSection,
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatermarkSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub position: Anchor,
    pub opacity: Opacity,
    /// Logo image; takes precedence over `text` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Values given on the command line. `None` leaves the configured value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub text: Option<String>,
    pub position: Option<Anchor>,
    pub opacity: Option<Opacity>,
    pub logo: Option<PathBuf>,
    pub font_path: Option<PathBuf>,
    pub font_size: Option<f32>,
    pub jpeg_quality: Option<u8>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| e.to_string())
    }

    /// Parse YAML after replacing `${VAR_NAME}` with environment values.
    ///
    /// Fails if any referenced variable is unset.
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                )
            })?;
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        Self::from_yaml(&substituted)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    /// Load from `path` if given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.watermark.logo.is_none() {
            if let Some(text) = &self.watermark.text {
                if text.trim().is_empty() {
                    return Err("Watermark text cannot be empty".to_string());
                }
                if text.contains('\n') {
                    return Err("Watermark text must be a single line".to_string());
                }
            }
        }

        if !self.font.size.is_finite() || self.font.size <= 0.0 {
            return Err(format!(
                "Font size must be a positive number, got {}",
                self.font.size
            ));
        }

        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.output.jpeg_quality
            ));
        }

        Ok(())
    }

    /// Apply command-line values on top of this config.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            text,
            position,
            opacity,
            logo,
            font_path,
            font_size,
            jpeg_quality,
        } = overrides;

        if text.is_some() {
            self.watermark.text = text;
        }
        if let Some(position) = position {
            self.watermark.position = position;
        }
        if let Some(opacity) = opacity {
            self.watermark.opacity = opacity;
        }
        if logo.is_some() {
            self.watermark.logo = logo;
        }
        if font_path.is_some() {
            self.font.path = font_path;
        }
        if let Some(size) = font_size {
            self.font.size = size;
        }
        if let Some(quality) = jpeg_quality {
            self.output.jpeg_quality = quality;
        }
    }

    /// The watermark to apply: the logo if one is configured, else the text.
    pub fn content(&self) -> WatermarkContent {
        WatermarkContent::select(self.watermark.text.clone(), self.watermark.logo.clone())
    }
}
