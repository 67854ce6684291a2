// Error types for the batch driver

use crate::watermark::WatermarkError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while watermarking a directory of images.
///
/// `OutputDir` and `InputDir` abort the run. `ImageDecode` and `OutputWrite`
/// concern a single file; the batch driver records them and moves on.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read input directory {}: {source}", path.display())]
    InputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write image {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error(transparent)]
    Watermark(#[from] WatermarkError),
}

impl BatchError {
    /// Whether the error concerns a single file rather than the whole run.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            BatchError::ImageDecode { .. } | BatchError::OutputWrite { .. }
        )
    }
}
