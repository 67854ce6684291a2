//! Batch driver: watermark every supported image in a directory.
//!
//! Files are processed one at a time. A file that cannot be decoded or
//! written is logged and skipped; the remaining files are still processed.
//! Failing to create the output directory or read the input directory aborts
//! the run.

use crate::error::BatchError;
use crate::watermark::WatermarkProcessor;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageOutputFormat, RgbImage, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File extensions (lowercase) picked up from the input directory.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Default JPEG encoder quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Directories and encoder settings for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub jpeg_quality: u8,
}

impl BatchOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output paths written, in processing order.
    pub saved: Vec<PathBuf>,
    /// Input paths that were skipped, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Whether `path` has one of the supported extensions (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// List supported image files directly inside `dir`, sorted by file name.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let read_err = |source| BatchError::InputDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if path.is_file() && is_supported_image(&path) {
            images.push(path);
        }
    }

    images.sort();
    Ok(images)
}

fn decode(path: &Path) -> Result<DynamicImage, BatchError> {
    image::open(path).map_err(|source| BatchError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })
}

/// Drop the alpha channel of a composited image.
pub fn flatten(image: RgbaImage) -> RgbImage {
    DynamicImage::ImageRgba8(image).into_rgb8()
}

/// Save `image` as opaque RGB, choosing the encoder from the path extension.
///
/// The buffered writer is flushed explicitly so a failed final write (disk
/// full) surfaces as [`BatchError::OutputWrite`].
pub fn save_flattened(image: RgbaImage, path: &Path, jpeg_quality: u8) -> Result<(), BatchError> {
    let write_err = |source| BatchError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let format = ImageFormat::from_path(path).map_err(write_err)?;
    let rgb = flatten(image);

    let file = File::create(path).map_err(|e| write_err(e.into()))?;
    let mut writer = BufWriter::new(file);
    match format {
        ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut writer, jpeg_quality)
            .encode_image(&rgb)
            .map_err(write_err)?,
        format => rgb
            .write_to(&mut writer, ImageOutputFormat::from(format))
            .map_err(write_err)?,
    }

    writer.flush().map_err(|e| write_err(e.into()))
}

fn process_file(
    processor: &WatermarkProcessor,
    input: &Path,
    output: &Path,
    jpeg_quality: u8,
) -> Result<(), BatchError> {
    let image = decode(input)?;
    let watermarked = processor.apply(&image)?;
    save_flattened(watermarked, output, jpeg_quality)
}

/// Watermark every supported image in `options.input_dir`.
///
/// Each output keeps its input file name. One `Saved: <path>` line is
/// printed to stdout per file written.
pub fn run_batch(
    processor: &WatermarkProcessor,
    options: &BatchOptions,
) -> Result<BatchReport, BatchError> {
    std::fs::create_dir_all(&options.output_dir).map_err(|source| BatchError::OutputDir {
        path: options.output_dir.clone(),
        source,
    })?;

    let inputs = collect_images(&options.input_dir)?;
    info!(
        input_dir = %options.input_dir.display(),
        output_dir = %options.output_dir.display(),
        files = inputs.len(),
        "Starting batch"
    );

    let mut report = BatchReport::default();
    for input in inputs {
        let Some(file_name) = input.file_name() else {
            continue;
        };
        let output = options.output_dir.join(file_name);

        match process_file(processor, &input, &output, options.jpeg_quality) {
            Ok(()) => {
                println!("Saved: {}", output.display());
                info!(input = %input.display(), output = %output.display(), "Saved watermarked image");
                report.saved.push(output);
            }
            Err(e) if e.is_per_file() => {
                warn!(input = %input.display(), error = %e, "Skipping image");
                report.skipped.push((input, e.to_string()));
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        saved = report.saved.len(),
        skipped = report.skipped.len(),
        "Batch complete"
    );

    Ok(report)
}
