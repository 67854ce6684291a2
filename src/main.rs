use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use watermark_wizard::batch::{run_batch, BatchOptions, BatchReport};
use watermark_wizard::config::{Config, ConfigOverrides};
use watermark_wizard::logging::{init_subscriber, LogFormat};
use watermark_wizard::watermark::{Anchor, Opacity, WatermarkProcessor};

/// Watermark Wizard - add a text or logo watermark to every image in a folder
#[derive(Parser, Debug)]
#[command(name = "watermark")]
#[command(version, about, long_about = None)]
struct Args {
    /// Folder containing .jpg, .jpeg and .png images
    input_folder: PathBuf,

    /// Folder to write watermarked images to (created if missing)
    output_folder: PathBuf,

    /// Watermark text [default: Watermark]
    #[arg(long)]
    text: Option<String>,

    /// Anchor: top-left, top-right, bottom-left, bottom-right, center [default: bottom-right]
    #[arg(long, value_parser = parse_anchor)]
    position: Option<Anchor>,

    /// Watermark opacity, 0 (invisible) to 255 (opaque) [default: 128]
    #[arg(long, value_parser = parse_opacity, allow_negative_numbers = true)]
    opacity: Option<Opacity>,

    /// Logo image to use instead of text
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Preferred TrueType/OpenType font file
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font size in pixels [default: 36]
    #[arg(long)]
    font_size: Option<f32>,

    /// JPEG output quality, 1-100 [default: 75]
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: Option<u8>,

    /// YAML configuration file supplying defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn parse_anchor(value: &str) -> Result<Anchor, String> {
    value.parse::<Anchor>().map_err(|e| e.to_string())
}

fn parse_opacity(value: &str) -> Result<Opacity, String> {
    let raw: i64 = value
        .parse()
        .map_err(|_| format!("'{}' is not an integer", value))?;
    Opacity::try_from(raw).map_err(|e| e.to_string())
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            text: self.text.clone(),
            position: self.position,
            opacity: self.opacity,
            logo: self.logo.clone(),
            font_path: self.font.clone(),
            font_size: self.font_size,
            jpeg_quality: self.jpeg_quality,
        }
    }
}

fn run(args: Args) -> anyhow::Result<BatchReport> {
    let mut config = Config::load(args.config.as_deref())
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;
    config.apply_overrides(args.overrides());
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    tracing::info!(
        config_file = ?args.config,
        input = %args.input_folder.display(),
        output = %args.output_folder.display(),
        position = %config.watermark.position,
        opacity = config.watermark.opacity.value(),
        "Configuration loaded successfully"
    );

    let processor = WatermarkProcessor::new(
        config.content(),
        config.watermark.position,
        config.watermark.opacity,
        &config.font,
    )
    .context("Failed to prepare watermark")?;

    let options = BatchOptions::new(&args.input_folder, &args.output_folder)
        .with_jpeg_quality(config.output.jpeg_quality);

    run_batch(&processor, &options).context("Batch processing failed")
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_subscriber(args.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(report) if report.has_failures() => {
            for (path, reason) in &report.skipped {
                eprintln!("Skipped {}: {}", path.display(), reason);
            }
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Watermarking aborted");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
