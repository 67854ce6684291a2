// Batch driver integration tests

use image::{ColorType, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;
use watermark_wizard::batch::{run_batch, BatchOptions};
use watermark_wizard::error::BatchError;
use watermark_wizard::watermark::*;

fn write_rgb(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(color))
        .save(path)
        .unwrap();
}

fn logo_processor(dir: &Path, opacity: Opacity, anchor: Anchor) -> WatermarkProcessor {
    let logo_path = dir.join("logo.png");
    RgbaImage::from_pixel(40, 20, Rgba([0, 0, 0, 255]))
        .save(&logo_path)
        .unwrap();
    WatermarkProcessor::new(
        WatermarkContent::Logo(logo_path),
        anchor,
        opacity,
        &FontConfig::default(),
    )
    .unwrap()
}

#[test]
fn test_batch_watermarks_every_supported_file() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let assets = tempfile::tempdir().unwrap();

    write_rgb(&input.path().join("b.png"), 300, 200, [255, 255, 255]);
    write_rgb(&input.path().join("a.jpg"), 300, 200, [255, 255, 255]);
    std::fs::write(input.path().join("readme.txt"), "not an image").unwrap();

    let processor = logo_processor(assets.path(), Opacity::OPAQUE, Anchor::BottomRight);
    let report = run_batch(&processor, &BatchOptions::new(input.path(), output.path())).unwrap();

    assert!(!report.has_failures());
    assert_eq!(
        report.saved,
        vec![output.path().join("a.jpg"), output.path().join("b.png")]
    );
    assert!(!output.path().join("readme.txt").exists());

    let png = image::open(output.path().join("b.png")).unwrap();
    assert_eq!(png.color(), ColorType::Rgb8);
    let png = png.to_rgb8();
    // logo spans x 250..290, y 170..190
    assert_eq!(*png.get_pixel(250, 170), Rgb([0, 0, 0]));
    assert_eq!(*png.get_pixel(289, 189), Rgb([0, 0, 0]));
    assert_eq!(*png.get_pixel(249, 170), Rgb([255, 255, 255]));
    assert_eq!(*png.get_pixel(0, 0), Rgb([255, 255, 255]));

    let jpg = image::open(output.path().join("a.jpg")).unwrap();
    assert_eq!(jpg.color(), ColorType::Rgb8);
    assert_eq!((jpg.width(), jpg.height()), (300, 200));
    let dark = jpg.to_rgb8().get_pixel(270, 180).0;
    assert!(dark.iter().all(|&c| c < 40), "expected logo pixel, got {dark:?}");
}

#[test]
fn test_batch_skips_corrupt_file_and_continues() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let assets = tempfile::tempdir().unwrap();

    std::fs::write(input.path().join("broken.jpg"), b"definitely not a jpeg").unwrap();
    write_rgb(&input.path().join("good.png"), 120, 80, [10, 20, 30]);

    let processor = logo_processor(assets.path(), Opacity::new(128), Anchor::Center);
    let report = run_batch(&processor, &BatchOptions::new(input.path(), output.path())).unwrap();

    assert!(report.has_failures());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, input.path().join("broken.jpg"));
    assert_eq!(report.saved, vec![output.path().join("good.png")]);
    assert!(!output.path().join("broken.jpg").exists());
}

#[test]
fn test_batch_skips_unwritable_output_and_continues() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let assets = tempfile::tempdir().unwrap();

    for name in ["a.png", "b.png", "c.jpg"] {
        write_rgb(&input.path().join(name), 90, 60, [200, 200, 200]);
    }
    // a directory already sits where b.png would be written
    std::fs::create_dir(output.path().join("b.png")).unwrap();

    let processor = logo_processor(assets.path(), Opacity::OPAQUE, Anchor::TopLeft);
    let report = run_batch(&processor, &BatchOptions::new(input.path(), output.path())).unwrap();

    assert!(report.has_failures());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, input.path().join("b.png"));
    assert!(report.skipped[0].1.starts_with("Failed to write image"));
    assert_eq!(
        report.saved,
        vec![output.path().join("a.png"), output.path().join("c.jpg")]
    );
    assert!(output.path().join("b.png").is_dir());
}

#[cfg(unix)]
#[test]
fn test_batch_disk_full_output_is_skipped() {
    if !Path::new("/dev/full").exists() {
        return;
    }
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let assets = tempfile::tempdir().unwrap();

    write_rgb(&input.path().join("full.jpg"), 64, 64, [0, 0, 0]);
    write_rgb(&input.path().join("ok.png"), 64, 64, [0, 0, 0]);
    std::os::unix::fs::symlink("/dev/full", output.path().join("full.jpg")).unwrap();

    let processor = logo_processor(assets.path(), Opacity::default(), Anchor::Center);
    let report = run_batch(&processor, &BatchOptions::new(input.path(), output.path())).unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, input.path().join("full.jpg"));
    assert_eq!(report.saved, vec![output.path().join("ok.png")]);
}

#[test]
fn test_batch_creates_nested_output_dir() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let assets = tempfile::tempdir().unwrap();
    let nested = output.path().join("a").join("b");

    write_rgb(&input.path().join("photo.PNG"), 64, 64, [0, 0, 0]);

    let processor = logo_processor(assets.path(), Opacity::default(), Anchor::TopLeft);
    let report = run_batch(&processor, &BatchOptions::new(input.path(), &nested)).unwrap();

    assert_eq!(report.saved, vec![nested.join("photo.PNG")]);
    assert!(nested.join("photo.PNG").is_file());
}

#[test]
fn test_batch_missing_input_dir_is_fatal() {
    let output = tempfile::tempdir().unwrap();
    let assets = tempfile::tempdir().unwrap();
    let processor = logo_processor(assets.path(), Opacity::default(), Anchor::TopLeft);

    let result = run_batch(
        &processor,
        &BatchOptions::new(output.path().join("missing"), output.path()),
    );
    assert!(matches!(result, Err(BatchError::InputDir { .. })));
}

#[test]
fn test_batch_output_dir_under_a_file_is_fatal() {
    let scratch = tempfile::tempdir().unwrap();
    let blocker = scratch.path().join("blocker");
    std::fs::write(&blocker, b"file").unwrap();
    let processor = logo_processor(scratch.path(), Opacity::default(), Anchor::TopLeft);

    let result = run_batch(
        &processor,
        &BatchOptions::new(scratch.path(), blocker.join("out")),
    );
    assert!(matches!(result, Err(BatchError::OutputDir { .. })));
}

#[test]
fn test_batch_empty_input_dir() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let assets = tempfile::tempdir().unwrap();
    let processor = logo_processor(assets.path(), Opacity::default(), Anchor::Center);

    let report = run_batch(&processor, &BatchOptions::new(input.path(), output.path())).unwrap();
    assert!(report.saved.is_empty());
    assert!(!report.has_failures());
}

#[test]
fn test_batch_text_watermark_changes_only_bottom_right() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_rgb(&input.path().join("red.png"), 400, 300, [255, 0, 0]);

    // Whatever face is found, the text is white and sits bottom-right.
    let processor = WatermarkProcessor::new(
        WatermarkContent::Text("Watermark".to_string()),
        Anchor::BottomRight,
        Opacity::new(128),
        &FontConfig::default(),
    )
    .unwrap();
    run_batch(&processor, &BatchOptions::new(input.path(), output.path())).unwrap();

    let result = image::open(output.path().join("red.png")).unwrap().to_rgb8();
    let changed: Vec<_> = result
        .enumerate_pixels()
        .filter(|(_, _, p)| **p != Rgb([255, 0, 0]))
        .collect();

    assert!(!changed.is_empty());
    for (x, y, pixel) in changed {
        assert!(x < 390 && y < 290, "pixel ({x}, {y}) inside the margin");
        assert!(x >= 100 && y >= 200, "pixel ({x}, {y}) too far from the bottom-right corner");
        assert_eq!(pixel[0], 255);
        assert_eq!(pixel[1], pixel[2]);
    }
}
