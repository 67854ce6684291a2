// Overlay builder and compositor unit tests

use image::{DynamicImage, Rgba, RgbaImage};
use rstest::rstest;
use watermark_wizard::watermark::*;

fn dims(width: u32, height: u32) -> ImageDimensions {
    ImageDimensions { width, height }
}

fn builtin_text(text: &str) -> PreparedWatermark {
    PreparedWatermark::Text {
        text: text.to_string(),
        font: ResolvedFont::builtin(DEFAULT_FONT_SIZE),
    }
}

/// Smallest box holding every non-transparent pixel, as (min_x, min_y, max_x, max_y).
fn lit_box(layer: &OverlayLayer) -> Option<(u32, u32, u32, u32)> {
    layer
        .image()
        .enumerate_pixels()
        .filter(|(_, _, p)| p[3] > 0)
        .fold(None, |acc, (x, y, _)| match acc {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        })
}

#[rstest]
#[case(Anchor::TopLeft, (10, 10))]
#[case(Anchor::TopRight, (146, 10))]
#[case(Anchor::BottomLeft, (10, 62))]
#[case(Anchor::BottomRight, (146, 62))]
#[case(Anchor::Center, (78, 36))]
fn test_text_ink_lands_at_anchor(#[case] anchor: Anchor, #[case] origin: (u32, u32)) {
    // "AB" in the built-in face at 36px measures 44x28
    let layer = build_overlay(dims(200, 100), &builtin_text("AB"), anchor, Opacity::new(128)).unwrap();

    let (x0, y0, x1, y1) = lit_box(&layer).unwrap();
    assert_eq!((x0, y0), origin);
    assert_eq!((x1 - x0 + 1, y1 - y0 + 1), (44, 28));
}

#[test]
fn test_overlay_matches_base_size_and_is_white() {
    let layer = build_overlay(
        dims(320, 240),
        &builtin_text("Watermark"),
        Anchor::BottomRight,
        Opacity::OPAQUE,
    )
    .unwrap();

    assert_eq!(layer.dimensions(), dims(320, 240));
    for pixel in layer.image().pixels().filter(|p| p[3] > 0) {
        assert_eq!(*pixel, Rgba([255, 255, 255, 255]));
    }
}

#[test]
fn test_zero_opacity_overlay_is_empty() {
    let layer = build_overlay(
        dims(120, 60),
        &builtin_text("Hi"),
        Anchor::Center,
        Opacity::TRANSPARENT,
    )
    .unwrap();
    assert!(lit_box(&layer).is_none());
}

#[test]
fn test_empty_text_is_rejected() {
    let result = PreparedWatermark::prepare(
        &WatermarkContent::Text(String::new()),
        &FontConfig::default(),
    );
    assert!(matches!(result, Err(WatermarkError::RenderError(_))));
}

#[test]
fn test_logo_overlay_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let logo_path = dir.path().join("logo.png");
    RgbaImage::from_pixel(40, 20, Rgba([0, 0, 255, 255]))
        .save(&logo_path)
        .unwrap();

    let layer = build(
        dims(300, 200),
        &WatermarkContent::Logo(logo_path),
        Anchor::TopRight,
        Opacity::new(128),
        &FontConfig::default(),
    )
    .unwrap();

    // 40x20 fits the 60px bound unscaled; x = 300 - 40 - 10
    assert_eq!(lit_box(&layer), Some((250, 10, 289, 29)));
    assert_eq!(*layer.image().get_pixel(250, 10), Rgba([0, 0, 255, 128]));
}

#[test]
fn test_large_logo_is_scaled_to_a_fifth_of_width() {
    let dir = tempfile::tempdir().unwrap();
    let logo_path = dir.path().join("wide.png");
    RgbaImage::from_pixel(1000, 500, Rgba([10, 200, 10, 255]))
        .save(&logo_path)
        .unwrap();

    let layer = build(
        dims(300, 200),
        &WatermarkContent::Logo(logo_path),
        Anchor::BottomLeft,
        Opacity::OPAQUE,
        &FontConfig::default(),
    )
    .unwrap();

    // 60x30 at x = 10, y = 200 - 30 - 10
    assert_eq!(lit_box(&layer), Some((10, 160, 69, 189)));
}

#[test]
fn test_composite_text_on_photo() {
    let base = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(200, 100, image::Rgb([0, 0, 0])));
    let layer = build_overlay(dims(200, 100), &builtin_text("AB"), Anchor::BottomRight, Opacity::OPAQUE)
        .unwrap();

    let result = composite(&base, &layer).unwrap();
    assert!(result.pixels().all(|p| p[3] == 255));
    assert!(result
        .pixels()
        .all(|p| *p == Rgba([0, 0, 0, 255]) || *p == Rgba([255, 255, 255, 255])));
    assert_eq!(*result.get_pixel(150, 75), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_configured_font_file_is_used_for_text() {
    let fonts = FontConfig {
        path: Some(
            std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("tests/fixtures/DejaVuSansMono-Bold.ttf"),
        ),
        size: DEFAULT_FONT_SIZE,
    };
    let prepared =
        PreparedWatermark::prepare(&WatermarkContent::Text("AB".to_string()), &fonts).unwrap();
    let PreparedWatermark::Text { font, .. } = &prepared else {
        panic!("expected a text watermark");
    };
    assert!(!font.is_builtin());

    let layer = build_overlay(dims(300, 200), &prepared, Anchor::BottomRight, Opacity::OPAQUE).unwrap();
    let (_, _, x1, y1) = lit_box(&layer).unwrap();
    // ink ends at the 10px margin, allowing one pixel of outward rounding
    assert!((288..=289).contains(&x1), "right edge at {x1}");
    assert!((188..=189).contains(&y1), "bottom edge at {y1}");
}
