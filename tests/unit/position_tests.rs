// Position resolver unit tests

use rstest::rstest;
use watermark_wizard::watermark::*;

fn image(width: u32, height: u32) -> ImageDimensions {
    ImageDimensions { width, height }
}

fn mark(width: u32, height: u32) -> WatermarkDimensions {
    WatermarkDimensions { width, height }
}

#[rstest]
#[case("top-left", 10, 10)]
#[case("top-right", 790, 10)]
#[case("bottom-left", 10, 540)]
#[case("bottom-right", 790, 540)]
#[case("center", 400, 275)]
fn test_anchor_positions_on_1000x600(#[case] anchor: &str, #[case] x: i32, #[case] y: i32) {
    let pos = resolve_position(anchor, &image(1000, 600), &mark(200, 50), DEFAULT_MARGIN).unwrap();
    assert_eq!(pos, PlacementPosition::new(x, y));
}

#[rstest]
#[case("middle")]
#[case("Bottom-Right")]
#[case("")]
#[case("bottom_right")]
fn test_unknown_anchor_rejected(#[case] anchor: &str) {
    let err = resolve_position(anchor, &image(100, 100), &mark(10, 10), 10).unwrap_err();
    assert!(matches!(err, WatermarkError::UnsupportedAnchor(ref name) if name == anchor));
}

#[rstest]
#[case(Anchor::TopLeft)]
#[case(Anchor::TopRight)]
#[case(Anchor::BottomLeft)]
#[case(Anchor::BottomRight)]
#[case(Anchor::Center)]
fn test_fitting_watermark_stays_inside_margin(#[case] anchor: Anchor) {
    for (iw, ih, ww, wh) in [(640, 480, 100, 40), (21, 21, 1, 1), (300, 300, 280, 280)] {
        let img = image(iw, ih);
        let wm = mark(ww, wh);
        assert!(fits_within_margin(&img, &wm, DEFAULT_MARGIN));

        let pos = calculate_position(anchor, &img, &wm, DEFAULT_MARGIN);
        assert!(pos.x >= 10 && pos.y >= 10, "{anchor} at {pos:?}");
        assert!(pos.x + ww as i32 <= iw as i32 - 10);
        assert!(pos.y + wh as i32 <= ih as i32 - 10);
    }
}

#[test]
fn test_oversized_watermark_is_not_clamped() {
    let pos = calculate_position(Anchor::BottomRight, &image(100, 50), &mark(150, 80), 10);
    assert_eq!(pos, PlacementPosition::new(-60, -40));
    assert!(!fits_within_margin(&image(100, 50), &mark(150, 80), 10));
}

#[test]
fn test_center_ignores_margin() {
    let img = image(101, 51);
    let wm = mark(10, 10);
    assert_eq!(
        calculate_position(Anchor::Center, &img, &wm, 0),
        calculate_position(Anchor::Center, &img, &wm, 99)
    );
}

#[test]
fn test_anchor_names_round_trip() {
    for anchor in Anchor::ALL {
        assert_eq!(anchor.as_str().parse::<Anchor>().unwrap(), anchor);
    }
}
