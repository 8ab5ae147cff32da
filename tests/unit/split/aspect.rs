use super::*;

const LANDSCAPE: f64 = 16.0 / 9.0;
const PORTRAIT: f64 = 9.0 / 16.0;

#[test]
fn matching_cell_is_untouched() {
    let raw = PixelRect::new(480, 270, 480, 270);
    let crop = correct_aspect(raw, LANDSCAPE);
    assert_eq!(crop.source, raw);
    assert_eq!((crop.out_width, crop.out_height), (480, 270));
}

#[test]
fn near_match_is_force_rounded_to_exact_ratio() {
    // 481/270 differs from 16:9 by ~0.004.
    let raw = PixelRect::new(0, 0, 481, 270);
    let crop = correct_aspect(raw, LANDSCAPE);
    assert_eq!(crop.source, raw);
    assert_eq!((crop.out_width, crop.out_height), (481, 271));
}

#[test]
fn too_wide_cell_is_center_cropped_in_width() {
    let raw = PixelRect::new(100, 50, 500, 270);
    let crop = correct_aspect(raw, LANDSCAPE);
    assert_eq!(crop.source, PixelRect::new(110, 50, 480, 270));
    assert_eq!((crop.out_width, crop.out_height), (480, 270));
}

#[test]
fn too_tall_cell_is_center_cropped_in_height() {
    let raw = PixelRect::new(0, 0, 480, 360);
    let crop = correct_aspect(raw, LANDSCAPE);
    assert_eq!(crop.source, PixelRect::new(0, 45, 480, 270));
    assert_eq!((crop.out_width, crop.out_height), (480, 270));
}

#[test]
fn portrait_target_crops_wide_cells() {
    let raw = PixelRect::new(0, 0, 400, 640);
    let crop = correct_aspect(raw, PORTRAIT);
    assert_eq!(crop.source, PixelRect::new(20, 0, 360, 640));
    assert_eq!((crop.out_width, crop.out_height), (360, 640));
}

#[test]
fn empty_rect_passes_through() {
    let raw = PixelRect::new(3, 3, 0, 10);
    let crop = correct_aspect(raw, LANDSCAPE);
    assert_eq!(crop.source, raw);
}
