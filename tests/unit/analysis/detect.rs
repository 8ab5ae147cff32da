use super::*;

const COLORS: [[u8; 4]; 4] = [
    [220, 40, 40, 255],
    [40, 60, 220, 255],
    [230, 210, 50, 255],
    [150, 60, 170, 255],
];

/// 2x2 solid panels separated by black gutters.
fn guttered_sheet(panel_w: u32, panel_h: u32, gutter: u32) -> RgbaRaster {
    let w = panel_w * 2 + gutter;
    let h = panel_h * 2 + gutter;
    let mut img = RgbaRaster::filled(w, h, [0, 0, 0, 255]);
    for row in 0..2 {
        for col in 0..2 {
            let rect = PixelRect::new(
                col * (panel_w + gutter),
                row * (panel_h + gutter),
                panel_w,
                panel_h,
            );
            img.fill_rect(rect, COLORS[(row * 2 + col) as usize]);
        }
    }
    img
}

fn assert_near(actual: u32, expected: u32, tol: u32) {
    assert!(
        actual.abs_diff(expected) <= tol,
        "expected {expected} +/- {tol}, got {actual}"
    );
}

#[test]
fn detects_gutters_at_analysis_resolution() {
    let img = guttered_sheet(150, 80, 20);
    let grid = detect_grid(&img, None, None).unwrap();
    assert_eq!(
        grid.rows,
        vec![
            GridLine {
                start: 0,
                size: 80
            },
            GridLine {
                start: 100,
                size: 80
            }
        ]
    );
    assert_eq!(
        grid.cols,
        vec![
            GridLine {
                start: 0,
                size: 150
            },
            GridLine {
                start: 170,
                size: 150
            }
        ]
    );
}

#[test]
fn rescales_detection_from_downsampled_proxy() {
    let img = guttered_sheet(375, 200, 50);
    assert_eq!((img.width(), img.height()), (800, 450));

    let grid = detect_grid(&img, Some(2), Some(2)).unwrap();
    assert_eq!(grid.rows.len(), 2);
    assert_eq!(grid.cols.len(), 2);

    assert_near(grid.cols[0].start, 0, 8);
    assert_near(grid.cols[0].start + grid.cols[0].size, 375, 8);
    assert_near(grid.cols[1].start, 425, 8);
    assert_near(grid.cols[1].start + grid.cols[1].size, 800, 8);
    assert_near(grid.rows[0].start + grid.rows[0].size, 200, 8);
    assert_near(grid.rows[1].start, 250, 8);
}

#[test]
fn flat_image_is_not_a_grid() {
    let img = RgbaRaster::filled(120, 90, [30, 30, 30, 255]);
    assert!(detect_grid(&img, None, None).is_none());
    assert!(detect_grid(&RgbaRaster::filled(0, 0, [0; 4]), None, None).is_none());
}

#[test]
fn expected_counts_force_uniform_bands_on_flat_image() {
    let img = RgbaRaster::filled(120, 90, [30, 30, 30, 255]);
    let grid = detect_grid(&img, Some(3), Some(2)).unwrap();
    assert_eq!(grid.rows.len(), 3);
    assert_eq!(grid.cols.len(), 2);
    assert_eq!(grid.cols[1], GridLine { start: 60, size: 60 });
}

#[test]
fn cell_rects_are_row_major() {
    let grid = DetectedGrid {
        rows: vec![
            GridLine { start: 0, size: 10 },
            GridLine { start: 12, size: 10 },
        ],
        cols: vec![
            GridLine { start: 0, size: 20 },
            GridLine { start: 25, size: 20 },
        ],
    };
    assert_eq!(
        grid.cell_rects(),
        vec![
            PixelRect::new(0, 0, 20, 10),
            PixelRect::new(25, 0, 20, 10),
            PixelRect::new(0, 12, 20, 10),
            PixelRect::new(25, 12, 20, 10),
        ]
    );
}
