use super::*;

const ASPECTS: [AspectRatio; 2] = [AspectRatio::Landscape, AspectRatio::Portrait];

#[test]
fn cell_counts_hold_for_every_supported_count() {
    for resolution in Resolution::ALL {
        for aspect in ASPECTS {
            for n in 0..=48u32 {
                let g = calculate_grid(n, aspect, resolution);
                assert_eq!(g.cols * g.rows, g.total_cells, "n={n} {aspect} {resolution}");
                assert!(g.total_cells >= n, "n={n} {aspect} {resolution}");
                if n > 0 {
                    assert_eq!(g.empty_cells, g.total_cells - n);
                }
                assert!(g.cell_width * g.cols <= g.canvas_width);
                assert!(g.cell_height * g.rows <= g.canvas_height);
            }
        }
    }
}

#[test]
fn orientation_preference_is_respected() {
    for resolution in Resolution::ALL {
        for n in 2..=48u32 {
            let g = calculate_grid(n, AspectRatio::Landscape, resolution);
            assert!(g.cols >= g.rows, "landscape n={n}: {g}");
            let g = calculate_grid(n, AspectRatio::Portrait, resolution);
            assert!(g.rows >= g.cols, "portrait n={n}: {g}");
        }
    }
}

#[test]
fn searched_layouts_never_waste_a_full_line() {
    for n in 2..=48u32 {
        if preset_layout(n, AspectRatio::Landscape).is_some() {
            continue;
        }
        let g = calculate_grid(n, AspectRatio::Landscape, Resolution::FourK);
        assert!(g.empty_cells < g.cols, "n={n}: {g}");
        let g = calculate_grid(n, AspectRatio::Portrait, Resolution::FourK);
        assert!(g.empty_cells < g.rows, "n={n}: {g}");
    }
}

#[test]
fn zero_scenes_is_single_full_canvas_cell() {
    let g = calculate_grid(0, AspectRatio::Landscape, Resolution::TwoK);
    assert_eq!((g.cols, g.rows), (1, 1));
    assert_eq!((g.cell_width, g.cell_height), (1920, 1080));
    assert_eq!(g.total_cells, 1);
    assert_eq!(g.empty_cells, 1);
}

#[test]
fn one_scene_is_single_full_canvas_cell() {
    let g = calculate_grid(1, AspectRatio::Portrait, Resolution::FourK);
    assert_eq!((g.cols, g.rows), (1, 1));
    assert_eq!((g.cell_width, g.cell_height), (2160, 3840));
    assert_eq!(g.empty_cells, 0);
}

#[test]
fn predefined_layouts_are_used() {
    let g = calculate_grid(4, AspectRatio::Landscape, Resolution::TwoK);
    assert_eq!((g.cols, g.rows), (2, 2));
    assert_eq!((g.canvas_width, g.canvas_height), (1920, 1080));
    assert_eq!((g.cell_width, g.cell_height), (960, 540));

    let g = calculate_grid(12, AspectRatio::Landscape, Resolution::TwoK);
    assert_eq!((g.cols, g.rows), (4, 3));
    assert_eq!((g.cell_width, g.cell_height), (480, 270));

    let g = calculate_grid(12, AspectRatio::Portrait, Resolution::TwoK);
    assert_eq!((g.cols, g.rows), (3, 4));
    assert_eq!((g.cell_width, g.cell_height), (270, 480));

    let g = calculate_grid(9, AspectRatio::Portrait, Resolution::TwoK);
    assert_eq!((g.cols, g.rows), (3, 3));
}

#[test]
fn four_k_portrait_maps_to_tall_canvas() {
    let g = calculate_grid(6, AspectRatio::Portrait, Resolution::FourK);
    assert_eq!((g.canvas_width, g.canvas_height), (2160, 3840));
    assert_eq!((g.cols, g.rows), (2, 3));
}

#[test]
fn search_picks_largest_cells() {
    let g = calculate_grid(2, AspectRatio::Landscape, Resolution::TwoK);
    assert_eq!((g.cols, g.rows), (2, 1));

    let g = calculate_grid(5, AspectRatio::Landscape, Resolution::TwoK);
    assert_eq!((g.cols, g.rows), (3, 2));
    assert_eq!(g.empty_cells, 1);

    let g = calculate_grid(7, AspectRatio::Portrait, Resolution::TwoK);
    assert_eq!((g.cols, g.rows), (3, 3));
    assert_eq!((g.cell_width, g.cell_height), (360, 640));

    let g = calculate_grid(13, AspectRatio::Landscape, Resolution::FourK);
    assert_eq!((g.cols, g.rows), (4, 4));
}

#[test]
fn cells_keep_target_ratio() {
    for n in 1..=48u32 {
        let g = calculate_grid(n, AspectRatio::Landscape, Resolution::FourK);
        assert_eq!(g.cell_height, g.cell_width * 9 / 16, "n={n}");
        let g = calculate_grid(n, AspectRatio::Portrait, Resolution::FourK);
        assert_eq!(g.cell_width, g.cell_height * 9 / 16, "n={n}");
    }
}

#[test]
fn calculate_grid_is_deterministic() {
    for n in [0u32, 3, 12, 17, 48] {
        let a = calculate_grid(n, AspectRatio::Portrait, Resolution::FourK);
        let b = calculate_grid(n, AspectRatio::Portrait, Resolution::FourK);
        assert_eq!(a, b);
    }
}

#[test]
fn huge_counts_degrade_without_panicking() {
    let g = calculate_grid(100_000, AspectRatio::Landscape, Resolution::TwoK);
    assert!(g.total_cells >= 100_000);
    assert_eq!(g.cols * g.rows, g.total_cells);
}

#[test]
fn square_fallback_covers_count() {
    assert_eq!(square_layout(10), (4, 3));
    assert_eq!(square_layout(16), (4, 4));
    assert_eq!(square_layout(2), (2, 1));
}

#[test]
fn description_and_display_name_the_layout() {
    let g = calculate_grid(12, AspectRatio::Landscape, Resolution::TwoK);
    assert_eq!(g.to_string(), "4x3 grid of 480x270 panels");
    assert_eq!(
        g.layout_description(AspectRatio::Landscape),
        "4 columns x 3 rows grid, each panel 16:9 (480x270 px)"
    );
    assert_eq!(g.position_of(5), (1, 1));
}

#[test]
fn serializes_with_camel_case_fields() {
    let g = calculate_grid(4, AspectRatio::Landscape, Resolution::TwoK);
    let v = serde_json::to_value(g).unwrap();
    assert_eq!(v["cellWidth"], 960);
    assert_eq!(v["totalCells"], 4);
    assert_eq!(v["emptyCells"], 0);
}
