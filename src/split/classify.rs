use crate::raster::buffer::{RgbaRaster, rgb_distance};

const SAMPLE_GRID: u32 = 10;
const NEAR_BLACK_MAX: u8 = 24;
const UNIFORM_DISTANCE: u32 = 30;
const UNIFORM_RATIO: f64 = 0.9;

/// Heuristic for unused panels: a near-black center and a >90% uniform 10x10 sample grid.
pub fn is_empty_cell(cell: &RgbaRaster) -> bool {
    let (w, h) = (cell.width(), cell.height());
    if w == 0 || h == 0 {
        return true;
    }

    let center = cell.sample(w / 2, h / 2);
    if center[..3].iter().any(|&c| c > NEAR_BLACK_MAX) {
        return false;
    }

    let mut similar = 0u32;
    for j in 0..SAMPLE_GRID {
        let y = grid_coord(j, h);
        for i in 0..SAMPLE_GRID {
            let x = grid_coord(i, w);
            if rgb_distance(cell.sample(x, y), center) <= UNIFORM_DISTANCE {
                similar += 1;
            }
        }
    }
    f64::from(similar) / f64::from(SAMPLE_GRID * SAMPLE_GRID) > UNIFORM_RATIO
}

/// Center of the `i`-th of [`SAMPLE_GRID`] equal slots along `len`.
fn grid_coord(i: u32, len: u32) -> u32 {
    ((2 * u64::from(i) + 1) * u64::from(len) / (2 * u64::from(SAMPLE_GRID))) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/split/classify.rs"]
mod tests;
