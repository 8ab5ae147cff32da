use crate::raster::buffer::{RgbaRaster, rgb_distance};

/// Pixel distance between compared samples, and between samples along a line.
pub const ENERGY_STRIDE: u32 = 2;

/// A line whose sampled pixels are more than this fraction marker-green is a separator.
pub const MARKER_LINE_RATIO: f64 = 0.3;

/// Which family of lines a profile is computed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// One value per image row (finds horizontal separators).
    Rows,
    /// One value per image column (finds vertical separators).
    Cols,
}

/// Bright green that generation prompts may request as an explicit panel separator.
pub fn is_marker_green(px: [u8; 4]) -> bool {
    px[1] >= 200 && px[0] <= 80 && px[2] <= 80
}

/// Per-row visual change: summed RGB deltas between pixels [`ENERGY_STRIDE`] apart.
pub fn row_energy_profile(image: &RgbaRaster) -> Vec<f64> {
    energy_profile(image, Axis::Rows)
}

/// Per-column visual change; see [`row_energy_profile`].
pub fn col_energy_profile(image: &RgbaRaster) -> Vec<f64> {
    energy_profile(image, Axis::Cols)
}

/// Energy of every line along `axis`. Marker-green lines are forced to zero.
pub fn energy_profile(image: &RgbaRaster, axis: Axis) -> Vec<f64> {
    let (lines, line_len) = match axis {
        Axis::Rows => (image.height(), image.width()),
        Axis::Cols => (image.width(), image.height()),
    };

    (0..lines)
        .map(|line| {
            line_energy(line_len, |pos| match axis {
                Axis::Rows => image.sample(pos, line),
                Axis::Cols => image.sample(line, pos),
            })
        })
        .collect()
}

fn line_energy(len: u32, at: impl Fn(u32) -> [u8; 4]) -> f64 {
    let mut energy = 0u64;
    let mut samples = 0u32;
    let mut green = 0u32;

    let mut pos = 0;
    while pos < len {
        let px = at(pos);
        samples += 1;
        if is_marker_green(px) {
            green += 1;
        }
        if pos + ENERGY_STRIDE < len {
            energy += u64::from(rgb_distance(px, at(pos + ENERGY_STRIDE)));
        }
        pos += ENERGY_STRIDE;
    }

    if samples > 0 && f64::from(green) / f64::from(samples) > MARKER_LINE_RATIO {
        return 0.0;
    }
    energy as f64
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/energy.rs"]
mod tests;
