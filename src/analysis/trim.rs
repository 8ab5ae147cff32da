use crate::{
    foundation::core::PixelRect,
    raster::buffer::{RgbaRaster, rgb_distance},
};

/// Summed RGB distance from the border color that counts as content.
pub const DEFAULT_TRIM_THRESHOLD: u32 = 30;

/// Tightest rectangle containing every pixel that differs from the top-left color by more than
/// `threshold`. A uniform image yields its full bounds.
pub fn trim_canvas(image: &RgbaRaster, threshold: u32) -> PixelRect {
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return image.bounds();
    }

    let reference = image.sample(0, 0);
    let is_content = |x: u32, y: u32| rgb_distance(image.sample(x, y), reference) > threshold;

    let Some(top) = (0..h).find(|&y| (0..w).any(|x| is_content(x, y))) else {
        return image.bounds();
    };
    let bottom = (top..h)
        .rev()
        .find(|&y| (0..w).any(|x| is_content(x, y)))
        .unwrap_or(top);
    let left = (0..w)
        .find(|&x| (top..=bottom).any(|y| is_content(x, y)))
        .unwrap_or(0);
    let right = (left..w)
        .rev()
        .find(|&x| (top..=bottom).any(|y| is_content(x, y)))
        .unwrap_or(left);

    PixelRect::new(left, top, right - left + 1, bottom - top + 1)
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/trim.rs"]
mod tests;
