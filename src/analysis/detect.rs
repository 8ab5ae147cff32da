use crate::{
    analysis::{
        energy::{col_energy_profile, row_energy_profile},
        segments::{Segment, detect_segments},
    },
    foundation::core::PixelRect,
    raster::buffer::RgbaRaster,
};

/// Width of the proxy image energy analysis runs on.
pub const ANALYSIS_WIDTH: u32 = 400;

/// One detected band (panel row or panel column) in full-resolution pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridLine {
    pub start: u32,
    pub size: u32,
}

/// Panel bands recovered from a contact sheet.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DetectedGrid {
    pub rows: Vec<GridLine>,
    pub cols: Vec<GridLine>,
}

impl DetectedGrid {
    /// Row-major cell rectangles formed by crossing every row band with every column band.
    pub fn cell_rects(&self) -> Vec<PixelRect> {
        let mut out = Vec::with_capacity(self.rows.len() * self.cols.len());
        for row in &self.rows {
            for col in &self.cols {
                out.push(PixelRect::new(col.start, row.start, col.size, row.size));
            }
        }
        out
    }
}

/// Discover panel bands from image content.
///
/// Energy profiles are computed on a proxy downscaled to [`ANALYSIS_WIDTH`] and the detected
/// segments are mapped back to full resolution. Returns `None` when either axis yields no
/// segments, which callers treat as "use the fixed grid".
#[tracing::instrument(level = "debug", skip(image), fields(width = image.width(), height = image.height()))]
pub fn detect_grid(
    image: &RgbaRaster,
    expected_rows: Option<usize>,
    expected_cols: Option<usize>,
) -> Option<DetectedGrid> {
    if image.width() == 0 || image.height() == 0 {
        return None;
    }

    let proxy = match image.downscaled_to_width(ANALYSIS_WIDTH) {
        Ok(proxy) => proxy,
        Err(err) => {
            tracing::warn!(%err, "could not build analysis proxy");
            return None;
        }
    };

    let row_segments = detect_segments(&row_energy_profile(&proxy), expected_rows);
    let col_segments = detect_segments(&col_energy_profile(&proxy), expected_cols);
    if row_segments.is_empty() || col_segments.is_empty() {
        tracing::debug!(
            rows = row_segments.len(),
            cols = col_segments.len(),
            "no grid detected"
        );
        return None;
    }

    let scale_y = f64::from(image.height()) / f64::from(proxy.height());
    let scale_x = f64::from(image.width()) / f64::from(proxy.width());
    Some(DetectedGrid {
        rows: rescale(&row_segments, scale_y, image.height()),
        cols: rescale(&col_segments, scale_x, image.width()),
    })
}

fn rescale(segments: &[Segment], scale: f64, limit: u32) -> Vec<GridLine> {
    segments
        .iter()
        .map(|s| {
            let start = ((s.start as f64 * scale).round() as u32).min(limit);
            let end = ((s.end as f64 * scale).round() as u32).clamp(start, limit);
            GridLine {
                start,
                size: end - start,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/detect.rs"]
mod tests;
