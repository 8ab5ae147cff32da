use crate::{
    analysis::detect::detect_grid,
    foundation::{
        core::PixelRect,
        error::{StoryboardError, StoryboardResult},
    },
    raster::buffer::RgbaRaster,
};

/// Raw, row-major cell rectangles of a contact sheet before any correction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellLayout {
    pub cols: u32,
    pub rows: u32,
    pub rects: Vec<PixelRect>,
}

impl CellLayout {
    /// Row-major `(row, col)` for the cell at `index`.
    pub fn position_of(&self, index: usize) -> (u32, u32) {
        let cols = self.cols.max(1) as usize;
        ((index / cols) as u32, (index % cols) as u32)
    }
}

/// Source of cell rectangles for the splitter.
///
/// Implementations decide *where* the panels are; cropping, inset and empty-cell handling are
/// shared by every implementation.
pub trait CellBoundaryProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Partition `image` into `cols x rows` cells.
    fn cell_layout(&self, image: &RgbaRaster, cols: u32, rows: u32)
    -> StoryboardResult<CellLayout>;
}

/// Which [`CellBoundaryProvider`] the splitter uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryStrategy {
    /// Equal cells from integer division of the image size.
    #[default]
    Uniform,
    /// Panel bands discovered from energy profiles, uniform when detection fails.
    EnergyDetect,
}

/// Build the provider for `strategy`.
pub fn create_provider(strategy: BoundaryStrategy) -> Box<dyn CellBoundaryProvider> {
    match strategy {
        BoundaryStrategy::Uniform => Box::new(UniformGrid),
        BoundaryStrategy::EnergyDetect => Box::new(EnergyGrid),
    }
}

/// Fixed uniform grid over the actual decoded image size.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformGrid;

impl CellBoundaryProvider for UniformGrid {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn cell_layout(
        &self,
        image: &RgbaRaster,
        cols: u32,
        rows: u32,
    ) -> StoryboardResult<CellLayout> {
        check_dims(image, cols, rows)?;
        let cell_w = image.width() / cols;
        let cell_h = image.height() / rows;

        let mut rects = Vec::with_capacity(cell_count(cols, rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                rects.push(PixelRect::new(col * cell_w, row * cell_h, cell_w, cell_h));
            }
        }
        Ok(CellLayout { cols, rows, rects })
    }
}

/// Energy-profile panel detection.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnergyGrid;

impl CellBoundaryProvider for EnergyGrid {
    fn name(&self) -> &'static str {
        "energy_detect"
    }

    fn cell_layout(
        &self,
        image: &RgbaRaster,
        cols: u32,
        rows: u32,
    ) -> StoryboardResult<CellLayout> {
        check_dims(image, cols, rows)?;
        match detect_grid(image, Some(rows as usize), Some(cols as usize)) {
            Some(grid) if grid.rows.len() == rows as usize && grid.cols.len() == cols as usize => {
                Ok(CellLayout {
                    cols,
                    rows,
                    rects: grid.cell_rects(),
                })
            }
            _ => {
                tracing::debug!(cols, rows, "grid detection failed, using uniform cells");
                UniformGrid.cell_layout(image, cols, rows)
            }
        }
    }
}

fn cell_count(cols: u32, rows: u32) -> u64 {
    u64::from(cols) * u64::from(rows)
}

fn check_dims(image: &RgbaRaster, cols: u32, rows: u32) -> StoryboardResult<()> {
    if cols == 0 || rows == 0 {
        return Err(StoryboardError::validation(format!(
            "cell layout needs at least one column and row, got {cols}x{rows}"
        )));
    }
    let pixels = u64::from(image.width()) * u64::from(image.height());
    if cell_count(cols, rows) > pixels {
        return Err(StoryboardError::validation(format!(
            "{cols}x{rows} cells do not fit a {}x{} image",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/split/boundaries.rs"]
mod tests;
