use std::fmt;

use crate::foundation::core::{AspectRatio, Canvas, Resolution};

/// Layout of a contact sheet: how many panels, their pixel size, and the canvas they sit on.
///
/// This is the single source of truth shared by prompt construction and the splitter. It is a
/// pure value: the same `(scene_count, aspect, resolution)` always yields the same config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub cols: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub total_cells: u32,
    pub empty_cells: u32,
}

impl GridConfig {
    fn from_layout(
        scene_count: u32,
        canvas: Canvas,
        cols: u32,
        rows: u32,
        (cell_width, cell_height): (u32, u32),
    ) -> Self {
        let total_cells = cols.saturating_mul(rows);
        Self {
            cols,
            rows,
            cell_width,
            cell_height,
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            total_cells,
            empty_cells: total_cells - scene_count.min(total_cells),
        }
    }

    /// Row-major `(row, col)` of the cell at `index`.
    pub fn position_of(&self, index: u32) -> (u32, u32) {
        let cols = self.cols.max(1);
        (index / cols, index % cols)
    }

    /// Human-readable layout sentence for generation prompts.
    ///
    /// Prompt builders must use this (or the raw `cols`/`rows`) verbatim so the generated sheet
    /// matches what the splitter expects.
    pub fn layout_description(&self, aspect: AspectRatio) -> String {
        format!(
            "{} {} x {} {} grid, each panel {} ({}x{} px)",
            self.cols,
            plural(self.cols, "column", "columns"),
            self.rows,
            plural(self.rows, "row", "rows"),
            aspect.label(),
            self.cell_width,
            self.cell_height
        )
    }
}

impl fmt::Display for GridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} grid of {}x{} panels",
            self.cols, self.rows, self.cell_width, self.cell_height
        )
    }
}

fn plural(n: u32, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}

// (scene_count, landscape (cols, rows), portrait (cols, rows))
const PRESET_LAYOUTS: [(u32, (u32, u32), (u32, u32)); 6] = [
    (4, (2, 2), (2, 2)),
    (6, (3, 2), (2, 3)),
    (8, (4, 2), (2, 4)),
    (9, (3, 3), (3, 3)),
    (10, (5, 2), (2, 5)),
    (12, (4, 3), (3, 4)),
];

/// Fixed `(cols, rows)` for the scene counts with a predefined layout.
pub fn preset_layout(scene_count: u32, aspect: AspectRatio) -> Option<(u32, u32)> {
    PRESET_LAYOUTS
        .iter()
        .find(|(n, _, _)| *n == scene_count)
        .map(|&(_, landscape, portrait)| match aspect {
            AspectRatio::Landscape => landscape,
            AspectRatio::Portrait => portrait,
        })
}

/// Compute the grid for `scene_count` panels at the given aspect ratio and resolution.
///
/// Never fails. `0` and `1` produce a single full-canvas cell, common counts use a predefined
/// layout, everything else is searched for the layout with the largest usable cell.
#[tracing::instrument(level = "debug")]
pub fn calculate_grid(
    scene_count: u32,
    aspect: AspectRatio,
    resolution: Resolution,
) -> GridConfig {
    let canvas = resolution.canvas(aspect);

    if scene_count <= 1 {
        tracing::debug!("single panel layout");
        return GridConfig::from_layout(scene_count, canvas, 1, 1, (canvas.width, canvas.height));
    }

    if let Some((cols, rows)) = preset_layout(scene_count, aspect) {
        tracing::debug!(cols, rows, "predefined layout");
        let cell = cell_size(aspect, canvas, cols, rows);
        return GridConfig::from_layout(scene_count, canvas, cols, rows, cell);
    }

    if let Some(best) = search_layout(scene_count, aspect, canvas) {
        tracing::debug!(cols = best.cols, rows = best.rows, "searched layout");
        return GridConfig::from_layout(scene_count, canvas, best.cols, best.rows, best.cell);
    }

    let (cols, rows) = square_layout(scene_count);
    tracing::debug!(cols, rows, "square fallback layout");
    let cell = fit_cell(aspect, canvas, cols, rows);
    GridConfig::from_layout(scene_count, canvas, cols, rows, cell)
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    cols: u32,
    rows: u32,
    cell: (u32, u32),
    score: u32,
}

fn search_layout(scene_count: u32, aspect: AspectRatio, canvas: Canvas) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;

    for primary in 1..=scene_count {
        let secondary = scene_count.div_ceil(primary);
        let (cols, rows) = if aspect.is_landscape() {
            (primary, secondary)
        } else {
            (secondary, primary)
        };

        let total = u64::from(cols) * u64::from(rows);
        let empty = total - u64::from(scene_count);
        if empty >= u64::from(primary) {
            continue;
        }
        let oriented = if aspect.is_landscape() {
            cols >= rows
        } else {
            rows >= cols
        };
        if !oriented {
            continue;
        }

        let (w, h) = cell_size(aspect, canvas, cols, rows);
        if w == 0 || h == 0 {
            // Cells only shrink from here on.
            break;
        }
        if !fits(canvas, cols, rows, (w, h)) {
            continue;
        }

        let score = w.min(h);
        if best.is_none_or(|b| score > b.score) {
            best = Some(Candidate {
                cols,
                rows,
                cell: (w, h),
                score,
            });
        }
    }

    best
}

fn square_layout(scene_count: u32) -> (u32, u32) {
    let mut cols = f64::from(scene_count).sqrt().ceil() as u32;
    while u64::from(cols) * u64::from(cols) < u64::from(scene_count) {
        cols += 1;
    }
    let cols = cols.max(1);
    (cols, scene_count.div_ceil(cols).max(1))
}

/// Cell size with the primary axis held fixed and the other derived from the target ratio.
fn cell_size(aspect: AspectRatio, canvas: Canvas, cols: u32, rows: u32) -> (u32, u32) {
    match aspect {
        AspectRatio::Landscape => {
            let w = canvas.width / cols.max(1);
            (w, derive_minor(w))
        }
        AspectRatio::Portrait => {
            let h = canvas.height / rows.max(1);
            (derive_minor(h), h)
        }
    }
}

/// Like [`cell_size`], but shrinks along the other axis when the primary derivation overflows.
fn fit_cell(aspect: AspectRatio, canvas: Canvas, cols: u32, rows: u32) -> (u32, u32) {
    let cell = cell_size(aspect, canvas, cols, rows);
    if fits(canvas, cols, rows, cell) {
        return cell;
    }
    match aspect {
        AspectRatio::Landscape => {
            let h = canvas.height / rows.max(1);
            (derive_major(h), h)
        }
        AspectRatio::Portrait => {
            let w = canvas.width / cols.max(1);
            (w, derive_major(w))
        }
    }
}

fn derive_minor(major: u32) -> u32 {
    (u64::from(major) * 9 / 16) as u32
}

fn derive_major(minor: u32) -> u32 {
    (u64::from(minor) * 16 / 9) as u32
}

fn fits(canvas: Canvas, cols: u32, rows: u32, (w, h): (u32, u32)) -> bool {
    u64::from(w) * u64::from(cols) <= u64::from(canvas.width)
        && u64::from(h) * u64::from(rows) <= u64::from(canvas.height)
}

#[cfg(test)]
#[path = "../../tests/unit/grid/solver.rs"]
mod tests;
