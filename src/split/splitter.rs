use std::{borrow::Cow, path::Path};

use rayon::prelude::*;

use crate::{
    analysis::trim::{DEFAULT_TRIM_THRESHOLD, trim_canvas},
    foundation::{
        core::{AspectRatio, PixelRect, Resolution},
        error::{StoryboardError, StoryboardResult},
    },
    grid::solver::{GridConfig, calculate_grid},
    raster::{
        buffer::RgbaRaster,
        codec::{decode_raster, encode_png, open_raster},
    },
    split::{
        aspect::correct_aspect,
        boundaries::{BoundaryStrategy, create_provider},
        classify::is_empty_cell,
    },
};

/// Per-cell parallelism for a split.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplitThreading {
    /// Extract cells on a rayon pool instead of sequentially.
    pub parallel: bool,
    /// Override rayon worker threads (parallel mode only).
    pub threads: Option<usize>,
}

/// Tuning knobs for [`split_storyboard_image`]. Every field has a default, so a partial JSON
/// object is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SplitOptions {
    /// Column count to use instead of the solver's.
    pub expected_cols: Option<u32>,
    /// Row count to use instead of the solver's.
    pub expected_rows: Option<u32>,
    /// Fraction of each cell side discarded to drop separator bleed.
    pub edge_inset: f64,
    /// Drop cells classified as empty.
    pub filter_empty: bool,
    /// How cell boundaries are found.
    pub strategy: BoundaryStrategy,
    /// Remove a uniform outer border before partitioning.
    pub trim_border: bool,
    pub threading: SplitThreading,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            expected_cols: None,
            expected_rows: None,
            edge_inset: 0.005,
            filter_empty: true,
            strategy: BoundaryStrategy::Uniform,
            trim_border: false,
            threading: SplitThreading::default(),
        }
    }
}

impl SplitOptions {
    pub fn validate(&self) -> StoryboardResult<()> {
        if self.expected_cols == Some(0) || self.expected_rows == Some(0) {
            return Err(StoryboardError::validation(
                "expected cols/rows must be >= 1 when set",
            ));
        }
        if !self.edge_inset.is_finite() || !(0.0..0.5).contains(&self.edge_inset) {
            return Err(StoryboardError::validation(format!(
                "edge inset must be in [0, 0.5), got {}",
                self.edge_inset
            )));
        }
        if self.threading.threads == Some(0) {
            return Err(StoryboardError::validation(
                "split threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// What to split and how: the same `(scene_count, aspect_ratio, resolution)` that produced the
/// generation prompt, plus splitter options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitConfig {
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
    pub scene_count: u32,
    #[serde(default)]
    pub options: SplitOptions,
}

impl SplitConfig {
    pub fn new(scene_count: u32, aspect_ratio: AspectRatio, resolution: Resolution) -> Self {
        Self {
            aspect_ratio,
            resolution,
            scene_count,
            options: SplitOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SplitOptions) -> Self {
        self.options = options;
        self
    }

    /// Grid the sheet was generated with.
    pub fn grid(&self) -> GridConfig {
        calculate_grid(self.scene_count, self.aspect_ratio, self.resolution)
    }
}

/// One extracted scene. Owns its pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitResult {
    /// Position among the returned (kept) results.
    pub id: usize,
    pub image: RgbaRaster,
    pub width: u32,
    pub height: u32,
    /// Row-major position in the full grid, before empty-cell filtering.
    pub original_index: usize,
    pub is_empty: bool,
    pub row: u32,
    pub col: u32,
    /// Region of the source sheet that was rendered into `image`.
    pub source_rect: PixelRect,
}

impl SplitResult {
    /// PNG payload for this scene.
    pub fn encode_png(&self) -> StoryboardResult<Vec<u8>> {
        encode_png(&self.image)
    }

    pub fn manifest_entry(&self) -> SplitManifestEntry {
        SplitManifestEntry {
            id: self.id,
            width: self.width,
            height: self.height,
            original_index: self.original_index,
            is_empty: self.is_empty,
            row: self.row,
            col: self.col,
            source_rect: self.source_rect,
        }
    }
}

/// Serializable metadata of a [`SplitResult`] (everything but the pixels).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitManifestEntry {
    pub id: usize,
    pub width: u32,
    pub height: u32,
    pub original_index: usize,
    pub is_empty: bool,
    pub row: u32,
    pub col: u32,
    pub source_rect: PixelRect,
}

/// Split a decoded contact sheet into its scenes.
///
/// The grid comes from [`calculate_grid`] with the config's tuple, so it matches the layout the
/// generation prompt described. Cells that cannot be extracted are skipped; see
/// [`split_with_grid`].
pub fn split_storyboard_image(
    image: &RgbaRaster,
    config: &SplitConfig,
) -> StoryboardResult<Vec<SplitResult>> {
    split_with_grid(image, &config.grid(), config.aspect_ratio, &config.options)
}

/// Decode `bytes` and split. Undecodable input is a [`StoryboardError::Decode`].
pub fn split_storyboard_bytes(
    bytes: &[u8],
    config: &SplitConfig,
) -> StoryboardResult<Vec<SplitResult>> {
    let image = decode_raster(bytes)?;
    split_storyboard_image(&image, config)
}

/// Read, decode and split an image file.
pub fn split_storyboard_file(
    path: impl AsRef<Path>,
    config: &SplitConfig,
) -> StoryboardResult<Vec<SplitResult>> {
    let image = open_raster(path)?;
    split_storyboard_image(&image, config)
}

/// Split against an already computed grid.
///
/// Results are row-major. A cell that fails to extract (zero area, failed resample) is logged
/// and omitted; its `original_index` is not reused. With `filter_empty`, cells classified as
/// empty are omitted the same way.
#[tracing::instrument(
    level = "debug",
    skip(image, grid, options),
    fields(width = image.width(), height = image.height(), cols = grid.cols, rows = grid.rows)
)]
pub fn split_with_grid(
    image: &RgbaRaster,
    grid: &GridConfig,
    aspect: AspectRatio,
    options: &SplitOptions,
) -> StoryboardResult<Vec<SplitResult>> {
    options.validate()?;
    if image.width() == 0 || image.height() == 0 {
        return Err(StoryboardError::validation("contact sheet has no pixels"));
    }

    let cols = options.expected_cols.unwrap_or(grid.cols);
    let rows = options.expected_rows.unwrap_or(grid.rows);

    let (region, origin) = if options.trim_border {
        let content = trim_canvas(image, DEFAULT_TRIM_THRESHOLD);
        if content == image.bounds() {
            (Cow::Borrowed(image), (0, 0))
        } else {
            tracing::debug!(?content, "trimmed outer border");
            (Cow::Owned(image.crop(content)?), (content.x, content.y))
        }
    } else {
        (Cow::Borrowed(image), (0, 0))
    };

    let provider = create_provider(options.strategy);
    let layout = provider.cell_layout(&region, cols, rows)?;
    tracing::debug!(provider = provider.name(), cells = layout.rects.len(), "cell layout");

    let target = aspect.ratio();
    let extract = |index: usize, rect: PixelRect| -> Option<ExtractedCell> {
        match extract_cell(&region, rect, target, options.edge_inset) {
            Ok(cell) => Some(cell),
            Err(err) => {
                tracing::warn!(index, %err, "skipping cell");
                None
            }
        }
    };

    let cells: Vec<Option<ExtractedCell>> = if options.threading.parallel {
        let pool = build_thread_pool(options.threading.threads)?;
        pool.install(|| {
            layout
                .rects
                .par_iter()
                .enumerate()
                .map(|(index, rect)| extract(index, *rect))
                .collect()
        })
    } else {
        layout
            .rects
            .iter()
            .enumerate()
            .map(|(index, rect)| extract(index, *rect))
            .collect()
    };

    let mut out = Vec::with_capacity(cells.len());
    for (index, cell) in cells.into_iter().enumerate() {
        let Some(cell) = cell else {
            continue;
        };
        if options.filter_empty && cell.is_empty {
            tracing::debug!(index, "dropping empty cell");
            continue;
        }
        let (row, col) = layout.position_of(index);
        out.push(SplitResult {
            id: out.len(),
            width: cell.image.width(),
            height: cell.image.height(),
            image: cell.image,
            original_index: index,
            is_empty: cell.is_empty,
            row,
            col,
            source_rect: cell.source.offset(origin.0, origin.1),
        });
    }

    tracing::info!(
        kept = out.len(),
        cells = layout.rects.len(),
        "split contact sheet"
    );
    Ok(out)
}

struct ExtractedCell {
    image: RgbaRaster,
    source: PixelRect,
    is_empty: bool,
}

fn extract_cell(
    region: &RgbaRaster,
    raw: PixelRect,
    target: f64,
    edge_inset: f64,
) -> StoryboardResult<ExtractedCell> {
    if raw.is_empty() {
        return Err(StoryboardError::raster(format!(
            "cell at ({}, {}) has zero area",
            raw.x, raw.y
        )));
    }
    let crop = correct_aspect(raw, target);
    let source = crop.source.inset(edge_inset);
    let image = region.blit(source, crop.out_width, crop.out_height)?;
    let is_empty = is_empty_cell(&image);
    Ok(ExtractedCell {
        image,
        source,
        is_empty,
    })
}

/// `threads` is already validated to be non-zero.
fn build_thread_pool(threads: Option<usize>) -> StoryboardResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| StoryboardError::raster(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/split/splitter.rs"]
mod tests;
