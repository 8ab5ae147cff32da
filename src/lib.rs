//! Storyboard contact-sheet grid engine.
//!
//! One pure layout function, [`calculate_grid`], decides how `N` scenes are arranged on a 2K or
//! 4K canvas at 16:9 or 9:16. Prompt construction and the splitter both derive from it, so an
//! image generated from the described layout splits back into exactly those panels.
//!
//! - Plan a sheet with [`calculate_grid`] and check it with [`validate_scene_count`]
//! - Split a generated sheet with [`split_storyboard_image`] (or the bytes/file variants)
//! - Locate panels without a known layout with [`detect_grid`]
#![forbid(unsafe_code)]

mod foundation;

/// Pixel analysis used for boundary detection and border trimming.
pub mod analysis;
/// Layout solver and per-resolution limits.
pub mod grid;
/// RGBA pixel buffer and image codecs.
pub mod raster;
/// Splitting a generated sheet back into per-scene images.
pub mod split;

pub use crate::foundation::core::{AspectRatio, Canvas, PixelRect, Resolution};
pub use crate::foundation::error::{StoryboardError, StoryboardResult};

pub use crate::analysis::detect::{DetectedGrid, GridLine, detect_grid};
pub use crate::analysis::trim::{DEFAULT_TRIM_THRESHOLD, trim_canvas};
pub use crate::grid::limits::{SceneCountCheck, recommended_resolution, validate_scene_count};
pub use crate::grid::solver::{GridConfig, calculate_grid, preset_layout};
pub use crate::raster::buffer::RgbaRaster;
pub use crate::raster::codec::{decode_raster, encode_png, open_raster};
pub use crate::split::boundaries::{
    BoundaryStrategy, CellBoundaryProvider, CellLayout, EnergyGrid, UniformGrid, create_provider,
};
pub use crate::split::splitter::{
    SplitConfig, SplitManifestEntry, SplitOptions, SplitResult, SplitThreading,
    split_storyboard_bytes, split_storyboard_file, split_storyboard_image, split_with_grid,
};
