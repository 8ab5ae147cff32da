//! Pixel analysis for discovering panel boundaries on a contact sheet.

/// Grid detection on a downscaled proxy.
pub mod detect;
/// Row/column energy profiles.
pub mod energy;
/// Segment detection over energy profiles.
pub mod segments;
/// Uniform outer border removal.
pub mod trim;
