//! Contact-sheet splitting: cell boundaries, aspect correction, empty-cell classification.

pub mod aspect;
pub mod boundaries;
pub mod classify;
/// Split entry points and result types.
pub mod splitter;
