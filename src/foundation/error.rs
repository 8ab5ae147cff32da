/// Convenience result type used across the crate.
pub type StoryboardResult<T> = Result<T, StoryboardError>;

/// Top-level error taxonomy used by grid and splitter APIs.
#[derive(thiserror::Error, Debug)]
pub enum StoryboardError {
    /// Invalid caller-provided options or dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// The source contact sheet could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Pixel buffer operations that could not be carried out.
    #[error("raster error: {0}")]
    Raster(String),

    /// Wrapped lower-level error, e.g. a failed file read with its context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryboardError {
    /// Build a [`StoryboardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryboardError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`StoryboardError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
