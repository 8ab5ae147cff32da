use std::{io::Cursor, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::error::{StoryboardError, StoryboardResult},
    raster::buffer::RgbaRaster,
};

/// Decode encoded image bytes (PNG, JPEG, WebP, ...) into straight RGBA8.
pub fn decode_raster(bytes: &[u8]) -> StoryboardResult<RgbaRaster> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| StoryboardError::decode(format!("decode image from memory: {e}")))?;
    Ok(RgbaRaster::from_rgba_image(dyn_img.to_rgba8()))
}

/// Read and decode an image file. Read failures are [`StoryboardError::Other`] carrying the
/// I/O error as their source.
pub fn open_raster(path: impl AsRef<Path>) -> StoryboardResult<RgbaRaster> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image '{}'", path.display()))
        .map_err(StoryboardError::Other)?;
    decode_raster(&bytes)
}

/// Encode as PNG bytes.
pub fn encode_png(raster: &RgbaRaster) -> StoryboardResult<Vec<u8>> {
    let img = raster.clone().into_rgba_image()?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| StoryboardError::raster(format!("encode png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/codec.rs"]
mod tests;
