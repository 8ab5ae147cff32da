use image::imageops::{self, FilterType};

use crate::foundation::{
    core::PixelRect,
    error::{StoryboardError, StoryboardResult},
};

/// Owned straight-alpha RGBA8 pixel buffer, row-major with no padding.
///
/// This is the only pixel container the grid and split code works with; decoding, encoding and
/// resampling go through the `image` crate behind this type.
#[derive(Clone, PartialEq, Eq)]
pub struct RgbaRaster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for RgbaRaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbaRaster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl RgbaRaster {
    /// Wrap raw RGBA8 bytes; `data.len()` must equal `width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> StoryboardResult<Self> {
        let expected_len = byte_len(width, height)?;
        if data.len() != expected_len {
            return Err(StoryboardError::raster(format!(
                "rgba buffer has {} bytes, expected {expected_len} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A raster filled with a single color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let px = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: rgba.repeat(px),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full-image rectangle.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Pixel at `(x, y)` with coordinates clamped to the image; transparent black when empty.
    pub fn sample(&self, x: u32, y: u32) -> [u8; 4] {
        if self.width == 0 || self.height == 0 {
            return [0; 4];
        }
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let idx = self.index(x, y);
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Overwrite one pixel; out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Fill the part of `rect` that lies inside the image.
    pub fn fill_rect(&mut self, rect: PixelRect, rgba: [u8; 4]) {
        let x_end = rect.right().min(self.width);
        let y_end = rect.bottom().min(self.height);
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                let idx = self.index(x, y);
                self.data[idx..idx + 4].copy_from_slice(&rgba);
            }
        }
    }

    /// Copy `rect` out into a new raster. `rect` must be non-empty and fully inside the image.
    pub fn crop(&self, rect: PixelRect) -> StoryboardResult<Self> {
        self.check_rect(rect)?;
        let row_bytes = rect.width as usize * 4;
        let mut data = Vec::with_capacity(row_bytes * rect.height as usize);
        for y in rect.y..rect.bottom() {
            let start = self.index(rect.x, y);
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Ok(Self {
            width: rect.width,
            height: rect.height,
            data,
        })
    }

    /// Render `src` into a new `dst_width x dst_height` raster.
    ///
    /// Same-size blits are exact copies; otherwise the region is resampled with a triangle
    /// filter.
    pub fn blit(&self, src: PixelRect, dst_width: u32, dst_height: u32) -> StoryboardResult<Self> {
        if dst_width == 0 || dst_height == 0 {
            return Err(StoryboardError::raster(format!(
                "blit destination must be non-empty, got {dst_width}x{dst_height}"
            )));
        }
        let region = self.crop(src)?;
        if (src.width, src.height) == (dst_width, dst_height) {
            return Ok(region);
        }
        let img = region.into_rgba_image()?;
        let resized = imageops::resize(&img, dst_width, dst_height, FilterType::Triangle);
        Ok(Self::from_rgba_image(resized))
    }

    /// Downscale to `target_width`, keeping the aspect ratio. Images already at or below the
    /// target are returned unchanged (never upsampled).
    pub fn downscaled_to_width(&self, target_width: u32) -> StoryboardResult<Self> {
        if target_width == 0 {
            return Err(StoryboardError::validation("target width must be > 0"));
        }
        if self.width <= target_width || self.height == 0 {
            return Ok(self.clone());
        }
        let height = (f64::from(self.height) * f64::from(target_width) / f64::from(self.width))
            .round()
            .max(1.0) as u32;
        self.blit(self.bounds(), target_width, height)
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    pub fn into_rgba_image(self) -> StoryboardResult<image::RgbaImage> {
        let (width, height) = (self.width, self.height);
        image::RgbaImage::from_raw(width, height, self.data).ok_or_else(|| {
            StoryboardError::raster(format!("rgba buffer does not fit {width}x{height}"))
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    fn check_rect(&self, rect: PixelRect) -> StoryboardResult<()> {
        if rect.is_empty() {
            return Err(StoryboardError::raster(format!(
                "region {}x{} at ({}, {}) is empty",
                rect.width, rect.height, rect.x, rect.y
            )));
        }
        if rect.right() > self.width || rect.bottom() > self.height {
            return Err(StoryboardError::raster(format!(
                "region {}x{} at ({}, {}) exceeds {}x{} image",
                rect.width, rect.height, rect.x, rect.y, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Summed absolute difference of the RGB channels (alpha ignored).
pub fn rgb_distance(a: [u8; 4], b: [u8; 4]) -> u32 {
    a.iter()
        .zip(b.iter())
        .take(3)
        .map(|(&x, &y)| u32::from(x.abs_diff(y)))
        .sum()
}

fn byte_len(width: u32, height: u32) -> StoryboardResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| StoryboardError::raster("rgba buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
