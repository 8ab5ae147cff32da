use crate::foundation::core::PixelRect;

/// Width/height ratios closer than this are treated as already matching.
pub const ASPECT_EPSILON: f64 = 0.01;

/// Centered crop of a raw cell plus the output size that exactly matches the target ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AspectCrop {
    pub source: PixelRect,
    pub out_width: u32,
    pub out_height: u32,
}

/// Center-crop `raw` to `target` (width / height).
///
/// A too-wide cell keeps its height and loses width, a too-tall cell keeps its width and loses
/// height. The output size is derived from the kept axis so the final cell is exactly at the
/// target ratio even when the source rectangle is off by a rounding pixel.
pub fn correct_aspect(raw: PixelRect, target: f64) -> AspectCrop {
    let (w, h) = (f64::from(raw.width), f64::from(raw.height));
    if raw.is_empty() || !target.is_finite() || target <= 0.0 {
        return AspectCrop {
            source: raw,
            out_width: raw.width,
            out_height: raw.height,
        };
    }

    let current = w / h;
    if (current - target).abs() <= ASPECT_EPSILON {
        return AspectCrop {
            source: raw,
            out_width: raw.width,
            out_height: round_px(w / target),
        };
    }

    if current > target {
        let crop_w = round_px(h * target).min(raw.width);
        let x = raw.x + (raw.width - crop_w) / 2;
        AspectCrop {
            source: PixelRect::new(x, raw.y, crop_w, raw.height),
            out_width: round_px(h * target),
            out_height: raw.height,
        }
    } else {
        let crop_h = round_px(w / target).min(raw.height);
        let y = raw.y + (raw.height - crop_h) / 2;
        AspectCrop {
            source: PixelRect::new(raw.x, y, raw.width, crop_h),
            out_width: raw.width,
            out_height: round_px(w / target),
        }
    }
}

fn round_px(v: f64) -> u32 {
    v.round().max(1.0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/split/aspect.rs"]
mod tests;
