use std::{fmt, str::FromStr};

use crate::foundation::error::{StoryboardError, StoryboardResult};

/// Target panel orientation for a contact sheet.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum AspectRatio {
    /// 16:9 panels; layouts prefer `cols >= rows`.
    #[default]
    #[serde(rename = "16:9", alias = "landscape")]
    Landscape,
    /// 9:16 panels; layouts prefer `rows >= cols`.
    #[serde(rename = "9:16", alias = "portrait")]
    Portrait,
}

impl AspectRatio {
    /// Width divided by height.
    pub fn ratio(self) -> f64 {
        match self {
            Self::Landscape => 16.0 / 9.0,
            Self::Portrait => 9.0 / 16.0,
        }
    }

    /// `true` for 16:9.
    pub fn is_landscape(self) -> bool {
        self == Self::Landscape
    }

    /// The `"16:9"` / `"9:16"` label used in prompts and serialized configs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AspectRatio {
    type Err = StoryboardError;

    fn from_str(s: &str) -> StoryboardResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "16:9" | "landscape" => Ok(Self::Landscape),
            "9:16" | "portrait" => Ok(Self::Portrait),
            other => Err(StoryboardError::validation(format!(
                "unknown aspect ratio '{other}' (expected 16:9 or 9:16)"
            ))),
        }
    }
}

/// Output resolution tier of the generated contact sheet.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Resolution {
    /// 1920x1080 (landscape) canvas.
    #[default]
    #[serde(rename = "2K", alias = "2k")]
    TwoK,
    /// 3840x2160 (landscape) canvas.
    #[serde(rename = "4K", alias = "4k")]
    FourK,
}

impl Resolution {
    /// All tiers, lowest first.
    pub const ALL: [Resolution; 2] = [Resolution::TwoK, Resolution::FourK];

    /// Bit-exact canvas size for this tier at `aspect`.
    pub fn canvas(self, aspect: AspectRatio) -> Canvas {
        let (width, height) = match (self, aspect) {
            (Self::TwoK, AspectRatio::Landscape) => (1920, 1080),
            (Self::TwoK, AspectRatio::Portrait) => (1080, 1920),
            (Self::FourK, AspectRatio::Landscape) => (3840, 2160),
            (Self::FourK, AspectRatio::Portrait) => (2160, 3840),
        };
        Canvas { width, height }
    }

    /// Maximum number of scenes a single sheet may carry at this tier.
    pub fn scene_limit(self) -> u32 {
        match self {
            Self::TwoK => 12,
            Self::FourK => 48,
        }
    }

    /// The `"2K"` / `"4K"` label.
    pub fn label(self) -> &'static str {
        match self {
            Self::TwoK => "2K",
            Self::FourK => "4K",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Resolution {
    type Err = StoryboardError;

    fn from_str(s: &str) -> StoryboardResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "2K" => Ok(Self::TwoK),
            "4K" => Ok(Self::FourK),
            other => Err(StoryboardError::validation(format!(
                "unknown resolution '{other}' (expected 2K or 4K)"
            ))),
        }
    }
}

/// Pixel dimensions of a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Axis-aligned integer rectangle in pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge, inclusive.
    pub x: u32,
    /// Top edge, inclusive.
    pub y: u32,
    /// Width in pixels; zero makes the rect empty.
    pub width: u32,
    /// Height in pixels; zero makes the rect empty.
    pub height: u32,
}

impl PixelRect {
    /// Rect with its top-left corner at `(x, y)`.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Same size, moved by `(dx, dy)`; coordinates saturate at `u32::MAX`.
    pub fn offset(self, dx: u32, dy: u32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// Shrink by `round(size * fraction)` on every side, never below one pixel per axis.
    pub fn inset(self, fraction: f64) -> Self {
        fn shrink(origin: u32, size: u32, fraction: f64) -> (u32, u32) {
            if size <= 1 {
                return (origin, size);
            }
            let margin = (f64::from(size) * fraction).round().max(0.0) as u32;
            let margin = margin.min((size - 1) / 2);
            (origin + margin, size - 2 * margin)
        }

        let (x, width) = shrink(self.x, self.width, fraction);
        let (y, height) = shrink(self.y, self.height, fraction);
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
