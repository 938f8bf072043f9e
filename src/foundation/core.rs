use crate::foundation::error::{BoothError, BoothResult};

pub use kurbo::{Point, Rect, Size};

/// Output strip dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> BoothResult<Self> {
        if width == 0 || height == 0 {
            return Err(BoothError::validation("strip width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Full-canvas rectangle in strip coordinates.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Number of bytes of a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Fixed destination rectangle for one captured frame, in strip coordinates.
///
/// Coordinates are fractional: the reference layout uses a 4:3 slot of `270 x 202.5`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Slot {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, must be finite and > 0.
    pub width: f64,
    /// Height, must be finite and > 0.
    pub height: f64,
}

impl Slot {
    /// Create a slot rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Slot as a `kurbo` rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Aspect ratio `width / height`.
    pub fn aspect_ratio(self) -> f64 {
        self.width / self.height
    }

    pub(crate) fn validate(self) -> BoothResult<()> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(BoothError::validation("slot coordinates must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(BoothError::validation("slot width and height must be > 0"));
        }
        Ok(())
    }
}

/// Rule for scaling a source image into a slot rectangle.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FitStrategy {
    /// Fill the whole slot, center-cropping the overflowing axis.
    #[default]
    Cover,
    /// Fit entirely inside the slot, centered, leaving symmetric margins on one axis.
    Contain,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
