use std::sync::Arc;

use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Immutable raster image in premultiplied RGBA8 form.
///
/// Pixel storage is shared, so clones are cheap. Captured frames and overlays are both rasters;
/// a retake replaces the raster held by a slot rather than mutating it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

/// Still frame captured from a [`crate::FrameSource`].
pub type CapturedFrame = RasterImage;

/// Decoded decorative overlay drawn above the captured frames.
pub type OverlayImage = RasterImage;

impl RasterImage {
    /// Build a raster from straight-alpha, row-major RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> BoothResult<Self> {
        check_dims(width, height, rgba8.len())?;
        premultiply_rgba8_in_place(&mut rgba8);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8),
        })
    }

    /// Build a raster from an `image` RGBA buffer (straight alpha).
    pub fn from_rgba_image(img: image::RgbaImage) -> BoothResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_rgba8(width, height, img.into_raw())
    }

    /// Build a raster filled with one straight-alpha color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> BoothResult<Self> {
        let len = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(len * 4);
        for _ in 0..len {
            data.extend_from_slice(&rgba);
        }
        Self::from_rgba8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Aspect ratio `width / height`.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Premultiplied RGBA8 bytes, row-major, tightly packed.
    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.rgba8_premul[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Horizontally mirrored copy, as shown by a front-facing camera preview.
    pub fn mirrored(&self) -> Self {
        let row_len = (self.width as usize) * 4;
        let mut out = Vec::with_capacity(self.rgba8_premul.len());
        for row in self.rgba8_premul.chunks_exact(row_len) {
            for px in row.chunks_exact(4).rev() {
                out.extend_from_slice(px);
            }
        }
        Self {
            width: self.width,
            height: self.height,
            rgba8_premul: Arc::new(out),
        }
    }
}

fn check_dims(width: u32, height: u32, len: usize) -> BoothResult<()> {
    if width == 0 || height == 0 {
        return Err(BoothError::validation(format!(
            "raster must have non-zero dimensions, got {width}x{height}"
        )));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BoothError::validation("raster size overflow"))?;
    if len != expected {
        return Err(BoothError::validation(format!(
            "raster buffer has {len} bytes, expected {expected} for {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/raster.rs"]
mod tests;
