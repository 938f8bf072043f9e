use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// A rendered strip as RGBA8 pixels.
///
/// Strips are **premultiplied alpha**; the flag makes this explicit at API boundaries. Encoders
/// convert back to straight alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripFrame {
    /// Strip width in pixels.
    pub width: u32,
    /// Strip height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl StripFrame {
    /// Pixel at `(x, y)` as stored, or `None` outside the strip.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.data[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Straight-alpha copy as an `image` buffer.
    pub fn to_rgba_image(&self) -> BoothResult<image::RgbaImage> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| BoothError::encode("strip buffer does not match its dimensions"))
    }

    /// Encode the strip as a PNG byte stream.
    pub fn encode_png(&self) -> BoothResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| BoothError::encode(format!("encode strip png: {e}")))?;
        Ok(buf)
    }

    /// Encode the strip as PNG and write it to `path`, creating parent directories.
    pub fn write_png(&self, path: impl AsRef<Path>) -> BoothResult<()> {
        let path = path.as_ref();
        let bytes = self.encode_png()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/output.rs"]
mod tests;
