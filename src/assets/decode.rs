use anyhow::Context;

use crate::assets::raster::RasterImage;
use crate::foundation::error::BoothResult;

/// Decode encoded image bytes (PNG, JPEG, ...) into a premultiplied raster.
pub fn decode_image(bytes: &[u8]) -> BoothResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    RasterImage::from_rgba_image(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
