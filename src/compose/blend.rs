use crate::assets::raster::RasterImage;
use crate::foundation::core::{Canvas, Rect};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Draw `img` stretched over `placed`, touching only pixels whose centers lie inside `clip`.
///
/// `dst` is a premultiplied RGBA8 buffer of `canvas` size. Sampling is bilinear with edge clamping.
pub fn draw_image(dst: &mut [u8], canvas: Canvas, img: &RasterImage, placed: Rect, clip: Rect) {
    let visible = placed.intersect(clip).intersect(canvas.rect());
    if visible.width() <= 0.0 || visible.height() <= 0.0 {
        return;
    }

    let (cols_start, cols_end) = pixel_span(visible.x0, visible.x1, canvas.width);
    let (rows_start, rows_end) = pixel_span(visible.y0, visible.y1, canvas.height);
    if cols_start >= cols_end || rows_start >= rows_end {
        return;
    }

    let sx_scale = f64::from(img.width()) / placed.width();
    let sy_scale = f64::from(img.height()) / placed.height();
    let cols: Vec<Tap> = (cols_start..cols_end)
        .map(|px| Tap::new((f64::from(px) + 0.5 - placed.x0) * sx_scale - 0.5, img.width()))
        .collect();

    let stride = canvas.width as usize * 4;
    for py in rows_start..rows_end {
        let row = Tap::new((f64::from(py) + 0.5 - placed.y0) * sy_scale - 0.5, img.height());
        let line = &mut dst[py as usize * stride..(py as usize + 1) * stride];
        for (px, col) in (cols_start..cols_end).zip(&cols) {
            let src = sample_bilinear(img, col, &row);
            let idx = px as usize * 4;
            let d = [line[idx], line[idx + 1], line[idx + 2], line[idx + 3]];
            line[idx..idx + 4].copy_from_slice(&over(d, src));
        }
    }
}

/// Pixel indices `[start, end)` whose centers fall in `[lo, hi)`, clamped to `[0, limit)`.
fn pixel_span(lo: f64, hi: f64, limit: u32) -> (u32, u32) {
    let clamp = |v: f64| v.clamp(0.0, f64::from(limit)) as u32;
    (clamp((lo - 0.5).ceil()), clamp((hi - 0.5).ceil()))
}

/// Two neighbouring source indices and the weight of the second one.
struct Tap {
    i0: u32,
    i1: u32,
    t: f32,
}

impl Tap {
    fn new(coord: f64, len: u32) -> Self {
        let max = f64::from(len - 1);
        let c = coord.clamp(0.0, max);
        let i0 = c.floor() as u32;
        let i1 = (i0 + 1).min(len - 1);
        Self {
            i0,
            i1,
            t: (c - f64::from(i0)) as f32,
        }
    }
}

fn sample_bilinear(img: &RasterImage, col: &Tap, row: &Tap) -> PremulRgba8 {
    let data = img.rgba8_premul();
    let w = img.width() as usize;
    let at = |x: u32, y: u32| (y as usize * w + x as usize) * 4;

    let p00 = at(col.i0, row.i0);
    let p10 = at(col.i1, row.i0);
    let p01 = at(col.i0, row.i1);
    let p11 = at(col.i1, row.i1);

    let mut out = [0u8; 4];
    for (c, o) in out.iter_mut().enumerate() {
        let top = lerp(f32::from(data[p00 + c]), f32::from(data[p10 + c]), col.t);
        let bottom = lerp(f32::from(data[p01 + c]), f32::from(data[p11 + c]), col.t);
        *o = lerp(top, bottom, row.t).round().clamp(0.0, 255.0) as u8;
    }
    out
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/compose/blend.rs"]
mod tests;
