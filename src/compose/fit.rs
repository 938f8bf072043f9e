use crate::foundation::core::{FitStrategy, Rect};

/// Place a `src_w x src_h` image relative to `dst` according to `fit`.
///
/// The returned rectangle keeps the source aspect ratio and is centered on `dst`. For
/// [`FitStrategy::Cover`] it contains `dst` (the overflow is cropped when drawing); for
/// [`FitStrategy::Contain`] it is contained in `dst`.
pub fn fit_rect(fit: FitStrategy, src_w: f64, src_h: f64, dst: Rect) -> Rect {
    let (x, y, w, h) = (dst.x0, dst.y0, dst.width(), dst.height());
    let src_ratio = src_w / src_h;
    let dst_ratio = w / h;
    let wider = src_ratio > dst_ratio;

    let (draw_w, draw_h) = match (fit, wider) {
        (FitStrategy::Cover, true) | (FitStrategy::Contain, false) => (h * src_ratio, h),
        (FitStrategy::Cover, false) | (FitStrategy::Contain, true) => (w, w / src_ratio),
    };

    let dx = x + (w - draw_w) / 2.0;
    let dy = y + (h - draw_h) / 2.0;
    Rect::new(dx, dy, dx + draw_w, dy + draw_h)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/fit.rs"]
mod tests;
