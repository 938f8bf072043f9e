use crate::assets::raster::{CapturedFrame, OverlayImage};
use crate::compose::blend::draw_image;
use crate::compose::fit::fit_rect;
use crate::compose::output::StripFrame;
use crate::config::booth::StripLayout;

/// Render captured frames and an overlay into a strip.
///
/// Frames are drawn in slot order, each fitted into its slot with the layout's fit strategy and
/// cropped to the slot. The overlay is then stretched over the whole strip so its printed border
/// sits above the photos. Empty slots stay transparent, and so does everything when no overlay
/// has been loaded yet.
///
/// `frames[i]` belongs to `layout.slots[i]`; entries without a matching slot are ignored.
/// Rendering is pure: identical inputs produce identical pixels.
#[tracing::instrument(level = "debug", skip_all, fields(
    width = layout.canvas.width,
    height = layout.canvas.height,
    fit = ?layout.fit,
))]
pub fn render(
    layout: &StripLayout,
    frames: &[Option<CapturedFrame>],
    overlay: Option<&OverlayImage>,
) -> StripFrame {
    let canvas = layout.canvas;
    let mut data = vec![0u8; canvas.rgba8_len()];

    for (slot, frame) in layout.slots.iter().zip(frames) {
        let Some(frame) = frame else {
            continue;
        };
        let dst = slot.rect();
        let placed = fit_rect(
            layout.fit,
            f64::from(frame.width()),
            f64::from(frame.height()),
            dst,
        );
        draw_image(&mut data, canvas, frame, placed, dst);
    }

    if let Some(overlay) = overlay {
        draw_image(&mut data, canvas, overlay, canvas.rect(), canvas.rect());
    }

    StripFrame {
        width: canvas.width,
        height: canvas.height,
        data,
        premultiplied: true,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
