use crate::foundation::core::{Affine, Canvas, Rect};

/// Source rectangle that fills a target of aspect `target_aspect` (width / height) without
/// letterboxing.
///
/// Sources wider than the target keep their full height and are centered horizontally; all other
/// sources keep their full width and are centered vertically.
pub fn cover_crop(src_width: u32, src_height: u32, target_aspect: f64) -> Rect {
    let sw = f64::from(src_width);
    let sh = f64::from(src_height);
    let src_aspect = sw / sh;

    if src_aspect > target_aspect {
        let crop_w = sh * target_aspect;
        let x0 = (sw - crop_w) / 2.0;
        Rect::new(x0, 0.0, x0 + crop_w, sh)
    } else {
        let crop_h = sw / target_aspect;
        let y0 = (sh - crop_h) / 2.0;
        Rect::new(0.0, y0, sw, y0 + crop_h)
    }
}

/// Transform mapping `crop` (source pixel space) onto the whole `canvas`.
pub fn cover_transform(crop: Rect, canvas: Canvas) -> Affine {
    let sx = f64::from(canvas.width) / crop.width();
    let sy = f64::from(canvas.height) / crop.height();
    Affine::scale_non_uniform(sx, sy) * Affine::translate((-crop.x0, -crop.y0))
}

#[cfg(test)]
#[path = "../../tests/unit/render/crop.rs"]
mod tests;
