use crate::foundation::{
    error::{CarouselError, CarouselResult},
    math::mul_div255_u8,
};

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity multiplier.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Placement of a smaller premultiplied layer on a destination surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerPlacement {
    /// Destination width in pixels.
    pub dst_width: u32,
    /// Destination height in pixels.
    pub dst_height: u32,
    /// Layer width in pixels.
    pub src_width: u32,
    /// Layer height in pixels.
    pub src_height: u32,
    /// Destination x of the layer's left edge (may be negative).
    pub x: i64,
    /// Destination y of the layer's top edge (may be negative).
    pub y: i64,
}

/// Composite `src` over `dst` at the given placement, clipping to the destination.
pub fn over_layer_in_place(dst: &mut [u8], src: &[u8], at: LayerPlacement) -> CarouselResult<()> {
    let dst_len = at.dst_width as usize * at.dst_height as usize * 4;
    let src_len = at.src_width as usize * at.src_height as usize * 4;
    if dst.len() != dst_len || src.len() != src_len {
        return Err(CarouselError::render(
            "over_layer_in_place expects buffers matching their declared sizes",
        ));
    }

    let x0 = at.x.max(0);
    let y0 = at.y.max(0);
    let x1 = (at.x + i64::from(at.src_width)).min(i64::from(at.dst_width));
    let y1 = (at.y + i64::from(at.src_height)).min(i64::from(at.dst_height));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    for dy in y0..y1 {
        let sy = (dy - at.y) as usize;
        for dx in x0..x1 {
            let sx = (dx - at.x) as usize;
            let si = (sy * at.src_width as usize + sx) * 4;
            if src[si + 3] == 0 {
                continue;
            }
            let di = (dy as usize * at.dst_width as usize + dx as usize) * 4;
            let out = over(
                [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]],
                [src[si], src[si + 1], src[si + 2], src[si + 3]],
                1.0,
            );
            dst[di..di + 4].copy_from_slice(&out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
