use crate::{
    foundation::{
        error::{CarouselError, CarouselResult},
        math::unpremul_u8,
    },
    render::FrameRGBA,
};

/// Encode a frame as an RGBA8 PNG, un-premultiplying first when needed.
pub fn encode_png(frame: &FrameRGBA) -> CarouselResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.width == 0 || frame.height == 0 {
        return Err(CarouselError::encode("frame must be non-empty"));
    }
    if frame.data.len() != expected {
        return Err(CarouselError::encode(
            "frame.data size mismatch with width*height*4",
        ));
    }

    let straight = if frame.premultiplied {
        let mut out = frame.data.clone();
        unpremultiply_in_place(&mut out);
        out
    } else {
        frame.data.clone()
    };

    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| CarouselError::encode("frame buffer does not fit its dimensions"))?;

    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| CarouselError::encode(format!("png encode failed: {e}")))?;
    Ok(out.into_inner())
}

fn unpremultiply_in_place(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = unpremul_u8(*c, a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
