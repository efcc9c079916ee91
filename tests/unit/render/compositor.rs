use super::*;
use crate::{
    assets::decode::decode_image,
    export::settings::{ENV_FONT_DIR, ExportSettings},
    project::model::{AspectRatio, TextStyle},
};

fn solid_image(w: u32, h: u32, rgba: [u8; 4]) -> PreparedImage {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut png = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut png, image::ImageFormat::Png)
        .unwrap();
    decode_image(png.get_ref()).unwrap()
}

fn near(px: Option<[u8; 4]>, expected: [u8; 4]) -> bool {
    px.is_some_and(|p| p.iter().zip(expected).all(|(&a, b)| a.abs_diff(b) <= 2))
}

fn plain_style() -> ResolvedTextStyle {
    TextStyle::default().resolve().unwrap()
}

/// Compositor over the host's fonts; text tests fail rather than pass vacuously without one.
fn host_compositor() -> SlideCompositor {
    let fonts = ExportSettings::default().with_env_overrides().load_fonts();
    assert!(
        fonts.face_count() > 0,
        "text rendering tests need a font: install system fonts or point {ENV_FONT_DIR} at a \
         directory of .ttf/.otf files"
    );
    SlideCompositor::new(fonts)
}

fn compose_text(style: &ResolvedTextStyle, photo: [u8; 4], text: &str) -> FrameRGBA {
    let image = solid_image(16, 16, photo);
    host_compositor()
        .compose(&SlideScene {
            image: &image,
            text,
            position: TextPosition::new(50.0, 50.0),
            style,
            canvas: AspectRatio::Square.canvas(),
        })
        .unwrap()
}

fn pixels(frame: &FrameRGBA) -> impl Iterator<Item = (u32, u32, [u8; 4])> + '_ {
    (0..frame.height).flat_map(move |y| {
        (0..frame.width).filter_map(move |x| frame.pixel(x, y).map(|p| (x, y, p)))
    })
}

fn is_white(p: [u8; 4]) -> bool {
    p[..3].iter().all(|&c| c >= 250)
}

/// Inclusive bounding box of the pixels matching `pred`.
fn bbox(frame: &FrameRGBA, pred: impl Fn([u8; 4]) -> bool) -> Option<(u32, u32, u32, u32)> {
    pixels(frame)
        .filter(|&(_, _, p)| pred(p))
        .fold(None, |acc, (x, y, _)| {
            Some(match acc {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            })
        })
}

#[test]
fn photo_only_slides_fill_the_canvas() {
    let image = solid_image(64, 48, [200, 30, 40, 255]);
    let style = plain_style();
    let mut compositor = SlideCompositor::new(FontRegistry::new());

    for aspect in [AspectRatio::Square, AspectRatio::Portrait] {
        let canvas = aspect.canvas();
        let frame = compositor
            .compose(&SlideScene {
                image: &image,
                text: "   ",
                position: TextPosition::new(50.0, 50.0),
                style: &style,
                canvas,
            })
            .unwrap();

        assert_eq!((frame.width, frame.height), (canvas.width, canvas.height));
        assert_eq!(frame.data.len(), (canvas.width * canvas.height * 4) as usize);
        assert!(frame.premultiplied);
        assert!(frame.data.chunks_exact(4).all(|px| px[3] >= 253));
        assert!(near(
            frame.pixel(canvas.width / 2, canvas.height / 2),
            [200, 30, 40, 255]
        ));
    }
}

#[test]
fn wide_photo_is_cropped_to_its_center() {
    // Left third blue, middle third green, right third red; a square crop keeps the middle.
    let mut img = image::RgbaImage::new(90, 30);
    for (x, _, px) in img.enumerate_pixels_mut() {
        *px = match x {
            0..30 => image::Rgba([0, 0, 255, 255]),
            30..60 => image::Rgba([0, 255, 0, 255]),
            _ => image::Rgba([255, 0, 0, 255]),
        };
    }
    let mut png = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut png, image::ImageFormat::Png)
        .unwrap();
    let image = decode_image(png.get_ref()).unwrap();

    let style = plain_style();
    let frame = SlideCompositor::new(FontRegistry::new())
        .compose(&SlideScene {
            image: &image,
            text: "",
            position: TextPosition::new(50.0, 50.0),
            style: &style,
            canvas: AspectRatio::Square.canvas(),
        })
        .unwrap();

    assert!(near(frame.pixel(540, 540), [0, 255, 0, 255]));
    assert!(near(frame.pixel(180, 100), [0, 255, 0, 255]));
    assert!(near(frame.pixel(900, 1000), [0, 255, 0, 255]));
}

#[test]
fn text_without_any_font_is_a_render_error() {
    let image = solid_image(8, 8, [0, 0, 0, 255]);
    let style = plain_style();
    let err = SlideCompositor::new(FontRegistry::new())
        .compose(&SlideScene {
            image: &image,
            text: "hello",
            position: TextPosition::new(50.0, 50.0),
            style: &style,
            canvas: AspectRatio::Square.canvas(),
        })
        .unwrap_err();
    assert!(matches!(err, CarouselError::Render(_)));
}

#[test]
fn text_is_drawn_around_its_anchor() {
    let mut compositor = host_compositor();
    let image = solid_image(16, 16, [0, 0, 0, 255]);
    let mut style = plain_style();
    style.shadow = None;

    let frame = compositor
        .compose(&SlideScene {
            image: &image,
            text: "HELLO",
            position: TextPosition::new(50.0, 20.0),
            style: &style,
            canvas: AspectRatio::Square.canvas(),
        })
        .unwrap();

    let bright_rows: Vec<u32> = (0..frame.height)
        .filter(|&y| {
            (0..frame.width).any(|x| frame.pixel(x, y).is_some_and(|p| p[0] > 128))
        })
        .collect();
    assert!(!bright_rows.is_empty());
    let mid = (bright_rows[0] + bright_rows[bright_rows.len() - 1]) / 2;
    assert!((mid as i64 - 216).abs() < 60, "text centered near y=216, got {mid}");
    assert!(near(frame.pixel(540, 900), [0, 0, 0, 255]));
}

#[test]
fn background_pad_surrounds_the_text() {
    let mut compositor = host_compositor();
    let image = solid_image(16, 16, [0, 0, 0, 255]);
    let mut style = plain_style();
    style.shadow = None;
    style.background = Some((Rgba8::rgb(0, 0, 255), 0.0));

    let frame = compositor
        .compose(&SlideScene {
            image: &image,
            text: "HI",
            position: TextPosition::new(50.0, 50.0),
            style: &style,
            canvas: AspectRatio::Square.canvas(),
        })
        .unwrap();

    let blue = frame
        .data
        .chunks_exact(4)
        .filter(|p| p[2] == 255 && p[0] == 0)
        .count();
    assert!(blue > 0);
    assert!(near(frame.pixel(5, 5), [0, 0, 0, 255]));
}

#[test]
fn stroke_and_shadow_are_separate_passes() {
    let mut style = plain_style();
    style.stroke = Some((Rgba8::rgb(0, 0, 0), 3.0));
    style.shadow = Some((Rgba8::rgb(0, 0, 0), 4.0));

    let passes = ink_passes(&style);
    assert_eq!(passes.len(), 2);
    assert!(matches!(passes[0].kind, InkKind::Stroke(w) if w == 6.0));
    assert!(matches!(passes[1].kind, InkKind::Fill));
    assert!(passes.iter().all(|p| p.shadow == Some((Rgba8::rgb(0, 0, 0), 8.0))));

    style.stroke = None;
    style.shadow = None;
    let passes = ink_passes(&style);
    assert_eq!(passes.len(), 1);
    assert!(passes[0].shadow.is_none());
}

#[test]
fn tint_uses_ink_coverage() {
    let ink = [255u8, 255, 255, 255, 0, 0, 0, 0, 128, 128, 128, 128];
    let out = tint_coverage(&ink, Rgba8::rgb(255, 0, 0));
    assert_eq!(&out[0..4], &[255, 0, 0, 255]);
    assert_eq!(&out[4..8], &[0, 0, 0, 0]);
    assert_eq!(&out[8..12], &[128, 0, 0, 128]);
}

#[test]
fn shadow_sits_four_pixels_below_the_fill() {
    let mut style = plain_style();
    style.color = Rgba8::rgb(255, 255, 255);
    style.shadow = Some((Rgba8::rgb(255, 0, 0), 0.0));

    let frame = compose_text(&style, [0, 0, 0, 255], "HELLO");

    let red: Vec<(u32, u32)> = pixels(&frame)
        .filter(|&(_, _, p)| p[0] >= 250 && p[1] <= 5 && p[2] <= 5)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!red.is_empty(), "no shadow pixels");
    assert!(pixels(&frame).any(|(_, _, p)| is_white(p)));
    for (x, y) in red {
        let above = frame.pixel(x, y - SHADOW_OFFSET_Y as u32).unwrap();
        assert!(
            above[1] >= 240,
            "shadow at ({x},{y}) has no fill 4px above it: {above:?}"
        );
    }

    let (_, white_top, _, white_bottom) = bbox(&frame, is_white).unwrap();
    let (_, red_top, _, red_bottom) =
        bbox(&frame, |p| p[0] >= 250 && p[1] <= 5 && p[2] <= 5).unwrap();
    assert!(red_top > white_top);
    assert_eq!(red_bottom, white_bottom + SHADOW_OFFSET_Y as u32);
}

#[test]
fn shadow_blur_spreads_the_tint() {
    let reddish = |frame: &FrameRGBA| {
        pixels(frame)
            .filter(|&(_, _, p)| p[0] > 8 && u16::from(p[0]) > u16::from(p[1]) + 8)
            .count()
    };
    let mut style = plain_style();
    style.shadow = Some((Rgba8::rgb(255, 0, 0), 0.0));
    let sharp = reddish(&compose_text(&style, [0, 0, 0, 255], "HELLO"));
    style.shadow = Some((Rgba8::rgb(255, 0, 0), 6.0));
    let soft = reddish(&compose_text(&style, [0, 0, 0, 255], "HELLO"));

    assert!(sharp > 0);
    assert!(soft > sharp, "blurred shadow covers {soft} px, sharp {sharp} px");
}

#[test]
fn stroke_outlines_without_covering_the_fill() {
    let mut style = plain_style();
    style.shadow = None;
    let plain = compose_text(&style, [0, 0, 0, 255], "HELLO");
    style.stroke = Some((Rgba8::rgb(0, 255, 0), 5.0));
    let stroked = compose_text(&style, [0, 0, 0, 255], "HELLO");

    let is_green = |p: [u8; 4]| p[1] >= 250 && p[0] <= 5 && p[2] <= 5;
    let white_plain = pixels(&plain).filter(|&(_, _, p)| is_white(p)).count();
    let white_stroked = pixels(&stroked).filter(|&(_, _, p)| is_white(p)).count();
    assert!(white_plain > 0);
    assert_eq!(white_stroked, white_plain, "stroke drew over the fill");
    assert!(!pixels(&plain).any(|(_, _, p)| is_green(p)));

    let (gx0, gy0, gx1, gy1) = bbox(&stroked, is_green).unwrap();
    let (wx0, wy0, wx1, wy1) = bbox(&stroked, is_white).unwrap();
    assert!(gx0 < wx0 && gy0 < wy0 && gx1 > wx1 && gy1 > wy1);
}

#[test]
fn effects_off_leave_only_photo_and_plain_fill() {
    let photo = [100, 100, 100, 255];
    let mut style = plain_style();
    style.shadow = None;
    style.stroke = None;
    style.background = None;
    let frame = compose_text(&style, photo, "HELLO");

    assert!(pixels(&frame).any(|(_, _, p)| is_white(p)));
    for (x, y, p) in pixels(&frame) {
        // White over gray only brightens and never tints.
        let neutral = p[0].abs_diff(p[1]) <= 1 && p[1].abs_diff(p[2]) <= 1;
        assert!(neutral && p[0] >= 98 && p[3] == 255, "({x},{y}) = {p:?}");
    }
    let (_, top, _, bottom) = bbox(&frame, |p| p[0] > 102).unwrap();
    assert!(near(frame.pixel(540, top.saturating_sub(30)), photo));
    assert!(near(frame.pixel(540, bottom + 30), photo));

    // The default shadow does darken the same photo.
    let shadowed = compose_text(&plain_style(), photo, "HELLO");
    assert!(pixels(&shadowed).any(|(_, _, p)| p[0] < 90));
}

#[test]
fn overflowing_text_is_clipped_to_the_canvas() {
    let mut style = plain_style();
    style.font_size = 72.0;
    style.stroke = Some((Rgba8::rgb(0, 0, 0), 2.0));
    let text = "carousel ".repeat(230);

    let frame = compose_text(&style, [0, 0, 0, 255], &text);
    assert_eq!((frame.width, frame.height), (1080, 1080));
    assert!(pixels(&frame).any(|(_, _, p)| is_white(p)));
}
