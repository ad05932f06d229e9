//! Face texture compositing.
//!
//! Draws a fragment's settled images and overlay text onto the fixed-size
//! bake canvas. Images use cover fit: fill the canvas completely, preserve
//! aspect, clip the overflow.

use image::{imageops, Rgba, RgbaImage};

use crate::bake::font;
use crate::net::image::ImageData;

/// Neutral canvas background (#f0f0f0).
pub const BACKGROUND: Rgba<u8> = Rgba([240, 240, 240, 255]);
/// Overlay text color (#333).
pub const TEXT_COLOR: Rgba<u8> = Rgba([51, 51, 51, 255]);
/// Font scale; 5×7 glyphs at ×4 sit close to the reference's 24px type.
const TEXT_SCALE: u32 = 4;

/// Fresh canvas filled with the neutral background.
pub fn blank_canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, BACKGROUND)
}

/// Cover-fit placement: scaled size and top-left offset (may be negative,
/// the overflow is clipped at blit time).
pub fn cover_rect(
    canvas_w: u32,
    canvas_h: u32,
    image_w: u32,
    image_h: u32,
) -> (u32, u32, i64, i64) {
    let canvas_aspect = canvas_w as f32 / canvas_h as f32;
    let image_aspect = image_w as f32 / image_h.max(1) as f32;

    if image_aspect > canvas_aspect {
        // Relatively wider: scale to canvas height, center horizontally
        let dh = canvas_h;
        let dw = ((dh as f32 * image_aspect).round() as u32).max(1);
        let ox = (canvas_w as i64 - dw as i64) / 2;
        (dw, dh, ox, 0)
    } else {
        // Relatively taller: scale to canvas width, center vertically
        let dw = canvas_w;
        let dh = ((dw as f32 / image_aspect).round() as u32).max(1);
        let oy = (canvas_h as i64 - dh as i64) / 2;
        (dw, dh, 0, oy)
    }
}

/// Draw one settled image with cover fit.
pub fn draw_cover_image(canvas: &mut RgbaImage, img: &ImageData) {
    if img.width == 0 || img.height == 0 {
        draw_fallback_label(canvas);
        return;
    }
    let Some(buffer) = RgbaImage::from_raw(img.width, img.height, img.rgba.clone()) else {
        // Dimensions and pixel data disagree; treat like a decode failure
        draw_fallback_label(canvas);
        return;
    };

    let (dw, dh, ox, oy) = cover_rect(canvas.width(), canvas.height(), img.width, img.height);
    let scaled = imageops::resize(&buffer, dw, dh, imageops::FilterType::Triangle);

    blit_clipped(canvas, &scaled, ox, oy);
}

/// Centered label drawn in place of an image that failed to settle.
pub fn draw_fallback_label(canvas: &mut RgbaImage) {
    let y = canvas.height() as i32 / 2 - (font::GLYPH_H * TEXT_SCALE) as i32 / 2;
    font::draw_text_centered(
        canvas,
        canvas.width() as i32 / 2,
        y,
        "IMAGE ERROR",
        TEXT_SCALE,
        TEXT_COLOR,
    );
}

/// Stack overlay texts top-down at a fixed pitch, centered horizontally.
pub fn draw_overlay_texts(canvas: &mut RgbaImage, texts: &[String], top_offset: u32, pitch: u32) {
    let center_x = canvas.width() as i32 / 2;
    let mut y = top_offset as i32;
    for text in texts {
        font::draw_text_centered(canvas, center_x, y, text, TEXT_SCALE, TEXT_COLOR);
        y += pitch as i32;
    }
}

/// Source-over blit with clipping on every side.
fn blit_clipped(canvas: &mut RgbaImage, src: &RgbaImage, ox: i64, oy: i64) {
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
    for sy in 0..src.height() as i64 {
        let py = sy + oy;
        if py < 0 || py >= ch {
            continue;
        }
        for sx in 0..src.width() as i64 {
            let px = sx + ox;
            if px < 0 || px >= cw {
                continue;
            }
            let s = src.get_pixel(sx as u32, sy as u32);
            let d = canvas.get_pixel_mut(px as u32, py as u32);
            *d = blend(*d, *s);
        }
    }
}

fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let a = src[3] as u32;
    if a == 255 {
        return src;
    }
    let inv = 255 - a;
    Rgba([
        ((src[0] as u32 * a + dst[0] as u32 * inv) / 255) as u8,
        ((src[1] as u32 * a + dst[1] as u32 * inv) / 255) as u8,
        ((src[2] as u32 * a + dst[2] as u32 * inv) / 255) as u8,
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_scales_to_height_and_clips_sides() {
        // 2:1 image on the 4:3 reference canvas
        let (dw, dh, ox, oy) = cover_rect(1024, 768, 200, 100);
        assert_eq!(dh, 768);
        assert_eq!(dw, 1536);
        assert_eq!(ox, (1024 - 1536) / 2);
        assert_eq!(oy, 0);
    }

    #[test]
    fn tall_image_scales_to_width_and_clips_top_bottom() {
        let (dw, dh, ox, oy) = cover_rect(1024, 768, 100, 200);
        assert_eq!(dw, 1024);
        assert_eq!(dh, 2048);
        assert_eq!(ox, 0);
        assert_eq!(oy, (768 - 2048) / 2);
    }

    #[test]
    fn matching_aspect_fills_exactly() {
        let (dw, dh, ox, oy) = cover_rect(1024, 768, 512, 384);
        assert_eq!((dw, dh, ox, oy), (1024, 768, 0, 0));
    }

    #[test]
    fn cover_image_fills_every_pixel() {
        let mut canvas = blank_canvas(64, 48);
        let mut rgba = Vec::new();
        for _ in 0..(2 * 4) {
            rgba.extend_from_slice(&[10, 10, 10, 255]);
        }
        let img = ImageData {
            width: 2,
            height: 4,
            rgba,
        };
        draw_cover_image(&mut canvas, &img);
        // Tall source: width filled, vertical overflow clipped, so nothing
        // of the background remains
        assert!(canvas.pixels().all(|p| p[0] != BACKGROUND[0]));
    }

    #[test]
    fn fallback_label_marks_canvas() {
        let mut canvas = blank_canvas(1024, 768);
        draw_fallback_label(&mut canvas);
        let dark = canvas.pixels().filter(|p| p[0] == TEXT_COLOR[0]).count();
        assert!(dark > 0);
    }

    #[test]
    fn overlay_texts_stack_downward() {
        let mut canvas = blank_canvas(400, 300);
        let texts = vec!["AAA".to_string(), "BBB".to_string()];
        draw_overlay_texts(&mut canvas, &texts, 50, 40);

        let row_has_text = |y0: u32, y1: u32| {
            (y0..y1).any(|y| (0..400).any(|x| canvas.get_pixel(x, y)[0] == TEXT_COLOR[0]))
        };
        // First line occupies rows 50..78 (7 rows × scale 4), second 90..118
        assert!(row_has_text(50, 78));
        assert!(row_has_text(90, 118));
        assert!(!row_has_text(0, 50));
    }
}
