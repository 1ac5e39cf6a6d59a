use image::{Rgba, RgbaImage};
use std::path::Path;
use tracing::debug;

use crate::error::IconError;
use crate::font::{GlyphFont, GlyphMask};

/// Icon sizes generated by the driver, in order.
pub const ICON_SIZES: [u32; 3] = [16, 48, 128];

/// Below this size the glyph would be an unreadable smudge, so it is skipped.
pub const GLYPH_MIN_SIZE: u32 = 32;
pub const GLYPH: char = 'A';

pub const EGG_FILL: Rgba<u8> = Rgba([76, 175, 80, 255]);
pub const EGG_OUTLINE: Rgba<u8> = Rgba([27, 94, 32, 255]);
pub const HIGHLIGHT: Rgba<u8> = Rgba([255, 255, 255, 76]);
pub const GLYPH_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// How a shape's pixels combine with what is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Over,
    /// Write the colour as-is, alpha included.
    Replace,
}

/// Layout of the egg for a given icon size. Boxes are inclusive pixel bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EggGeometry {
    pub margin: i32,
    pub width: i32,
    pub height: i32,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub stroke: i32,
}

impl EggGeometry {
    pub fn for_size(size: u32) -> Self {
        let size = size as i32;
        let margin = size / 8;
        let width = size - 2 * margin;
        let height = (width as f32 * 1.25).round() as i32;
        let left = margin;
        let top = (size - height) / 2;
        Self {
            margin,
            width,
            height,
            left,
            top,
            right: left + width,
            bottom: top + height,
            stroke: (size / 32).max(1),
        }
    }

    pub fn bounds(&self) -> [i32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    /// Highlight ellipse box, up and left of the egg's centre.
    pub fn highlight(&self) -> [i32; 4] {
        let left = self.left + self.width / 4;
        let top = self.top + self.height / 4;
        [left, top, left + self.width / 4, top + self.height / 3]
    }
}

/// Render the icon for `size` on a transparent canvas.
pub fn render(size: u32, font: &GlyphFont) -> Result<RgbaImage, IconError> {
    if size == 0 {
        return Err(IconError::InvalidSize(size));
    }
    let mut canvas = RgbaImage::from_pixel(size, size, TRANSPARENT);
    let egg = EggGeometry::for_size(size);
    debug!("size {}: {:?}", size, egg);

    draw_ellipse(&mut canvas, egg.bounds(), EGG_FILL, Some((EGG_OUTLINE, egg.stroke)), Paint::Over);
    // the highlight leaves a translucent spot in the egg
    draw_ellipse(&mut canvas, egg.highlight(), HIGHLIGHT, None, Paint::Replace);

    if size >= GLYPH_MIN_SIZE {
        if let Some(mask) = font.rasterize(GLYPH, (size / 2) as f32) {
            let (x, y) = glyph_origin(size, &mask);
            for (dx, dy) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
                stamp_glyph(&mut canvas, &mask, x + dx, y + dy, EGG_OUTLINE);
            }
            stamp_glyph(&mut canvas, &mask, x, y, GLYPH_FILL);
        } else {
            debug!("font has no outline for {:?}, skipping glyph", GLYPH);
        }
    }

    Ok(canvas)
}

/// Same as [`render`], resolving the glyph font from `font_path` first.
pub fn render_with_font_path(size: u32, font_path: &Path) -> Result<RgbaImage, IconError> {
    let font = GlyphFont::load(font_path)?;
    render(size, &font)
}

/// Top-left corner of the glyph's ink box: centred, then nudged down by size/16.
pub fn glyph_origin(size: u32, mask: &GlyphMask) -> (i32, i32) {
    let size = size as i32;
    let x = (size - mask.width as i32) / 2;
    let y = (size - mask.height as i32) / 2 + size / 16;
    (x, y)
}

fn draw_ellipse(
    canvas: &mut RgbaImage,
    bbox: [i32; 4],
    fill: Rgba<u8>,
    outline: Option<(Rgba<u8>, i32)>,
    paint: Paint,
) {
    let [x0, y0, x1, y1] = bbox;
    if x1 < x0 || y1 < y0 {
        return;
    }
    let cx = (x0 + x1 + 1) as f32 * 0.5;
    let cy = (y0 + y1 + 1) as f32 * 0.5;
    let rx = (x1 - x0 + 1) as f32 * 0.5;
    let ry = (y1 - y0 + 1) as f32 * 0.5;

    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    for y in y0.max(0)..=y1.min(h - 1) {
        for x in x0.max(0)..=x1.min(w - 1) {
            // sample at pixel centres
            let px = x as f32 + 0.5 - cx;
            let py = y as f32 + 0.5 - cy;
            if !in_ellipse(px, py, rx, ry) {
                continue;
            }
            let color = match outline {
                Some((stroke_color, width)) => {
                    let (irx, iry) = (rx - width as f32, ry - width as f32);
                    if irx > 0.0 && iry > 0.0 && in_ellipse(px, py, irx, iry) {
                        fill
                    } else {
                        stroke_color
                    }
                }
                None => fill,
            };
            let dst = canvas.get_pixel_mut(x as u32, y as u32);
            *dst = match paint {
                Paint::Over => blend(*dst, color),
                Paint::Replace => color,
            };
        }
    }
}

fn stamp_glyph(canvas: &mut RgbaImage, mask: &GlyphMask, x: i32, y: i32, color: Rgba<u8>) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    for my in 0..mask.height {
        for mx in 0..mask.width {
            let coverage = mask.alpha(mx, my);
            let (tx, ty) = (x + mx as i32, y + my as i32);
            if coverage == 0 || tx < 0 || ty < 0 || tx >= w || ty >= h {
                continue;
            }
            let src = Rgba([color[0], color[1], color[2], mul_u8(color[3], coverage)]);
            let dst = canvas.get_pixel_mut(tx as u32, ty as u32);
            *dst = blend(*dst, src);
        }
    }
}

#[inline]
fn in_ellipse(px: f32, py: f32, rx: f32, ry: f32) -> bool {
    let nx = px / rx;
    let ny = py / ry;
    nx * nx + ny * ny <= 1.0
}

#[inline]
fn mul_u8(a: u8, b: u8) -> u8 {
    ((a as u32 * b as u32 + 127) / 255) as u8
}

/// Straight-alpha source-over.
fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return TRANSPARENT;
    }
    let channel = |s: u8, d: u8| -> u8 {
        let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built_in() -> GlyphFont {
        GlyphFont::built_in().unwrap()
    }

    fn count(img: &RgbaImage, color: Rgba<u8>) -> usize {
        img.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn test_canvas_matches_size() {
        let font = built_in();
        for size in ICON_SIZES {
            let img = render(size, &font).unwrap();
            assert_eq!(img.dimensions(), (size, size));
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(render(0, &built_in()), Err(IconError::InvalidSize(0))));
    }

    #[test]
    fn test_geometry_proportions() {
        for size in ICON_SIZES {
            let egg = EggGeometry::for_size(size);
            let size = size as i32;
            assert_eq!(egg.margin, size / 8);
            assert_eq!(egg.left, egg.margin);
            assert_eq!(size - egg.right, egg.margin);
            assert_eq!(egg.height, (egg.width as f32 * 1.25).round() as i32);
            assert_eq!(egg.top, (size - egg.height) / 2);
            assert!(egg.bottom <= size);
            assert_eq!(egg.stroke, (size / 32).max(1));
        }
        assert_eq!(EggGeometry::for_size(128).bounds(), [16, 4, 112, 124]);
        assert_eq!(EggGeometry::for_size(16).highlight(), [5, 3, 8, 8]);
    }

    #[test]
    fn test_egg_edges_and_transparent_surroundings() {
        let font = built_in();
        for size in ICON_SIZES {
            let img = render(size, &font).unwrap();
            let egg = EggGeometry::for_size(size);
            let mid_y = ((egg.top + egg.bottom + 1) / 2) as u32;
            let mid_x = (egg.left + egg.width / 2) as u32;

            assert_eq!(*img.get_pixel(egg.left as u32, mid_y), EGG_OUTLINE);
            assert_eq!(*img.get_pixel(egg.right as u32, mid_y), EGG_OUTLINE);
            assert_eq!(img.get_pixel(egg.left as u32 - 1, mid_y)[3], 0);
            assert_eq!(img.get_pixel(egg.right as u32 + 1, mid_y)[3], 0);
            assert_eq!(*img.get_pixel(mid_x, egg.top as u32), EGG_OUTLINE);
            if egg.top > 0 {
                assert_eq!(img.get_pixel(mid_x, egg.top as u32 - 1)[3], 0);
            }

            let last = size - 1;
            for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
                assert_eq!(*img.get_pixel(x, y), TRANSPARENT);
            }
            assert!(count(&img, EGG_FILL) > 0);
        }
    }

    #[test]
    fn test_highlight_is_translucent_white() {
        let img = render(128, &built_in()).unwrap();
        let [x0, y0, _, y1] = EggGeometry::for_size(128).highlight();
        // inside the highlight, above and left of the glyph
        assert_eq!(*img.get_pixel(x0 as u32 + 6, y0 as u32 + 10), HIGHLIGHT);
        // centre of the highlight at 16px, where there is no glyph
        let small = render(16, &built_in()).unwrap();
        let [s0, t0, s1, t1] = EggGeometry::for_size(16).highlight();
        assert_eq!(*small.get_pixel(((s0 + s1) / 2) as u32, ((t0 + t1) / 2) as u32), HIGHLIGHT);
        // just left of the highlight box the egg is untouched
        assert_eq!(*img.get_pixel(x0 as u32 - 2, ((y0 + y1) / 2) as u32), EGG_FILL);
    }

    #[test]
    fn test_outline_ring_width() {
        let font = built_in();
        for size in [16u32, 128] {
            let img = render(size, &font).unwrap();
            let egg = EggGeometry::for_size(size);
            let mid_y = ((egg.top + egg.bottom + 1) / 2) as u32;
            let stroke = egg.stroke as u32;

            let from_left: Vec<Rgba<u8>> = (0..=stroke).map(|i| *img.get_pixel(egg.left as u32 + i, mid_y)).collect();
            let from_right: Vec<Rgba<u8>> =
                (0..=stroke).map(|i| *img.get_pixel(egg.right as u32 - i, mid_y)).collect();
            for ring in [from_left, from_right] {
                assert!(ring[..stroke as usize].iter().all(|p| *p == EGG_OUTLINE), "size {size}: {ring:?}");
                assert_eq!(ring[stroke as usize], EGG_FILL, "size {size}");
            }
        }
    }

    #[test]
    fn test_small_icon_has_no_glyph() {
        let img = render(16, &built_in()).unwrap();
        assert_eq!(count(&img, GLYPH_FILL), 0);
    }

    #[test]
    fn test_glyph_is_centred_white_with_outline() {
        let font = built_in();
        for size in [48u32, 128] {
            let img = render(size, &font).unwrap();
            let mask = font.rasterize(GLYPH, (size / 2) as f32).unwrap();
            let (gx, gy) = glyph_origin(size, &mask);
            let (gw, gh) = (mask.width as i32, mask.height as i32);

            let white: Vec<(i32, i32)> = img
                .enumerate_pixels()
                .filter(|(_, _, p)| **p == GLYPH_FILL)
                .map(|(x, y, _)| (x as i32, y as i32))
                .collect();
            assert!(!white.is_empty(), "no glyph pixels at size {size}");
            for (x, y) in &white {
                assert!(*x >= gx && *x < gx + gw && *y >= gy && *y < gy + gh);
            }

            let outline_near_glyph = img
                .enumerate_pixels()
                .filter(|(x, y, p)| {
                    let (x, y) = (*x as i32, *y as i32);
                    **p == EGG_OUTLINE && x >= gx - 1 && x <= gx + gw && y >= gy - 1 && y <= gy + gh
                })
                .count();
            assert!(outline_near_glyph > 0);
        }
    }

    #[test]
    fn test_glyph_origin_shifts_down() {
        let font = built_in();
        let mask = font.rasterize(GLYPH, 64.0).unwrap();
        let (x, y) = glyph_origin(128, &mask);
        assert_eq!(x, (128 - mask.width as i32) / 2);
        assert_eq!(y, (128 - mask.height as i32) / 2 + 8);
    }

    #[test]
    fn test_render_is_deterministic() {
        let font = built_in();
        for size in ICON_SIZES {
            let a = render(size, &font).unwrap();
            let b = render(size, &font).unwrap();
            assert_eq!(a.as_raw(), b.as_raw());
        }
    }

    #[test]
    fn test_render_with_missing_font_path() {
        let dir = tempfile::tempdir().unwrap();
        let img = render_with_font_path(48, &dir.path().join("missing.ttf")).unwrap();
        assert_eq!(img, render(48, &built_in()).unwrap());
    }

    #[test]
    fn test_blend() {
        assert_eq!(blend(EGG_FILL, TRANSPARENT), EGG_FILL);
        assert_eq!(blend(TRANSPARENT, HIGHLIGHT), HIGHLIGHT);
        assert_eq!(blend(EGG_FILL, GLYPH_FILL), GLYPH_FILL);
        let mixed = blend(EGG_FILL, Rgba([255, 255, 255, 76]));
        assert_eq!(mixed[3], 255);
        assert_eq!(mixed[0], 129);
        let half = blend(TRANSPARENT, Rgba([27, 94, 32, 128]));
        assert_eq!(half, Rgba([27, 94, 32, 128]));
    }
}
