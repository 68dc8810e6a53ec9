// ============================================================================
// SOFTWARE RASTERIZER
// ============================================================================
//
// Everything here draws straight into an RGBA8 frame buffer. Coverage is
// computed per pixel center from a signed distance, which gives the rounded
// shapes their anti-aliased edges.

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::Color;

/// Axis-aligned rectangle in frame-buffer pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Shrink by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.w - 2.0 * amount).max(0.0),
            (self.h - 2.0 * amount).max(0.0),
        )
    }
}

/// Where a text position sits relative to the rendered glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Center,
    TopLeft,
}

/// Decoded RGBA image used by image button faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert_eq!(frame.len(), width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Alpha-blend `color` over the pixel at `(x, y)`.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r, color.g, color.b];
        for (dst, src) in self.frame[idx..idx + 3].iter_mut().zip(src) {
            *dst = (src as f32 * a + *dst as f32 * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(
            self.frame[idx],
            self.frame[idx + 1],
            self.frame[idx + 2],
        ))
    }

    /// Pixel range covering `rect` grown by `pad`, clipped to the frame.
    fn span(&self, rect: &Rect, pad: f32) -> (i32, i32, i32, i32) {
        let x0 = ((rect.x - pad).floor() as i32).max(0);
        let y0 = ((rect.y - pad).floor() as i32).max(0);
        let x1 = ((rect.x + rect.w + pad).ceil() as i32).min(self.width as i32);
        let y1 = ((rect.y + rect.h + pad).ceil() as i32).min(self.height as i32);
        (x0, y0, x1, y1)
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let (x0, y0, x1, y1) = self.span(&rect, 1.0);
        for y in y0..y1 {
            for x in x0..x1 {
                let d = rounded_rect_distance(&rect, radius, x as f32 + 0.5, y as f32 + 0.5);
                let aa = (0.5 - d).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.blend_pixel(x, y, color, aa);
                }
            }
        }
    }

    /// Outline centered on the rectangle's edge, like a pen stroke.
    pub fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, thickness: f32, color: Color) {
        let half = thickness / 2.0;
        let (x0, y0, x1, y1) = self.span(&rect, half + 1.0);
        for y in y0..y1 {
            for x in x0..x1 {
                let d = rounded_rect_distance(&rect, radius, x as f32 + 0.5, y as f32 + 0.5);
                let aa = (half + 0.5 - d.abs()).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.blend_pixel(x, y, color, aa);
                }
            }
        }
    }

    pub fn draw_line(
        &mut self,
        (x0, y0): (f32, f32),
        (x1, y1): (f32, f32),
        thickness: f32,
        color: Color,
    ) {
        let pad = thickness.ceil() + 1.0;
        let bounds = Rect::new(x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs());
        let (min_x, min_y, max_x, max_y) = self.span(&bounds, pad);
        let dx = x1 - x0;
        let dy = y1 - y0;
        let len_sq = (dx * dx + dy * dy).max(f32::EPSILON);
        for y in min_y..max_y {
            for x in min_x..max_x {
                let px = x as f32 + 0.5 - x0;
                let py = y as f32 + 0.5 - y0;
                let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
                let lx = x0 + t * dx;
                let ly = y0 + t * dy;
                let dist = ((lx - (x as f32 + 0.5)).powi(2) + (ly - (y as f32 + 0.5)).powi(2)).sqrt();
                let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.blend_pixel(x, y, color, aa);
                }
            }
        }
    }

    pub fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: &Font,
        size: f32,
        anchor: TextAnchor,
        color: Color,
    ) {
        let scale = Scale::uniform(size);
        let v_metrics = font.v_metrics(scale);
        let glyphs: Vec<PositionedGlyph> = font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .collect();
        let Some((min_x, max_x, min_y, max_y)) = glyph_bounds(&glyphs) else {
            return;
        };
        let (offset_x, offset_y) = match anchor {
            TextAnchor::Center => (
                x.round() as i32 - (max_x - min_x) / 2,
                y.round() as i32 - (max_y - min_y) / 2,
            ),
            TextAnchor::TopLeft => (x.round() as i32, y.round() as i32),
        };
        for glyph in glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = offset_x + gx as i32 + bb.min.x - min_x;
                    let py = offset_y + gy as i32 + bb.min.y - min_y;
                    self.blend_pixel(px, py, color, v);
                });
            }
        }
    }

    /// Scale `sprite` into `dest` keeping its aspect ratio, nearest neighbour.
    pub fn draw_sprite(&mut self, sprite: &Sprite, dest: Rect) {
        if sprite.width == 0 || sprite.height == 0 {
            return;
        }
        let scale = (dest.w / sprite.width as f32).min(dest.h / sprite.height as f32);
        let w = sprite.width as f32 * scale;
        let h = sprite.height as f32 * scale;
        let fitted = Rect::new(dest.x + (dest.w - w) / 2.0, dest.y + (dest.h - h) / 2.0, w, h);
        let (x0, y0, x1, y1) = self.span(&fitted, 0.0);
        for y in y0..y1 {
            for x in x0..x1 {
                let sx = ((x as f32 + 0.5 - fitted.x) / scale) as u32;
                let sy = ((y as f32 + 0.5 - fitted.y) / scale) as u32;
                if sx >= sprite.width || sy >= sprite.height {
                    continue;
                }
                let idx = ((sy * sprite.width + sx) * 4) as usize;
                let px = &sprite.rgba[idx..idx + 4];
                let alpha = px[3] as f32 / 255.0;
                if alpha > 0.0 {
                    self.blend_pixel(x, y, Color::new(px[0], px[1], px[2]), alpha);
                }
            }
        }
    }
}

/// Signed distance from `(px, py)` to the rounded rectangle, negative inside.
fn rounded_rect_distance(rect: &Rect, radius: f32, px: f32, py: f32) -> f32 {
    let (cx, cy) = rect.center();
    let half_w = rect.w / 2.0;
    let half_h = rect.h / 2.0;
    let r = radius.clamp(0.0, half_w.min(half_h));
    let qx = (px - cx).abs() - half_w + r;
    let qy = (py - cy).abs() - half_h + r;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - r
}

fn glyph_bounds(glyphs: &[PositionedGlyph]) -> Option<(i32, i32, i32, i32)> {
    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    (min_x < max_x && min_y < max_y).then_some((min_x, max_x, min_y, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Color = Color::new(0, 0, 0);
    const RED: Color = Color::new(0xff, 0, 0);

    fn blank(width: usize, height: usize) -> Vec<u8> {
        vec![0; width * height * 4]
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(29.9, 14.9));
        assert!(!rect.contains(30.0, 12.0));
        assert!(!rect.contains(15.0, 15.0));
    }

    #[test]
    fn test_fill_rounded_rect_covers_center_not_corners() {
        let mut frame = blank(40, 40);
        let mut canvas = Canvas::new(&mut frame, 40, 40);
        canvas.clear(BLACK);
        canvas.fill_rounded_rect(Rect::new(0.0, 0.0, 40.0, 40.0), 15.0, RED);
        assert_eq!(canvas.pixel(20, 20), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some(BLACK));
        assert_eq!(canvas.pixel(39, 39), Some(BLACK));
        assert_eq!(canvas.pixel(20, 0), Some(RED));
    }

    #[test]
    fn test_stroke_leaves_interior_untouched() {
        let mut frame = blank(50, 50);
        let mut canvas = Canvas::new(&mut frame, 50, 50);
        canvas.clear(BLACK);
        canvas.stroke_rounded_rect(Rect::new(5.0, 5.0, 40.0, 40.0), 8.0, 4.0, RED);
        assert_eq!(canvas.pixel(25, 25), Some(BLACK));
        assert_eq!(canvas.pixel(25, 5), Some(RED));
        assert_eq!(canvas.pixel(5, 25), Some(RED));
    }

    #[test]
    fn test_line_clips_to_frame() {
        let mut frame = blank(20, 20);
        let mut canvas = Canvas::new(&mut frame, 20, 20);
        canvas.clear(BLACK);
        canvas.draw_line((-50.0, 10.0), (70.0, 10.0), 2.0, RED);
        assert_eq!(canvas.pixel(0, 10), Some(RED));
        assert_eq!(canvas.pixel(19, 10), Some(RED));
        assert_eq!(canvas.pixel(10, 2), Some(BLACK));
    }

    #[test]
    fn test_sprite_is_fitted_and_centered() {
        let sprite = Sprite {
            width: 1,
            height: 1,
            rgba: vec![0xff, 0, 0, 0xff],
        };
        let mut frame = blank(30, 10);
        let mut canvas = Canvas::new(&mut frame, 30, 10);
        canvas.clear(BLACK);
        canvas.draw_sprite(&sprite, Rect::new(0.0, 0.0, 30.0, 10.0));
        assert_eq!(canvas.pixel(15, 5), Some(RED));
        assert_eq!(canvas.pixel(2, 5), Some(BLACK));
    }
}
