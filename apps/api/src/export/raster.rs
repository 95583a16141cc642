//! Raster snapshot of a rendered page.
//!
//! `Snapshotter` is the capture seam: export only needs "layout in, pixels
//! out". The default `LayoutRasterizer` paints the layout's own nodes, with
//! text drawn from an 8×8 bitmap font stretched over each glyph's advance box
//! so pixel positions line up with the metric-based layout.

use async_trait::async_trait;
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};

use crate::export::ExportError;
use crate::render::font_metrics::{sans, FontWeight};
use crate::render::layout::{Node, TextStyle};
use crate::render::palette::{Color, BACKGROUND};
use crate::render::{PageLayout, PAGE_MIN_HEIGHT_PT, PAGE_WIDTH_PT};

pub const MAX_PIXEL_RATIO: u32 = 4;

/// Tallest layout that will be snapshotted: eight A4 pages. Bounds the pixel
/// buffer at roughly 190 MB at the maximum pixel ratio.
pub const MAX_PAGE_HEIGHT_PT: f32 = PAGE_MIN_HEIGHT_PT * 8.0;

const BULLET: char = '•';

/// Captures a page layout as an RGB image at `pixel_ratio` device pixels per point.
///
/// Carried in `AppState` as `Arc<dyn Snapshotter>`.
#[async_trait]
pub trait Snapshotter: Send + Sync {
    async fn capture(&self, layout: &PageLayout, pixel_ratio: u32) -> Result<RgbImage, ExportError>;
}

pub struct LayoutRasterizer;

#[async_trait]
impl Snapshotter for LayoutRasterizer {
    async fn capture(&self, layout: &PageLayout, pixel_ratio: u32) -> Result<RgbImage, ExportError> {
        let layout = layout.clone();
        tokio::task::spawn_blocking(move || rasterize(&layout, pixel_ratio))
            .await
            .map_err(|e| ExportError::Capture(format!("rasterizer task failed: {e}")))?
    }
}

/// Paints `layout` into a fresh image `ceil(width × ratio)` by `ceil(height × ratio)`.
pub fn rasterize(layout: &PageLayout, pixel_ratio: u32) -> Result<RgbImage, ExportError> {
    if !(1..=MAX_PIXEL_RATIO).contains(&pixel_ratio) {
        return Err(ExportError::Capture(format!(
            "pixel ratio {pixel_ratio} outside 1..={MAX_PIXEL_RATIO}"
        )));
    }
    if layout.width <= 0.0 || layout.height <= 0.0 {
        return Err(ExportError::Capture("layout has an empty page box".to_string()));
    }
    if layout.height > MAX_PAGE_HEIGHT_PT || layout.width > PAGE_WIDTH_PT {
        return Err(ExportError::Capture(format!(
            "layout of {}x{}pt exceeds the {PAGE_WIDTH_PT}x{MAX_PAGE_HEIGHT_PT}pt capture limit",
            layout.width, layout.height
        )));
    }

    let scale = pixel_ratio as f32;
    let width = (layout.width * scale).ceil() as u32;
    let height = (layout.height * scale).ceil() as u32;
    let mut canvas = Canvas {
        img: RgbImage::from_pixel(width, height, rgb(BACKGROUND)),
        scale,
    };

    for node in &layout.nodes {
        match node {
            Node::Rect { frame, fill } => {
                canvas.fill_rect(frame.x, frame.y, frame.width, frame.height, *fill)
            }
            Node::Circle { cx, cy, radius, fill } => canvas.fill_circle(*cx, *cy, *radius, *fill),
            Node::Rule {
                x,
                y,
                width,
                thickness,
                color,
            } => canvas.fill_rect(*x, *y, *width, *thickness, *color),
            Node::Text { frame, text, style, .. } => canvas.draw_text(frame.x, frame.y, text, style),
            Node::Chip {
                frame,
                label,
                fill,
                style,
            } => {
                canvas.fill_capsule(frame.x, frame.y, frame.width, frame.height, *fill);
                let text_x = frame.x + (frame.width - style.measure(label)).max(0.0) / 2.0;
                let text_y = frame.y + (frame.height - style.line_height()) / 2.0;
                canvas.draw_text(text_x, text_y, label, style);
            }
        }
    }

    Ok(canvas.img)
}

fn rgb(c: Color) -> Rgb<u8> {
    Rgb([c.r, c.g, c.b])
}

/// Point-space drawing over a pixel buffer.
struct Canvas {
    img: RgbImage,
    scale: f32,
}

impl Canvas {
    /// Device-pixel span covering `[start, start + len)` points, clamped to `limit`.
    fn span(&self, start: f32, len: f32, limit: u32) -> (u32, u32) {
        let from = (start * self.scale).floor().max(0.0) as u32;
        let to = ((start + len) * self.scale).ceil().max(0.0) as u32;
        (from.min(limit), to.min(limit))
    }

    fn fill_with(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, inside: impl Fn(f32, f32) -> bool) {
        let (x0, x1) = self.span(x, w, self.img.width());
        let (y0, y1) = self.span(y, h, self.img.height());
        let px = rgb(color);
        for dy in y0..y1 {
            for dx in x0..x1 {
                // Sample at the pixel centre, in points.
                let sx = (dx as f32 + 0.5) / self.scale;
                let sy = (dy as f32 + 0.5) / self.scale;
                if inside(sx, sy) {
                    self.img.put_pixel(dx, dy, px);
                }
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.fill_with(x, y, w, h, color, |_, _| true);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) {
        self.fill_with(cx - r, cy - r, r * 2.0, r * 2.0, color, |sx, sy| {
            (sx - cx).powi(2) + (sy - cy).powi(2) <= r * r
        });
    }

    /// Rectangle with fully rounded ends.
    fn fill_capsule(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let r = (h / 2.0).min(w / 2.0);
        let cy = y + h / 2.0;
        let (left, right) = (x + r, x + w - r);
        self.fill_with(x, y, w, h, color, |sx, sy| {
            let nearest_x = sx.clamp(left, right);
            (sx - nearest_x).powi(2) + (sy - cy).powi(2) <= r * r
        });
    }

    /// `y` is the top of the line box.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle) {
        let metrics = sans();
        let glyph_top = y + (style.line_height() - style.size_pt) / 2.0;
        let mut pen_x = x;

        for c in text.chars() {
            let advance = metrics.advance_pt(c, style.size_pt, style.weight, style.tracking_em);
            let glyph_width = advance - style.tracking_em * style.size_pt;

            if c == BULLET {
                let r = style.size_pt * 0.12;
                self.fill_circle(pen_x + glyph_width / 2.0, glyph_top + style.size_pt / 2.0, r, style.color);
            } else if let Some(bitmap) = glyph(c) {
                self.draw_glyph(&bitmap, pen_x, glyph_top, glyph_width, style);
            }
            pen_x += advance;
        }
    }

    fn draw_glyph(&mut self, bitmap: &[u8; 8], x: f32, y: f32, w: f32, style: &TextStyle) {
        let size = style.size_pt;
        let inside = |sx: f32, sy: f32| -> bool {
            let col = ((sx - x) / w * 8.0).floor();
            let row = ((sy - y) / size * 8.0).floor();
            if !(0.0..8.0).contains(&col) || !(0.0..8.0).contains(&row) {
                return false;
            }
            bitmap[row as usize] & (1 << col as u32) != 0
        };
        self.fill_with(x, y, w, size, style.color, inside);

        // Faux bold: restrike one device pixel to the right.
        if style.weight != FontWeight::Regular {
            let nudge = 1.0 / self.scale;
            self.fill_with(x + nudge, y, w, size, style.color, |sx, sy| inside(sx - nudge, sy));
        }
    }
}

fn glyph(c: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c))
}
