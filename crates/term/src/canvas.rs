//! Canvas: a rasterizing [`Surface`] backed by half-block terminal pixels.
//!
//! Every terminal cell holds two square-ish pixels stacked vertically, drawn
//! with `▀` (foreground = top pixel, background = bottom pixel). The playfield
//! is scaled uniformly to fit the pixel grid and centered; pixels outside it
//! form a letterbox that drawing never touches.
//!
//! Shapes are filled by sampling pixel centers. Shapes smaller than one pixel
//! still light the pixel under their center so stars and distant bullets stay
//! visible at small terminal sizes.

use crate::core::{Color, Surface, Transform};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

const LETTERBOX: Rgb = Rgb::new(18, 18, 18);
/// Half the stroke width, in pixels.
const STROKE_HALF_WIDTH: f64 = 0.6;

#[derive(Debug, Clone)]
struct TextRun {
    col: i64,
    row: i64,
    /// Byte range into `Canvas::text`.
    range: std::ops::Range<usize>,
    color: Rgb,
}

/// Pixel-space rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, Default)]
struct Clip {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

pub struct Canvas {
    world_w: f64,
    world_h: f64,
    cols: u16,
    rows: u16,
    pw: usize,
    ph: usize,
    pixels: Vec<Rgb>,
    scale: f64,
    ox: f64,
    oy: f64,
    clip: Clip,
    transform: Transform,
    stack: Vec<Transform>,
    texts: Vec<TextRun>,
    text: String,
    scratch: Vec<(f64, f64)>,
}

impl Canvas {
    /// Create a canvas for a playfield of `world_w` x `world_h` units.
    ///
    /// Call [`Canvas::resize`] before drawing.
    pub fn new(world_w: f64, world_h: f64) -> Self {
        Self {
            world_w,
            world_h,
            cols: 0,
            rows: 0,
            pw: 0,
            ph: 0,
            pixels: Vec::new(),
            scale: 0.0,
            ox: 0.0,
            oy: 0.0,
            clip: Clip::default(),
            transform: Transform::IDENTITY,
            stack: Vec::with_capacity(8),
            texts: Vec::with_capacity(4),
            text: String::with_capacity(128),
            scratch: Vec::with_capacity(8),
        }
    }

    /// Fit the playfield into `cols` x `rows` terminal cells.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if self.cols == cols && self.rows == rows && !self.pixels.is_empty() {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.pw = cols as usize;
        self.ph = rows as usize * 2;
        self.pixels.resize(self.pw * self.ph, LETTERBOX);

        let sx = self.pw as f64 / self.world_w;
        let sy = self.ph as f64 / self.world_h;
        self.scale = if sx.is_finite() && sy.is_finite() {
            sx.min(sy).max(0.0)
        } else {
            0.0
        };
        self.ox = (self.pw as f64 - self.world_w * self.scale) / 2.0;
        self.oy = (self.ph as f64 - self.world_h * self.scale) / 2.0;

        // Pixels whose centers land inside the playfield.
        let scale = self.scale;
        let first = |origin: f64| (origin - 0.5).ceil().max(0.0) as i64;
        let end = |origin: f64, extent: f64, limit: usize| {
            ((origin + extent * scale - 0.5).floor() as i64 + 1).clamp(0, limit as i64)
        };
        self.clip = Clip {
            x0: first(self.ox),
            y0: first(self.oy),
            x1: end(self.ox, self.world_w, self.pw),
            y1: end(self.oy, self.world_h, self.ph),
        };
    }

    /// Reset pixels, text, and the transform stack for a new frame.
    pub fn begin_frame(&mut self) {
        self.pixels.fill(LETTERBOX);
        self.texts.clear();
        self.text.clear();
        self.stack.clear();
        self.transform = Transform::IDENTITY;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Pixels per playfield unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pixel(&self, px: usize, py: usize) -> Option<Rgb> {
        if px >= self.pw || py >= self.ph {
            return None;
        }
        Some(self.pixels[py * self.pw + px])
    }

    /// Write the frame into the top `rows` rows of `fb`.
    pub fn compose_into(&self, fb: &mut FrameBuffer) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let x = col as usize;
                let y = row as usize * 2;
                let top = self.pixels[y * self.pw + x];
                let bottom = self.pixels[(y + 1) * self.pw + x];
                if top == bottom {
                    fb.put_char(col, row, ' ', CellStyle::new(top, top));
                } else {
                    fb.put_char(col, row, '▀', CellStyle::new(top, bottom));
                }
            }
        }

        let mut last: Option<(i64, i64)> = None;
        for run in &self.texts {
            let mut row = run.row;
            // Stacked labels that collapse onto one row at small sizes.
            if let Some((col, prev_row)) = last {
                if col == run.col && row <= prev_row {
                    row = prev_row + 1;
                }
            }
            last = Some((run.col, row));
            if row < 0 || row >= self.rows as i64 {
                continue;
            }
            for (i, ch) in self.text[run.range.clone()].chars().enumerate() {
                let col = run.col + i as i64;
                if col < 0 {
                    continue;
                }
                if col >= self.cols as i64 {
                    break;
                }
                let bg = self.pixels[(row as usize * 2 + 1) * self.pw + col as usize];
                let mut style = CellStyle::new(run.color, bg);
                style.bold = true;
                fb.put_char(col as u16, row as u16, ch, style);
            }
        }
    }

    fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let (wx, wy) = self.transform.apply(x, y);
        (self.ox + wx * self.scale, self.oy + wy * self.scale)
    }

    fn plot(&mut self, px: i64, py: i64, color: Color) {
        let c = self.clip;
        if px < c.x0 || px >= c.x1 || py < c.y0 || py >= c.y1 {
            return;
        }
        let i = py as usize * self.pw + px as usize;
        self.pixels[i] = self.pixels[i].blend(color);
    }

    /// Pixel range covering `[lo, hi]`, clamped to `[min, max)`.
    fn span(lo: f64, hi: f64, min: i64, max: i64) -> std::ops::Range<i64> {
        let start = (lo.floor() as i64).max(min);
        let end = (hi.ceil() as i64 + 1).min(max);
        start..end.max(start)
    }

    fn fill_ring(&mut self, cx: f64, cy: f64, inner: f64, outer: f64, color: Color) {
        let (pcx, pcy) = self.to_pixel(cx, cy);
        if !(pcx.is_finite() && pcy.is_finite() && outer.is_finite()) {
            return;
        }
        let c = self.clip;
        let inner2 = inner * inner;
        let outer2 = outer * outer;
        let mut painted = false;
        for py in Self::span(pcy - outer, pcy + outer, c.y0, c.y1) {
            for px in Self::span(pcx - outer, pcx + outer, c.x0, c.x1) {
                let dx = px as f64 + 0.5 - pcx;
                let dy = py as f64 + 0.5 - pcy;
                let d2 = dx * dx + dy * dy;
                if d2 <= outer2 && d2 >= inner2 {
                    self.plot(px, py, color);
                    painted = true;
                }
            }
        }
        if !painted && outer > 0.0 {
            self.plot(pcx.floor() as i64, pcy.floor() as i64, color);
        }
    }
}

fn polygon_contains(poly: &[(f64, f64)], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (xi, yi) = poly[i];
        let (xj, yj) = poly[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl Surface for Canvas {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.fill_polygon(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)], color);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let r = radius * self.scale;
        self.fill_ring(cx, cy, 0.0, r, color);
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let r = radius * self.scale;
        let inner = (r - STROKE_HALF_WIDTH).max(0.0);
        self.fill_ring(cx, cy, inner, r + STROKE_HALF_WIDTH, color);
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        if points.len() < 3 {
            return;
        }
        let mut poly = std::mem::take(&mut self.scratch);
        poly.clear();
        poly.extend(points.iter().map(|&(x, y)| self.to_pixel(x, y)));

        if poly.iter().all(|(x, y)| x.is_finite() && y.is_finite()) {
            let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
            let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
            for &(x, y) in &poly {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }

            let c = self.clip;
            let mut painted = false;
            for py in Self::span(min_y, max_y, c.y0, c.y1) {
                for px in Self::span(min_x, max_x, c.x0, c.x1) {
                    if polygon_contains(&poly, px as f64 + 0.5, py as f64 + 0.5) {
                        self.plot(px, py, color);
                        painted = true;
                    }
                }
            }

            if !painted {
                let n = poly.len() as f64;
                let cx = poly.iter().map(|p| p.0).sum::<f64>() / n;
                let cy = poly.iter().map(|p| p.1).sum::<f64>() / n;
                self.plot(cx.floor() as i64, cy.floor() as i64, color);
            }
        }

        self.scratch = poly;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        let (px, py) = self.to_pixel(x, y);
        if !(px.is_finite() && py.is_finite()) {
            return;
        }
        // The glyph sits in the cell just above the baseline.
        let start = self.text.len();
        self.text.push_str(text);
        self.texts.push(TextRun {
            col: px.floor() as i64,
            row: ((py - 0.5) / 2.0).floor() as i64,
            range: start..self.text.len(),
            color: Rgb::from(color),
        });
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        self.transform = self.transform.rotate_deg(degrees);
    }
}
