//! Framebuffer and style types for terminal rendering.

use crate::core::Color;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

fn unit_to_u8(v: f64) -> u8 {
    // NaN clamps to 0 through `as`.
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composite `src` over `self` using its alpha.
    pub fn blend(self, src: Color) -> Rgb {
        let a = if src.a.is_finite() {
            src.a.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mix = |dst: u8, s: f64| {
            let d = dst as f64 / 255.0;
            unit_to_u8(d + (s - d) * a)
        };
        Rgb::new(mix(self.r, src.r), mix(self.g, src.g), mix(self.b, src.b))
    }
}

impl From<Color> for Rgb {
    /// Opaque conversion; alpha is ignored.
    fn from(c: Color) -> Self {
        Rgb::new(unit_to_u8(c.r), unit_to_u8(c.g), unit_to_u8(c.b))
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::BLACK)
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    /// Text read back from row `y` (trailing blanks kept).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_out_of_bounds_is_ignored() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_char(5, 5, 'x', CellStyle::default());
        assert_eq!(fb.get(5, 5), None);
        assert_eq!(fb.get(2, 1), Some(Cell::default()));
    }

    #[test]
    fn test_put_str_clips_at_right_edge() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(1, 0, "hello", CellStyle::default());
        assert_eq!(fb.row_text(0), " hel");
    }

    #[test]
    fn test_resize_keeps_dimensions_consistent() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(5, 3);
        assert_eq!((fb.width(), fb.height()), (5, 3));
        assert!(fb.get(4, 2).is_some());
    }

    #[test]
    fn test_color_conversion_and_blend() {
        assert_eq!(Rgb::from(Color::WHITE), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::BLACK.blend(Color::WHITE), Rgb::new(255, 255, 255));
        assert_eq!(
            Rgb::BLACK.blend(Color::WHITE.with_alpha(0.5)),
            Rgb::new(128, 128, 128)
        );
        assert_eq!(Rgb::new(10, 20, 30).blend(Color::WHITE.with_alpha(0.0)), Rgb::new(10, 20, 30));
        assert_eq!(Rgb::BLACK.blend(Color::WHITE.with_alpha(f64::NAN)), Rgb::BLACK);
    }
}
