//! Drawing surfaces the background paints onto.

use glyphveil_core::Size;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};

use crate::color::{Rgba, distance, to_color};

/// A full-viewport 2D surface addressed in logical units.
pub trait Surface {
    /// Current drawable extent.
    fn size(&self) -> Size;

    /// Change the drawable extent. Like a canvas, this discards what was painted.
    fn set_size(&mut self, size: Size);

    /// Whether a drawing context can be obtained right now.
    fn has_context(&self) -> bool {
        true
    }

    /// Composite `color` over the entire surface.
    fn fill_overlay(&mut self, color: Rgba);

    /// Paint a single glyph with its origin at `(x, y)`.
    fn draw_glyph(&mut self, glyph: char, x: f32, y: f32, color: Rgba);
}

/// Coverage below which a cell is treated as background.
const VISIBLE_THRESHOLD: f32 = 0.03;

#[derive(Debug, Clone, Copy)]
struct CanvasCell {
    glyph: char,
    rgb: [f32; 3],
}

/// In-memory surface backed by a grid of terminal cells.
///
/// Each cell covers `cell_size x cell_size` logical units and remembers the
/// last glyph painted into it together with its composited color. Rendering
/// the canvas as a widget maps cells 1:1 onto the target area.
#[derive(Debug, Clone)]
pub struct Canvas {
    size: Size,
    cell_size: u32,
    cols: u16,
    rows: u16,
    base: [f32; 3],
    cells: Vec<CanvasCell>,
    available: bool,
}

impl Canvas {
    /// Create an empty canvas over the given base color.
    pub fn new(cell_size: u32, base: Rgba) -> Self {
        Self {
            size: Size::default(),
            cell_size: cell_size.max(1),
            cols: 0,
            rows: 0,
            base: base.channels(),
            cells: Vec::new(),
            available: true,
        }
    }

    /// Grid dimensions in cells.
    #[cfg(test)]
    pub(crate) fn grid(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Mark the canvas as detached (or reattached). A detached canvas
    /// reports no drawing context.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Change the base color, clearing everything painted so far.
    pub fn set_base(&mut self, base: Rgba) {
        self.base = base.channels();
        self.clear();
    }

    /// Reset every cell to the base color.
    pub fn clear(&mut self) {
        let blank = CanvasCell {
            glyph: ' ',
            rgb: self.base,
        };
        self.cells.iter_mut().for_each(|cell| *cell = blank);
    }

    /// Glyph visible in the given cell, if any.
    pub fn glyph_at(&self, col: u16, row: u16) -> Option<char> {
        let cell = self.cell(col, row)?;
        (distance(cell.rgb, self.base) >= VISIBLE_THRESHOLD).then_some(cell.glyph)
    }

    /// Composited color of the given cell.
    pub fn color_at(&self, col: u16, row: u16) -> Option<Color> {
        self.cell(col, row).map(|cell| to_color(cell.rgb))
    }

    fn cell(&self, col: u16, row: u16) -> Option<&CanvasCell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    fn cell_index(&self, x: f32, y: f32) -> Option<usize> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let col = (x / self.cell_size as f32) as usize;
        let row = (y / self.cell_size as f32) as usize;
        (col < self.cols as usize && row < self.rows as usize)
            .then(|| row * self.cols as usize + col)
    }
}

impl Surface for Canvas {
    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
        self.cols = size.width.div_ceil(self.cell_size).min(u16::MAX as u32) as u16;
        self.rows = size.height.div_ceil(self.cell_size).min(u16::MAX as u32) as u16;
        let blank = CanvasCell {
            glyph: ' ',
            rgb: self.base,
        };
        self.cells = vec![blank; self.cols as usize * self.rows as usize];
    }

    fn has_context(&self) -> bool {
        self.available
    }

    fn fill_overlay(&mut self, color: Rgba) {
        for cell in &mut self.cells {
            cell.rgb = color.over(cell.rgb);
        }
    }

    fn draw_glyph(&mut self, glyph: char, x: f32, y: f32, color: Rgba) {
        if let Some(idx) = self.cell_index(x, y) {
            let cell = &mut self.cells[idx];
            cell.glyph = glyph;
            cell.rgb = color.over(cell.rgb);
        }
    }
}

impl Widget for &Canvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let base = to_color(self.base);
        for y in 0..area.height {
            for x in 0..area.width {
                let Some(cell) = buf.cell_mut(Position::new(area.x + x, area.y + y)) else {
                    continue;
                };
                cell.set_bg(base);
                match self.glyph_at(x, y) {
                    Some(glyph) => {
                        let fg = self.color_at(x, y).unwrap_or(base);
                        cell.set_char(glyph).set_fg(fg);
                    }
                    None => {
                        cell.set_char(' ');
                    }
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Surface double that records paint calls.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub size: Size,
        pub detached: bool,
        pub overlays: usize,
        pub glyphs: Vec<(char, f32, f32, Rgba)>,
        pub resizes: Vec<Size>,
    }

    impl RecordingSurface {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                size: Size::new(width, height),
                ..Default::default()
            }
        }

        /// Number of paint calls of any kind.
        pub fn paints(&self) -> usize {
            self.overlays + self.glyphs.len()
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Size {
            self.size
        }

        fn set_size(&mut self, size: Size) {
            self.size = size;
            self.resizes.push(size);
        }

        fn has_context(&self) -> bool {
            !self.detached
        }

        fn fill_overlay(&mut self, _color: Rgba) {
            self.overlays += 1;
        }

        fn draw_glyph(&mut self, glyph: char, x: f32, y: f32, color: Rgba) {
            self.glyphs.push((glyph, x, y, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_canvas() -> Canvas {
        let mut canvas = Canvas::new(14, Rgba::new(0, 0, 0, 1.0));
        canvas.set_size(Size::new(140, 70));
        canvas
    }

    #[test]
    fn test_grid_matches_size() {
        let mut canvas = dark_canvas();
        assert_eq!(canvas.grid(), (10, 5));
        canvas.set_size(Size::new(141, 14));
        assert_eq!(canvas.grid(), (11, 1));
    }

    #[test]
    fn test_draw_glyph_maps_to_cell() {
        let mut canvas = dark_canvas();
        canvas.draw_glyph('A', 28.0, 15.0, Rgba::new(255, 255, 255, 0.4));
        assert_eq!(canvas.glyph_at(2, 1), Some('A'));
        assert_eq!(canvas.glyph_at(0, 0), None);
    }

    #[test]
    fn test_out_of_bounds_glyph_is_ignored() {
        let mut canvas = dark_canvas();
        canvas.draw_glyph('A', 140.0, 0.0, Rgba::new(255, 255, 255, 1.0));
        canvas.draw_glyph('A', -1.0, 0.0, Rgba::new(255, 255, 255, 1.0));
        canvas.draw_glyph('A', f32::NAN, 0.0, Rgba::new(255, 255, 255, 1.0));
        assert!((0..10).all(|c| (0..5).all(|r| canvas.glyph_at(c, r).is_none())));
    }

    #[test]
    fn test_overlay_fades_trail() {
        let mut canvas = dark_canvas();
        canvas.draw_glyph('1', 0.0, 0.0, Rgba::new(255, 255, 255, 0.3));
        assert_eq!(canvas.glyph_at(0, 0), Some('1'));
        for _ in 0..200 {
            canvas.fill_overlay(Rgba::new(0, 0, 0, 0.02));
        }
        assert_eq!(canvas.glyph_at(0, 0), None);
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = dark_canvas();
        canvas.draw_glyph('1', 0.0, 0.0, Rgba::new(255, 255, 255, 1.0));
        canvas.set_size(Size::new(140, 70));
        assert_eq!(canvas.glyph_at(0, 0), None);
    }

    #[test]
    fn test_detached_canvas_has_no_context() {
        let mut canvas = dark_canvas();
        assert!(canvas.has_context());
        canvas.set_available(false);
        assert!(!canvas.has_context());
        canvas.set_available(true);
        assert!(canvas.has_context());
    }

    #[test]
    fn test_render_widget() {
        let mut canvas = dark_canvas();
        canvas.draw_glyph('x', 14.0, 0.0, Rgba::new(255, 255, 255, 1.0));
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);
        assert_eq!(buf[(1, 0)].symbol(), "x");
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(255, 255, 255));
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 0));
    }
}
