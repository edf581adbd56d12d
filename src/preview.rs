use crate::model::{Row, Segment};
use crate::width::char_width;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cell {
    Blank,
    /// A character plus any zero-width characters attached to it.
    Glyph(String),
    /// Right half of a wide glyph.
    Continuation,
}

// Character grid for drawing a layout as plain text
pub struct Canvas {
    cells: Vec<Vec<Cell>>,
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![Cell::Blank; width]; height],
            width,
            height,
        }
    }

    /// Draws `ch` at `(x, y)` and returns the columns it advances. Glyphs
    /// that do not fully fit inside the canvas are not drawn.
    pub fn set_char(&mut self, x: usize, y: usize, ch: char) -> usize {
        let w = char_width(ch);
        if w == 0 {
            self.attach(x, y, ch);
            return 0;
        }
        if self.in_bounds(x + w - 1, y) {
            self.cells[y][x] = Cell::Glyph(ch.to_string());
            for cell in &mut self.cells[y][x + 1..x + w] {
                *cell = Cell::Continuation;
            }
        }
        w
    }

    pub fn draw_text(&mut self, x: usize, y: usize, text: &str) {
        let mut x = x;
        for ch in text.chars() {
            x += self.set_char(x, y, ch);
        }
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        y < self.height && x < self.width
    }

    // Zero-width characters join the glyph drawn just before `x`.
    fn attach(&mut self, x: usize, y: usize, ch: char) {
        if y >= self.height {
            return;
        }
        let row = &mut self.cells[y];
        let end = x.min(row.len());
        if let Some(Cell::Glyph(glyph)) = row[..end]
            .iter_mut()
            .rev()
            .find(|cell| **cell != Cell::Continuation)
        {
            glyph.push(ch);
        }
    }

    /// One string per row, trailing blanks removed.
    pub fn to_lines(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                let mut line = String::with_capacity(row.len());
                for cell in row {
                    match cell {
                        Cell::Blank => line.push(' '),
                        Cell::Glyph(glyph) => line.push_str(glyph),
                        Cell::Continuation => {}
                    }
                }
                line.truncate(line.trim_end().len());
                line
            })
            .collect()
    }
}

/// Draws `layout` of `text` into a `width`-column grid. Padding is blank and
/// hints are not drawn; anything past the right edge is cut off.
pub fn render(text: &str, layout: &[Row], width: usize) -> Vec<String> {
    let mut canvas = Canvas::new(width, layout.len());
    for (y, row) in layout.iter().enumerate() {
        let mut x = 0;
        for segment in row.segments() {
            match *segment {
                Segment::Text { width, start, end } => {
                    canvas.draw_text(x, y, &text[start..end]);
                    x += width;
                }
                Segment::Padding { width, .. } => x += width,
                Segment::Hint { .. } => {}
            }
        }
    }
    canvas.to_lines()
}
