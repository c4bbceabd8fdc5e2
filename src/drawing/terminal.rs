//! Character-cell drawing for the interactive terminal view.

use std::fmt;

use super::surface::{Pixel, Surface};
use super::{Anchor, Color, Stroke, TextStyle};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Grid of characters, one per terminal cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharCanvas {
    /// Width in cells.
    columns: usize,
    /// Height in cells.
    rows: usize,
    /// Cells in row-major order.
    cells: Vec<char>,
}

impl CharCanvas {
    /// Blank canvas of `columns` by `rows` cells.
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![' '; columns * rows],
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Character at a cell, `None` outside the canvas.
    #[must_use]
    pub fn get(&self, column: usize, row: usize) -> Option<char> {
        (column < self.columns && row < self.rows).then(|| self.cells[row * self.columns + column])
    }

    /// Each row as a string, trailing blanks included.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.columns.max(1))
            .map(|row| row.iter().collect())
            .collect()
    }

    /// Set one cell, ignoring positions off the canvas.
    fn plot(&mut self, column: isize, row: isize, glyph: char) {
        if column >= 0 && row >= 0 && (column as usize) < self.columns && (row as usize) < self.rows
        {
            self.cells[row as usize * self.columns + column as usize] = glyph;
        }
    }

    /// Draw a segment between two cells using Bresenham's algorithm.
    fn draw_line(&mut self, from: Pixel, to: Pixel, glyph: char) {
        let (mut x0, mut y0, x1, y1) = (
            from.0.floor() as isize,
            from.1.floor() as isize,
            to.0.floor() as isize,
            to.1.floor() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, glyph);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/// Character that best follows a segment's on-screen slope.
fn slope_glyph(from: Pixel, to: Pixel) -> char {
    let dx = to.0 - from.0;
    // Rows are taller than columns, so weight vertical travel accordingly.
    let dy = (to.1 - from.1) * CELL_ASPECT;
    if dy.abs() <= 0.4 * dx.abs() {
        '-'
    } else if dx.abs() <= 0.4 * dy.abs() {
        '|'
    } else if (dx > 0.0) == (dy < 0.0) {
        '/'
    } else {
        '\\'
    }
}

impl Surface for CharCanvas {
    fn size(&self) -> (f64, f64) {
        (self.columns as f64, self.rows as f64)
    }

    fn pixel_aspect(&self) -> f64 {
        CELL_ASPECT
    }

    fn draws_grid(&self) -> bool {
        false
    }

    fn line_height(&self, _size: f64) -> f64 {
        1.0
    }

    fn stroke_path(&mut self, points: &[Pixel], stroke: &Stroke) {
        // Faint strokes such as reference lines would only clutter the cells.
        if stroke.color.a < 128 && !stroke.dashed {
            return;
        }
        for segment in points.windows(2) {
            let glyph = if stroke.dashed {
                '.'
            } else {
                slope_glyph(segment[0], segment[1])
            };
            self.draw_line(segment[0], segment[1], glyph);
        }
    }

    fn stroke_circle(&mut self, center: Pixel, radius: f64, _stroke: &Stroke) {
        let steps = ((radius * 8.0).ceil() as usize).max(16);
        let points: Vec<Pixel> = (0..=steps)
            .map(|step| {
                let angle = std::f64::consts::TAU * step as f64 / steps as f64;
                (
                    center.0 + radius * angle.cos(),
                    center.1 + radius / CELL_ASPECT * angle.sin(),
                )
            })
            .collect();
        for segment in points.windows(2) {
            self.draw_line(segment[0], segment[1], '.');
        }
    }

    fn fill_circle(&mut self, center: Pixel, _radius: f64, _color: Color) {
        self.plot(center.0.floor() as isize, center.1.floor() as isize, 'o');
    }

    fn fill_square(&mut self, center: Pixel, _side: f64, _color: Color) {
        self.plot(center.0.floor() as isize, center.1.floor() as isize, '#');
    }

    fn text(&mut self, at: Pixel, text: &str, style: &TextStyle) {
        let width = text.chars().count() as isize;
        let start = at.0.floor() as isize
            - match style.anchor {
                Anchor::Start => 0,
                Anchor::Middle => width / 2,
                Anchor::End => width,
            };
        let row = at.1.floor() as isize;
        for (offset, glyph) in text.chars().enumerate() {
            self.plot(start + offset as isize, row, glyph);
        }
    }
}

impl fmt::Display for CharCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
