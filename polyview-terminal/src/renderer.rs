/// Character-grid drawing surface for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use polyview_core::{Rgb, ScreenPoint, Surface, Viewport};
use std::io::Write;

/// Character luminosity ramp for fill shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Option<Rgb>,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    color: None,
};

/// Surface that rasterizes polygons and lines into terminal cells
///
/// Surface coordinates are measured in cell widths. Cells are taller than
/// they are wide, so the vertical extent of the viewport is the row count
/// times `cell_aspect`.
pub struct AsciiSurface {
    width: usize,
    height: usize,
    cell_aspect: f64,
    cells: Vec<Cell>,
}

impl AsciiSurface {
    pub fn new(width: usize, height: usize, cell_aspect: f64) -> Self {
        Self {
            width,
            height,
            cell_aspect,
            cells: vec![EMPTY; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![EMPTY; width * height];
    }

    pub fn cell_aspect(&self) -> f64 {
        self.cell_aspect
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f64, self.height as f64 * self.cell_aspect)
    }

    /// Glyph at a cell, `None` outside the grid
    pub fn glyph(&self, column: usize, row: usize) -> Option<char> {
        if column >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[row * self.width + column].glyph)
    }

    /// Plain text rendition, one line per row
    pub fn to_text(&self) -> String {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|cell| cell.glyph).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Map a centered, y-up point to fractional (column, row) cell space
    fn to_cell_space(&self, point: ScreenPoint) -> (f64, f64) {
        (
            self.width as f64 / 2.0 + point.x,
            self.height as f64 / 2.0 - point.y / self.cell_aspect,
        )
    }

    fn plot(&mut self, column: f64, row: f64, cell: Cell) {
        if column < 0.0 || row < 0.0 {
            return;
        }
        let (column, row) = (column as usize, row as usize);
        if column < self.width && row < self.height {
            self.cells[row * self.width + column] = cell;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for cell in row {
                let color = match cell.color {
                    Some(Rgb { r, g, b }) => Color::Rgb { r, g, b },
                    None => Color::DarkGrey,
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for AsciiSurface {
    fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Even-odd scanline fill sampled at cell centers
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        let cell = Cell {
            glyph: shade(color),
            color: Some(color),
        };
        let corners: Vec<(f64, f64)> = points.iter().map(|&p| self.to_cell_space(p)).collect();

        let mut crossings = Vec::with_capacity(corners.len());
        for row in 0..self.height {
            let sample_y = row as f64 + 0.5;
            crossings.clear();
            for (i, &(ax, ay)) in corners.iter().enumerate() {
                let (bx, by) = corners[(i + 1) % corners.len()];
                if (ay <= sample_y && sample_y < by) || (by <= sample_y && sample_y < ay) {
                    crossings.push(ax + (sample_y - ay) * (bx - ax) / (by - ay));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0);
                let end = (span[1] - 0.5).floor().min(self.width as f64 - 1.0);
                let mut column = start;
                while column <= end {
                    self.plot(column, row as f64, cell);
                    column += 1.0;
                }
            }
        }
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb) {
        let from = self.to_cell_space(from);
        let to = self.to_cell_space(to);
        let bounds = (-1.0, -1.0, self.width as f64 + 1.0, self.height as f64 + 1.0);
        let Some(((x0, y0), (x1, y1))) = clip_to_rect(from, to, bounds) else {
            return;
        };

        let (dx, dy) = (x1 - x0, y1 - y0);
        let cell = Cell {
            glyph: line_glyph(dx, dy),
            color: Some(color),
        };
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            self.plot((x0 + dx * t).floor(), (y0 + dy * t).floor(), cell);
        }
    }
}

/// Pick a ramp character from the perceived brightness of a color
fn shade(color: Rgb) -> char {
    let luma = (0.299 * color.r as f64 + 0.587 * color.g as f64 + 0.114 * color.b as f64) / 255.0;
    let index = (luma * (LUMINOSITY_RAMP.len() - 1) as f64) as usize;
    // Keep filled cells distinguishable from empty ones
    LUMINOSITY_RAMP[index.clamp(1, LUMINOSITY_RAMP.len() - 1)]
}

/// Line character by slope in cell space (rows grow downward)
fn line_glyph(dx: f64, dy: f64) -> char {
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if dx * dy > 0.0 {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment to `(min_x, min_y, max_x, max_y)`
fn clip_to_rect(
    from: (f64, f64),
    to: (f64, f64),
    (min_x, min_y, max_x, max_y): (f64, f64, f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, from.0 - min_x),
        (dx, max_x - from.0),
        (-dy, from.1 - min_y),
        (dy, max_y - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_accounts_for_cell_aspect() {
        let surface = AsciiSurface::new(80, 24, 2.0);
        assert_eq!(surface.viewport(), Viewport::new(80.0, 48.0));
    }

    #[test]
    fn test_fill_square() {
        let mut surface = AsciiSurface::new(10, 10, 1.0);
        let square = [
            ScreenPoint::new(-2.0, 2.0),
            ScreenPoint::new(2.0, 2.0),
            ScreenPoint::new(2.0, -2.0),
            ScreenPoint::new(-2.0, -2.0),
        ];
        surface.fill_polygon(&square, Rgb::WHITE);

        // Columns and rows 3..=6 cover x and y in [-2, 2]
        for row in 0..10 {
            for column in 0..10 {
                let inside = (3..=6).contains(&row) && (3..=6).contains(&column);
                let glyph = surface.glyph(column, row).unwrap();
                assert_eq!(glyph != ' ', inside, "cell ({}, {})", column, row);
            }
        }
    }

    #[test]
    fn test_shade_never_blank() {
        assert_eq!(shade(Rgb::new(0, 0, 0)), '.');
        assert_eq!(shade(Rgb::GRAY), '=');
    }

    #[test]
    fn test_fill_far_outside_is_clamped() {
        let mut surface = AsciiSurface::new(6, 4, 2.0);
        let huge = [
            ScreenPoint::new(-1e9, 1e9),
            ScreenPoint::new(1e9, 1e9),
            ScreenPoint::new(1e9, -1e9),
            ScreenPoint::new(-1e9, -1e9),
        ];
        surface.fill_polygon(&huge, Rgb::GRAY);
        assert!(!surface.to_text().contains(' '));
    }

    #[test]
    fn test_line_glyphs() {
        let mut surface = AsciiSurface::new(11, 11, 1.0);
        surface.draw_line(ScreenPoint::new(-4.0, 0.0), ScreenPoint::new(4.0, 0.0), Rgb::WHITE);
        assert_eq!(surface.glyph(5, 5), Some('-'));
        assert_eq!(surface.glyph(2, 5), Some('-'));

        surface.clear();
        surface.draw_line(ScreenPoint::new(0.0, -4.0), ScreenPoint::new(0.0, 4.0), Rgb::WHITE);
        assert_eq!(surface.glyph(5, 3), Some('|'));

        surface.clear();
        // Up and to the right on screen
        surface.draw_line(ScreenPoint::new(-3.0, -3.0), ScreenPoint::new(3.0, 3.0), Rgb::WHITE);
        assert_eq!(surface.glyph(5, 5), Some('/'));
    }

    #[test]
    fn test_line_outside_grid_is_dropped() {
        let mut surface = AsciiSurface::new(10, 10, 1.0);
        surface.draw_line(ScreenPoint::new(100.0, 100.0), ScreenPoint::new(200.0, 120.0), Rgb::WHITE);
        assert!(surface.to_text().chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn test_long_line_is_clipped_to_grid() {
        let mut surface = AsciiSurface::new(10, 10, 1.0);
        surface.draw_line(ScreenPoint::new(-1e12, 0.0), ScreenPoint::new(1e12, 0.0), Rgb::WHITE);
        assert_eq!(surface.to_text().lines().nth(5), Some("----------"));
    }

    #[test]
    fn test_resize_clears_grid() {
        let mut surface = AsciiSurface::new(4, 4, 2.0);
        surface.draw_line(ScreenPoint::new(-2.0, 0.0), ScreenPoint::new(2.0, 0.0), Rgb::WHITE);
        surface.resize(6, 3);
        assert_eq!(surface.to_text(), "      \n      \n      ");
    }

    #[test]
    fn test_draw_writes_output() {
        let mut surface = AsciiSurface::new(4, 2, 2.0);
        surface.draw_line(ScreenPoint::new(-2.0, 0.0), ScreenPoint::new(2.0, 0.0), Rgb::WHITE);
        let mut out = Vec::new();
        surface.draw(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains('-'));
    }
}
