/// Drawing surface contract between the geometry pipeline and a front end
///
/// Coordinates handed to a surface are centered on the surface with y
/// pointing up. Each front end translates them to its own pixel or cell grid.
use serde::{Deserialize, Serialize};

/// A point on the drawing surface, relative to its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
    pub const SKY_BLUE: Rgb = Rgb::new(135, 206, 235);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Primitive sink for rendered geometry
pub trait Surface {
    fn clear(&mut self);
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb);
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb);
}

/// A single recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillPolygon { points: Vec<ScreenPoint>, color: Rgb },
    Line { from: ScreenPoint, to: ScreenPoint, color: Rgb },
}

/// Surface that keeps every call, for headless rendering and inspection
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polygons(&self) -> impl Iterator<Item = &[ScreenPoint]> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillPolygon { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }
}
