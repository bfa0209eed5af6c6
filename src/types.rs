//! Shared boundary types for the arm backdrop.
//!
//! This module defines the two key data contracts:
//! - Engine → Renderer (in-memory): `DrawCommand`s in surface pixels
//! - Renderer → Player (in-memory): `Frame`s of styled terminal cells

use glam::DVec2;

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

/// Opaque 8-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
}

/// Colors of one cell. `None` leaves the terminal default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

/// A translucent color, `a` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Rgba {
    Rgba { r, g, b, a }
}

impl Rgba {
    /// Linear interpolation of all four channels.
    pub fn mix(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine → Renderer boundary
// ---------------------------------------------------------------------------

/// Bloom halo drawn around a stroke, fading to nothing over `blur` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    pub blur: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<DVec2>,
    pub width: f64,
    pub color: Rgba,
    pub glow: Option<Glow>,
}

/// Radial gradient filling a disc. Stops are `(offset, color)` with offsets
/// ascending in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGlow {
    pub center: DVec2,
    pub radius: f64,
    pub stops: Vec<(f64, Rgba)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
    pub fill: Option<Rgba>,
    pub outline: Option<Rgba>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub position: DVec2,
    pub text: String,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    RadialGlow(RadialGlow),
    Stroke(Stroke),
    Circle(Circle),
    Text(Text),
}

// ---------------------------------------------------------------------------
// Drawing surface
// ---------------------------------------------------------------------------

/// The terminal seen as a drawing surface.
///
/// Engine coordinates are surface pixels; every cell spans
/// `cell_width × cell_height` of them. The cell size plays the part of a
/// device-pixel ratio and is re-read on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub columns: u16,
    pub rows: u16,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Surface {
    pub fn width(&self) -> f64 {
        self.columns as f64 * self.cell_width
    }

    pub fn height(&self) -> f64 {
        self.rows as f64 * self.cell_height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width() / 2.0, self.height() / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0 || self.cell_width <= 0.0 || self.cell_height <= 0.0
    }

    /// Surface-pixel position of a cell's center.
    pub fn cell_center(&self, column: u16, row: u16) -> DVec2 {
        DVec2::new(
            (column as f64 + 0.5) * self.cell_width,
            (row as f64 + 0.5) * self.cell_height,
        )
    }

    /// Cell containing a surface-pixel position, if it lies on the surface.
    pub fn cell_at(&self, p: DVec2) -> Option<(u16, u16)> {
        if self.is_empty() || p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let col = (p.x / self.cell_width).floor();
        let row = (p.y / self.cell_height).floor();
        if col >= self.columns as f64 || row >= self.rows as f64 {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

// ---------------------------------------------------------------------------
// Renderer → Player boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Full { cells: Vec<Vec<Cell>> },
    Diff { changes: Vec<CellChange> },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Surface {
        Surface {
            columns: 10,
            rows: 5,
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }

    #[test]
    fn surface_dimensions_scale_with_cell_size() {
        let s = surface();
        assert_eq!(s.width(), 80.0);
        assert_eq!(s.height(), 80.0);
        assert_eq!(s.center(), DVec2::new(40.0, 40.0));
    }

    #[test]
    fn cell_lookup_clips_off_surface_points() {
        let s = surface();
        assert_eq!(s.cell_at(DVec2::new(9.0, 17.0)), Some((1, 1)));
        assert_eq!(s.cell_at(DVec2::new(-1000.0, -1000.0)), None);
        assert_eq!(s.cell_at(DVec2::new(80.0, 10.0)), None);
        assert_eq!(s.cell_at(s.cell_center(3, 4)), Some((3, 4)));
    }

    #[test]
    fn mix_interpolates_every_channel() {
        let c = rgba(44, 77, 228, 0.5);
        let m = c.mix(rgba(0, 0, 0, 0.0), 0.5);
        assert_eq!((m.r, m.g, m.b), (22, 39, 114));
        assert!((m.a - 0.25).abs() < 1e-12);
    }
}
