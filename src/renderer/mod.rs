//! Renderer: the deterministic rasterizer.
//!
//! Takes the engine's `DrawCommand`s (surface pixels) and produces `Frame`s
//! of styled terminal cells for the player.
//!
//! Rasterizing is pure: the same commands on the same surface always yield
//! the same grid. The only state kept is the previous grid, so consecutive
//! frames can be sent as diffs.

mod canvas;

use crate::types::{Cell, CellChange, DrawCommand, Frame, Surface};
use canvas::Canvas;

pub use crate::types::Rgb;

pub struct Renderer {
    backdrop: Rgb,
    prev_grid: Option<Vec<Vec<Cell>>>,
}

impl Renderer {
    pub fn new(backdrop: Rgb) -> Self {
        Renderer {
            backdrop,
            prev_grid: None,
        }
    }

    /// Rasterize one frame of commands.
    ///
    /// The first frame, and any frame whose grid size differs from the
    /// previous one, is a full frame. Otherwise only changed cells are sent.
    pub fn render(&mut self, ops: &[DrawCommand], surface: Surface) -> Frame {
        let grid = Self::rasterize(ops, surface, self.backdrop);
        let frame = match &self.prev_grid {
            Some(prev) if same_shape(prev, &grid) => Frame::Diff {
                changes: Self::diff(prev, &grid),
            },
            _ => Frame::Full {
                cells: grid.clone(),
            },
        };
        self.prev_grid = Some(grid);
        frame
    }

    /// Forget the previous grid so the next frame is sent in full.
    pub fn invalidate(&mut self) {
        self.prev_grid = None;
    }

    /// Rasterize commands, in order, onto a grid the size of `surface`.
    pub fn rasterize(ops: &[DrawCommand], surface: Surface, backdrop: Rgb) -> Vec<Vec<Cell>> {
        if surface.is_empty() {
            return Vec::new();
        }
        let mut canvas = Canvas::new(surface, backdrop);
        for op in ops {
            match op {
                DrawCommand::RadialGlow(g) => canvas.radial_glow(g),
                DrawCommand::Stroke(s) => canvas.stroke(s),
                DrawCommand::Circle(c) => canvas.circle(c),
                DrawCommand::Text(t) => canvas.text(t),
            }
        }
        canvas.into_cells()
    }

    /// Compute a cell-level diff between two grids.
    fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: *next_cell,
                    });
                }
            }
        }
        changes
    }
}

fn same_shape(a: &[Vec<Cell>], b: &[Vec<Cell>]) -> bool {
    a.len() == b.len() && a.first().map(Vec::len) == b.first().map(Vec::len)
}
