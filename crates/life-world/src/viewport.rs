//! Mapping between screen space and the grid.

use crate::alive_set::AliveSet;
use life_core::Cell;
use serde::{Deserialize, Serialize};

/// A window onto the plane, `origin` at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub origin: Cell,
    /// Side length of one cell in screen units
    pub cell_size: f32,
}

impl Viewport {
    pub fn new(origin: Cell, cell_size: f32) -> Self {
        Self { origin, cell_size }
    }

    /// Grid cell under a screen position. Rounds toward negative infinity.
    pub fn screen_to_cell(&self, px: f32, py: f32) -> Cell {
        let to_grid = |p: f32| (p / self.cell_size).floor() as i64;
        self.origin.offset(to_grid(px), to_grid(py))
    }

    /// Draw `width` x `height` cells, `#` alive and `.` dead, one row per line
    pub fn render_ascii(&self, alive: &AliveSet, width: u32, height: u32) -> String {
        let mut out = String::with_capacity((width as usize + 1) * height as usize);
        for row in 0..height {
            for col in 0..width {
                let cell = self.origin.offset(i64::from(col), i64::from(row));
                out.push(if alive.contains(cell) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Cell::ORIGIN, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_cell() {
        let viewport = Viewport::new(Cell::new(-5, -5), 10.0);

        assert_eq!(viewport.screen_to_cell(0.0, 0.0), Cell::new(-5, -5));
        assert_eq!(viewport.screen_to_cell(9.9, 19.9), Cell::new(-5, -4));
        assert_eq!(viewport.screen_to_cell(55.0, 50.0), Cell::new(0, 0));
        assert_eq!(viewport.screen_to_cell(-0.5, -10.5), Cell::new(-6, -7));
    }

    #[test]
    fn test_render_wide_single_row() {
        let alive: AliveSet = [Cell::new(70_000, 0)].into_iter().collect();
        let viewport = Viewport::new(Cell::ORIGIN, 1.0);

        let frame = viewport.render_ascii(&alive, 70_001, 1);
        assert_eq!(frame.len(), 70_002);
        assert!(frame.ends_with("#\n"));
    }

    #[test]
    fn test_render_ascii() {
        let alive: AliveSet = [Cell::new(0, 1), Cell::new(1, 1), Cell::new(2, 1)]
            .into_iter()
            .collect();
        let viewport = Viewport::new(Cell::new(-1, 0), 1.0);

        assert_eq!(
            viewport.render_ascii(&alive, 5, 3),
            ".....\n.###.\n.....\n"
        );
    }
}
