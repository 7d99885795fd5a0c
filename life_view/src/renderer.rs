// renderer.rs - Gridlines and cell fills for one frame

use egui::{Color32, Rect, Vec2, pos2};

use crate::bitgrid::{Dimensions, is_set, linear_index};
use crate::surface::Surface;

pub const DEFAULT_CELL_SIZE: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub grid: Color32,
    pub dead: Color32,
    pub alive: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: Color32::from_rgb(0xCC, 0xCC, 0xCC),
            dead: Color32::WHITE,
            alive: Color32::BLACK,
        }
    }
}

/// Draws a packed grid onto a [`Surface`].
///
/// Cells are `cell_size` pixels square with a one pixel gridline between
/// neighbours and around the border.
#[derive(Clone, Debug)]
pub struct GridRenderer {
    cell_size: u32,
    pub palette: Palette,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl GridRenderer {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size,
            palette: Palette::default(),
        }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Distance between the origins of two adjacent cells.
    pub fn pitch(&self) -> f32 {
        (self.cell_size + 1) as f32
    }

    /// Backing-store size needed for the whole grid.
    pub fn canvas_size(&self, dims: Dimensions) -> Vec2 {
        Vec2::new(
            self.pitch() * dims.width as f32 + 1.0,
            self.pitch() * dims.height as f32 + 1.0,
        )
    }

    pub fn draw_grid(&self, surface: &mut impl Surface, dims: Dimensions) {
        let pitch = self.pitch();
        let size = self.canvas_size(dims);

        // vertical lines
        for i in 0..=dims.width {
            let x = i as f32 * pitch + 1.0;
            surface.stroke_line(pos2(x, 0.0), pos2(x, size.y), self.palette.grid);
        }

        // horizontal lines
        for j in 0..=dims.height {
            let y = j as f32 * pitch + 1.0;
            surface.stroke_line(pos2(0.0, y), pos2(size.x, y), self.palette.grid);
        }
    }

    /// Fills every cell from `cells`, which must hold at least
    /// `dims.packed_len()` bytes.
    pub fn draw_cells(&self, surface: &mut impl Surface, dims: Dimensions, cells: &[u8]) {
        let pitch = self.pitch();
        let side = Vec2::splat(self.cell_size as f32);

        for row in 0..dims.height {
            for col in 0..dims.width {
                let idx = linear_index(row, col, dims.width);
                let color = if is_set(idx, cells) {
                    self.palette.alive
                } else {
                    self.palette.dead
                };
                let origin = pos2(col as f32 * pitch + 1.0, row as f32 * pitch + 1.0);
                surface.fill_rect(Rect::from_min_size(origin, side), color);
            }
        }
    }

    pub fn draw(&self, surface: &mut impl Surface, dims: Dimensions, cells: &[u8]) {
        self.draw_grid(surface, dims);
        self.draw_cells(surface, dims, cells);
    }
}
