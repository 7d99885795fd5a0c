// interaction.rs - Pointer position to grid cell

use egui::{Pos2, Rect, Vec2};

use crate::bitgrid::Dimensions;

/// Maps a pointer position to the `(row, column)` under it.
///
/// `bounds` is where the surface is shown on screen and `backing` is the
/// surface's size in backing-store pixels, so a scaled display still lands on
/// the right cell. Positions past the last gridline clamp to the last
/// row/column.
pub fn cell_at(
    pointer: Pos2,
    bounds: Rect,
    backing: Vec2,
    dims: Dimensions,
    cell_size: u32,
) -> (u32, u32) {
    let scale_x = backing.x / bounds.width();
    let scale_y = backing.y / bounds.height();

    let x = (pointer.x - bounds.min.x) * scale_x;
    let y = (pointer.y - bounds.min.y) * scale_y;

    let pitch = (cell_size + 1) as f32;
    // Float-to-int casts saturate, so anything left of or above the grid is 0.
    let row = ((y / pitch).floor() as u32).min(dims.height - 1);
    let column = ((x / pitch).floor() as u32).min(dims.width - 1);
    (row, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    const DIMS: Dimensions = Dimensions { width: 64, height: 64 };
    const BACKING: Vec2 = Vec2 { x: 385.0, y: 385.0 };

    #[test]
    fn unscaled_click_inside_a_cell() {
        let bounds = Rect::from_min_size(pos2(10.0, 20.0), BACKING);
        let pointer = pos2(10.0 + 5.0 * 6.0 + 3.0, 20.0 + 3.0 * 6.0 + 3.0);
        assert_eq!(cell_at(pointer, bounds, BACKING, DIMS, 5), (3, 5));
    }

    #[test]
    fn display_scale_is_undone() {
        // Shown at half size: one display pixel covers two backing pixels.
        let bounds = Rect::from_min_size(pos2(0.0, 0.0), BACKING * 0.5);
        let pointer = pos2((5.0 * 6.0 + 3.0) / 2.0, (3.0 * 6.0 + 3.0) / 2.0);
        assert_eq!(cell_at(pointer, bounds, BACKING, DIMS, 5), (3, 5));
    }

    #[test]
    fn final_gridline_clamps_to_last_cell() {
        let bounds = Rect::from_min_size(pos2(0.0, 0.0), BACKING);
        assert_eq!(cell_at(pos2(384.9, 384.9), bounds, BACKING, DIMS, 5), (63, 63));
    }

    #[test]
    fn outside_top_left_clamps_to_origin() {
        let bounds = Rect::from_min_size(pos2(50.0, 50.0), BACKING);
        assert_eq!(cell_at(pos2(40.0, 45.0), bounds, BACKING, DIMS, 5), (0, 0));
    }
}
