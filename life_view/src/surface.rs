// surface.rs - Drawing primitives the renderer needs from its host

use egui::{Color32, Pos2, Rect};

/// A 2D drawing target addressed in backing-store pixels.
pub trait Surface {
    fn stroke_line(&mut self, from: Pos2, to: Pos2, color: Color32);
    fn fill_rect(&mut self, rect: Rect, color: Color32);
}
