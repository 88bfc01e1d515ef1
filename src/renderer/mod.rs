//! Rendering collaborators
//!
//! The game never rasterises anything itself. It issues draw calls against a
//! `Surface` and resolves images through an `AssetTable` filled by an
//! external loader. A missing image skips its draw call; the frame goes on.

pub mod assets;
pub mod recording;
pub mod scene;

pub use assets::{AssetTable, ImageHandle};
pub use recording::{DrawCall, RecordingSurface};

use glam::Vec2;

/// Linear RGBA
pub type Color = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A drawable target in the fixed 600x800 game space
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: TextAlign);
    /// Draw `image` centered at `center`, scaled to `size`, rotated by
    /// `rotation` radians
    fn image(&mut self, image: ImageHandle, center: Vec2, size: Vec2, rotation: f32);
}

/// Scale a color's alpha
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}
