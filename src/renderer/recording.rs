//! A surface that records draw calls instead of drawing
//!
//! Used by the headless runner and by tests to check what a frame drew.

use glam::Vec2;

use super::{Color, ImageHandle, Surface, TextAlign};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Rect { min: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Text { text: String, pos: Vec2, size: f32, color: Color, align: TextAlign },
    Image { image: ImageHandle, center: Vec2, size: Vec2, rotation: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn images(&self) -> impl Iterator<Item = ImageHandle> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Image { image, .. } => Some(*image),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.calls.push(DrawCall::Rect { min, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::Circle { center, radius, color });
    }

    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: TextAlign) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            size,
            color,
            align,
        });
    }

    fn image(&mut self, image: ImageHandle, center: Vec2, size: Vec2, rotation: f32) {
        self.calls.push(DrawCall::Image {
            image,
            center,
            size,
            rotation,
        });
    }
}
