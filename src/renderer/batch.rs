//! Triangle-list surface for the WebGPU pipeline
//!
//! Shapes and sprites are tessellated into `Vertex` triangles in pixel space.
//! Text cannot go through the triangle pipeline, so it is collected as
//! `TextRun`s for the page overlay.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use super::{AssetProvider, Color, Sprite, Surface, TextStyle};
use crate::sim::{Circle, Rect};

/// Circle tessellation used for coins
const CIRCLE_SEGMENTS: u32 = 16;

/// Sprite handle for the batch: the sprite is drawn as a flat quad in this color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteTint {
    pub color: Color,
}

/// Asset provider handing out the built-in sprite tints
#[derive(Debug, Clone, Copy, Default)]
pub struct TintPalette;

impl AssetProvider for TintPalette {
    type Handle = SpriteTint;

    fn sprite(&self, name: &str) -> Option<SpriteTint> {
        let sprite = Sprite::ALL.into_iter().find(|s| s.name() == name)?;
        let color = match sprite {
            Sprite::Player => colors::PLAYER_TINT,
            Sprite::Enemy => colors::ENEMY_TINT,
            Sprite::Reward => colors::REWARD_TINT,
            Sprite::Decoration => colors::DECORATION_TINT,
        };
        Some(SpriteTint { color })
    }
}

/// Text positioned in viewport pixels (`pos` is the baseline start)
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
}

/// Collects one frame worth of geometry and text
#[derive(Debug, Default)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    text: Vec<TextRun>,
    offset: Vec2,
    saved: Vec<Vec2>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn text_runs(&self) -> &[TextRun] {
        &self.text
    }

    /// Current translation applied to drawing calls
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

impl Surface for VertexBatch {
    type Image = SpriteTint;

    fn clear(&mut self) {
        self.vertices.clear();
        self.text.clear();
    }

    fn save(&mut self) {
        self.saved.push(self.offset);
    }

    fn restore(&mut self) {
        // Unbalanced restore is ignored, like a canvas context
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.offset += offset;
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        self.vertices
            .extend(shapes::quad(rect.pos + self.offset, rect.size, color.to_array()));
    }

    fn fill_circle(&mut self, circle: &Circle, color: Color) {
        self.vertices.extend(shapes::circle(
            circle.center + self.offset,
            circle.radius,
            color.to_array(),
            CIRCLE_SEGMENTS,
        ));
    }

    fn draw_image(&mut self, image: &SpriteTint, rect: &Rect) {
        self.fill_rect(rect, image.color);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.text.push(TextRun {
            text: text.to_string(),
            pos: pos + self.offset,
            style: style.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TextStyle {
        TextStyle {
            size_px: 24.0,
            color: Color::BLACK,
            font_family: "Arial",
        }
    }

    #[test]
    fn test_translate_save_restore() {
        let mut batch = VertexBatch::new();
        batch.save();
        batch.translate(Vec2::new(-100.0, 0.0));
        batch.fill_rect(&Rect::new(150.0, 10.0, 10.0, 10.0), Color::RED);
        batch.restore();
        batch.fill_rect(&Rect::new(150.0, 10.0, 10.0, 10.0), Color::RED);

        let verts = batch.vertices();
        assert_eq!(verts.len(), 12);
        assert_eq!(verts[0].position, [50.0, 10.0]);
        assert_eq!(verts[6].position, [150.0, 10.0]);
        assert_eq!(batch.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_unbalanced_restore_keeps_offset() {
        let mut batch = VertexBatch::new();
        batch.translate(Vec2::new(5.0, 0.0));
        batch.restore();
        assert_eq!(batch.offset(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_text_is_collected_with_offset() {
        let mut batch = VertexBatch::new();
        batch.translate(Vec2::new(-10.0, 0.0));
        batch.fill_text("Coins: 3", Vec2::new(20.0, 40.0), &style());

        assert!(batch.vertices().is_empty());
        let runs = batch.text_runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "Coins: 3");
        assert_eq!(runs[0].pos, Vec2::new(10.0, 40.0));
    }

    #[test]
    fn test_clear_drops_contents() {
        let mut batch = VertexBatch::new();
        batch.fill_circle(&Circle::new(0.0, 0.0, 8.0), Color::GOLD);
        batch.fill_text("x", Vec2::ZERO, &style());
        batch.clear();
        assert!(batch.vertices().is_empty());
        assert!(batch.text_runs().is_empty());
    }

    #[test]
    fn test_palette_resolves_every_sprite() {
        for sprite in Sprite::ALL {
            assert!(TintPalette.sprite(sprite.name()).is_some());
        }
        assert!(TintPalette.sprite("mushroom").is_none());
    }
}
