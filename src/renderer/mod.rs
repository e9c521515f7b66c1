//! Rendering module
//!
//! `scene` draws the game through the `Surface` trait. `batch` implements that
//! trait by tessellating into triangles, which `pipeline` uploads to WebGPU.

pub mod batch;
pub mod fps;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use batch::{SpriteTint, TextRun, TintPalette, VertexBatch};
pub use fps::{FpsCounter, draw_fps};
pub use pipeline::{RenderInitError, RenderState};
pub use scene::draw_frame;

use glam::Vec2;
use thiserror::Error;

use crate::sim::{Circle, Rect};

/// RGBA color, components in 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    /// CSS `gold`
    pub const GOLD: Color = Color::from_hex(0xffd700);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color from a `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS color string, e.g. `rgba(255, 215, 0, 1)`
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            self.a
        )
    }
}

/// How a piece of text is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub color: Color,
    pub font_family: &'static str,
}

impl TextStyle {
    /// CSS font shorthand, e.g. `24px Arial`
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.size_px, self.font_family)
    }
}

/// Something the scene can be drawn onto
///
/// Coordinates are pixels with the origin at the top-left of the viewport.
/// `translate` shifts everything drawn afterwards; `save`/`restore` push and
/// pop that transform.
pub trait Surface {
    /// Handle for a loaded sprite image
    type Image;

    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn fill_rect(&mut self, rect: &Rect, color: Color);
    fn fill_circle(&mut self, circle: &Circle, color: Color);
    fn draw_image(&mut self, image: &Self::Image, rect: &Rect);
    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}

/// The sprites the scene needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Enemy,
    Reward,
    Decoration,
}

impl Sprite {
    pub const ALL: [Sprite; 4] = [
        Sprite::Player,
        Sprite::Enemy,
        Sprite::Reward,
        Sprite::Decoration,
    ];

    /// Asset name the provider resolves
    pub fn name(&self) -> &'static str {
        match self {
            Sprite::Player => "player",
            Sprite::Enemy => "enemy",
            Sprite::Reward => "reward",
            Sprite::Decoration => "decoration",
        }
    }
}

/// Errors raised while resolving sprites at startup
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("sprite `{0}` is not available")]
    MissingSprite(&'static str),
}

/// Source of sprite handles, keyed by name
pub trait AssetProvider {
    type Handle;

    fn sprite(&self, name: &str) -> Option<Self::Handle>;
}

/// One resolved handle per sprite
#[derive(Debug, Clone)]
pub struct SpriteSet<H> {
    pub player: H,
    pub enemy: H,
    pub reward: H,
    pub decoration: H,
}

impl<H> SpriteSet<H> {
    /// Resolve every sprite up front, failing on the first one missing
    pub fn resolve<P>(provider: &P) -> Result<Self, AssetError>
    where
        P: AssetProvider<Handle = H>,
    {
        let load = |sprite: Sprite| {
            provider
                .sprite(sprite.name())
                .ok_or(AssetError::MissingSprite(sprite.name()))
        };
        Ok(Self {
            player: load(Sprite::Player)?,
            enemy: load(Sprite::Enemy)?,
            reward: load(Sprite::Reward)?,
            decoration: load(Sprite::Decoration)?,
        })
    }

    pub fn get(&self, sprite: Sprite) -> &H {
        match sprite {
            Sprite::Player => &self.player,
            Sprite::Enemy => &self.enemy,
            Sprite::Reward => &self.reward,
            Sprite::Decoration => &self.decoration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapProvider(HashMap<&'static str, u32>);

    impl AssetProvider for MapProvider {
        type Handle = u32;

        fn sprite(&self, name: &str) -> Option<u32> {
            self.0.get(name).copied()
        }
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0x6b4f2a);
        assert!((c.r - 107.0 / 255.0).abs() < 1e-6);
        assert!((c.g - 79.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 42.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
        assert_eq!(Color::GOLD.to_css(), "rgba(255, 215, 0, 1)");
    }

    #[test]
    fn test_sprite_set_resolves_all() {
        let provider = MapProvider(
            Sprite::ALL
                .iter()
                .enumerate()
                .map(|(i, s)| (s.name(), i as u32))
                .collect(),
        );
        let sprites = SpriteSet::resolve(&provider).unwrap();
        for (i, sprite) in Sprite::ALL.iter().enumerate() {
            assert_eq!(*sprites.get(*sprite), i as u32);
        }
    }

    #[test]
    fn test_sprite_set_missing_fails() {
        let mut map = HashMap::new();
        map.insert("player", 1);
        map.insert("enemy", 2);
        map.insert("decoration", 3);

        let err = SpriteSet::resolve(&MapProvider(map)).unwrap_err();
        assert!(matches!(err, AssetError::MissingSprite("reward")));
        assert_eq!(err.to_string(), "sprite `reward` is not available");
    }
}
