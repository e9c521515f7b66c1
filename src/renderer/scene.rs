//! Frame composition
//!
//! Draws a `GameState` onto any `Surface`: the camera-shifted world layer
//! first, then the fixed UI layer on top.

use glam::Vec2;

use super::vertex::colors;
use super::{Sprite, SpriteSet, Surface, TextStyle};
use crate::sim::{GameState, Outcome};

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const WIN_TEXT: &str = "YOU WIN!";

const UI_FONT: &str = "Arial";

const SCORE_POS: Vec2 = Vec2::new(20.0, 40.0);
const GAME_OVER_POS: Vec2 = Vec2::new(470.0, 300.0);
const WIN_POS: Vec2 = Vec2::new(500.0, 300.0);

/// Draw one frame. Reads the state only.
pub fn draw_frame<S: Surface>(state: &GameState, sprites: &SpriteSet<S::Image>, surface: &mut S) {
    surface.clear();

    surface.save();
    surface.translate(Vec2::new(-state.camera_x, 0.0));
    draw_world(state, sprites, surface);
    surface.restore();

    draw_ui(state, surface);
}

fn draw_world<S: Surface>(state: &GameState, sprites: &SpriteSet<S::Image>, surface: &mut S) {
    for platform in &state.platforms {
        surface.fill_rect(&platform.rect, colors::PLATFORM);
    }

    for coin in state.coins.iter().filter(|c| !c.collected) {
        surface.fill_circle(&coin.circle, colors::COIN);
    }

    surface.draw_image(sprites.get(Sprite::Player), &state.player.rect);

    let enemy = sprites.get(Sprite::Enemy);
    for moving in &state.moving_enemies {
        surface.draw_image(enemy, &moving.rect);
    }
    for fixed in &state.static_enemies {
        surface.draw_image(enemy, &fixed.rect);
    }

    // Decoration goes under the reward
    surface.draw_image(sprites.get(Sprite::Decoration), &state.decoration);
    surface.draw_image(sprites.get(Sprite::Reward), &state.reward);
}

fn draw_ui<S: Surface>(state: &GameState, surface: &mut S) {
    let score_style = TextStyle {
        size_px: 24.0,
        color: colors::SCORE_TEXT,
        font_family: UI_FONT,
    };
    surface.fill_text(&format!("Coins: {}", state.score), SCORE_POS, &score_style);

    let banner = match state.outcome {
        Outcome::Playing => None,
        Outcome::GameOver => Some((GAME_OVER_TEXT, GAME_OVER_POS, colors::GAME_OVER_TEXT)),
        Outcome::Won => Some((WIN_TEXT, WIN_POS, colors::WIN_TEXT)),
    };

    if let Some((text, pos, color)) = banner {
        let style = TextStyle {
            size_px: 48.0,
            color,
            font_family: UI_FONT,
        };
        surface.fill_text(text, pos, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{AssetProvider, Color, TintPalette, VertexBatch};
    use crate::sim::{Circle, Rect};

    /// Records every call for inspection
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Save,
        Restore,
        Translate(Vec2),
        Rect(Rect),
        Circle(Circle),
        Image(Sprite, Rect),
        Text(String, Vec2, Color),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Surface for Recorder {
        type Image = Sprite;

        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }
        fn save(&mut self) {
            self.calls.push(Call::Save);
        }
        fn restore(&mut self) {
            self.calls.push(Call::Restore);
        }
        fn translate(&mut self, offset: Vec2) {
            self.calls.push(Call::Translate(offset));
        }
        fn fill_rect(&mut self, rect: &Rect, _color: Color) {
            self.calls.push(Call::Rect(*rect));
        }
        fn fill_circle(&mut self, circle: &Circle, _color: Color) {
            self.calls.push(Call::Circle(*circle));
        }
        fn draw_image(&mut self, image: &Sprite, rect: &Rect) {
            self.calls.push(Call::Image(*image, *rect));
        }
        fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
            self.calls
                .push(Call::Text(text.to_string(), pos, style.color));
        }
    }

    struct Names;

    impl AssetProvider for Names {
        type Handle = Sprite;

        fn sprite(&self, name: &str) -> Option<Sprite> {
            Sprite::ALL.into_iter().find(|s| s.name() == name)
        }
    }

    fn record(state: &GameState) -> Vec<Call> {
        let sprites = SpriteSet::resolve(&Names).unwrap();
        let mut recorder = Recorder::default();
        draw_frame(state, &sprites, &mut recorder);
        recorder.calls
    }

    fn texts(calls: &[Call]) -> Vec<&str> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(t, _, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_world_layer_is_camera_shifted() {
        let mut state = GameState::new(1);
        state.camera_x = 321.0;
        let calls = record(&state);

        assert_eq!(calls[0], Call::Clear);
        assert_eq!(calls[1], Call::Save);
        assert_eq!(calls[2], Call::Translate(Vec2::new(-321.0, 0.0)));

        // UI comes after the transform is restored
        let restore = calls.iter().position(|c| *c == Call::Restore).unwrap();
        let first_text = calls
            .iter()
            .position(|c| matches!(c, Call::Text(..)))
            .unwrap();
        assert!(restore < first_text);
    }

    #[test]
    fn test_draws_every_entity() {
        let state = GameState::new(1);
        let calls = record(&state);

        let rects = calls.iter().filter(|c| matches!(c, Call::Rect(_))).count();
        let circles = calls.iter().filter(|c| matches!(c, Call::Circle(_))).count();
        let enemies = calls
            .iter()
            .filter(|c| matches!(c, Call::Image(Sprite::Enemy, _)))
            .count();

        assert_eq!(rects, state.platforms.len());
        assert_eq!(circles, state.coins.len());
        assert_eq!(
            enemies,
            state.moving_enemies.len() + state.static_enemies.len()
        );
        assert!(calls.contains(&Call::Image(Sprite::Player, state.player.rect)));
    }

    #[test]
    fn test_decoration_drawn_before_reward() {
        let state = GameState::new(1);
        let calls = record(&state);
        let deco = calls
            .iter()
            .position(|c| matches!(c, Call::Image(Sprite::Decoration, _)))
            .unwrap();
        let reward = calls
            .iter()
            .position(|c| matches!(c, Call::Image(Sprite::Reward, _)))
            .unwrap();
        assert!(deco < reward);
    }

    #[test]
    fn test_collected_coins_hidden() {
        let mut state = GameState::new(1);
        state.coins[0].collected = true;
        state.coins[5].collected = true;
        state.score = 2;
        let calls = record(&state);

        let circles = calls.iter().filter(|c| matches!(c, Call::Circle(_))).count();
        assert_eq!(circles, state.coins.len() - 2);
        assert_eq!(texts(&calls), vec!["Coins: 2"]);
    }

    #[test]
    fn test_game_over_banner() {
        let mut state = GameState::new(1);
        state.outcome = Outcome::GameOver;
        let calls = record(&state);
        assert_eq!(texts(&calls), vec!["Coins: 0", GAME_OVER_TEXT]);
        assert!(calls.contains(&Call::Text(
            GAME_OVER_TEXT.to_string(),
            GAME_OVER_POS,
            colors::GAME_OVER_TEXT
        )));
    }

    #[test]
    fn test_win_banner() {
        let mut state = GameState::new(1);
        state.outcome = Outcome::Won;
        let calls = record(&state);
        assert_eq!(texts(&calls), vec!["Coins: 0", WIN_TEXT]);
    }

    #[test]
    fn test_batch_restores_camera_offset() {
        let mut state = GameState::new(9);
        state.camera_x = 400.0;
        let sprites = SpriteSet::resolve(&TintPalette).unwrap();
        let mut batch = VertexBatch::new();
        draw_frame(&state, &sprites, &mut batch);
        assert!(!batch.vertices().is_empty());
        // Player quad lands in screen space, shifted by the camera
        let player_x = state.player.rect.left() - 400.0;
        assert!(batch.vertices().iter().any(|v| v.position[0] == player_x));
        assert_eq!(batch.offset(), Vec2::ZERO);
    }
}
