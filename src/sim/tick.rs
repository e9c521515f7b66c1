//! Fixed-step simulation tick
//!
//! One call per host frame callback. The step never scales by elapsed time.

use super::geometry::{circle_rect_overlap, rect_overlap};
use super::input::TickInput;
use super::state::{GameEvent, GameState, Outcome};
use crate::consts::*;

/// Apply a jump press. Ignored while airborne or once the session has ended.
pub fn apply_jump(state: &mut GameState) -> bool {
    if state.outcome.is_terminal() {
        return false;
    }
    state.player.try_jump()
}

/// Advance the game state by one step
///
/// Returns the events raised during the step. A session that already ended
/// is left untouched and yields no events.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.outcome.is_terminal() {
        return events;
    }

    state.time_ticks += 1;

    if input.jump_pressed && apply_jump(state) {
        events.push(GameEvent::Jumped);
    }

    // Both directions may be held at once and simply cancel out
    let player = &mut state.player;
    if input.right {
        player.rect.pos.x += player.speed;
    }
    if input.left {
        player.rect.pos.x -= player.speed;
    }

    player.vy += GRAVITY;
    player.rect.pos.y += player.vy;

    land_on_platforms(state);

    // Keep the player inside the world
    let player = &mut state.player;
    if player.rect.left() < 0.0 {
        player.rect.pos.x = 0.0;
    }
    if player.rect.right() > state.world_width {
        player.rect.pos.x = state.world_width - player.rect.size.x;
    }

    update_camera(state);

    let player_rect = state.player.rect;
    let mut hit_enemy = false;

    for enemy in &mut state.moving_enemies {
        enemy.advance(state.world_width);
        if rect_overlap(&player_rect, &enemy.rect) {
            hit_enemy = true;
        }
    }

    if state
        .static_enemies
        .iter()
        .any(|enemy| rect_overlap(&player_rect, &enemy.rect))
    {
        hit_enemy = true;
    }

    if hit_enemy {
        state.outcome = Outcome::GameOver;
    }

    for (index, coin) in state.coins.iter_mut().enumerate() {
        if !coin.collected && circle_rect_overlap(&coin.circle, &player_rect) {
            coin.collected = true;
            state.score += 1;
            events.push(GameEvent::CoinCollected {
                index,
                score: state.score,
            });
        }
    }

    // Dying on the same tick as touching the reward still counts as a loss
    if state.outcome == Outcome::Playing && rect_overlap(&player_rect, &state.reward) {
        state.outcome = Outcome::Won;
    }

    if state.outcome.is_terminal() {
        events.push(GameEvent::SessionEnded(state.outcome));
    }

    events
}

/// Land the player on any platform their feet reached this step
///
/// A landing needs horizontal overlap, feet no more than `LANDING_TOLERANCE`
/// below the platform top, and feet that will reach the top with the current
/// velocity. Only landings from above are resolved.
fn land_on_platforms(state: &mut GameState) {
    let player = &mut state.player;
    player.jumping = true;

    for platform in &state.platforms {
        let top = platform.rect.top();
        let bottom = player.rect.bottom();
        if player.rect.overlaps_x(&platform.rect)
            && bottom <= top + LANDING_TOLERANCE
            && bottom + player.vy >= top
        {
            player.land_on(top);
        }
    }
}

/// Center the camera on the player, clamped to the world
fn update_camera(state: &mut GameState) {
    let target = state.player.rect.left() - state.viewport.x / 2.0;
    state.camera_x = target
        .min(state.world_width - state.viewport.x)
        .max(0.0);
}
