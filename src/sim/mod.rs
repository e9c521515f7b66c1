//! Fixed-step simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One step per host frame callback, no delta-time scaling
//! - Seeded RNG only (world construction)
//! - Stable iteration order (entities are stored in creation order)

pub mod geometry;
pub mod input;
pub mod state;
pub mod tick;

pub use geometry::{Circle, Rect, circle_rect_overlap, rect_overlap};
pub use input::{InputTracker, KeyAction, KeySnapshot, TickInput};
pub use state::{
    Coin, GameEvent, GameState, MovingEnemy, Outcome, Platform, Player, StaticEnemy,
};
pub use tick::{apply_jump, tick};
