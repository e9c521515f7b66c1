//! Coin Dash - A side-scrolling coin platformer
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (physics, collisions, session state)
//! - `renderer`: Surface abstraction, scene drawing and the WebGPU pipeline
//! - `settings`: Persisted preferences and key bindings

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{KeyBindings, Settings};

/// Game configuration constants
pub mod consts {
    /// Total world width in pixels
    pub const WORLD_WIDTH: f32 = 2400.0;
    /// Visible viewport (canvas) size
    pub const VIEWPORT_WIDTH: f32 = 1000.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Downward acceleration added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.8;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// How far past a platform top the player's feet may sink and still land
    pub const LANDING_TOLERANCE: f32 = 12.0;

    /// Player defaults
    pub const PLAYER_SPAWN_X: f32 = 60.0;
    pub const PLAYER_SPAWN_Y: f32 = 480.0;
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const MOVING_ENEMY_COUNT: usize = 6;

    /// Coin defaults
    pub const COIN_COUNT: usize = 12;
    pub const COIN_RADIUS: f32 = 8.0;
}
