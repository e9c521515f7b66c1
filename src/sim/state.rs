//! Game state and core simulation types
//!
//! Everything one playthrough needs lives in `GameState`. Restarting replaces
//! the whole value with a freshly built one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Rect};
use crate::consts::*;

/// How the current session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Active gameplay
    #[default]
    Playing,
    /// Player touched an enemy
    GameOver,
    /// Player reached the reward
    Won,
}

impl Outcome {
    /// Terminal outcomes freeze the simulation until restart
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Playing)
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Jump impulse applied
    Jumped,
    /// A coin was picked up; `score` is the new total
    CoinCollected { index: usize, score: u32 },
    /// Session just reached a terminal outcome (emitted once)
    SessionEnded(Outcome),
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    /// Horizontal distance moved per tick while a direction is held
    pub speed: f32,
    /// Airborne; cleared only by landing on a platform
    pub jumping: bool,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, PLAYER_SIZE, PLAYER_SIZE),
            vy: 0.0,
            speed: PLAYER_SPEED,
            jumping: false,
        }
    }

    /// Start a jump if standing on something. Returns true if the impulse was applied.
    pub fn try_jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.vy = JUMP_IMPULSE;
        self.jumping = true;
        true
    }

    /// Put the player's feet at `y`, stopping vertical motion
    pub fn land_on(&mut self, y: f32) {
        self.rect.pos.y = y - self.rect.size.y;
        self.vy = 0.0;
        self.jumping = false;
    }
}

/// Static solid the player can stand on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

/// Enemy patrolling horizontally between the world edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingEnemy {
    pub rect: Rect,
    pub speed: f32,
    /// +1.0 moving right, -1.0 moving left
    pub dir: f32,
}

impl MovingEnemy {
    /// Advance one tick and bounce off the world edges
    pub fn advance(&mut self, world_width: f32) {
        self.rect.pos.x += self.speed * self.dir;
        if self.rect.left() < 0.0 || self.rect.right() > world_width {
            self.dir = -self.dir;
        }
    }
}

/// Enemy that never moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticEnemy {
    pub rect: Rect,
}

/// A collectible coin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub circle: Circle,
    pub collected: bool,
}

/// Complete world and session state for one playthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the world was built from
    pub seed: u64,
    /// Total world width
    pub world_width: f32,
    /// Viewport size the camera frames
    pub viewport: Vec2,
    /// Simulation tick counter (advances only while playing)
    pub time_ticks: u64,
    /// Coins collected this session
    pub score: u32,
    pub outcome: Outcome,
    /// Horizontal camera offset
    pub camera_x: f32,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub moving_enemies: Vec<MovingEnemy>,
    pub static_enemies: Vec<StaticEnemy>,
    pub coins: Vec<Coin>,
    pub reward: Rect,
    /// Background image region, no collision
    pub decoration: Rect,
}

impl GameState {
    /// Build the level with the default viewport
    pub fn new(seed: u64) -> Self {
        Self::with_viewport(seed, Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT))
    }

    /// Build the level for a specific viewport size
    pub fn with_viewport(seed: u64, viewport: Vec2) -> Self {
        let world_width = WORLD_WIDTH;
        let mut rng = Pcg32::seed_from_u64(seed);

        let platforms = vec![
            // Ground
            Platform {
                rect: Rect::new(0.0, 540.0, world_width, 60.0),
            },
            Platform {
                rect: Rect::new(300.0, 420.0, 180.0, 20.0),
            },
            Platform {
                rect: Rect::new(600.0, 350.0, 180.0, 20.0),
            },
            Platform {
                rect: Rect::new(900.0, 280.0, 180.0, 20.0),
            },
            Platform {
                rect: Rect::new(1200.0, 350.0, 180.0, 20.0),
            },
            Platform {
                rect: Rect::new(1500.0, 420.0, 180.0, 20.0),
            },
            Platform {
                rect: Rect::new(1800.0, 300.0, 200.0, 20.0),
            },
        ];

        // Ground patrol, each starting in a random direction
        let moving_enemies = (0..MOVING_ENEMY_COUNT)
            .map(|i| MovingEnemy {
                rect: Rect::new(400.0 + i as f32 * 300.0, 500.0, ENEMY_SIZE, ENEMY_SIZE),
                speed: ENEMY_SPEED,
                dir: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            })
            .collect();

        // Guards standing on the floating platforms
        let static_enemies = [
            (340.0, 380.0),
            (640.0, 310.0),
            (940.0, 240.0),
            (1240.0, 310.0),
            (1840.0, 260.0),
        ]
        .into_iter()
        .map(|(x, y)| StaticEnemy {
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
        })
        .collect();

        // Coins alternate between two heights
        let coins = (0..COIN_COUNT)
            .map(|i| Coin {
                circle: Circle::new(
                    350.0 + i as f32 * 160.0,
                    250.0 + (i % 2) as f32 * 60.0,
                    COIN_RADIUS,
                ),
                collected: false,
            })
            .collect();

        Self {
            seed,
            world_width,
            viewport,
            time_ticks: 0,
            score: 0,
            outcome: Outcome::Playing,
            camera_x: 0.0,
            player: Player::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            platforms,
            moving_enemies,
            static_enemies,
            coins,
            // Sits on the ground at the far end
            reward: Rect::new(world_width - 120.0, 500.0, ENEMY_SIZE, ENEMY_SIZE),
            decoration: Rect::new(world_width - 600.0, 600.0, 600.0, 400.0),
        }
    }

    /// Throw away this playthrough and rebuild the level from `seed`
    pub fn reset(&mut self, seed: u64) {
        *self = Self::with_viewport(seed, self.viewport);
    }

    /// Largest camera offset that keeps the viewport inside the world
    pub fn max_camera_x(&self) -> f32 {
        (self.world_width - self.viewport.x).max(0.0)
    }

    /// Number of coins picked up so far
    pub fn collected_coins(&self) -> usize {
        self.coins.iter().filter(|c| c.collected).count()
    }
}
