//! Tilestorm - a deterministic action-platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `input`: Abstract key state the host feeds from hardware events
//! - `audio`: Sound request vocabulary queued by the simulation
//! - `session`: Host-facing fixed-timestep loop glue
//!
//! The crate never touches a display surface, audio device, or input
//! hardware. The host translates key events into [`input::InputState`]
//! calls, advances the session with wall-clock deltas, reads the state
//! tree to draw each frame, and drains queued [`audio::Sound`] requests.

pub mod audio;
pub mod input;
pub mod session;
pub mod sim;

pub use audio::Sound;
pub use input::{InputState, Key};
pub use session::GameSession;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (500 Hz)
    pub const TICK_MS: f32 = 1000.0 / 500.0;
    /// Frame deltas above this are discarded outright (backgrounded tab)
    pub const MAX_FRAME_MS: f64 = 500.0;

    /// Tiles per grid side
    pub const LEVEL_DIMENSION: usize = 20;
    /// World units per tile
    pub const TILE_SIZE: f32 = 5.0;
    /// Logical viewport side; the whole grid fits the view
    pub const VIEW_SIZE: f32 = LEVEL_DIMENSION as f32 * TILE_SIZE;
    /// Probability an interior cell generates solid
    pub const SOLID_DENSITY: f64 = 0.1;

    /// Downward acceleration, units/s^2
    pub const GRAVITY: f32 = 250.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 4.0;
    pub const PLAYER_SPEED: f32 = 50.0;
    pub const JUMP_STRENGTH: f32 = 120.0;
    /// Circular damage hitbox, decoupled from the movement box
    pub const PLAYER_HITBOX_RADIUS: f32 = 0.5;
    /// Grace window after leaving the ground during which a jump still fires
    pub const COYOTE_MS: f32 = 50.0;
    /// Window during which an early jump press stays armed
    pub const JUMP_BUFFER_MS: f32 = 150.0;
    /// X overlap below this resolves as a corner nudge instead of a ceiling hit
    pub const CORNER_CORRECTION: f32 = 1.5;
    pub const INVINCIBLE_MS: f32 = 1000.0;
    /// Landing faster than this (units/s, downward) plays the land sound
    pub const LAND_SOUND_DY: f32 = -5.0;

    /// Enemy pool capacity; spawns overwrite the oldest slot past this
    pub const MAX_ENEMIES: usize = 100;
    /// Trail ring length per enemy
    pub const TRAIL_LEN: usize = 75;
    pub const ENEMY_RADIUS: f32 = 2.0;
    pub const ENEMY_SPAWN_RATE_MS: f32 = 750.0;
    /// Telegraph countdown before an enemy commits to its charge
    pub const TELEGRAPH_MS: f32 = 5000.0;
    /// Charge speed in units/ms per unit of swarm speed factor
    pub const CHARGE_SPEED: f32 = 0.03;
    pub const ENEMY_SPEED_FACTOR: f32 = 1.5;
    /// Fraction of the enemy radius that counts for contact (lenient to the player)
    pub const ENEMY_HIT_LENIENCY: f32 = 0.5;

    /// Coins
    pub const COIN_COUNT: usize = 2;
    pub const SPARKLE_POOL: usize = 1000;
    pub const SPARKLE_BURST: usize = 50;
    pub const SPARKLE_LIFESPAN_MS: f32 = 400.0;
    /// Sparkle speed cap, units/ms
    pub const SPARKLE_MAX_SPEED: f32 = 0.05;

    /// Portal ambient particles
    pub const MOTE_POOL: usize = 10_000;
    pub const MOTE_SPAWN_INTERVAL_MS: f32 = 1.0;
    pub const MOTE_LIFE_MS: f32 = 1000.0;
    /// Angular drift, radians/ms
    pub const MOTE_DRIFT: f32 = 0.003;

    /// Tile wobble
    pub const WOBBLE_CHANGES_PER_SEC: f32 = 3.0;
    /// Corner offset multiplier the renderer applies
    pub const WOBBLE_STRENGTH: f32 = 0.5;

    /// Camera juice
    pub const SHAKE_DECAY_MS: f32 = 150.0;
    /// Viewport side the camera eases toward after death
    pub const DEATH_ZOOM_VIEW: f32 = 60.0;
    pub const HIT_SHAKE: f32 = 1.0;
    pub const COIN_SHAKE: f32 = 0.4;

    /// Run setup
    pub const STARTING_LIVES: u32 = 3;
    pub const WAVE_TIME_SECS: f32 = 60.0;
    /// Tiles animate in for this long after create/reset
    pub const LOAD_ANIMATION_MS: f32 = 1500.0;
}

/// World position of a tile's top-left corner.
///
/// Tile Y grows downward, world Y grows upward; tile (0, 0) maps to the
/// top-left of the viewport.
#[inline]
pub fn tile_to_world(tx: usize, ty: usize) -> Vec2 {
    let half = consts::VIEW_SIZE / 2.0;
    Vec2::new(
        -half + tx as f32 * consts::TILE_SIZE,
        half - ty as f32 * consts::TILE_SIZE,
    )
}

/// Center of a tile in world units
#[inline]
pub fn tile_center(tx: usize, ty: usize) -> Vec2 {
    let top_left = tile_to_world(tx, ty);
    Vec2::new(
        top_left.x + consts::TILE_SIZE / 2.0,
        top_left.y - consts::TILE_SIZE / 2.0,
    )
}

/// Exponentially ease `current` toward `target` by `amount` (0..=1)
#[inline]
pub fn approach(current: f32, target: f32, amount: f32) -> f32 {
    current + (target - current) * amount.clamp(0.0, 1.0)
}
