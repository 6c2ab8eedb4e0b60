//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The renderer reads the state tree directly; the only outputs besides
//! mutated state are queued sound requests.

pub mod clock;
pub mod coin;
pub mod enemy;
pub mod grid;
pub mod player;
pub mod portal;
pub mod state;
pub mod tick;
pub mod wobble;

pub use clock::FixedClock;
pub use coin::{Coins, Sparkle};
pub use enemy::{Enemy, EnemyState, Swarm, Trail};
pub use grid::{Tile, TileGrid};
pub use player::Player;
pub use portal::{Mote, Portal};
pub use state::{Camera, GamePhase, GameState, RunState};
pub use tick::tick;
pub use wobble::WobbleEffect;
