//! Game state and core simulation types
//!
//! One state tree, one mutator: the orchestrator tick walks it in a
//! fixed order, and the host reads it read-only to draw.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::coin::Coins;
use super::enemy::Swarm;
use super::grid::TileGrid;
use super::player::Player;
use super::portal::Portal;
use super::wobble::WobbleEffect;
use crate::approach;
use crate::audio::Sound;
use crate::consts::*;

/// Coarse run phase. The simulation only ever occupies `Playing`; the
/// other phases are wired in data for the wave-recap/shop flow but no
/// transition reaches them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    WaveRecap,
    Shopping,
    GameOver,
}

/// Lives, wave, and cash bookkeeping for the current run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    pub lives: u32,
    /// Wave counter, 1-based
    pub wave: u32,
    pub cash: u64,
    /// Seconds left in the wave; clamps at zero
    pub wave_time_remaining: f32,
}

impl RunState {
    fn new() -> Self {
        Self {
            phase: GamePhase::Playing,
            lives: STARTING_LIVES,
            wave: 1,
            cash: 0,
            wave_time_remaining: WAVE_TIME_SECS,
        }
    }
}

/// Logical viewport plus juice state (shake, roll, death zoom)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    /// Screen shake intensity; decays exponentially every tick
    pub shake: f32,
    /// Roll angle in radians (movement lean, death drift)
    pub angle: f32,
}

impl Camera {
    fn new() -> Self {
        Self {
            center: Vec2::ZERO,
            width: VIEW_SIZE,
            height: VIEW_SIZE,
            shake: 0.0,
            angle: 0.0,
        }
    }

    pub fn update(&mut self, dt_ms: f32, player_alive: bool) {
        self.shake *= (-dt_ms / SHAKE_DECAY_MS).exp();
        if self.shake < 1e-3 {
            self.shake = 0.0;
        }

        if player_alive {
            self.width = approach(self.width, VIEW_SIZE, dt_ms * 0.005);
            self.height = approach(self.height, VIEW_SIZE, dt_ms * 0.005);
        } else {
            // Death zoom: tighten slowly and roll a little
            self.width = approach(self.width, DEATH_ZOOM_VIEW, dt_ms * 0.002);
            self.height = approach(self.height, DEATH_ZOOM_VIEW, dt_ms * 0.002);
            self.angle += dt_ms * 0.0005;
        }
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The single RNG every system draws from
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Milliseconds left of the load-in animation
    pub load_remaining_ms: f32,
    pub run: RunState,
    pub camera: Camera,
    pub wobble: WobbleEffect,
    pub grid: TileGrid,
    pub player: Player,
    pub coins: Coins,
    pub portal: Portal,
    pub enemies: Swarm,
    /// Sound requests queued this frame, drained by the host
    #[serde(skip)]
    pub sounds: Vec<Sound>,
}

impl GameState {
    /// Create a fresh run: new grid, coins re-rolled, portal position
    /// pending until the first update. Reset uses this constructor too,
    /// so there is no snapshot to clone.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = TileGrid::generate(LEVEL_DIMENSION, &mut rng);
        let coins = Coins::new(&grid, &mut rng);
        let wobble = WobbleEffect::new(LEVEL_DIMENSION, &mut rng);

        let mut state = Self {
            seed,
            rng,
            time_ticks: 0,
            load_remaining_ms: LOAD_ANIMATION_MS,
            run: RunState::new(),
            camera: Camera::new(),
            wobble,
            grid,
            player: Player::new(),
            coins,
            portal: Portal::new(),
            enemies: Swarm::new(),
            sounds: Vec::new(),
        };

        state.play(Sound::LevelLoad);
        log::info!("run start, seed {seed}");
        state
    }

    /// Queue a fire-and-forget sound request for the host
    #[inline]
    pub fn play(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }

    /// Hand queued sound requests to the host
    pub fn take_sounds(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.sounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_defaults() {
        let state = GameState::new(123);
        assert_eq!(state.run.phase, GamePhase::Playing);
        assert_eq!(state.run.lives, STARTING_LIVES);
        assert_eq!(state.run.cash, 0);
        assert_eq!(state.run.wave, 1);
        assert!(state.player.alive);
        assert!(state.load_remaining_ms > 0.0);
    }

    #[test]
    fn test_level_load_queued_on_create() {
        let mut state = GameState::new(123);
        assert_eq!(state.take_sounds(), vec![Sound::LevelLoad]);
        assert!(state.take_sounds().is_empty());
    }

    #[test]
    fn test_shake_decays_to_rest() {
        let mut camera = Camera::new();
        camera.shake = 1.0;
        for _ in 0..2000 {
            camera.update(TICK_MS, true);
        }
        assert_eq!(camera.shake, 0.0);
    }

    #[test]
    fn test_death_zoom_tightens_view() {
        let mut camera = Camera::new();
        for _ in 0..5000 {
            camera.update(TICK_MS, false);
        }
        assert!(camera.width < VIEW_SIZE);
        assert!(camera.angle > 0.0);
    }
}
