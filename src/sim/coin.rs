//! Coins and pickup sparkles
//!
//! A fixed number of coins live on the grid at all times. Picking one
//! up pays out, bursts a ring of sparkles, and immediately re-rolls the
//! coin onto another empty cell.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::TileGrid;
use super::state::GameState;
use crate::audio::Sound;
use crate::consts::*;
use crate::{tile_center, tile_to_world};

/// One pooled pickup particle; dead when `lifetime_ms` hits zero
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sparkle {
    pub lifetime_ms: f32,
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    /// Color hue in [0, 1), picked at burst time
    pub hue: f32,
}

impl Sparkle {
    fn dead() -> Self {
        Self {
            lifetime_ms: 0.0,
            pos: Vec2::ZERO,
            angle: 0.0,
            speed: 0.0,
            hue: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coins {
    /// Tile cell of each live coin
    pub cells: Vec<(usize, usize)>,
    pub sparkles: Vec<Sparkle>,
    next_sparkle: usize,
}

impl Coins {
    pub fn new(grid: &TileGrid, rng: &mut impl Rng) -> Self {
        Self {
            cells: (0..COIN_COUNT).map(|_| grid.random_empty_cell(rng)).collect(),
            sparkles: vec![Sparkle::dead(); SPARKLE_POOL],
            next_sparkle: 0,
        }
    }

    /// Burst a ring of sparkles at a world position, recycling the
    /// oldest slots when the pool wraps
    fn burst(&mut self, at: Vec2, rng: &mut impl Rng) {
        for _ in 0..SPARKLE_BURST {
            self.sparkles[self.next_sparkle] = Sparkle {
                lifetime_ms: SPARKLE_LIFESPAN_MS,
                pos: at,
                angle: rng.random::<f32>() * std::f32::consts::TAU,
                speed: rng.random::<f32>() * SPARKLE_MAX_SPEED,
                hue: rng.random::<f32>(),
            };
            self.next_sparkle = (self.next_sparkle + 1) % self.sparkles.len();
        }
    }

    pub fn live_sparkles(&self) -> usize {
        self.sparkles.iter().filter(|s| s.lifetime_ms > 0.0).count()
    }
}

/// Advance sparkles and handle coin pickup for one fixed tick
pub fn update_coins(state: &mut GameState, dt_ms: f32) {
    let GameState {
        coins,
        player,
        grid,
        rng,
        camera,
        run,
        sounds,
        load_remaining_ms,
        ..
    } = state;

    // Sparkles keep drifting even across death and load-in
    for sparkle in &mut coins.sparkles {
        if sparkle.lifetime_ms <= 0.0 {
            continue;
        }
        sparkle.lifetime_ms -= dt_ms;
        sparkle.pos += Vec2::new(sparkle.angle.cos(), sparkle.angle.sin()) * sparkle.speed * dt_ms;
    }

    if *load_remaining_ms > 0.0 || !player.alive {
        return;
    }

    let half_w = player.width / 2.0;
    let half_h = player.height / 2.0;
    for i in 0..coins.cells.len() {
        let (tx, ty) = coins.cells[i];
        let tl = tile_to_world(tx, ty);
        let overlapping = player.pos.x + half_w > tl.x
            && player.pos.x - half_w < tl.x + TILE_SIZE
            && player.pos.y - half_h < tl.y
            && player.pos.y + half_h > tl.y - TILE_SIZE;
        if !overlapping {
            continue;
        }
        run.cash += 1;
        camera.shake += COIN_SHAKE;
        sounds.push(Sound::Coin);
        coins.burst(tile_center(tx, ty), rng);
        coins.cells[i] = grid.random_empty_cell(rng);
    }
}
