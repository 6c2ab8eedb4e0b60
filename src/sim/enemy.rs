//! Enemy swarm
//!
//! Enemies spawn on a fixed cadence into a preallocated pool, telegraph
//! at the player for a few seconds, then charge in a straight line until
//! their slot is recycled. A dormant slot costs nothing to tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::audio::Sound;
use crate::consts::*;
use crate::input::InputState;

/// Ring of recent positions, drawn as the charge streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    points: Vec<Vec2>,
    head: usize,
}

impl Trail {
    fn new() -> Self {
        Self {
            points: vec![Vec2::ZERO; TRAIL_LEN],
            head: 0,
        }
    }

    /// Collapse the whole ring onto one point, so a recycled slot does
    /// not draw a streak from its previous life
    fn reset(&mut self, pos: Vec2) {
        self.points.fill(pos);
        self.head = 0;
    }

    fn push(&mut self, pos: Vec2) {
        self.head = (self.head + 1) % self.points.len();
        self.points[self.head] = pos;
    }

    /// Points newest-first
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        let len = self.points.len();
        (0..len).map(move |i| self.points[(self.head + len - i) % len])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Unused pool slot
    Dormant,
    /// Tracking the player before committing to a direction
    Telegraphing { countdown_ms: f32, aim: f32 },
    /// Committed: straight-line flight at the frozen angle
    Charging { angle: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub state: EnemyState,
    pub trail: Trail,
}

impl Enemy {
    fn dormant() -> Self {
        Self {
            pos: Vec2::ZERO,
            state: EnemyState::Dormant,
            trail: Trail::new(),
        }
    }
}

/// Fixed-size enemy pool plus the spawn cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swarm {
    pub enemies: Vec<Enemy>,
    next: usize,
    /// Milliseconds between spawns
    pub spawn_rate_ms: f32,
    /// Multiplier on the base charge speed, a hook for later waves
    pub speed: f32,
    spawn_timer_ms: f32,
}

impl Swarm {
    pub fn new() -> Self {
        Self {
            enemies: (0..MAX_ENEMIES).map(|_| Enemy::dormant()).collect(),
            next: 0,
            spawn_rate_ms: ENEMY_SPAWN_RATE_MS,
            speed: ENEMY_SPEED_FACTOR,
            spawn_timer_ms: 0.0,
        }
    }

    /// Wake the next pool slot somewhere inside the border ring. An
    /// oversubscribed pool recycles its oldest slot, mid-charge or not.
    fn spawn(&mut self, rng: &mut impl Rng) {
        let span = (LEVEL_DIMENSION - 2) as f32 * TILE_SIZE;
        let pos = Vec2::new(
            (rng.random::<f32>() - 0.5) * span,
            (rng.random::<f32>() - 0.5) * span,
        );
        let idx = self.next;
        self.next = (idx + 1) % self.enemies.len();
        let slot = &mut self.enemies[idx];
        slot.pos = pos;
        slot.state = EnemyState::Telegraphing {
            countdown_ms: TELEGRAPH_MS,
            aim: 0.0,
        };
        slot.trail.reset(pos);
    }

    pub fn active_count(&self) -> usize {
        self.enemies
            .iter()
            .filter(|e| e.state != EnemyState::Dormant)
            .count()
    }
}

impl Default for Swarm {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the swarm by one fixed tick: spawn cadence, telegraph
/// tracking, charge flight, then contact damage. Everything pauses
/// while the level is loading or the player is dead.
pub fn update_enemies(state: &mut GameState, _input: &InputState, dt_ms: f32) {
    if state.load_remaining_ms > 0.0 || !state.player.alive {
        return;
    }

    let GameState {
        enemies,
        player,
        rng,
        camera,
        run,
        sounds,
        ..
    } = state;

    enemies.spawn_timer_ms += dt_ms;
    while enemies.spawn_timer_ms >= enemies.spawn_rate_ms {
        enemies.spawn_timer_ms -= enemies.spawn_rate_ms;
        enemies.spawn(rng);
    }

    let step = CHARGE_SPEED * enemies.speed * dt_ms;
    for enemy in &mut enemies.enemies {
        match enemy.state {
            EnemyState::Dormant => {}
            EnemyState::Telegraphing { countdown_ms, .. } => {
                // Track the player right up to the commit point
                let to_player = player.pos - enemy.pos;
                let aim = to_player.y.atan2(to_player.x);
                let countdown_ms = countdown_ms - dt_ms;
                if countdown_ms <= 0.0 {
                    enemy.state = EnemyState::Charging { angle: aim };
                    sounds.push(Sound::Shoot);
                } else {
                    enemy.state = EnemyState::Telegraphing { countdown_ms, aim };
                }
            }
            EnemyState::Charging { angle } => {
                enemy.pos += Vec2::new(angle.cos(), angle.sin()) * step;
                enemy.trail.push(enemy.pos);
            }
        }
    }

    // Contact damage; only a committed charge can hurt
    if player.invincible_remaining_ms <= 0.0 {
        let reach = player.hitbox_radius + ENEMY_RADIUS * ENEMY_HIT_LENIENCY;
        for enemy in &enemies.enemies {
            let charging = matches!(enemy.state, EnemyState::Charging { .. });
            if !charging || enemy.pos.distance(player.pos) >= reach {
                continue;
            }
            run.lives = run.lives.saturating_sub(1);
            camera.shake = HIT_SHAKE;
            if run.lives == 0 {
                player.alive = false;
                sounds.push(Sound::Death);
            } else {
                player.invincible_remaining_ms = INVINCIBLE_MS;
            }
            break;
        }
    }
}
