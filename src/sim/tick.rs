//! Orchestrator tick
//!
//! One fixed simulation step in a fixed order: reset, clocks, ambience,
//! camera, player, coins, portal, enemies. Every system draws from the
//! single state RNG, so two runs with the same seed and inputs replay
//! identically.

use rand::Rng;

use super::coin::update_coins;
use super::enemy::update_enemies;
use super::player::update_player;
use super::portal::update_portal;
use super::state::GameState;
use crate::input::{InputState, Key};

/// Advance the whole simulation by one fixed tick of `dt_ms`
pub fn tick(state: &mut GameState, input: &InputState, dt_ms: f32) {
    if input.just_pressed(Key::Reset) {
        reset(state);
    }

    state.time_ticks += 1;
    if state.load_remaining_ms > 0.0 {
        state.load_remaining_ms -= dt_ms;
    }

    if state.player.alive {
        if state.load_remaining_ms <= 0.0 {
            state.run.wave_time_remaining =
                (state.run.wave_time_remaining - dt_ms / 1000.0).max(0.0);
        }
    } else {
        state.player.time_dead_ms += dt_ms;
    }

    state.wobble.update(&mut state.rng, dt_ms);
    state.camera.update(dt_ms, state.player.alive);

    update_player(state, input, dt_ms);
    update_coins(state, dt_ms);
    update_portal(state, dt_ms);
    update_enemies(state, input, dt_ms);
}

/// Start the run over with a fresh seed drawn from the dying run's RNG.
/// Sounds already queued this frame survive so the host still hears
/// them alongside the new run's load cue.
fn reset(state: &mut GameState) {
    let seed = state.rng.random::<u64>();
    let mut fresh = GameState::new(seed);
    let mut sounds = std::mem::take(&mut state.sounds);
    sounds.append(&mut fresh.sounds);
    fresh.sounds = sounds;
    *state = fresh;
}
