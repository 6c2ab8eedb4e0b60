//! Exit portal and its ambient motes
//!
//! The portal claims an empty cell lazily on the first update after a
//! run starts and never moves. It continuously sheds short-lived motes
//! that drift in slow circles around it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::consts::*;

/// One pooled ambience particle; the host derives its screen position
/// from the portal center, the angle, and the remaining lifetime
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mote {
    pub lifetime_ms: f32,
    pub angle: f32,
    pub hue: f32,
}

impl Mote {
    fn dead() -> Self {
        Self {
            lifetime_ms: 0.0,
            angle: 0.0,
            hue: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portal {
    /// Claimed on the first update, fixed for the rest of the run
    pub cell: Option<(usize, usize)>,
    pub motes: Vec<Mote>,
    next: usize,
    spawn_accum_ms: f32,
}

impl Portal {
    pub fn new() -> Self {
        Self {
            cell: None,
            motes: vec![Mote::dead(); MOTE_POOL],
            next: 0,
            spawn_accum_ms: 0.0,
        }
    }

    pub fn live_motes(&self) -> usize {
        self.motes.iter().filter(|m| m.lifetime_ms > 0.0).count()
    }
}

impl Default for Portal {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the portal by one fixed tick
pub fn update_portal(state: &mut GameState, dt_ms: f32) {
    let GameState {
        portal, grid, rng, ..
    } = state;

    if portal.cell.is_none() {
        portal.cell = Some(grid.random_empty_cell(rng));
    }

    portal.spawn_accum_ms += dt_ms;
    while portal.spawn_accum_ms >= MOTE_SPAWN_INTERVAL_MS {
        portal.spawn_accum_ms -= MOTE_SPAWN_INTERVAL_MS;
        portal.motes[portal.next] = Mote {
            lifetime_ms: MOTE_LIFE_MS,
            angle: rng.random::<f32>() * std::f32::consts::TAU,
            hue: rng.random::<f32>(),
        };
        portal.next = (portal.next + 1) % portal.motes.len();
    }

    for mote in &mut portal.motes {
        if mote.lifetime_ms <= 0.0 {
            continue;
        }
        mote.lifetime_ms -= dt_ms;
        mote.angle += dt_ms * MOTE_DRIFT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameState;

    #[test]
    fn test_lazy_placement_on_empty_cell() {
        let mut state = GameState::new(17);
        assert!(state.portal.cell.is_none());

        update_portal(&mut state, TICK_MS);
        let cell = state.portal.cell.unwrap();
        assert!(!state.grid.tile(cell.0, cell.1).is_solid());

        // Never moves after the claim
        for _ in 0..1000 {
            update_portal(&mut state, TICK_MS);
        }
        assert_eq!(state.portal.cell, Some(cell));
    }

    #[test]
    fn test_mote_cadence() {
        let mut state = GameState::new(17);
        // 2 ms ticks at a 1 ms spawn interval: two motes each tick
        update_portal(&mut state, TICK_MS);
        assert_eq!(state.portal.live_motes(), 2);
        update_portal(&mut state, TICK_MS);
        assert_eq!(state.portal.live_motes(), 4);
    }

    #[test]
    fn test_motes_expire_and_slots_recycle() {
        let mut state = GameState::new(17);
        // Run well past one lifetime: spawns and deaths balance out at
        // roughly life / interval live motes, far under the pool size
        let ticks = (MOTE_LIFE_MS / TICK_MS) as usize * 4;
        for _ in 0..ticks {
            update_portal(&mut state, TICK_MS);
        }
        let live = state.portal.live_motes();
        let steady = (MOTE_LIFE_MS / MOTE_SPAWN_INTERVAL_MS) as usize;
        assert!(live <= steady);
        assert!(live > steady / 2);
        assert!(live < MOTE_POOL);
    }

    #[test]
    fn test_motes_drift() {
        let mut state = GameState::new(17);
        update_portal(&mut state, TICK_MS);
        let before = state.portal.motes[0].angle;
        update_portal(&mut state, TICK_MS);
        let after = state.portal.motes[0].angle;
        assert!((after - before - TICK_MS * MOTE_DRIFT).abs() < 1e-5);
    }
}
