//! Tile corner wobble
//!
//! A lattice of per-corner random offsets the renderer applies when
//! stroking tiles, reshuffled a few times per second. Purely visual,
//! but kept in the simulation so runs stay deterministic.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::WOBBLE_CHANGES_PER_SEC;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WobbleEffect {
    dimension: usize,
    time_since_change_ms: f32,
    /// One offset per tile corner: a `(dimension + 1)^2` lattice
    corners: Vec<Vec2>,
}

impl WobbleEffect {
    pub fn new(dimension: usize, rng: &mut impl Rng) -> Self {
        let mut effect = Self {
            dimension,
            time_since_change_ms: 0.0,
            corners: vec![Vec2::ZERO; (dimension + 1) * (dimension + 1)],
        };
        effect.reshuffle(rng);
        effect
    }

    fn reshuffle(&mut self, rng: &mut impl Rng) {
        for corner in &mut self.corners {
            *corner = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
        }
    }

    pub fn update(&mut self, rng: &mut impl Rng, dt_ms: f32) {
        self.time_since_change_ms += dt_ms;
        let time_per_change = 1000.0 / WOBBLE_CHANGES_PER_SEC;
        if self.time_since_change_ms > time_per_change {
            self.time_since_change_ms -= time_per_change;
            self.reshuffle(rng);
        }
    }

    /// Offset for corner `(x, y)` of the lattice. A lookup outside the
    /// lattice is a programming error and halts the frame rather than
    /// rendering garbage.
    pub fn corner(&self, x: usize, y: usize) -> Vec2 {
        assert!(
            x <= self.dimension && y <= self.dimension,
            "wobble corner ({x}, {y}) outside the sample lattice"
        );
        self.corners[y * (self.dimension + 1) + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_offsets_centered() {
        let mut rng = Pcg32::seed_from_u64(1);
        let wobble = WobbleEffect::new(20, &mut rng);
        for y in 0..=20 {
            for x in 0..=20 {
                let c = wobble.corner(x, y);
                assert!(c.x >= -0.5 && c.x < 0.5);
                assert!(c.y >= -0.5 && c.y < 0.5);
            }
        }
    }

    #[test]
    fn test_reshuffles_on_interval() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut wobble = WobbleEffect::new(4, &mut rng);
        let before = wobble.corner(0, 0);
        // 3 changes/sec: just under the interval keeps the lattice
        wobble.update(&mut rng, 300.0);
        assert_eq!(wobble.corner(0, 0), before);
        wobble.update(&mut rng, 100.0);
        assert_ne!(wobble.corner(0, 0), before);
    }

    #[test]
    #[should_panic(expected = "outside the sample lattice")]
    fn test_out_of_range_corner_is_fatal() {
        let mut rng = Pcg32::seed_from_u64(1);
        let wobble = WobbleEffect::new(4, &mut rng);
        wobble.corner(6, 0);
    }
}
