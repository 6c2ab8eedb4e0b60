//! Fixed-step clock
//!
//! Converts arbitrary wall-clock frame deltas into a whole number of
//! fixed simulation ticks. Rendering may happen every frame off the
//! latest resolved state; gameplay only ever advances in these ticks.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_MS, TICK_MS};

/// Accumulates frame time and emits fixed ticks
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FixedClock {
    remainder_ms: f32,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a frame delta in and return how many fixed ticks to run.
    ///
    /// Oversized deltas (backgrounded tab, debugger stop) discard the
    /// whole frame instead of running a catch-up burst, which bounds
    /// worst-case ticks per frame. Negative deltas are also dropped.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !(0.0..=MAX_FRAME_MS).contains(&dt_ms) {
            log::warn!("dropping frame delta of {dt_ms:.0} ms");
            return 0;
        }
        self.remainder_ms += dt_ms as f32;
        let mut ticks = 0;
        while self.remainder_ms >= TICK_MS {
            self.remainder_ms -= TICK_MS;
            ticks += 1;
        }
        ticks
    }
}
