//! Host-facing session
//!
//! The contract with the embedding host is three calls: feed key edges
//! as they arrive, call [`GameSession::update`] once per rendered frame
//! with the wall-clock delta, then read the state to draw and drain the
//! sound queue. The session owns the fixed-step conversion so the host
//! never sees tick granularity.

use crate::consts::TICK_MS;
use crate::input::{InputState, Key};
use crate::sim::{tick, FixedClock, GameState};
use crate::Sound;

pub struct GameSession {
    state: GameState,
    clock: FixedClock,
    input: InputState,
}

impl GameSession {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            clock: FixedClock::new(),
            input: InputState::new(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Fold one frame's wall-clock delta into fixed ticks. Press and
    /// release edges are visible to the first tick of the frame only;
    /// held state persists across frames until released.
    pub fn update(&mut self, dt_ms: f64) {
        for _ in 0..self.clock.advance(dt_ms) {
            tick(&mut self.state, &self.input, TICK_MS);
            self.input.clear_edges();
        }
    }

    /// Read-only view for drawing
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Drain sound requests queued since the last drain
    pub fn take_sounds(&mut self) -> Vec<Sound> {
        self.state.take_sounds()
    }
}
