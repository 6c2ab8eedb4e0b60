//! Sound request vocabulary
//!
//! The simulation queues [`Sound`]s as side effects of state
//! transitions; the host drains the queue each frame and owns decoding,
//! mixing, and overlap. Requests are fire-and-forget.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    /// Coin collected
    Coin,
    /// Fatal hit; the run is over until reset
    Death,
    /// Jump executed (fresh press or consumed buffer)
    Jump,
    /// Hard landing
    Land,
    /// Run created or reset
    LevelLoad,
    /// Enemy telegraph expired, charge committed
    Shoot,
}

impl Sound {
    /// Stable name for logs and host-side sample lookup
    pub fn name(&self) -> &'static str {
        match self {
            Sound::Coin => "coin",
            Sound::Death => "death",
            Sound::Jump => "jump",
            Sound::Land => "land",
            Sound::LevelLoad => "level-load",
            Sound::Shoot => "shoot",
        }
    }
}
