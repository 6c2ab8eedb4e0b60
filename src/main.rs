//! Headless demo driver
//!
//! Runs a scripted session for a few hundred frames and prints a JSON
//! run summary, which is enough to watch the simulation behave (and to
//! diff two runs of the same seed). Pass a seed as the first argument
//! to make the run reproducible.

use std::time::{SystemTime, UNIX_EPOCH};

use tilestorm::sim::GamePhase;
use tilestorm::{GameSession, Key};

const FRAME_MS: f64 = 1000.0 / 60.0;
const FRAMES: u32 = 600;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0xB1A5)
        });

    let mut session = GameSession::new(seed);
    session.key_down(Key::Right);

    for frame in 0..FRAMES {
        // Hop every second or so while running right
        match frame % 64 {
            0 => session.key_down(Key::Jump),
            4 => session.key_up(Key::Jump),
            _ => {}
        }
        session.update(FRAME_MS);

        for sound in session.take_sounds() {
            log::debug!("frame {frame}: sound {}", sound.name());
        }
        if session.state().run.phase == GamePhase::GameOver {
            break;
        }
    }

    let state = session.state();
    let summary = serde_json::json!({
        "seed": state.seed,
        "ticks": state.time_ticks,
        "lives": state.run.lives,
        "cash": state.run.cash,
        "wave_time_remaining": state.run.wave_time_remaining,
        "player_alive": state.player.alive,
        "player_pos": state.player.pos,
        "enemies_active": state.enemies.active_count(),
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("run summary failed to serialize: {err}"),
    }
}
