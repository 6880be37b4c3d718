//! Neon Hockey entry point
//!
//! Headless demo driver: runs a scripted single-player match to completion
//! and dumps the final snapshot as JSON. The interactive shell (canvas
//! renderer, pointer input, HUD) embeds the library exactly the way this
//! loop does - one `tick` per frame, targets in, snapshot out.

use neon_hockey::sim::{GameMode, GamePhase, MatchState, Side, tick};

/// Hard stop so a stalled script cannot spin forever (~30 min of sim time)
const MAX_DEMO_TICKS: u64 = 120_000;

fn main() {
    env_logger::init();
    log::info!("Neon Hockey (headless) starting...");

    let mut state = MatchState::new();
    state.start(GameMode::OnePlayer);

    // Crude bottom-side script: press up against the puck from below so
    // every touch knocks it toward the far goal
    let mut ticks = 0u64;
    while state.phase != GamePhase::GameOver && ticks < MAX_DEMO_TICKS {
        let puck = state.puck.body.pos;
        state.set_mallet_target(Side::Bottom, puck.x, puck.y + 20.0);
        tick(&mut state);
        ticks += 1;
    }

    if state.phase != GamePhase::GameOver {
        log::warn!("demo stopped after {ticks} ticks without finishing");
    }

    match state.winner() {
        Some(side) => log::info!("{side:?} takes the match after {ticks} ticks"),
        None => log::info!("grand tie after {ticks} ticks"),
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialization failed: {err}"),
    }
}
