//! Per-frame simulation advance
//!
//! One tick per rendering frame, driven by the embedder's frame loop. All
//! physics, opponent logic and state-machine evaluation for a tick run
//! back-to-back; the embedder only ever observes completed ticks.

use super::collision;
use super::opponent;
use super::state::{GameMode, GamePhase, MatchState, Side};
use crate::consts::*;

/// Advance the match by one tick.
///
/// `Playing` runs the full physics pass, `GoalPause` drains its timer and
/// performs the deferred round transition, `Menu` and `GameOver` are inert.
/// The transient notice ages in every phase.
pub fn tick(state: &mut MatchState) {
    match state.phase {
        GamePhase::Playing => playing_tick(state),
        GamePhase::GoalPause => goal_pause_tick(state),
        GamePhase::Menu | GamePhase::GameOver => {}
    }
    state.age_notice();
}

/// The physics pass. Order matters and is load-bearing: walls before the
/// goal check, goal check before end walls and mallet impacts, final clamp
/// last with its vertical component suppressed on a goal tick.
fn playing_tick(state: &mut MatchState) {
    state.time_ticks += 1;

    // Mallet velocities derive from wherever input left them since last tick
    for mallet in &mut state.mallets {
        mallet.derive_velocity();
    }

    state.trail.record(state.puck.body.pos);

    // Stuck-state recovery: clipped or teleported fully out of the rink
    if collision::escaped_rink(&state.puck) {
        log::debug!("puck escaped rink at {}, recentering", state.puck.body.pos);
        state.puck.reset();
        state.trail.clear();
    }

    // Integrate with exponential friction decay
    state.puck.body.pos += state.puck.vel;
    state.puck.vel *= FRICTION;

    collision::bounce_side_walls(&mut state.puck);

    let scored = collision::goal_scored(&state.puck);
    if scored.is_none() {
        collision::bounce_end_walls(&mut state.puck);
    }

    if state.mode == GameMode::OnePlayer {
        let ai_speed = state.ai_speed();
        opponent::steer(
            &mut state.mallets[Side::Top.index()],
            &state.puck,
            ai_speed,
        );
    }

    // Mallet impacts still run on a goal tick: the goal check precedes
    // them, preserving the original resolution order
    let mult = state.speed_multiplier();
    let max_speed = state.max_puck_speed();
    for side in [Side::Bottom, Side::Top] {
        collision::resolve_mallet_collision(
            &mut state.puck,
            &state.mallets[side.index()],
            mult,
            max_speed,
        );
    }

    collision::clamp_to_rink(&mut state.puck, scored.is_some());

    if let Some(side) = scored {
        state.score_goal(side);
    }
}

/// Drain the goal pause, then either start the next round or end the match.
fn goal_pause_tick(state: &mut MatchState) {
    state.goal_pause_ticks = state.goal_pause_ticks.saturating_sub(1);
    if state.goal_pause_ticks > 0 {
        return;
    }

    if state.round < MAX_ROUNDS {
        state.round += 1;
        state.reset_positions();
        state.phase = GamePhase::Playing;
        state.post_notice(format!("Round {} - Speed Increased!", state.round));
        log::info!(
            "round {} begins, speed x{:.2}",
            state.round,
            state.speed_multiplier()
        );
    } else {
        state.phase = GamePhase::GameOver;
        log::info!(
            "match over: {} - {}",
            state.scores.bottom.points,
            state.scores.top.points
        );
    }
}
