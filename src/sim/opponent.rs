//! Scripted opponent for single-player mode
//!
//! Chases the puck while it is in the top half, otherwise retreats to a
//! home spot in front of its own goal. Per-axis movement is capped each
//! tick so the mallet never teleports, and the caps grow with the round.

use glam::Vec2;

use super::state::{Mallet, Puck};
use crate::consts::*;

/// One capped step along a single axis; never overshoots the target
#[inline]
fn step_toward(current: f32, target: f32, cap: f32) -> f32 {
    let delta = target - current;
    current + delta.signum() * delta.abs().min(cap)
}

/// Move the opponent mallet one tick toward its current objective.
///
/// `ai_speed` is the round-scaled cap from
/// [`MatchState::ai_speed`](super::state::MatchState::ai_speed). Lateral
/// chasing runs at the full cap, vertical chasing at 80% of it, and the
/// retreat home at 60% on both axes.
pub fn steer(mallet: &mut Mallet, puck: &Puck, ai_speed: f32) {
    let pos = mallet.body.pos;
    let next = if puck.body.pos.y < MID_Y {
        // Puck in our half: intercept a point just above it
        let target = puck.body.pos - Vec2::new(0.0, 20.0);
        Vec2::new(
            step_toward(pos.x, target.x, ai_speed),
            step_toward(pos.y, target.y, ai_speed * 0.8),
        )
    } else {
        // Fall back toward home in front of the goal
        let home = Vec2::new(BOARD_WIDTH / 2.0, MALLET_START_INSET);
        Vec2::new(
            step_toward(pos.x, home.x, ai_speed * 0.6),
            step_toward(pos.y, home.y, ai_speed * 0.6),
        )
    };

    let r = mallet.body.radius;
    mallet.body.pos = Vec2::new(
        next.x.clamp(r, BOARD_WIDTH - r),
        next.y.clamp(r, MID_Y - r - OPPONENT_ZONE_PADDING),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puck_at(x: f32, y: f32) -> Puck {
        let mut puck = Puck::new();
        puck.body.pos = Vec2::new(x, y);
        puck
    }

    #[test]
    fn test_chases_puck_in_own_half() {
        let mut mallet = Mallet::new(Vec2::new(200.0, 120.0));
        let puck = puck_at(300.0, 200.0);

        steer(&mut mallet, &puck, BASE_AI_SPEED);
        // Full cap laterally, 80% vertically, both toward the puck
        assert_eq!(mallet.body.pos.x, 200.0 + BASE_AI_SPEED);
        assert_eq!(mallet.body.pos.y, 120.0 + BASE_AI_SPEED * 0.8);
    }

    #[test]
    fn test_never_overshoots_target() {
        let mut mallet = Mallet::new(Vec2::new(200.0, 120.0));
        let puck = puck_at(201.0, 141.0); // chase target is (201, 121)

        steer(&mut mallet, &puck, BASE_AI_SPEED);
        assert_eq!(mallet.body.pos, Vec2::new(201.0, 121.0));
    }

    #[test]
    fn test_retreats_home_when_puck_below_midline() {
        let mut mallet = Mallet::new(Vec2::new(300.0, 300.0));
        let puck = puck_at(200.0, 600.0);

        steer(&mut mallet, &puck, BASE_AI_SPEED);
        assert_eq!(mallet.body.pos.x, 300.0 - BASE_AI_SPEED * 0.6);
        assert_eq!(mallet.body.pos.y, 300.0 - BASE_AI_SPEED * 0.6);
    }

    #[test]
    fn test_clamped_to_padded_zone() {
        // Puck hugging the midline in the top half draws the mallet down,
        // but the clamp holds it 10 short of the half-plane bound
        let mut mallet = Mallet::new(Vec2::new(200.0, 360.0));
        let puck = puck_at(200.0, 399.0);

        for _ in 0..20 {
            steer(&mut mallet, &puck, BASE_AI_SPEED);
        }
        assert_eq!(
            mallet.body.pos.y,
            MID_Y - MALLET_RADIUS - OPPONENT_ZONE_PADDING
        );
    }

    #[test]
    fn test_side_wall_clamp() {
        let mut mallet = Mallet::new(Vec2::new(30.0, 120.0));
        let puck = puck_at(5.0, 120.0);

        for _ in 0..20 {
            steer(&mut mallet, &puck, BASE_AI_SPEED);
        }
        assert_eq!(mallet.body.pos.x, MALLET_RADIUS);
    }
}
