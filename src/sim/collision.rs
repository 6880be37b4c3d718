//! Collision detection and response for the rink
//!
//! Straight walls with two goal mouths plus circle-circle mallet impacts.
//! All functions here are pure with respect to everything but the puck they
//! are handed; ordering across a tick lives in [`tick`](super::tick::tick).

use glam::Vec2;

use super::state::{Body, Mallet, Puck, Side};
use crate::consts::*;

/// Horizontal extent of both goal mouths: (left, right)
#[inline]
pub fn goal_window() -> (f32, f32) {
    let left = (BOARD_WIDTH - GOAL_WIDTH) / 2.0;
    (left, left + GOAL_WIDTH)
}

/// True when the puck center has left the rink extended by one radius on
/// any side - the degenerate stuck state that forces a recovery reset.
pub fn escaped_rink(puck: &Puck) -> bool {
    let Body { pos, radius } = puck.body;
    pos.x < -radius
        || pos.x > BOARD_WIDTH + radius
        || pos.y < -radius
        || pos.y > BOARD_HEIGHT + radius
}

/// Reflect the puck off the side walls, clamping it back onto the rink.
///
/// The reflected component is taken signed outward (absolute value away
/// from the wall), so a puck already moving away is not re-reversed.
pub fn bounce_side_walls(puck: &mut Puck) {
    let r = puck.body.radius;
    if puck.body.pos.x - r <= 0.0 {
        puck.vel.x = puck.vel.x.abs() * WALL_RESTITUTION;
        puck.body.pos.x = r;
    } else if puck.body.pos.x + r >= BOARD_WIDTH {
        puck.vel.x = -puck.vel.x.abs() * WALL_RESTITUTION;
        puck.body.pos.x = BOARD_WIDTH - r;
    }
}

/// Which side scored, if the puck is leaving through a goal mouth.
///
/// The window test is strict: a puck centered exactly on a post bounces
/// instead. Crossing the top edge scores for the bottom player and vice
/// versa.
pub fn goal_scored(puck: &Puck) -> Option<Side> {
    let (left, right) = goal_window();
    let Body { pos, radius } = puck.body;
    if pos.x > left && pos.x < right {
        if pos.y - radius <= 0.0 {
            return Some(Side::Bottom);
        }
        if pos.y + radius >= BOARD_HEIGHT {
            return Some(Side::Top);
        }
    }
    None
}

/// Mirror of [`bounce_side_walls`] for the short edges.
///
/// Only called on ticks where no goal was detected; on a goal tick the puck
/// is allowed past the edge until the pause consumes it.
pub fn bounce_end_walls(puck: &mut Puck) {
    let r = puck.body.radius;
    if puck.body.pos.y - r <= 0.0 {
        puck.vel.y = puck.vel.y.abs() * WALL_RESTITUTION;
        puck.body.pos.y = r;
    } else if puck.body.pos.y + r >= BOARD_HEIGHT {
        puck.vel.y = -puck.vel.y.abs() * WALL_RESTITUTION;
        puck.body.pos.y = BOARD_HEIGHT - r;
    }
}

/// Resolve a puck-mallet overlap.
///
/// On contact the puck is pushed out along the contact normal by the
/// overlap amount, then its velocity blends retained momentum, transferred
/// mallet momentum and a base impulse along the normal - the latter two
/// scaled up as rounds escalate. The result is capped at `max_speed`.
///
/// Returns true if contact occurred.
pub fn resolve_mallet_collision(
    puck: &mut Puck,
    mallet: &Mallet,
    speed_multiplier: f32,
    max_speed: f32,
) -> bool {
    let delta = puck.body.pos - mallet.body.pos;
    let distance = delta.length();
    let contact = puck.body.radius + mallet.body.radius;
    if distance >= contact {
        return false;
    }

    // Contact normal points from mallet toward puck; a dead-center overlap
    // degenerates to +x, matching atan2(0, 0) = 0
    let normal = delta.try_normalize().unwrap_or(Vec2::X);
    let overlap = contact - distance;
    puck.body.pos += normal * overlap;

    let impact_factor = 0.5 * speed_multiplier;
    puck.vel = puck.vel * 0.4 + mallet.vel * impact_factor + normal * 3.0 * speed_multiplier;

    clamp_speed(puck, max_speed);
    true
}

/// Cap the puck's speed while preserving its direction
pub fn clamp_speed(puck: &mut Puck, max_speed: f32) {
    let speed = puck.vel.length();
    if speed > max_speed {
        puck.vel *= max_speed / speed;
    }
}

/// Force the puck back within playable bounds after overlap resolution.
///
/// The vertical clamp is suppressed on a goal tick so the puck can leave
/// through the mouth while the goal event is pending.
pub fn clamp_to_rink(puck: &mut Puck, goal_tick: bool) {
    let r = puck.body.radius;
    puck.body.pos.x = puck.body.pos.x.clamp(r, BOARD_WIDTH - r);
    if !goal_tick {
        puck.body.pos.y = puck.body.pos.y.clamp(r, BOARD_HEIGHT - r);
    }
}
