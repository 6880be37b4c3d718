//! Neon Hockey - a two-paddle air hockey arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, round state machine)
//!
//! Rendering, pointer capture and UI chrome live outside this crate. They
//! read a [`sim::Snapshot`] each frame and feed mallet targets and mode
//! commands back through the narrow [`sim::MatchState`] surface.

pub mod sim;

pub use sim::{GameMode, GamePhase, MatchState, Side};

/// Game configuration constants
pub mod consts {
    /// Rink dimensions (real coordinate space)
    pub const BOARD_WIDTH: f32 = 400.0;
    pub const BOARD_HEIGHT: f32 = 800.0;
    /// Horizontal midline separating the two halves
    pub const MID_Y: f32 = BOARD_HEIGHT / 2.0;

    /// Entity radii - mallets are larger than the puck
    pub const PUCK_RADIUS: f32 = 15.0;
    pub const MALLET_RADIUS: f32 = 28.0;

    /// Horizontal span of each goal mouth, centered on the short edges
    pub const GOAL_WIDTH: f32 = 160.0;

    /// Maximum number of past puck positions kept for the render trail
    pub const MAX_TRAIL_LENGTH: usize = 15;

    /// Per-tick exponential velocity decay
    pub const FRICTION: f32 = 0.99;
    /// Energy kept on a wall bounce
    pub const WALL_RESTITUTION: f32 = 0.8;

    /// Puck speed cap in round 1
    pub const BASE_MAX_PUCK_SPEED: f32 = 20.0;
    /// Opponent mallet speed cap in round 1
    pub const BASE_AI_SPEED: f32 = 5.5;

    /// 15% puck speed increase per round
    pub const SPEED_INCREMENT_PER_ROUND: f32 = 0.15;
    /// 10% opponent speed increase per round
    pub const AI_DIFFICULTY_INCREMENT: f32 = 0.10;

    pub const MAX_ROUNDS: u32 = 5;
    pub const POINTS_PER_ROUND: u32 = 100;

    /// One simulation tick per display frame
    pub const TICK_HZ: u32 = 60;
    /// Frozen pause after a goal before the next round starts (1.2 s at 60 Hz)
    pub const GOAL_PAUSE_TICKS: u32 = 72;
    /// Round notice lifetime before it self-clears (2 s at 60 Hz)
    pub const NOTICE_TICKS: u32 = 120;

    /// Mallet spawn distance from its own short edge
    pub const MALLET_START_INSET: f32 = 120.0;

    /// Extra vertical margin on the opponent's half clamp. Tighter than the
    /// midline invariant on purpose: home-zone padding for the scripted
    /// mallet only, so it never camps the center line.
    pub const OPPONENT_ZONE_PADDING: f32 = 10.0;
}
