//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed tick per rendering frame
//! - No rendering or platform dependencies
//! - External mutation flows through the `MatchState` command surface only

pub mod collision;
pub mod opponent;
pub mod state;
pub mod tick;

pub use collision::{goal_scored, goal_window, resolve_mallet_collision};
pub use state::{
    Body, GameMode, GamePhase, Mallet, MatchState, Notice, Puck, Scores, Side, SideTally,
    Snapshot, Trail,
};
pub use tick::tick;
