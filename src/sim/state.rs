//! Match state and core simulation types
//!
//! Everything the renderer and UI chrome read lives here. Mutation from
//! outside the crate goes through the command surface (`start`,
//! `return_to_menu`, `set_mallet_target`) plus [`tick`](super::tick::tick).

use std::cmp::Ordering;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, awaiting mode selection
    Menu,
    /// Physics active
    Playing,
    /// Brief frozen pause after a goal, next-round reset pending
    GoalPause,
    /// Match finished, terminal until an explicit restart
    GameOver,
}

/// Selected game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Human on the bottom mallet, scripted opponent on top
    OnePlayer,
    /// Two humans, one mallet each
    TwoPlayer,
}

/// Which short edge a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Bottom,
    Top,
}

impl Side {
    /// Stable index for per-side storage
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Bottom => 0,
            Side::Top => 1,
        }
    }

    /// Canonical mallet spawn for this side
    pub fn spawn_pos(self) -> Vec2 {
        match self {
            Side::Bottom => Vec2::new(BOARD_WIDTH / 2.0, BOARD_HEIGHT - MALLET_START_INSET),
            Side::Top => Vec2::new(BOARD_WIDTH / 2.0, MALLET_START_INSET),
        }
    }
}

/// Positioned circle shared by the puck and both mallets
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub radius: f32,
}

/// The freely-moving puck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puck {
    pub body: Body,
    pub vel: Vec2,
}

impl Puck {
    pub fn new() -> Self {
        Self {
            body: Body {
                pos: Vec2::new(BOARD_WIDTH / 2.0, BOARD_HEIGHT / 2.0),
                radius: PUCK_RADIUS,
            },
            vel: Vec2::ZERO,
        }
    }

    /// Back to rink center, at rest
    pub fn reset(&mut self) {
        self.body.pos = Vec2::new(BOARD_WIDTH / 2.0, BOARD_HEIGHT / 2.0);
        self.vel = Vec2::ZERO;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

impl Default for Puck {
    fn default() -> Self {
        Self::new()
    }
}

/// A player- or opponent-controlled mallet
///
/// Position is written by an external actor (pointer input or the opponent
/// controller) before each tick; velocity is derived from the previous tick's
/// position, never set directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mallet {
    pub body: Body,
    pub prev_pos: Vec2,
    pub vel: Vec2,
}

impl Mallet {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body {
                pos,
                radius: MALLET_RADIUS,
            },
            prev_pos: pos,
            vel: Vec2::ZERO,
        }
    }

    /// Velocity is how far the mallet was dragged since last tick
    pub(crate) fn derive_velocity(&mut self) {
        self.vel = self.body.pos - self.prev_pos;
        self.prev_pos = self.body.pos;
    }

    /// Teleport to a spawn point, shedding any derived velocity
    pub fn reset(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.prev_pos = pos;
        self.vel = Vec2::ZERO;
    }
}

/// Bounded history of past puck positions (oldest first)
///
/// Render-only; never feeds back into physics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    points: Vec<Vec2>,
}

impl Trail {
    /// Record a position, evicting the oldest entry past the cap
    pub fn record(&mut self, pos: Vec2) {
        self.points.push(pos);
        if self.points.len() > MAX_TRAIL_LENGTH {
            self.points.remove(0);
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Per-side tally: rounds won and the score derived from them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTally {
    pub rounds_won: u32,
    pub points: u32,
}

/// Both sides' tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub bottom: SideTally,
    pub top: SideTally,
}

impl Scores {
    pub fn get(&self, side: Side) -> &SideTally {
        match side {
            Side::Bottom => &self.bottom,
            Side::Top => &self.top,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut SideTally {
        match side {
            Side::Bottom => &mut self.bottom,
            Side::Top => &mut self.top,
        }
    }

    /// Points are always rounds-won times the fixed round value, both sides
    pub(crate) fn recompute_points(&mut self) {
        self.bottom.points = self.bottom.rounds_won * POINTS_PER_ROUND;
        self.top.points = self.top.rounds_won * POINTS_PER_ROUND;
    }
}

/// Transient HUD notification ("Round 2 - Speed Increased!")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub text: String,
    pub ticks_left: u32,
}

/// Read-only per-frame view for the renderer and HUD
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub round: u32,
    pub speed_multiplier: f32,
    pub puck_pos: Vec2,
    pub puck_vel: Vec2,
    pub trail: Vec<Vec2>,
    pub bottom_mallet: Vec2,
    pub top_mallet: Vec2,
    pub scores: Scores,
    pub notice: Option<String>,
}

/// Complete match state
///
/// Owned by the embedder and passed by reference into each tick; there is no
/// interior locking. A multithreaded embedder wraps it in its own mutex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: GamePhase,
    pub mode: GameMode,
    /// Current round, 1..=MAX_ROUNDS
    pub round: u32,
    pub scores: Scores,
    pub puck: Puck,
    /// Indexed by [`Side::index`]
    pub mallets: [Mallet; 2],
    pub trail: Trail,
    /// Ticks left in the goal pause; armed on a goal, drained by `tick`
    pub goal_pause_ticks: u32,
    /// Transient round notice, aged out by `tick`
    pub notice: Option<Notice>,
    /// Ticks simulated since match start
    pub time_ticks: u64,
}

impl MatchState {
    /// Fresh state in the menu phase, awaiting a mode selection
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            mode: GameMode::OnePlayer,
            round: 1,
            scores: Scores::default(),
            puck: Puck::new(),
            mallets: [
                Mallet::new(Side::Bottom.spawn_pos()),
                Mallet::new(Side::Top.spawn_pos()),
            ],
            trail: Trail::default(),
            goal_pause_ticks: 0,
            notice: None,
            time_ticks: 0,
        }
    }

    /// Start a new match in the given mode.
    ///
    /// Callable from any phase; from mid-match it is a full reset. The goal
    /// pause and notice timers live in this state, so resetting them here is
    /// what cancels any stale pending transition.
    pub fn start(&mut self, mode: GameMode) {
        self.mode = mode;
        self.round = 1;
        self.scores = Scores::default();
        self.goal_pause_ticks = 0;
        self.time_ticks = 0;
        self.reset_positions();
        self.phase = GamePhase::Playing;
        self.post_notice("Round 1 - Start!".to_string());
        log::info!("new {mode:?} match started");
    }

    /// Back to the menu. Scores stay readable until the next `start`.
    pub fn return_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
        log::info!("returned to menu");
    }

    pub fn mallet(&self, side: Side) -> &Mallet {
        &self.mallets[side.index()]
    }

    pub fn mallet_mut(&mut self, side: Side) -> &mut Mallet {
        &mut self.mallets[side.index()]
    }

    /// Externally driven mallet target (pointer/touch). The one mutation
    /// path for mallet positions outside the physics pass.
    ///
    /// Ignored unless the match is in play. In single-player mode the top
    /// mallet belongs to the opponent controller and cannot be driven. The
    /// target is clamped to the side walls and the side's legal half.
    pub fn set_mallet_target(&mut self, side: Side, x: f32, y: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.mode == GameMode::OnePlayer && side == Side::Top {
            return;
        }
        let r = MALLET_RADIUS;
        let (y_min, y_max) = match side {
            Side::Bottom => (MID_Y + r, BOARD_HEIGHT - r),
            Side::Top => (r, MID_Y - r),
        };
        let mallet = self.mallet_mut(side);
        mallet.body.pos.x = x.clamp(r, BOARD_WIDTH - r);
        mallet.body.pos.y = y.clamp(y_min, y_max);
    }

    /// Speed scale for the active round: 1.0 in round 1, +15% per round.
    /// Recomputed from the round number on every use, never cached.
    pub fn speed_multiplier(&self) -> f32 {
        1.0 + (self.round - 1) as f32 * SPEED_INCREMENT_PER_ROUND
    }

    /// Puck speed cap for the active round
    pub fn max_puck_speed(&self) -> f32 {
        BASE_MAX_PUCK_SPEED * self.speed_multiplier()
    }

    /// Opponent speed cap for the active round
    pub fn ai_speed(&self) -> f32 {
        BASE_AI_SPEED * (1.0 + (self.round - 1) as f32 * AI_DIFFICULTY_INCREMENT)
    }

    /// Current notice text, if one is showing
    pub fn notice_text(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.text.as_str())
    }

    /// Side with the higher score, or `None` for a grand tie. Meaningful
    /// once the match is over, but callable at any time.
    pub fn winner(&self) -> Option<Side> {
        match self.scores.bottom.points.cmp(&self.scores.top.points) {
            Ordering::Greater => Some(Side::Bottom),
            Ordering::Less => Some(Side::Top),
            Ordering::Equal => None,
        }
    }

    /// Cheap copy of everything the renderer and HUD need this frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            mode: self.mode,
            round: self.round,
            speed_multiplier: self.speed_multiplier(),
            puck_pos: self.puck.body.pos,
            puck_vel: self.puck.vel,
            trail: self.trail.points().to_vec(),
            bottom_mallet: self.mallet(Side::Bottom).body.pos,
            top_mallet: self.mallet(Side::Top).body.pos,
            scores: self.scores,
            notice: self.notice.as_ref().map(|n| n.text.clone()),
        }
    }

    /// Puck to center at rest, mallets to spawns, trail cleared
    pub(crate) fn reset_positions(&mut self) {
        self.puck.reset();
        for side in [Side::Bottom, Side::Top] {
            self.mallets[side.index()].reset(side.spawn_pos());
        }
        self.trail.clear();
    }

    /// Credit a goal and freeze play for the goal pause
    pub(crate) fn score_goal(&mut self, side: Side) {
        self.scores.get_mut(side).rounds_won += 1;
        self.scores.recompute_points();
        self.phase = GamePhase::GoalPause;
        self.goal_pause_ticks = GOAL_PAUSE_TICKS;
        log::info!(
            "goal for {side:?} in round {} ({} - {})",
            self.round,
            self.scores.bottom.points,
            self.scores.top.points,
        );
    }

    pub(crate) fn post_notice(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            ticks_left: NOTICE_TICKS,
        });
    }

    /// Count the showing notice down, clearing it when it expires
    pub(crate) fn age_notice(&mut self) {
        if let Some(notice) = &mut self.notice {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_start_resets_everything() {
        let mut state = MatchState::new();
        state.start(GameMode::TwoPlayer);
        state.round = 3;
        state.scores.bottom.rounds_won = 2;
        state.scores.recompute_points();
        state.puck.body.pos = Vec2::new(10.0, 10.0);
        state.puck.vel = Vec2::new(5.0, -5.0);
        state.trail.record(Vec2::new(10.0, 10.0));
        state.goal_pause_ticks = 30;

        state.start(GameMode::OnePlayer);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.mode, GameMode::OnePlayer);
        assert_eq!(state.round, 1);
        assert_eq!(state.scores, Scores::default());
        assert_eq!(state.puck.body.pos, Vec2::new(200.0, 400.0));
        assert_eq!(state.puck.vel, Vec2::ZERO);
        assert!(state.trail.is_empty());
        assert_eq!(state.goal_pause_ticks, 0);
        assert_eq!(
            state.mallet(Side::Bottom).body.pos,
            Vec2::new(200.0, 680.0)
        );
        assert_eq!(state.mallet(Side::Top).body.pos, Vec2::new(200.0, 120.0));
        assert_eq!(state.notice_text(), Some("Round 1 - Start!"));
    }

    #[test]
    fn test_round_scaling() {
        let mut state = MatchState::new();
        state.start(GameMode::OnePlayer);

        assert!((state.speed_multiplier() - 1.0).abs() < 1e-6);
        assert!((state.max_puck_speed() - 20.0).abs() < 1e-6);

        // Round 3 -> 4 worked example
        state.round = 4;
        assert!((state.speed_multiplier() - 1.45).abs() < 1e-6);
        assert!((state.max_puck_speed() - 29.0).abs() < 1e-6);
        assert!((state.ai_speed() - 7.15).abs() < 1e-6);
    }

    #[test]
    fn test_score_goal_derives_points() {
        let mut state = MatchState::new();
        state.start(GameMode::OnePlayer);

        state.score_goal(Side::Bottom);
        assert_eq!(state.scores.bottom.rounds_won, 1);
        assert_eq!(state.scores.bottom.points, 100);
        assert_eq!(state.scores.top.points, 0);
        assert_eq!(state.phase, GamePhase::GoalPause);
        assert_eq!(state.goal_pause_ticks, GOAL_PAUSE_TICKS);
    }

    #[test]
    fn test_mallet_target_ignored_outside_play() {
        let mut state = MatchState::new();
        let before = state.mallet(Side::Bottom).body.pos;
        state.set_mallet_target(Side::Bottom, 100.0, 700.0);
        assert_eq!(state.mallet(Side::Bottom).body.pos, before);
    }

    #[test]
    fn test_opponent_mallet_not_drivable_in_one_player() {
        let mut state = MatchState::new();
        state.start(GameMode::OnePlayer);
        let before = state.mallet(Side::Top).body.pos;
        state.set_mallet_target(Side::Top, 50.0, 50.0);
        assert_eq!(state.mallet(Side::Top).body.pos, before);

        state.start(GameMode::TwoPlayer);
        state.set_mallet_target(Side::Top, 50.0, 50.0);
        assert_eq!(state.mallet(Side::Top).body.pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_winner() {
        let mut state = MatchState::new();
        state.start(GameMode::OnePlayer);
        assert_eq!(state.winner(), None);

        state.scores.bottom.rounds_won = 3;
        state.scores.top.rounds_won = 2;
        state.scores.recompute_points();
        assert_eq!(state.winner(), Some(Side::Bottom));
    }

    #[test]
    fn test_trail_eviction() {
        let mut trail = Trail::default();
        for i in 0..20 {
            trail.record(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), MAX_TRAIL_LENGTH);
        // Oldest entries were evicted
        assert_eq!(trail.points()[0].x, 5.0);
        assert_eq!(trail.points()[MAX_TRAIL_LENGTH - 1].x, 19.0);
    }

    #[test]
    fn test_notice_self_clears() {
        let mut state = MatchState::new();
        state.post_notice("Round 1 - Start!".to_string());
        for _ in 0..NOTICE_TICKS {
            state.age_notice();
        }
        assert!(state.notice_text().is_none());
    }

    proptest! {
        /// Mallet targets never land across the midline or inside a wall
        #[test]
        fn prop_mallet_target_stays_in_half(
            x in -500.0f32..900.0,
            y in -500.0f32..1300.0,
        ) {
            let mut state = MatchState::new();
            state.start(GameMode::TwoPlayer);

            state.set_mallet_target(Side::Bottom, x, y);
            let pos = state.mallet(Side::Bottom).body.pos;
            prop_assert!(pos.y >= MID_Y + MALLET_RADIUS);
            prop_assert!(pos.y <= BOARD_HEIGHT - MALLET_RADIUS);
            prop_assert!(pos.x >= MALLET_RADIUS && pos.x <= BOARD_WIDTH - MALLET_RADIUS);

            state.set_mallet_target(Side::Top, x, y);
            let pos = state.mallet(Side::Top).body.pos;
            prop_assert!(pos.y <= MID_Y - MALLET_RADIUS);
            prop_assert!(pos.y >= MALLET_RADIUS);
        }
    }
}
