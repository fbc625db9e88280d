//! Match state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; the renderer and
//! the runner only read it.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aim::AimController;
use super::arrow::Arrow;
use super::balloon::Balloon;
use crate::consts::{BALLOON_COUNT, FRAME_DT, TARGET_FPS};
use crate::tuning::Tuning;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ran out of time or arrows
    GameOver,
    /// All balloons popped
    Win,
}

/// Why a match was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    TimeUp,
    OutOfArrows,
}

/// Things that happened during a single tick (for HUD, audio, logging)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ArrowFired { arrow: usize, velocity: Vec2 },
    DragDiscarded { distance: f32 },
    ArrowLeftField { arrow: usize },
    BalloonPopped { balloon: usize, arrow: usize },
    Won,
    Lost { reason: LossReason },
    Restarted,
}

/// RNG state wrapper for serialization
///
/// Each call to [`RngState::next_rng`] opens a new PCG stream of the same
/// seed, so replays with the same seed spawn identical balloon layouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Frames simulated in this match
    pub frames: u32,
    /// Balloons popped in this match
    pub hits: u32,
    pub arrows_fired: u32,
    /// Set once the final arrow leaves the bow
    pub last_arrow_in_flight: bool,
    /// Seconds since the last shot
    pub time_since_last_shot: f32,
    pub aim: AimController,
    /// Every arrow of the match in firing order; the last one is the held arrow
    /// until the quiver is empty
    pub arrows: Vec<Arrow>,
    pub balloons: [Balloon; BALLOON_COUNT],
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new match with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new match with the given tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng_state = RngState::new(seed);
        let balloons = spawn_balloons(&mut rng_state.next_rng(), &tuning);
        let arrows = vec![Arrow::held(tuning.archer_pos)];

        log::info!("Match initialized with seed: {}", seed);

        Self {
            seed,
            rng_state,
            phase: GamePhase::Playing,
            frames: 0,
            hits: 0,
            arrows_fired: 0,
            last_arrow_in_flight: false,
            // First shot is available immediately
            time_since_last_shot: tuning.shot_cooldown,
            aim: AimController::default(),
            arrows,
            balloons,
            events: Vec::new(),
            tuning,
        }
    }

    /// Start a fresh match: counters cleared, one held arrow, balloons re-rolled.
    ///
    /// Only allowed once the current match has ended; returns false otherwise.
    pub fn restart(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }

        self.phase = GamePhase::Playing;
        self.frames = 0;
        self.hits = 0;
        self.arrows_fired = 0;
        self.last_arrow_in_flight = false;
        self.aim.cancel();

        self.arrows.clear();
        self.spawn_held_arrow();

        let mut rng = self.rng_state.next_rng();
        for (i, balloon) in self.balloons.iter_mut().enumerate() {
            balloon.respawn(balloon_spawn_point(i, &mut rng, &self.tuning));
        }

        log::info!("Match restarted (stream {})", self.rng_state.stream);
        true
    }

    /// Nock a new arrow at the archer
    pub fn spawn_held_arrow(&mut self) {
        self.arrows.push(Arrow::held(self.tuning.archer_pos));
    }

    /// The arrow waiting to be shot, if any
    pub fn held_arrow_mut(&mut self) -> Option<&mut Arrow> {
        self.arrows.last_mut().filter(|arrow| !arrow.released)
    }

    /// Arrows currently in flight
    pub fn arrows_in_flight(&self) -> impl Iterator<Item = &Arrow> {
        self.arrows.iter().filter(|arrow| arrow.released)
    }

    pub fn cooldown_elapsed(&self) -> bool {
        self.time_since_last_shot >= self.tuning.shot_cooldown
    }

    /// Whether a press would start a new drag this frame
    pub fn can_start_drag(&self) -> bool {
        self.phase == GamePhase::Playing
            && self.cooldown_elapsed()
            && self.arrows_fired < self.tuning.max_arrows
    }

    pub fn arrows_remaining(&self) -> u32 {
        self.tuning.max_arrows.saturating_sub(self.arrows_fired)
    }

    pub fn frames_remaining(&self) -> u32 {
        self.tuning.match_frames.saturating_sub(self.frames)
    }

    /// Whole seconds left on the clock
    pub fn seconds_remaining(&self) -> u32 {
        self.frames_remaining() / TARGET_FPS
    }

    /// Match time elapsed in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.frames as f32 * FRAME_DT
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }
}

/// Spawn position of balloon `index`: fixed column, random height
fn balloon_spawn_point(index: usize, rng: &mut Pcg32, tuning: &Tuning) -> Vec2 {
    let x = tuning.balloon_start_x + index as f32 * tuning.balloon_spacing;
    let min_y = tuning.balloon_spawn_min_y.floor() as i32;
    let max_y = (tuning.balloon_max_y().floor() as i32).max(min_y);
    let y = rng.random_range(min_y..=max_y) as f32;
    Vec2::new(x, y)
}

fn spawn_balloons(rng: &mut Pcg32, tuning: &Tuning) -> [Balloon; BALLOON_COUNT] {
    std::array::from_fn(|i| Balloon::new(balloon_spawn_point(i, rng, tuning), tuning.balloon_speed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.arrows.len(), 1);
        assert!(!state.arrows[0].released);
        assert_eq!(state.arrows[0].pos, state.tuning.archer_pos);
        assert!(state.can_start_drag());
        assert_eq!(state.arrows_remaining(), 6);
        assert_eq!(state.seconds_remaining(), 30);
    }

    #[test]
    fn test_balloon_layout() {
        let state = GameState::new(7);
        for (i, balloon) in state.balloons.iter().enumerate() {
            assert_eq!(balloon.pos.x, 110.0 + i as f32 * 40.0);
            assert!(balloon.pos.y >= 10.0);
            assert!(balloon.pos.y <= state.tuning.balloon_max_y());
            assert!(!balloon.hit);
            assert!(balloon.speed_y < 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(1234);
        let b = GameState::new(1234);
        assert_eq!(a.balloons, b.balloons);
    }

    #[test]
    fn test_restart_only_after_match_end() {
        let mut state = GameState::new(1);
        assert!(!state.restart());

        state.phase = GamePhase::GameOver;
        state.hits = 3;
        state.frames = 900;
        state.arrows_fired = 6;
        state.last_arrow_in_flight = true;
        state.balloons[2].hit = true;
        state.arrows.push(Arrow::held(Vec2::ZERO));

        assert!(state.restart());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.hits, 0);
        assert_eq!(state.frames, 0);
        assert_eq!(state.arrows_fired, 0);
        assert!(!state.last_arrow_in_flight);
        assert_eq!(state.arrows.len(), 1);
        assert!(!state.arrows[0].released);
        assert!(state.balloons.iter().all(|b| !b.hit));
    }

    #[test]
    fn test_rng_streams_differ() {
        let mut rng_state = RngState::new(99);
        let mut first = rng_state.next_rng();
        let mut second = rng_state.next_rng();
        let a: Vec<u32> = (0..8).map(|_| first.random()).collect();
        let b: Vec<u32> = (0..8).map(|_| second.random()).collect();
        assert_ne!(a, b);
        assert_eq!(rng_state.stream, 2);
    }

    #[test]
    fn test_held_arrow() {
        let mut state = GameState::new(3);
        assert!(state.held_arrow_mut().is_some());
        state.arrows[0].launch(Vec2::new(100.0, 0.0));
        assert!(state.held_arrow_mut().is_none());
        assert_eq!(state.arrows_in_flight().count(), 1);
    }
}
