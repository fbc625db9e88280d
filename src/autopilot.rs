//! Demo player
//!
//! Plays through [`TickInput`]s only, exactly like a human at the mouse. When
//! a drag is ready to be released it forward-simulates a grid of candidate
//! release points with the real arrow and balloon stepping and picks the one
//! that pops a balloon soonest. With no predicted hit it lets fly somewhere
//! random.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{Arrow, GameState, TickInput, launch_velocity, point_in_circle};

/// Frames to hold the button before releasing
const HOLD_FRAMES: u32 = 6;
/// Frames to wait on the end screen before asking for a rematch
const REMATCH_DELAY: u32 = 30;
/// Spacing of the candidate release grid (display coordinates)
const GRID_STEP: f32 = 40.0;
/// Longest flight considered when predicting a hit
const MAX_LOOKAHEAD: u32 = 900;
/// Random release points tried before settling for the farthest corner
const RELEASE_ATTEMPTS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Waiting,
    Holding { origin: Vec2, frames: u32 },
}

/// A predicted pop for a candidate release point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotPlan {
    pub release: Vec2,
    pub balloon: usize,
    /// Frames from release until the pop
    pub frames: u32,
}

pub struct Autopilot {
    rng: Pcg32,
    gesture: Gesture,
    /// Frames spent on the end screen
    idle_frames: u32,
    /// Whether to ask for a rematch after a match ends
    pub auto_restart: bool,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            gesture: Gesture::Waiting,
            idle_frames: 0,
            auto_restart: true,
        }
    }

    /// Decide this frame's input
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        if state.is_over() {
            self.gesture = Gesture::Waiting;
            self.idle_frames += 1;
            return TickInput {
                restart: self.auto_restart && self.idle_frames >= REMATCH_DELAY,
                ..Default::default()
            };
        }
        self.idle_frames = 0;

        match self.gesture {
            Gesture::Waiting => {
                if !state.can_start_drag() {
                    return TickInput::default();
                }
                let origin = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
                self.gesture = Gesture::Holding { origin, frames: 0 };
                TickInput {
                    mouse_pos: origin,
                    primary_pressed: true,
                    ..Default::default()
                }
            }
            Gesture::Holding { origin, frames } if frames + 1 < HOLD_FRAMES => {
                self.gesture = Gesture::Holding {
                    origin,
                    frames: frames + 1,
                };
                TickInput {
                    mouse_pos: origin,
                    ..Default::default()
                }
            }
            Gesture::Holding { origin, .. } => {
                self.gesture = Gesture::Waiting;
                let release = match plan_shot(state, origin) {
                    Some(plan) => {
                        log::debug!(
                            "Autopilot aiming at balloon {} ({} frames out)",
                            plan.balloon,
                            plan.frames
                        );
                        plan.release
                    }
                    None => self.random_release(origin, state.tuning.min_drag_distance),
                };
                TickInput {
                    mouse_pos: release,
                    primary_released: true,
                    ..Default::default()
                }
            }
        }
    }

    /// Any on-screen release point far enough from the origin to count as a shot.
    ///
    /// When nothing on screen clears the threshold this gives up on a random
    /// point and returns the corner farthest from the origin.
    fn random_release(&mut self, origin: Vec2, min_drag: f32) -> Vec2 {
        for _ in 0..RELEASE_ATTEMPTS {
            let candidate = Vec2::new(
                self.rng.random_range(0.0..SCREEN_WIDTH),
                self.rng.random_range(0.0..SCREEN_HEIGHT),
            );
            if candidate.distance(origin) > min_drag {
                return candidate;
            }
        }
        log::debug!("No random release clears a drag of {:.1}, using a corner", min_drag);
        farthest_corner(origin)
    }
}

/// Screen corner with the longest drag from `origin`
fn farthest_corner(origin: Vec2) -> Vec2 {
    let x = if origin.x < SCREEN_WIDTH / 2.0 { SCREEN_WIDTH } else { 0.0 };
    let y = if origin.y < SCREEN_HEIGHT / 2.0 { SCREEN_HEIGHT } else { 0.0 };
    Vec2::new(x, y)
}

/// Search the release grid for the earliest predicted pop
pub fn plan_shot(state: &GameState, origin: Vec2) -> Option<ShotPlan> {
    let tuning = &state.tuning;
    let columns = (SCREEN_WIDTH / GRID_STEP) as u32;
    let rows = (SCREEN_HEIGHT / GRID_STEP) as u32;

    let mut best: Option<ShotPlan> = None;
    for row in 0..=rows {
        for col in 0..=columns {
            let release = Vec2::new(col as f32 * GRID_STEP, row as f32 * GRID_STEP);
            let distance = origin.distance(release);
            if distance <= tuning.min_drag_distance {
                continue;
            }
            let velocity = launch_velocity(release, distance, tuning);
            if let Some((balloon, frames)) = predict_hit(state, velocity) {
                if best.is_none_or(|b| frames < b.frames) {
                    best = Some(ShotPlan {
                        release,
                        balloon,
                        frames,
                    });
                }
            }
        }
    }
    best
}

/// Fly a copy of the held arrow against copies of the balloons.
///
/// Returns the balloon index and flight frames of the first pop, or `None`
/// if the arrow leaves the field or the clock runs out first.
pub fn predict_hit(state: &GameState, velocity: Vec2) -> Option<(usize, u32)> {
    let tuning = &state.tuning;
    let mut arrow = Arrow::held(tuning.archer_pos);
    arrow.launch(velocity);
    let mut balloons = state.balloons;

    let horizon = state.frames_remaining().min(MAX_LOOKAHEAD);
    for frame in 1..=horizon {
        arrow.advance(tuning);
        if !arrow.released {
            return None;
        }
        for balloon in balloons.iter_mut() {
            balloon.advance(tuning);
        }
        let popped = balloons.iter().position(|balloon| {
            !balloon.hit && point_in_circle(arrow.pos, balloon.pos, tuning.balloon_radius)
        });
        if let Some(idx) = popped {
            return Some((idx, frame));
        }
    }
    None
}
