//! Drag-to-launch aiming
//!
//! Press the primary button to grab, drag, release to shoot. The launch vector
//! points from the release position toward a fixed reference point and grows
//! with the length of the drag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use crate::tuning::Tuning;

/// Aim gesture state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AimState {
    #[default]
    Idle,
    /// Button held since `origin` (display coordinates)
    Dragging { origin: Vec2 },
}

/// What the aim controller decided this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimOutcome {
    None,
    DragStarted,
    /// Drag long enough: fire the held arrow with this velocity
    Shot { velocity: Vec2, distance: f32 },
    /// Drag too short; nothing is fired
    Discarded { distance: f32 },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AimController {
    pub state: AimState,
    /// Length of the last completed drag
    pub last_drag_distance: f32,
}

impl AimController {
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, AimState::Dragging { .. })
    }

    /// Where the current drag started, if any
    pub fn drag_origin(&self) -> Option<Vec2> {
        match self.state {
            AimState::Dragging { origin } => Some(origin),
            AimState::Idle => None,
        }
    }

    /// Distance from the drag origin to `mouse` (0 when idle)
    pub fn live_distance(&self, mouse: Vec2) -> f32 {
        self.drag_origin().map_or(0.0, |origin| origin.distance(mouse))
    }

    /// Drop any gesture in progress
    pub fn cancel(&mut self) {
        self.state = AimState::Idle;
        self.last_drag_distance = 0.0;
    }

    /// Process one frame of input.
    ///
    /// A press only starts a drag when `can_start` is true (cooldown elapsed
    /// and arrows left). A release always ends the drag, fired or not.
    pub fn update(&mut self, input: &TickInput, can_start: bool, tuning: &Tuning) -> AimOutcome {
        let mut outcome = AimOutcome::None;

        if input.primary_pressed && can_start {
            self.state = AimState::Dragging {
                origin: input.mouse_pos,
            };
            outcome = AimOutcome::DragStarted;
        }

        if let AimState::Dragging { origin } = self.state {
            if input.primary_released {
                let distance = origin.distance(input.mouse_pos);
                self.last_drag_distance = distance;
                self.state = AimState::Idle;

                outcome = if distance > tuning.min_drag_distance {
                    AimOutcome::Shot {
                        velocity: launch_velocity(input.mouse_pos, distance, tuning),
                        distance,
                    }
                } else {
                    AimOutcome::Discarded { distance }
                };
            }
        }

        outcome
    }
}

/// Launch velocity for a drag of `distance` released at `release_pos`
#[inline]
pub fn launch_velocity(release_pos: Vec2, distance: f32, tuning: &Tuning) -> Vec2 {
    (tuning.aim_reference - release_pos) * (distance * tuning.power_scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn press(at: Vec2) -> TickInput {
        TickInput {
            mouse_pos: at,
            primary_pressed: true,
            ..Default::default()
        }
    }

    fn release(at: Vec2) -> TickInput {
        TickInput {
            mouse_pos: at,
            primary_released: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_drag_and_release_shoots() {
        let tuning = Tuning::default();
        let mut aim = AimController::default();

        assert_eq!(
            aim.update(&press(Vec2::new(600.0, 300.0)), true, &tuning),
            AimOutcome::DragStarted
        );
        assert!(aim.is_dragging());

        // Moving without release keeps dragging
        let hover = TickInput {
            mouse_pos: Vec2::new(550.0, 340.0),
            ..Default::default()
        };
        assert_eq!(aim.update(&hover, true, &tuning), AimOutcome::None);
        assert_eq!(aim.live_distance(Vec2::new(600.0, 310.0)), 10.0);

        let end = Vec2::new(600.0, 400.0);
        match aim.update(&release(end), true, &tuning) {
            AimOutcome::Shot { velocity, distance } => {
                assert_eq!(distance, 100.0);
                let expected = (Vec2::new(1280.0, 360.0) - end) * (100.0 * 0.004);
                assert!((velocity - expected).length() < 1e-3);
            }
            other => panic!("expected a shot, got {:?}", other),
        }
        assert!(!aim.is_dragging());
        assert_eq!(aim.last_drag_distance, 100.0);
    }

    #[test]
    fn test_press_ignored_when_not_allowed() {
        let tuning = Tuning::default();
        let mut aim = AimController::default();
        assert_eq!(aim.update(&press(Vec2::ZERO), false, &tuning), AimOutcome::None);
        assert!(!aim.is_dragging());
        assert_eq!(
            aim.update(&release(Vec2::new(300.0, 0.0)), true, &tuning),
            AimOutcome::None
        );
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let tuning = Tuning::default();
        let mut aim = AimController::default();
        aim.update(&press(Vec2::new(100.0, 100.0)), true, &tuning);
        assert_eq!(
            aim.update(&release(Vec2::new(105.0, 100.0)), true, &tuning),
            AimOutcome::Discarded { distance: 5.0 }
        );
        assert!(!aim.is_dragging());
    }

    #[test]
    fn test_press_and_release_same_frame_is_discarded() {
        let tuning = Tuning::default();
        let mut aim = AimController::default();
        let click = TickInput {
            mouse_pos: Vec2::new(10.0, 10.0),
            primary_pressed: true,
            primary_released: true,
            ..Default::default()
        };
        assert_eq!(
            aim.update(&click, true, &tuning),
            AimOutcome::Discarded { distance: 0.0 }
        );
    }

    #[test]
    fn test_cancel() {
        let tuning = Tuning::default();
        let mut aim = AimController::default();
        aim.update(&press(Vec2::ZERO), true, &tuning);
        aim.cancel();
        assert!(!aim.is_dragging());
        assert_eq!(aim.drag_origin(), None);
    }

    proptest! {
        #[test]
        fn prop_short_drags_never_shoot(
            x in 0.0f32..1280.0,
            y in 0.0f32..720.0,
            angle in 0.0f32..std::f32::consts::TAU,
            len in 0.0f32..4.99,
        ) {
            let tuning = Tuning::default();
            let mut aim = AimController::default();
            let start = Vec2::new(x, y);
            let end = start + Vec2::from_angle(angle) * len;
            aim.update(&press(start), true, &tuning);
            let outcome = aim.update(&release(end), true, &tuning);
            let discarded = matches!(outcome, AimOutcome::Discarded { .. });
            prop_assert!(discarded, "drag of {} fired: {:?}", len, outcome);
        }
    }
}
