//! Arrow projectile
//!
//! An arrow is either held at the archer's launch point or in flight. Flight
//! is a per-frame ballistic step that does not depend on frame time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::in_playfield;
use crate::tuning::Tuning;

/// Direction the arrow sprite points at zero rotation
const SPRITE_AXIS: Vec2 = Vec2::new(1.0, 1.5);

/// An arrow entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub pos: Vec2,
    pub vel: Vec2,
    /// False while held at the archer
    pub released: bool,
}

impl Arrow {
    /// A new arrow held at the launch point
    pub fn held(launch_point: Vec2) -> Self {
        Self {
            pos: launch_point,
            vel: Vec2::ZERO,
            released: false,
        }
    }

    /// Advance one frame of flight; held arrows do not move.
    ///
    /// Leaving the virtual screen on any side puts the arrow back in the
    /// archer's hand.
    pub fn advance(&mut self, tuning: &Tuning) {
        if !self.released {
            return;
        }

        self.vel.y += tuning.gravity;
        self.pos += self.vel * tuning.velocity_scale;

        // Slow arrows get kicked upward so arcs stay readable
        if self.vel.length() < tuning.min_flight_speed {
            self.vel.y -= tuning.lift_impulse;
        }

        if !in_playfield(self.pos) {
            self.reset(tuning.archer_pos);
        }
    }

    /// Return to the held state at the launch point
    pub fn reset(&mut self, launch_point: Vec2) {
        self.pos = launch_point;
        self.vel = Vec2::ZERO;
        self.released = false;
    }

    /// Put the arrow in flight with the given velocity
    pub fn launch(&mut self, velocity: Vec2) {
        self.vel = velocity;
        self.released = true;
    }

    /// Sprite rotation in degrees, following the direction of travel
    pub fn heading_degrees(&self) -> f32 {
        SPRITE_AXIS.angle_to(self.vel).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_arrow_does_not_move() {
        let tuning = Tuning::default();
        let mut arrow = Arrow::held(tuning.archer_pos);
        for _ in 0..100 {
            arrow.advance(&tuning);
        }
        assert_eq!(arrow.pos, tuning.archer_pos);
        assert_eq!(arrow.vel, Vec2::ZERO);
        assert!(!arrow.released);
    }

    #[test]
    fn test_flight_step_applies_gravity_then_moves() {
        let tuning = Tuning::default();
        let mut arrow = Arrow::held(tuning.archer_pos);
        arrow.launch(Vec2::new(1000.0, -200.0));
        arrow.advance(&tuning);

        let expected_vel = Vec2::new(1000.0, -200.0 + tuning.gravity);
        assert_eq!(arrow.vel, expected_vel);
        let expected_pos = tuning.archer_pos + expected_vel * tuning.velocity_scale;
        assert!((arrow.pos - expected_pos).length() < 1e-4);
        assert!(arrow.released);
    }

    #[test]
    fn test_slow_arrow_gets_lift() {
        let tuning = Tuning::default();
        let mut arrow = Arrow::held(tuning.archer_pos);
        arrow.launch(Vec2::new(50.0, 0.0));
        arrow.advance(&tuning);
        // 18.5 gravity, then speed < 150 so the kick applies
        assert!((arrow.vel.y - (18.5 - 300.3)).abs() < 1e-3);
    }

    #[test]
    fn test_leaving_playfield_resets() {
        let tuning = Tuning::default();
        let mut arrow = Arrow::held(tuning.archer_pos);
        arrow.launch(Vec2::new(0.0, 5000.0));
        let mut frames = 0;
        while arrow.released && frames < 1000 {
            arrow.advance(&tuning);
            frames += 1;
        }
        assert!(!arrow.released);
        assert_eq!(arrow.pos, tuning.archer_pos);
        assert_eq!(arrow.vel, Vec2::ZERO);
    }

    #[test]
    fn test_heading_follows_velocity() {
        let mut arrow = Arrow::held(Vec2::ZERO);
        arrow.launch(SPRITE_AXIS * 10.0);
        assert!(arrow.heading_degrees().abs() < 1e-3);

        arrow.launch(Vec2::new(1.0, 0.0));
        assert!(arrow.heading_degrees() < 0.0);
    }
}
