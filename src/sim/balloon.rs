//! Balloon targets

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::point_in_circle;
use crate::tuning::Tuning;

/// A balloon bobbing up and down the screen until it is popped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    /// Top-left of the sprite; also the centre of the hit circle
    pub pos: Vec2,
    pub hit: bool,
    /// Signed vertical speed per frame (negative = rising)
    pub speed_y: f32,
}

impl Balloon {
    /// A fresh balloon, rising
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            hit: false,
            speed_y: -speed.abs(),
        }
    }

    /// Move one frame; popped balloons stay where they are.
    ///
    /// Bounces between y = 0 and the tuning's bounce ceiling, clamping the
    /// overshoot so the balloon never leaves that band.
    pub fn advance(&mut self, tuning: &Tuning) {
        if self.hit {
            return;
        }

        self.pos.y += self.speed_y;

        let max_y = tuning.balloon_max_y();
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.speed_y = self.speed_y.abs();
        } else if self.pos.y >= max_y {
            self.pos.y = max_y;
            self.speed_y = -self.speed_y.abs();
        }
    }

    /// Pop the balloon if `point` is inside its hit circle.
    ///
    /// Returns true only on the frame the balloon goes from intact to popped.
    pub fn check_collision(&mut self, point: Vec2, radius: f32) -> bool {
        if !self.hit && point_in_circle(point, self.pos, radius) {
            self.hit = true;
            return true;
        }
        false
    }

    /// Put the balloon back in play at a new position
    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.hit = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_balloon_rises_then_bounces() {
        let tuning = Tuning::default();
        let mut balloon = Balloon::new(Vec2::new(110.0, 1.0), tuning.balloon_speed);
        balloon.advance(&tuning);
        assert_eq!(balloon.pos.y, 0.5);
        balloon.advance(&tuning);
        assert_eq!(balloon.pos.y, 0.0);
        assert!(balloon.speed_y > 0.0);
        balloon.advance(&tuning);
        assert_eq!(balloon.pos.y, 0.5);
    }

    #[test]
    fn test_balloon_bounces_off_floor() {
        let tuning = Tuning::default();
        let max_y = tuning.balloon_max_y();
        let mut balloon = Balloon::new(Vec2::new(110.0, max_y - 0.25), tuning.balloon_speed);
        balloon.speed_y = tuning.balloon_speed;
        balloon.advance(&tuning);
        assert_eq!(balloon.pos.y, max_y);
        assert!(balloon.speed_y < 0.0);
    }

    #[test]
    fn test_popped_balloon_is_frozen() {
        let tuning = Tuning::default();
        let mut balloon = Balloon::new(Vec2::new(150.0, 80.0), tuning.balloon_speed);
        assert!(balloon.check_collision(Vec2::new(160.0, 90.0), tuning.balloon_radius));

        let frozen = balloon.pos;
        for _ in 0..500 {
            balloon.advance(&tuning);
        }
        assert_eq!(balloon.pos, frozen);
    }

    #[test]
    fn test_collision_is_one_shot() {
        let mut balloon = Balloon::new(Vec2::new(150.0, 80.0), 0.5);
        assert!(balloon.check_collision(Vec2::new(150.0, 80.0), 25.0));
        assert!(!balloon.check_collision(Vec2::new(150.0, 80.0), 25.0));
        assert!(balloon.hit);
    }

    #[test]
    fn test_collision_radius() {
        let mut balloon = Balloon::new(Vec2::new(150.0, 80.0), 0.5);
        assert!(!balloon.check_collision(Vec2::new(176.0, 80.0), 25.0));
        assert!(!balloon.hit);
        assert!(balloon.check_collision(Vec2::new(175.0, 80.0), 25.0));
    }

    #[test]
    fn test_respawn_clears_hit() {
        let mut balloon = Balloon::new(Vec2::new(150.0, 80.0), 0.5);
        balloon.check_collision(Vec2::new(150.0, 80.0), 25.0);
        balloon.respawn(Vec2::new(150.0, 20.0));
        assert!(!balloon.hit);
        assert_eq!(balloon.pos, Vec2::new(150.0, 20.0));
    }

    proptest! {
        #[test]
        fn prop_oscillation_stays_in_band(
            start_y in 0.0f32..156.0,
            speed in 0.1f32..4.0,
            rising in any::<bool>(),
            frames in 1usize..5000,
        ) {
            let tuning = Tuning { balloon_speed: speed, ..Tuning::default() };
            let mut balloon = Balloon::new(Vec2::new(110.0, start_y), speed);
            if !rising {
                balloon.speed_y = speed;
            }
            for _ in 0..frames {
                balloon.advance(&tuning);
                prop_assert!(balloon.pos.y >= 0.0);
                prop_assert!(balloon.pos.y <= tuning.balloon_max_y());
            }
        }
    }
}
