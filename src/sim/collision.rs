//! Arrow/balloon collision
//!
//! Arrows are treated as points and balloons as circles. With at most five
//! balloons and a handful of arrows a brute-force pairwise test is plenty.

use glam::Vec2;

use super::arrow::Arrow;
use super::balloon::Balloon;

/// A single arrow popping a single balloon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub balloon: usize,
    pub arrow: usize,
}

/// Point-in-circle test (boundary counts as inside)
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}

/// Test every intact balloon against every arrow in flight.
///
/// Balloons are visited in order, arrows in order within each balloon. A
/// scoring arrow goes back to the archer immediately, so it cannot pop a
/// second balloon on the same frame.
pub fn resolve_hits(
    balloons: &mut [Balloon],
    arrows: &mut [Arrow],
    radius: f32,
    launch_point: Vec2,
) -> Vec<Hit> {
    let mut hits = Vec::new();

    for (balloon_idx, balloon) in balloons.iter_mut().enumerate() {
        for (arrow_idx, arrow) in arrows.iter_mut().enumerate() {
            if !arrow.released {
                continue;
            }
            if balloon.check_collision(arrow.pos, radius) {
                arrow.reset(launch_point);
                hits.push(Hit {
                    balloon: balloon_idx,
                    arrow: arrow_idx,
                });
            }
        }
    }

    hits
}
