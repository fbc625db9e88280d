//! Balloon Archer - a drag-to-aim archery arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (arrows, balloons, aiming, match state)
//! - `renderer`: Backend-agnostic draw lists built from read-only state
//! - `platform`: Input/timing contract and a scripted backend
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Demo player used by the headless runner

pub mod autopilot;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use autopilot::Autopilot;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Virtual resolution the simulation runs in
    pub const VSCREEN_WIDTH: f32 = 320.0;
    pub const VSCREEN_HEIGHT: f32 = 180.0;

    /// Display resolution (mouse input is reported in these coordinates)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// One simulation step per rendered frame
    pub const TARGET_FPS: u32 = 60;
    pub const FRAME_DT: f32 = 1.0 / TARGET_FPS as f32;

    /// Balloons per match (fixed set)
    pub const BALLOON_COUNT: usize = 5;
    /// Pops needed to win
    pub const HITS_TO_WIN: u32 = 5;
}

/// True while a point is inside the virtual screen (edges inclusive)
#[inline]
pub fn in_playfield(point: Vec2) -> bool {
    use consts::{VSCREEN_HEIGHT, VSCREEN_WIDTH};
    point.x >= 0.0 && point.x <= VSCREEN_WIDTH && point.y >= 0.0 && point.y <= VSCREEN_HEIGHT
}
