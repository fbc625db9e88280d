//! Data-driven game balance
//!
//! Every gameplay number lives here so a match can be re-tuned from a JSON
//! file without touching the simulation. Defaults are the shipped balance.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, VSCREEN_HEIGHT};
use crate::in_playfield;

/// Errors raised while loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io { path, source } => {
                write!(f, "failed to read tuning file {}: {}", path.display(), source)
            }
            TuningError::Parse(err) => write!(f, "malformed tuning JSON: {}", err),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io { source, .. } => Some(source),
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Gameplay tuning for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arrow flight ===
    /// Added to arrow velocity.y every frame
    pub gravity: f32,
    /// Fraction of velocity applied to position per frame
    pub velocity_scale: f32,
    /// Below this speed the arrow gets an upward kick
    pub min_flight_speed: f32,
    /// Size of the upward kick (subtracted from velocity.y)
    pub lift_impulse: f32,

    // === Match rules ===
    /// Arrows available per match
    pub max_arrows: u32,
    /// Match length in frames
    pub match_frames: u32,
    /// Seconds between shots
    pub shot_cooldown: f32,

    // === Aiming ===
    /// Drags at or below this distance are discarded
    pub min_drag_distance: f32,
    /// Launch power per unit of drag distance
    pub power_scale: f32,
    /// Fixed point the launch vector is measured from (display coordinates)
    pub aim_reference: Vec2,
    /// Held arrows sit here (virtual coordinates)
    pub archer_pos: Vec2,

    // === Balloons ===
    pub balloon_radius: f32,
    /// Vertical speed magnitude per frame
    pub balloon_speed: f32,
    /// Sprite height; balloons bounce when their top reaches screen height minus this
    pub balloon_height: f32,
    pub balloon_start_x: f32,
    pub balloon_spacing: f32,
    pub balloon_spawn_min_y: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 18.5,
            velocity_scale: 0.0009,
            min_flight_speed: 150.0,
            lift_impulse: 300.3,

            max_arrows: 6,
            match_frames: 1800,
            shot_cooldown: 1.1,

            min_drag_distance: 5.0,
            power_scale: 0.004,
            aim_reference: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT / 2.0),
            archer_pos: Vec2::new(30.0, 144.0),

            balloon_radius: 25.0,
            balloon_speed: 0.5,
            balloon_height: 24.0,
            balloon_start_x: 110.0,
            balloon_spacing: 40.0,
            balloon_spawn_min_y: 10.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |reason: &str| -> Result<(), TuningError> {
            Err(TuningError::Invalid(reason.to_string()))
        };

        if self.max_arrows == 0 {
            return invalid("max_arrows must be at least 1");
        }
        if self.match_frames == 0 {
            return invalid("match_frames must be at least 1");
        }
        if self.velocity_scale <= 0.0 {
            return invalid("velocity_scale must be positive");
        }
        if self.shot_cooldown <= 0.0 {
            return invalid("shot_cooldown must be positive");
        }
        if self.min_drag_distance < 0.0 {
            return invalid("min_drag_distance cannot be negative");
        }
        if self.min_drag_distance >= Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT).length() {
            return invalid("min_drag_distance must be shorter than the screen diagonal");
        }
        if self.balloon_radius < 0.0 || self.balloon_speed < 0.0 {
            return invalid("balloon radius and speed cannot be negative");
        }
        if self.balloon_height < 0.0 || self.balloon_height >= VSCREEN_HEIGHT {
            return invalid("balloon_height must fit inside the virtual screen");
        }
        if self.balloon_spawn_min_y < 0.0 || self.balloon_spawn_min_y > self.balloon_max_y() {
            return invalid("balloon_spawn_min_y must lie between 0 and the bounce ceiling");
        }
        if !in_playfield(self.archer_pos) {
            return invalid("archer_pos must be inside the virtual screen");
        }
        Ok(())
    }

    /// Lowest y a balloon's top edge may reach before bouncing back up
    #[inline]
    pub fn balloon_max_y(&self) -> f32 {
        VSCREEN_HEIGHT - self.balloon_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().max_arrows, 6);
        assert_eq!(Tuning::default().match_frames, 1800);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_arrows": 3, "balloon_speed": 1.0 }"#)
            .expect("partial tuning should parse");
        assert_eq!(tuning.max_arrows, 3);
        assert_eq!(tuning.balloon_speed, 1.0);
        assert_eq!(tuning.gravity, Tuning::default().gravity);
        assert_eq!(tuning.aim_reference, Vec2::new(1280.0, 360.0));
    }

    #[test]
    fn test_vec_fields_parse() {
        let tuning = Tuning::from_json(r#"{ "archer_pos": [40.0, 120.0] }"#).unwrap();
        assert_eq!(tuning.archer_pos, Vec2::new(40.0, 120.0));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "max_arrows": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "balloon_height": 400.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "archer_pos": [-5.0, 10.0] }"#).unwrap_err();
        assert!(err.to_string().contains("archer_pos"));
    }

    #[test]
    fn test_boundary_values() {
        let err = Tuning::from_json(r#"{ "shot_cooldown": 0.0 }"#).unwrap_err();
        assert!(err.to_string().contains("shot_cooldown"));
        assert!(Tuning::from_json(r#"{ "shot_cooldown": 0.01 }"#).is_ok());

        let err = Tuning::from_json(r#"{ "velocity_scale": 0.0 }"#).unwrap_err();
        assert!(err.to_string().contains("velocity_scale"));
        let err = Tuning::from_json(r#"{ "match_frames": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("match_frames"));

        // Zero radius, speed and drag threshold are allowed
        assert!(
            Tuning::from_json(
                r#"{ "balloon_radius": 0.0, "balloon_speed": 0.0, "min_drag_distance": 0.0 }"#
            )
            .is_ok()
        );
    }

    #[test]
    fn test_unreachable_drag_threshold_rejected() {
        let err = Tuning::from_json(r#"{ "min_drag_distance": 2000.0 }"#).unwrap_err();
        assert!(err.to_string().contains("min_drag_distance"));
        assert!(Tuning::from_json(r#"{ "min_drag_distance": 1000.0 }"#).is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }
}
