//! Platform abstraction layer
//!
//! The simulation never talks to a window directly. A backend implements
//! [`Platform`] (mouse, keyboard, frame timing) and [`poll_input`] turns one
//! frame of it into a [`TickInput`].
//!
//! [`ScriptedPlatform`] replays recorded frames from JSON; it stands in for a
//! real window in tests and headless runs.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FRAME_DT;
use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Escape,
    Space,
}

/// Input and timing services supplied by the windowing backend
pub trait Platform {
    /// Mouse position in display coordinates
    fn mouse_position(&self) -> Vec2;
    /// Button went down this frame
    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;
    /// Button came up this frame
    fn is_mouse_button_released(&self, button: MouseButton) -> bool;
    /// Key went down this frame
    fn is_key_pressed(&self, key: Key) -> bool;
    /// Seconds since the previous frame
    fn frame_time(&self) -> f32;
}

/// Sample the platform for one simulation frame
pub fn poll_input(platform: &impl Platform) -> TickInput {
    TickInput {
        mouse_pos: platform.mouse_position(),
        primary_pressed: platform.is_mouse_button_pressed(MouseButton::Left),
        primary_released: platform.is_mouse_button_released(MouseButton::Left),
        restart: platform.is_key_pressed(Key::Enter),
    }
}

/// One recorded frame of input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub mouse: Vec2,
    #[serde(default)]
    pub pressed: Vec<MouseButton>,
    #[serde(default)]
    pub released: Vec<MouseButton>,
    #[serde(default)]
    pub keys: Vec<Key>,
    #[serde(default = "default_dt")]
    pub dt: f32,
}

fn default_dt() -> f32 {
    FRAME_DT
}

impl InputFrame {
    /// A frame with the mouse at rest and nothing pressed
    pub fn idle(mouse: Vec2) -> Self {
        Self {
            mouse,
            pressed: Vec::new(),
            released: Vec::new(),
            keys: Vec::new(),
            dt: FRAME_DT,
        }
    }

    /// Record what a frame of `TickInput` looked like
    pub fn from_tick_input(input: &TickInput, dt: f32) -> Self {
        let mut frame = Self::idle(input.mouse_pos);
        frame.dt = dt;
        if input.primary_pressed {
            frame.pressed.push(MouseButton::Left);
        }
        if input.primary_released {
            frame.released.push(MouseButton::Left);
        }
        if input.restart {
            frame.keys.push(Key::Enter);
        }
        frame
    }
}

/// Errors raised while loading an input script
#[derive(Debug)]
pub enum ScriptError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Empty,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io { path, source } => {
                write!(f, "failed to read input script {}: {}", path.display(), source)
            }
            ScriptError::Parse(err) => write!(f, "malformed input script: {}", err),
            ScriptError::Empty => write!(f, "input script has no frames"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Io { source, .. } => Some(source),
            ScriptError::Parse(err) => Some(err),
            ScriptError::Empty => None,
        }
    }
}

/// Replays a fixed list of input frames
#[derive(Debug, Clone)]
pub struct ScriptedPlatform {
    frames: Vec<InputFrame>,
    cursor: usize,
}

impl ScriptedPlatform {
    pub fn new(frames: Vec<InputFrame>) -> Result<Self, ScriptError> {
        if frames.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(Self { frames, cursor: 0 })
    }

    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let frames: Vec<InputFrame> = serde_json::from_str(json).map_err(ScriptError::Parse)?;
        Self::new(frames)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::from_json(&json)?;
        log::info!("Loaded {} input frames from {}", script.len(), path.display());
        Ok(script)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True once every frame has been consumed
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }

    /// Move to the next frame; returns false when the script is exhausted
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.frames.len() {
            self.cursor += 1;
        }
        !self.is_finished()
    }

    /// Current frame; past the end the mouse stays where it last was
    fn current(&self) -> Option<&InputFrame> {
        self.frames.get(self.cursor)
    }
}

impl Platform for ScriptedPlatform {
    fn mouse_position(&self) -> Vec2 {
        self.current()
            .or_else(|| self.frames.last())
            .map_or(Vec2::ZERO, |frame| frame.mouse)
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.current().is_some_and(|frame| frame.pressed.contains(&button))
    }

    fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        self.current().is_some_and(|frame| frame.released.contains(&button))
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.current().is_some_and(|frame| frame.keys.contains(&key))
    }

    fn frame_time(&self) -> f32 {
        self.current().map_or(FRAME_DT, |frame| frame.dt)
    }
}
