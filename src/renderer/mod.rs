//! Presentation layer
//!
//! Turns a read-only [`GameState`] into a flat list of draw commands. The
//! windowing backend owns textures, fonts and text measuring; this module only
//! decides what goes where, in which order.

pub mod hud;

use glam::Vec2;

use crate::consts::VSCREEN_HEIGHT;
use crate::sim::{GamePhase, GameState};

pub use hud::{aim_preview, end_banner, hud_text, status_line};

/// RGBA colors for game elements
pub mod colors {
    pub type Color = [f32; 4];

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const RAY_WHITE: Color = [0.96, 0.96, 0.96, 1.0];
    pub const AIM_DOT: Color = [0.9, 0.16, 0.22, 1.0];
    pub const LOSE_BANNER: Color = [0.9, 0.16, 0.22, 1.0];
    pub const WIN_BANNER: Color = [0.0, 0.89, 0.19, 1.0];
    pub const HINT_TEXT: Color = [0.31, 0.31, 0.31, 1.0];
}

use colors::Color;

/// Opaque texture handles; the backend maps them to loaded images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Background,
    TimerPlate,
    Ground,
    Bow,
    Arrow,
    Balloon,
}

impl TextureId {
    pub const ALL: [TextureId; 6] = [
        TextureId::Background,
        TextureId::TimerPlate,
        TextureId::Ground,
        TextureId::Bow,
        TextureId::Arrow,
        TextureId::Balloon,
    ];

    /// Asset path relative to the game's data directory
    pub fn asset_path(&self) -> &'static str {
        match self {
            TextureId::Background => "Graphics/bg.png",
            TextureId::TimerPlate => "Graphics/timer.png",
            TextureId::Ground => "Graphics/platform.png",
            TextureId::Bow => "Graphics/bow.png",
            TextureId::Arrow => "Graphics/Arrow.png",
            TextureId::Balloon => "Graphics/Balloon.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `pos` is the top-left of the text
    Left,
    /// `pos` is the top-centre of the text
    Center,
}

/// One primitive for the backend to draw, in virtual coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Sprite {
        texture: TextureId,
        pos: Vec2,
        /// Degrees
        rotation: f32,
        scale: f32,
        tint: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

impl DrawCommand {
    fn sprite(texture: TextureId, pos: Vec2) -> Self {
        DrawCommand::Sprite {
            texture,
            pos,
            rotation: 0.0,
            scale: 1.0,
            tint: colors::WHITE,
        }
    }
}

/// Sprite sizes the layout depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteMetrics {
    pub bow_size: Vec2,
    pub ground_height: f32,
}

impl Default for SpriteMetrics {
    fn default() -> Self {
        Self {
            bow_size: Vec2::new(16.0, 32.0),
            ground_height: 20.0,
        }
    }
}

/// Where the timer plate sits
const TIMER_PLATE_POS: Vec2 = Vec2::new(260.0, 0.0);
/// Arrow sprites are drawn slightly smaller than the texture
const ARROW_SCALE: f32 = 0.9;

/// Build the draw list for one frame
pub fn build_frame(state: &GameState, mouse: Vec2, metrics: &SpriteMetrics) -> Vec<DrawCommand> {
    let mut commands = vec![
        DrawCommand::Clear(colors::RAY_WHITE),
        DrawCommand::sprite(TextureId::Background, Vec2::ZERO),
        DrawCommand::sprite(TextureId::TimerPlate, TIMER_PLATE_POS),
        DrawCommand::sprite(
            TextureId::Ground,
            Vec2::new(0.0, VSCREEN_HEIGHT - metrics.ground_height),
        ),
        DrawCommand::sprite(
            TextureId::Bow,
            state.tuning.archer_pos - metrics.bow_size / 2.0,
        ),
    ];

    for arrow in state.arrows_in_flight() {
        commands.push(DrawCommand::Sprite {
            texture: TextureId::Arrow,
            pos: arrow.pos,
            rotation: arrow.heading_degrees(),
            scale: ARROW_SCALE,
            tint: colors::WHITE,
        });
    }

    for balloon in state.balloons.iter().filter(|b| !b.hit) {
        commands.push(DrawCommand::sprite(TextureId::Balloon, balloon.pos));
    }

    commands.extend(hud_text(state));

    if state.phase == GamePhase::Playing {
        commands.extend(aim_preview(state, mouse).into_iter().map(|center| {
            DrawCommand::Circle {
                center,
                radius: hud::AIM_DOT_RADIUS,
                color: colors::AIM_DOT,
            }
        }));
    }

    commands.extend(end_banner(state));
    commands
}
