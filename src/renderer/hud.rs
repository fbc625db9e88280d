//! HUD text, aim preview and end-of-match banners

use glam::Vec2;

use super::colors;
use super::{DrawCommand, TextAlign};
use crate::consts::{HITS_TO_WIN, VSCREEN_HEIGHT, VSCREEN_WIDTH};
use crate::sim::{GamePhase, GameState};

pub const AIM_DOT_COUNT: usize = 10;
pub const AIM_DOT_RADIUS: f32 = 2.0;
/// Dot spacing per unit of drag distance
const AIM_DOT_GAIN: f32 = 0.05;
const AIM_DOT_STEP: f32 = 1.5;
/// The preview leans toward a point far off to the right
const AIM_PREVIEW_ANCHOR: Vec2 = Vec2::new(VSCREEN_WIDTH * 8.0, VSCREEN_HEIGHT);

const BANNER_SIZE: f32 = 30.0;
const HINT_SIZE: f32 = 10.0;
const PLAY_AGAIN: &str = "Press ENTER to Play Again";

fn text(text: String, pos: Vec2, size: f32) -> DrawCommand {
    DrawCommand::Text {
        text,
        pos,
        size,
        color: colors::BLACK,
        align: TextAlign::Left,
    }
}

/// Clock, score and quiver readouts
pub fn hud_text(state: &GameState) -> Vec<DrawCommand> {
    vec![
        text(
            format!("Time: {:02}", state.seconds_remaining()),
            Vec2::new(270.0, 7.0),
            11.0,
        ),
        text(format!("Hits: {:02}", state.hits), Vec2::ZERO, 10.0),
        text(
            format!(
                " {:02}/{:02}",
                state.arrows_remaining(),
                state.tuning.max_arrows
            ),
            Vec2::new(10.0, 140.0),
            8.0,
        ),
    ]
}

/// Dotted aim line from the archer while a drag is in progress
pub fn aim_preview(state: &GameState, mouse: Vec2) -> Vec<Vec2> {
    if !state.aim.is_dragging() {
        return Vec::new();
    }

    let spread = state.aim.live_distance(mouse) * AIM_DOT_GAIN;
    let direction = (AIM_PREVIEW_ANCHOR - mouse).normalize_or_zero() * spread;
    let origin = state.tuning.archer_pos;

    (0..AIM_DOT_COUNT)
        .map(|i| origin + direction * (i as f32 * AIM_DOT_STEP))
        .collect()
}

/// "YOU WIN!" / "YOU LOSE!" with the replay hint; empty while playing
pub fn end_banner(state: &GameState) -> Vec<DrawCommand> {
    let (title, color, hint_offset) = match state.phase {
        GamePhase::Playing => return Vec::new(),
        GamePhase::GameOver => ("YOU LOSE!", colors::LOSE_BANNER, 0.0),
        GamePhase::Win => ("YOU WIN!", colors::WIN_BANNER, 20.0),
    };

    let center_x = VSCREEN_WIDTH / 2.0;
    let center_y = VSCREEN_HEIGHT / 2.0;
    vec![
        DrawCommand::Text {
            text: title.to_string(),
            pos: Vec2::new(center_x, center_y - BANNER_SIZE),
            size: BANNER_SIZE,
            color,
            align: TextAlign::Center,
        },
        DrawCommand::Text {
            text: PLAY_AGAIN.to_string(),
            pos: Vec2::new(center_x, center_y + hint_offset),
            size: HINT_SIZE,
            color: colors::HINT_TEXT,
            align: TextAlign::Center,
        },
    ]
}

/// One-line summary of a finished or running match for logs
pub fn status_line(state: &GameState) -> String {
    let phase = match state.phase {
        GamePhase::Playing => "playing",
        GamePhase::GameOver => "lost",
        GamePhase::Win => "won",
    };
    format!(
        "{} - hits {}/{}, arrows {}/{}, {:.1}s",
        phase,
        state.hits,
        HITS_TO_WIN,
        state.arrows_fired,
        state.tuning.max_arrows,
        state.elapsed_secs()
    )
}
