//! Per-frame simulation step
//!
//! One call to [`tick`] per rendered frame: aim, fly arrows, bob balloons,
//! resolve pops, then check for the end of the match.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aim::AimOutcome;
use super::collision::resolve_hits;
use super::state::{GameEvent, GamePhase, GameState, LossReason};
use crate::consts::HITS_TO_WIN;

/// Input for a single frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Mouse position in display coordinates
    pub mouse_pos: Vec2,
    /// Primary button went down this frame
    pub primary_pressed: bool,
    /// Primary button came up this frame
    pub primary_released: bool,
    /// Play again (only honoured after the match has ended)
    pub restart: bool,
}

/// Advance the match by one frame. `dt` only drives the shot cooldown.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if state.phase != GamePhase::Playing {
        if input.restart && state.restart() {
            state.events.push(GameEvent::Restarted);
        }
        return;
    }

    state.frames += 1;
    state.time_since_last_shot += dt;

    update_aim(state, input);

    for (idx, arrow) in state.arrows.iter_mut().enumerate() {
        let was_flying = arrow.released;
        arrow.advance(&state.tuning);
        if was_flying && !arrow.released {
            log::debug!("Arrow {} left the field", idx);
            state.events.push(GameEvent::ArrowLeftField { arrow: idx });
        }
    }

    for balloon in &mut state.balloons {
        balloon.advance(&state.tuning);
    }

    let hits = resolve_hits(
        &mut state.balloons,
        &mut state.arrows,
        state.tuning.balloon_radius,
        state.tuning.archer_pos,
    );
    for hit in hits {
        state.hits += 1;
        log::debug!(
            "Arrow {} popped balloon {} ({}/{})",
            hit.arrow,
            hit.balloon,
            state.hits,
            HITS_TO_WIN
        );
        state.events.push(GameEvent::BalloonPopped {
            balloon: hit.balloon,
            arrow: hit.arrow,
        });
    }

    check_match_end(state);
}

/// Run the drag gesture and fire the held arrow when it completes
fn update_aim(state: &mut GameState, input: &TickInput) {
    let can_start = state.can_start_drag();
    match state.aim.update(input, can_start, &state.tuning) {
        AimOutcome::Shot { velocity, distance } => fire_arrow(state, velocity, distance),
        AimOutcome::Discarded { distance } => {
            log::debug!("Drag of {:.1} too short, discarded", distance);
            state.events.push(GameEvent::DragDiscarded { distance });
        }
        AimOutcome::DragStarted | AimOutcome::None => {}
    }
}

fn fire_arrow(state: &mut GameState, velocity: Vec2, distance: f32) {
    let Some(arrow) = state.held_arrow_mut() else {
        log::warn!("Shot requested with no arrow on the string");
        return;
    };
    arrow.launch(velocity);

    let idx = state.arrows.len() - 1;
    state.time_since_last_shot = 0.0;
    state.arrows_fired += 1;
    log::debug!(
        "Arrow {} fired (drag {:.1}, velocity {:.1?}), {} left",
        idx,
        distance,
        velocity,
        state.arrows_remaining()
    );
    state.events.push(GameEvent::ArrowFired { arrow: idx, velocity });

    if state.arrows_fired < state.tuning.max_arrows {
        state.spawn_held_arrow();
    } else {
        state.last_arrow_in_flight = true;
    }
}

/// Win is checked first, so five pops on the final frame still win
fn check_match_end(state: &mut GameState) {
    if state.hits >= HITS_TO_WIN {
        state.phase = GamePhase::Win;
        state.aim.cancel();
        log::info!("Match won in {} frames with {} arrows", state.frames, state.arrows_fired);
        state.events.push(GameEvent::Won);
        return;
    }

    let reason = if state.frames >= state.tuning.match_frames {
        Some(LossReason::TimeUp)
    } else if state.last_arrow_in_flight
        && state.arrows.last().is_some_and(|arrow| !arrow.released)
    {
        Some(LossReason::OutOfArrows)
    } else {
        None
    };

    if let Some(reason) = reason {
        state.phase = GamePhase::GameOver;
        state.aim.cancel();
        log::info!("Match lost ({:?}) with {}/{} hits", reason, state.hits, HITS_TO_WIN);
        state.events.push(GameEvent::Lost { reason });
    }
}
