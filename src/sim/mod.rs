//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per frame, motion independent of frame time
//! - Seeded RNG only, and only when balloons are (re)spawned
//! - Stable iteration order (balloons by index, arrows by firing order)
//! - No rendering or platform dependencies

pub mod aim;
pub mod arrow;
pub mod balloon;
pub mod collision;
pub mod state;
pub mod tick;

pub use aim::{AimController, AimOutcome, AimState, launch_velocity};
pub use arrow::Arrow;
pub use balloon::Balloon;
pub use collision::{Hit, point_in_circle, resolve_hits};
pub use state::{GameEvent, GamePhase, GameState, LossReason, RngState};
pub use tick::{TickInput, tick};
