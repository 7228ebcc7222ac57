//! Terminal input module (keyboard player).
//!
//! This module is independent of the simulation. It maps `crossterm` key events
//! onto ship [`Action`](crate::types::Action)s and turns presses and releases
//! into edge-triggered [`ControlEvent`](crate::types::ControlEvent)s, including on
//! terminals that never report key releases.

pub mod handler;
pub mod map;

pub use tui_shooter_types as types;

/// The ship driven from this terminal's keyboard.
pub const LOCAL_PLAYER: types::PlayerId = types::PlayerId::Two;

pub use handler::{InputHandler, ReleaseMode};
pub use map::{map_key, should_quit};
