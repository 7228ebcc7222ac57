//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole simulation: the two ships, their bullets, the
//! bouncing targets, explosions, the star field, and scoring. It has **zero
//! dependencies** on terminals, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed and the same `dt` sequence produce identical sessions
//! - **Testable**: Scenario tests drive ticks with exact time steps
//! - **Portable**: Any front-end can draw it by implementing [`Surface`]
//!
//! # Module Structure
//!
//! - [`entities`]: Ship, bullet, target, explosion, and star values with their motion
//! - [`game_state`]: The [`Game`] that owns every entity and runs the tick
//! - [`command`]: Queued input transitions applied on the simulation thread
//! - [`render`]: The drawing surface boundary and the frame traversal
//! - [`rng`]: Seedable LCG owned by the game
//! - [`config`]: Construction-time session parameters
//!
//! # Threading
//!
//! `Game` is single-owner. Input coming from another thread is turned into
//! [`Command`]s, sent over a channel, and handed to [`Game::step`], which applies
//! them in order before advancing the physics. Input produced on the simulation
//! thread itself (the keyboard) can call [`Game::press`] / [`Game::release`]
//! directly.
//!
//! # Example
//!
//! ```
//! use tui_shooter_core::{Command, Game};
//! use tui_shooter_types::{Action, ControlEvent, PlayerId};
//!
//! let mut game = Game::with_seed(12345);
//!
//! // Local player fires immediately on press.
//! game.press(PlayerId::Two, Action::Shoot);
//! assert_eq!(game.bullets().len(), 1);
//!
//! // Remote transitions arrive as commands and are applied before the tick.
//! game.step(0.016, [Command::control(PlayerId::One, ControlEvent::RightDown)]);
//! assert!(game.ship(PlayerId::One).rotating_right());
//! assert_eq!(game.targets().len(), game.target_count());
//! ```

pub mod command;
pub mod config;
pub mod entities;
pub mod game_state;
pub mod render;
pub mod rng;

pub use tui_shooter_types as types;

// Re-export commonly used types for convenience
pub use command::Command;
pub use config::{GameConfig, MIN_PLAYFIELD_EXTENT};
pub use entities::{Bullet, Explosion, Ship, Star, Target};
pub use game_state::Game;
pub use render::{Color, Surface, Transform};
pub use rng::SimpleRng;
