//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. The core draws
//! through its `Surface` trait onto a [`Canvas`], which rasterizes into
//! half-block pixels; the [`TerminalRenderer`] flushes the resulting
//! [`FrameBuffer`] with diff encoding.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Provide a rendering pipeline that feels closer to a game renderer
//! - Keep the playfield's aspect ratio regardless of terminal size

pub mod canvas;
pub mod fb;
pub mod renderer;
pub mod status;

pub use tui_shooter_core as core;
pub use tui_shooter_types as types;

pub use canvas::Canvas;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use status::{draw_status_line, RemoteLinkView, StatusView};
