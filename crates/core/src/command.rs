//! Units of work marshaled onto the simulation thread.

use crate::types::{ControlEvent, PlayerId};

/// A queued input transition.
///
/// Commands produced on other threads (the remote adapter) are sent through a
/// FIFO channel and applied by [`Game::step`](crate::Game::step) in the order
/// they were queued, before the physics runs for that frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Apply one edge-triggered transition to a player's ship.
    Control { player: PlayerId, event: ControlEvent },
    /// Release every held control of a player's ship (e.g. its controller went away).
    ReleaseAll { player: PlayerId },
}

impl Command {
    pub fn control(player: PlayerId, event: ControlEvent) -> Self {
        Command::Control { player, event }
    }
}
