//! Adapter runtime integration.
//!
//! Bridges the sync game loop with the async TCP server.

use std::net::SocketAddr;

use anyhow::Result;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};

use crate::core::Command;
use crate::server::{run_server, ServerConfig};
use crate::types::{ControlEvent, PlayerId};

/// The ship the remote controller drives.
pub const REMOTE_PLAYER: PlayerId = PlayerId::One;

/// Event delivered to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub connection_id: u64,
    pub payload: InboundPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundPayload {
    Connected(SocketAddr),
    Control(ControlEvent),
    Disconnected,
}

impl InboundEvent {
    /// Map onto a core command for [`REMOTE_PLAYER`].
    pub fn to_command(&self, release_on_disconnect: bool) -> Option<Command> {
        match self.payload {
            InboundPayload::Control(event) => Some(Command::control(REMOTE_PLAYER, event)),
            InboundPayload::Disconnected if release_on_disconnect => Some(Command::ReleaseAll {
                player: REMOTE_PLAYER,
            }),
            InboundPayload::Disconnected | InboundPayload::Connected(_) => None,
        }
    }
}

/// Remote link state, published by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    #[default]
    Starting,
    Listening(SocketAddr),
    Connected {
        local: SocketAddr,
        peer: SocketAddr,
    },
    /// The server exited (bind failure or shutdown).
    Stopped,
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    event_rx: mpsc::Receiver<InboundEvent>,
    status_rx: watch::Receiver<LinkStatus>,
    release_on_disconnect: bool,
}

impl Adapter {
    /// Start the adapter from environment variables.
    ///
    /// Returns `Ok(None)` if `SHOOTER_REMOTE_DISABLED` is set.
    pub fn start_from_env() -> Result<Option<Self>> {
        if ServerConfig::is_disabled() {
            tracing::info!("remote control disabled via SHOOTER_REMOTE_DISABLED");
            return Ok(None);
        }
        Self::start(ServerConfig::from_env()).map(Some)
    }

    pub fn start(config: ServerConfig) -> Result<Self> {
        let max_pending = config.max_pending_commands.max(1);
        let release_on_disconnect = config.release_on_disconnect;
        let (event_tx, event_rx) = mpsc::channel::<InboundEvent>(max_pending);
        let (status_tx, status_rx) = watch::channel(LinkStatus::Starting);

        let rt = Runtime::new()?;
        rt.spawn(async move {
            let result = run_server(config, event_tx, status_tx.clone(), None).await;
            if let Err(e) = result {
                tracing::error!(error = %e, "remote server stopped");
            }
            status_tx.send_replace(LinkStatus::Stopped);
        });

        Ok(Self {
            _rt: rt,
            event_rx,
            status_rx,
            release_on_disconnect,
        })
    }

    pub fn try_recv(&mut self) -> Option<InboundEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Everything queued so far, in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InboundEvent> + '_ {
        std::iter::from_fn(move || self.try_recv())
    }

    /// Queued events mapped to core commands, ready for `Game::step`.
    pub fn commands(&mut self) -> impl Iterator<Item = Command> + '_ {
        let release = self.release_on_disconnect;
        self.drain().filter_map(move |ev| ev.to_command(release))
    }

    pub fn to_command(&self, event: &InboundEvent) -> Option<Command> {
        event.to_command(self.release_on_disconnect)
    }

    pub fn status(&self) -> LinkStatus {
        *self.status_rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(payload: InboundPayload) -> InboundEvent {
        InboundEvent {
            connection_id: 1,
            payload,
        }
    }

    #[test]
    fn test_control_maps_to_remote_player() {
        let cmd = event(InboundPayload::Control(ControlEvent::ShootDown)).to_command(true);
        assert_eq!(
            cmd,
            Some(Command::control(PlayerId::One, ControlEvent::ShootDown))
        );
    }

    #[test]
    fn test_disconnect_releases_when_enabled() {
        let ev = event(InboundPayload::Disconnected);
        assert_eq!(
            ev.to_command(true),
            Some(Command::ReleaseAll {
                player: PlayerId::One
            })
        );
        assert_eq!(ev.to_command(false), None);
    }

    #[test]
    fn test_connected_is_not_a_command() {
        let addr: SocketAddr = "127.0.0.1:5000".parse().unwrap();
        assert_eq!(event(InboundPayload::Connected(addr)).to_command(true), None);
    }
}
