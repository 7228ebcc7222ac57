//! TCP server for remote control
//!
//! Serves one controller at a time: connections are accepted sequentially and
//! each is read to completion before the next accept. Uses tokio for async
//! networking.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot, watch};

use crate::protocol::{parse_line, ProtocolError, MAX_LINE_BYTES};
use crate::runtime::{InboundEvent, InboundPayload, LinkStatus};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_pending_commands: usize,
    /// Release the remote ship's held controls when its connection ends.
    pub release_on_disconnect: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_pending_commands: 64,
            release_on_disconnect: true,
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let host = env::var("SHOOTER_REMOTE_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("SHOOTER_REMOTE_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);

        let max_pending_commands = env::var("SHOOTER_REMOTE_MAX_PENDING")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        Self {
            host,
            port,
            max_pending_commands,
            release_on_disconnect: !env_flag("SHOOTER_REMOTE_KEEP_HELD"),
        }
    }

    /// Check if remote control is disabled via environment
    pub fn is_disabled() -> bool {
        env_flag("SHOOTER_REMOTE_DISABLED")
    }
}

/// Probe whether `host:port` can be bound right now.
pub fn check_tcp_listen_available(host: &str, port: u16) -> std::io::Result<()> {
    std::net::TcpListener::bind((host, port)).map(drop)
}

// Pause after a failed accept so a persistent error (e.g. EMFILE) does not spin.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(50);

/// How a single connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Peer closed or errored; go back to accepting.
    PeerClosed,
    /// The game side dropped its receiver; stop serving.
    GameClosed,
}

/// Start the TCP server
///
/// Runs until the receiving end of `event_tx` is dropped. A bind failure is
/// returned; a failed accept is logged and retried.
pub async fn run_server(
    config: ServerConfig,
    event_tx: mpsc::Sender<InboundEvent>,
    status_tx: watch::Sender<LinkStatus>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, "remote control listening");
    status_tx.send_replace(LinkStatus::Listening(local));
    if let Some(tx) = ready_tx {
        let _ = tx.send(local);
    }

    let mut connection_id = 0u64;

    let listener = &listener;

    loop {
        let Some((socket, peer)) = next_connection(move || listener.accept(), &event_tx).await
        else {
            break;
        };
        connection_id += 1;

        tracing::info!(connection_id, %peer, "controller connected");
        status_tx.send_replace(LinkStatus::Connected { local, peer });

        let session = serve_connection(socket, peer, connection_id, &event_tx).await;

        tracing::info!(connection_id, "controller disconnected");
        status_tx.send_replace(LinkStatus::Listening(local));

        if session == SessionEnd::GameClosed {
            break;
        }
    }

    tracing::debug!("game side closed; remote server exiting");
    Ok(())
}

/// Wait for the next controller, retrying failed accepts.
///
/// Returns `None` once the game side has closed.
async fn next_connection<S, F, Fut>(
    mut accept: F,
    event_tx: &mpsc::Sender<InboundEvent>,
) -> Option<(S, SocketAddr)>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<(S, SocketAddr)>>,
{
    loop {
        let accepted = tokio::select! {
            accepted = accept() => accepted,
            _ = event_tx.closed() => return None,
        };

        match accepted {
            Ok(conn) => return Some(conn),
            Err(e) => {
                tracing::warn!(error = %e, "accept failed; retrying");
                tokio::select! {
                    _ = tokio::time::sleep(ACCEPT_RETRY_DELAY) => {}
                    _ = event_tx.closed() => return None,
                }
            }
        }
    }
}

/// Skip the remainder of the current line.
///
/// Returns `false` if the stream ended first.
async fn discard_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> io::Result<bool> {
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(false);
        }
        let len = available.len();
        match available.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(true);
            }
            None => reader.consume(len),
        }
    }
}

/// Read commands from one controller until it goes away.
///
/// Emits `Connected` first and `Disconnected` last (unless the game side is
/// gone), with every recognized command in between in stream order.
pub async fn serve_connection<R: AsyncRead + Unpin>(
    stream: R,
    peer: SocketAddr,
    connection_id: u64,
    event_tx: &mpsc::Sender<InboundEvent>,
) -> SessionEnd {
    let send = |payload| {
        event_tx.send(InboundEvent {
            connection_id,
            payload,
        })
    };

    if send(InboundPayload::Connected(peer)).await.is_err() {
        return SessionEnd::GameClosed;
    }

    let mut reader = BufReader::new(stream);
    let mut buf = Vec::with_capacity(MAX_LINE_BYTES);
    let limit = MAX_LINE_BYTES as u64;

    loop {
        buf.clear();
        let read = (&mut reader).take(limit).read_until(b'\n', &mut buf).await;

        let bytes_read = match read {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(connection_id, error = %e, "read error");
                break;
            }
        };

        if bytes_read == 0 {
            break;
        }

        if bytes_read as u64 == limit && buf.last() != Some(&b'\n') {
            tracing::warn!(connection_id, error = %ProtocolError::LineTooLong, "skipping line");
            match discard_line(&mut reader).await {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) => {
                    tracing::warn!(connection_id, error = %e, "read error");
                    break;
                }
            }
        }

        // Bytes that are not UTF-8 become U+FFFD and fail as an unknown command.
        let line = String::from_utf8_lossy(&buf);
        match parse_line(&line) {
            Ok(Some(event)) => {
                tracing::debug!(connection_id, command = event.as_wire(), "remote command");
                if send(InboundPayload::Control(event)).await.is_err() {
                    return SessionEnd::GameClosed;
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(connection_id, error = %e, "ignoring remote line");
            }
        }
    }

    if send(InboundPayload::Disconnected).await.is_err() {
        return SessionEnd::GameClosed;
    }
    SessionEnd::PeerClosed
}
