//! Adapter module - remote control via TCP socket with a line protocol
//!
//! This module lets a second player drive Player 1's ship from another
//! machine or process. Network I/O runs on a private tokio runtime; decoded
//! transitions are queued in arrival order and picked up by the game loop,
//! which applies them on the simulation thread.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: Client connects to the TCP socket (default: 0.0.0.0:5000)
//! 2. **Commanding**: Client sends one command per line
//! 3. **Disconnect**: The server goes back to waiting for the next client
//!
//! Only one controller is served at a time. Further clients wait in the
//! listen backlog until the current one disconnects.
//!
//! # Commands
//!
//! `RIGHT_DOWN`, `RIGHT_UP`, `LEFT_DOWN`, `LEFT_UP`, `SHOOT_DOWN`, `SHOOT_UP`.
//! Matching is case-sensitive after trimming whitespace. Unknown lines,
//! lines that are not UTF-8, and lines longer than 256 bytes are logged and
//! ignored; the connection stays up.
//!
//! # Environment Variables
//!
//! - `SHOOTER_REMOTE_HOST`: Bind address (default: "0.0.0.0")
//! - `SHOOTER_REMOTE_PORT`: Port number (default: 5000)
//! - `SHOOTER_REMOTE_MAX_PENDING`: Queue depth toward the game loop (default: 64)
//! - `SHOOTER_REMOTE_DISABLED`: Set to "1" or "true" to disable the adapter entirely
//! - `SHOOTER_REMOTE_KEEP_HELD`: Set to "1" or "true" to keep controls held after a disconnect
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 5000
//! RIGHT_DOWN
//! SHOOT_DOWN
//! ```

pub mod protocol;
pub mod runtime;
pub mod server;

pub use tui_shooter_core as core;
pub use tui_shooter_types as types;

pub use protocol::{parse_line, ProtocolError};
pub use runtime::{Adapter, InboundEvent, InboundPayload, LinkStatus, REMOTE_PLAYER};
pub use server::{check_tcp_listen_available, run_server, serve_connection, ServerConfig, SessionEnd};
