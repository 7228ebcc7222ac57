//! Remote control line protocol.
//!
//! One command per line, case-sensitive, surrounding whitespace ignored:
//!
//! ```text
//! RIGHT_DOWN | RIGHT_UP | LEFT_DOWN | LEFT_UP | SHOOT_DOWN | SHOOT_UP
//! ```
//!
//! Blank lines are skipped. Anything else is rejected with [`ProtocolError`] and
//! never reaches the game.

use std::fmt;

use crate::types::ControlEvent;

/// Longest line decoded as a command, terminator included. Longer lines are skipped.
pub const MAX_LINE_BYTES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A non-empty line that is not one of the six commands.
    Unknown(String),
    /// A line that exceeded [`MAX_LINE_BYTES`] before its terminator.
    LineTooLong,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Unknown(line) => write!(f, "unknown command: {:?}", line),
            ProtocolError::LineTooLong => {
                write!(f, "line exceeds {} bytes", MAX_LINE_BYTES)
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Parse one received line (with or without its terminator).
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<ControlEvent>, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    ControlEvent::from_wire(trimmed)
        .map(Some)
        .ok_or_else(|| ProtocolError::Unknown(trimmed.to_string()))
}
