//! Status line drawn under the playfield.
//!
//! Pure (no I/O): the binary fills a [`StatusView`] from the adapter and input
//! state and this module lays it out into the framebuffer.

use std::fmt::Write as _;
use std::net::SocketAddr;

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Remote controller link, as shown to the players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteLinkView {
    Disabled,
    Starting,
    Listening { port: u16 },
    Connected { peer: SocketAddr },
    /// The listener could not be started or has stopped.
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusView {
    pub remote: RemoteLinkView,
    /// Whether keyboard releases are reported by the terminal (otherwise inferred).
    pub key_release_events: bool,
}

const STATUS_STYLE: CellStyle = CellStyle {
    fg: Rgb::new(170, 170, 170),
    bg: Rgb::new(30, 30, 30),
    bold: false,
    dim: false,
};

const LINK_UP: Rgb = Rgb::new(0, 255, 0);
const LINK_WAIT: Rgb = Rgb::new(255, 200, 0);
const LINK_DOWN: Rgb = Rgb::new(255, 80, 80);

/// Render `view` across the full width of row `y`, reusing `scratch` for text.
pub fn draw_status_line(fb: &mut FrameBuffer, y: u16, view: &StatusView, scratch: &mut String) {
    for x in 0..fb.width() {
        fb.put_char(x, y, ' ', STATUS_STYLE);
    }

    scratch.clear();
    let color = match view.remote {
        RemoteLinkView::Disabled => {
            scratch.push_str(" P1 remote: off");
            STATUS_STYLE.fg
        }
        RemoteLinkView::Starting => {
            scratch.push_str(" P1 remote: starting");
            LINK_WAIT
        }
        RemoteLinkView::Listening { port } => {
            let _ = write!(scratch, " P1 remote: waiting on :{}", port);
            LINK_WAIT
        }
        RemoteLinkView::Connected { peer } => {
            let _ = write!(scratch, " P1 remote: {}", peer);
            LINK_UP
        }
        RemoteLinkView::Down => {
            scratch.push_str(" P1 remote: unavailable");
            LINK_DOWN
        }
    };
    let link_len = scratch.chars().count() as u16;
    fb.put_str(0, y, scratch, CellStyle { fg: color, ..STATUS_STYLE });

    scratch.clear();
    let _ = write!(
        scratch,
        " | P2: \u{2190}/a \u{2192}/d space{} | q quit",
        if view.key_release_events { "" } else { " (held by repeat)" }
    );
    fb.put_str(link_len, y, scratch, STATUS_STYLE);
}
