//! Terminal shooter runner (default binary).
//!
//! Player 2 plays on this keyboard; Player 1 is driven over TCP through the
//! remote adapter. Rendering goes through the core's `Surface` boundary into a
//! half-block canvas and a diffing framebuffer renderer.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use tui_shooter::adapter::{check_tcp_listen_available, Adapter, LinkStatus, ServerConfig};
use tui_shooter::core::{Game, GameConfig};
use tui_shooter::input::{should_quit, InputHandler, ReleaseMode, LOCAL_PLAYER};
use tui_shooter::term::{
    draw_status_line, Canvas, Cell, FrameBuffer, RemoteLinkView, StatusView, TerminalRenderer,
};
use tui_shooter::types::FRAME_MS;

/// Log to `SHOOTER_LOG_PATH` when set; the terminal itself is in raw mode.
fn init_tracing() -> Result<()> {
    let Some(path) = std::env::var("SHOOTER_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

/// Start the remote adapter, or report why it is not running.
fn start_remote() -> (Option<Adapter>, RemoteLinkView) {
    if ServerConfig::is_disabled() {
        tracing::info!("remote control disabled via SHOOTER_REMOTE_DISABLED");
        return (None, RemoteLinkView::Disabled);
    }

    let config = ServerConfig::from_env();
    if let Err(e) = check_tcp_listen_available(&config.host, config.port) {
        tracing::error!(host = %config.host, port = config.port, error = %e, "remote port unavailable");
        return (None, RemoteLinkView::Down);
    }

    match Adapter::start(config) {
        Ok(adapter) => (Some(adapter), RemoteLinkView::Starting),
        Err(e) => {
            tracing::error!(error = %e, "failed to start remote adapter");
            (None, RemoteLinkView::Down)
        }
    }
}

fn remote_view(adapter: Option<&Adapter>, fallback: RemoteLinkView) -> RemoteLinkView {
    match adapter.map(Adapter::status) {
        None => fallback,
        Some(LinkStatus::Starting) => RemoteLinkView::Starting,
        Some(LinkStatus::Listening(addr)) => RemoteLinkView::Listening { port: addr.port() },
        Some(LinkStatus::Connected { peer, .. }) => RemoteLinkView::Connected { peer },
        Some(LinkStatus::Stopped) => RemoteLinkView::Down,
    }
}

fn main() -> Result<()> {
    init_tracing()?;

    let config = GameConfig::from_env();
    tracing::info!(
        seed = config.seed,
        width = config.width,
        height = config.height,
        "starting session"
    );
    let game = Game::new(config);
    let remote = start_remote();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game, remote);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting with error");
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    mut game: Game,
    (mut adapter, remote_fallback): (Option<Adapter>, RemoteLinkView),
) -> Result<()> {
    let key_release_events = term.key_release_events();
    let mut input = if key_release_events {
        InputHandler::with_mode(ReleaseMode::Reported)
    } else {
        InputHandler::new()
    };
    tracing::debug!(mode = ?input.mode(), "keyboard mode");

    let mut canvas = Canvas::new(game.width(), game.height());
    let mut fb = FrameBuffer::new(0, 0);
    let mut status_text = String::with_capacity(128);

    let frame = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();

    loop {
        // Input until the next frame is due.
        let timeout = frame.checked_sub(last_frame.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            loop {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind == KeyEventKind::Press && should_quit(key) {
                            return Ok(());
                        }
                        if let Some(ev) = input.handle_key_event(key) {
                            game.apply(LOCAL_PLAYER, ev);
                        }
                    }
                    Event::FocusLost => {
                        for ev in input.reset() {
                            game.apply(LOCAL_PLAYER, ev);
                        }
                    }
                    Event::Resize(..) => term.invalidate(),
                    _ => {}
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed < frame {
            continue;
        }
        last_frame = Instant::now();

        // Tick.
        let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        for ev in input.update(elapsed_ms) {
            game.apply(LOCAL_PLAYER, ev);
        }
        let dt = elapsed.as_secs_f64();
        match adapter.as_mut() {
            Some(remote) => game.step(dt, remote.commands()),
            None => game.tick(dt),
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let play_rows = h.saturating_sub(1).max(1);
        fb.resize(w, h);
        fb.clear(Cell::default());

        canvas.resize(w, play_rows);
        canvas.begin_frame();
        game.render(&mut canvas);
        canvas.compose_into(&mut fb);

        let status = StatusView {
            remote: remote_view(adapter.as_ref(), remote_fallback),
            key_release_events,
        };
        draw_status_line(&mut fb, play_rows, &status, &mut status_text);

        term.draw_swap(&mut fb)?;
    }
}
