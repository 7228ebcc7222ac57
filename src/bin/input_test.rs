//! Keyboard diagnostic: prints raw key events and the control transitions
//! the held-key tracker derives from them.
//!
//! Useful for checking whether a terminal reports key releases. Quit with `q`.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};

use tui_shooter::input::{should_quit, InputHandler, ReleaseMode};

fn main() -> Result<()> {
    terminal::enable_raw_mode()?;
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    let mut stdout = io::stdout();
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let result = run(&mut stdout, enhanced);

    if enhanced {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = terminal::disable_raw_mode();
    result
}

fn run(out: &mut io::Stdout, enhanced: bool) -> Result<()> {
    write!(out, "key release events: {}\r\n", enhanced)?;
    out.flush()?;

    let mut input = if enhanced {
        InputHandler::with_mode(ReleaseMode::Reported)
    } else {
        InputHandler::new()
    };
    let mut last = Instant::now();

    loop {
        if event::poll(Duration::from_millis(10))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && should_quit(key) {
                    return Ok(());
                }
                write!(out, "{:?} {:?}\r\n", key.kind, key.code)?;
                if let Some(ev) = input.handle_key_event(key) {
                    write!(out, "  -> {}\r\n", ev.as_wire())?;
                }
            }
        }

        let elapsed = last.elapsed();
        last = Instant::now();
        let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        for ev in input.update(ms) {
            write!(out, "  -> {} (timeout)\r\n", ev.as_wire())?;
        }
        out.flush()?;
    }
}
