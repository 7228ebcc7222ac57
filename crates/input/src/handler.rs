//! Held-key tracker for terminal environments.
//!
//! Ship controls are hold-to-act, so the game needs both edges of every key.
//! Terminals that support the keyboard enhancement protocol report releases
//! directly. Others only repeat the press while the key is held, so a key is
//! considered released once its repeats stop arriving.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{Action, ControlEvent};

// Before the first repeat arrives the terminal's repeat delay applies (commonly
// 250-500ms); after that, repeats come every ~30-50ms.
const DEFAULT_INITIAL_TIMEOUT_MS: u32 = 500;
const DEFAULT_REPEAT_TIMEOUT_MS: u32 = 120;

/// How key releases are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    /// The terminal reports release events.
    Reported,
    /// Release is inferred when no press/repeat arrives within the timeout.
    Timeout {
        initial_ms: u32,
        repeat_ms: u32,
    },
}

impl Default for ReleaseMode {
    fn default() -> Self {
        ReleaseMode::Timeout {
            initial_ms: DEFAULT_INITIAL_TIMEOUT_MS,
            repeat_ms: DEFAULT_REPEAT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyState {
    held: bool,
    repeating: bool,
    idle_ms: u32,
}

/// Tracks the keyboard player's held controls.
#[derive(Debug, Clone)]
pub struct InputHandler {
    keys: [KeyState; 3],
    mode: ReleaseMode,
}

const ACTIONS: [Action; 3] = [Action::Right, Action::Left, Action::Shoot];

fn slot(action: Action) -> usize {
    match action {
        Action::Right => 0,
        Action::Left => 1,
        Action::Shoot => 2,
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_mode(ReleaseMode::default())
    }

    pub fn with_mode(mode: ReleaseMode) -> Self {
        Self {
            keys: [KeyState::default(); 3],
            mode,
        }
    }

    pub fn mode(&self) -> ReleaseMode {
        self.mode
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.keys[slot(action)].held
    }

    /// Feed one crossterm key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<ControlEvent> {
        match key.kind {
            KeyEventKind::Press => self.handle_key_press(key.code),
            KeyEventKind::Repeat => {
                self.handle_key_repeat(key.code);
                None
            }
            KeyEventKind::Release => self.handle_key_release(key.code),
        }
    }

    /// Returns the down transition on the first press only.
    ///
    /// A press for an already-held key is a terminal auto-repeat and just keeps
    /// the key alive.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<ControlEvent> {
        let action = map_key(code)?;
        let key = &mut self.keys[slot(action)];
        if key.held {
            key.repeating = true;
            key.idle_ms = 0;
            return None;
        }
        *key = KeyState {
            held: true,
            repeating: false,
            idle_ms: 0,
        };
        Some(ControlEvent::down(action))
    }

    pub fn handle_key_repeat(&mut self, code: KeyCode) {
        if let Some(action) = map_key(code) {
            let key = &mut self.keys[slot(action)];
            if key.held {
                key.repeating = true;
                key.idle_ms = 0;
            }
        }
    }

    /// Returns the up transition if the key was held.
    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<ControlEvent> {
        let action = map_key(code)?;
        self.release(action)
    }

    /// Advance idle timers; returns releases inferred from silence.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<ControlEvent, 3> {
        let mut events = ArrayVec::new();

        let ReleaseMode::Timeout {
            initial_ms,
            repeat_ms,
        } = self.mode
        else {
            return events;
        };

        for action in ACTIONS {
            let key = &mut self.keys[slot(action)];
            if !key.held {
                continue;
            }
            key.idle_ms = key.idle_ms.saturating_add(elapsed_ms);
            let limit = if key.repeating { repeat_ms } else { initial_ms };
            if key.idle_ms > limit {
                if let Some(ev) = self.release(action) {
                    events.push(ev);
                }
            }
        }

        events
    }

    /// Release everything that is held (e.g. on focus loss).
    pub fn reset(&mut self) -> ArrayVec<ControlEvent, 3> {
        let mut events = ArrayVec::new();
        for action in ACTIONS {
            if let Some(ev) = self.release(action) {
                events.push(ev);
            }
        }
        events
    }

    fn release(&mut self, action: Action) -> Option<ControlEvent> {
        let key = &mut self.keys[slot(action)];
        if !key.held {
            return None;
        }
        *key = KeyState::default();
        Some(ControlEvent::up(action))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
