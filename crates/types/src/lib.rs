//! Core types module - shared enums and tuning constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data with no external dependencies, so they can be used by
//! the simulation core, the terminal front-end, and the remote adapter alike.
//!
//! # Playfield
//!
//! The simulation runs in abstract playfield units, one unit per pixel of an
//! 800x600 window by default. A terminal surface scales the playfield to
//! whatever viewport it has.
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SHIP_SIZE` | 40 | Distance from ship center to nose |
//! | `ROTATION_SPEED_DEG` | 120 | Degrees per second while rotating |
//! | `SHOOT_INTERVAL_SECS` | 0.2 | Autofire reload while shoot is held |
//! | `BULLET_SPEED` | 300 | Units per second |
//! | `BULLET_RADIUS` | 5 | Collision radius |
//! | `TARGET_COUNT` | 7 | Constant target population |
//! | `STAR_COUNT` | 100 | Background stars |
//! | `EXPLOSION_DURATION_SECS` | 0.4 | Explosion lifetime |
//! | `EXPLOSION_MAX_RADIUS` | 40 | Explosion radius at end of life |
//! | `HIT_SCORE` | 10 | Points per destroyed target |
//!
//! # Examples
//!
//! ```
//! use tui_shooter_types::{Action, ControlEvent, PlayerId};
//!
//! // Parse a remote controller line
//! let ev = ControlEvent::from_wire("RIGHT_DOWN").unwrap();
//! assert_eq!(ev.action(), Action::Right);
//! assert!(ev.is_down());
//!
//! // Build the matching release
//! assert_eq!(ControlEvent::up(Action::Right), ControlEvent::RightUp);
//!
//! // Bullet owner ids
//! assert_eq!(PlayerId::One.owner_id(), 1);
//! assert_eq!(PlayerId::Two.owner_id(), 2);
//! ```

/// Default playfield width in units.
pub const PLAYFIELD_WIDTH: f64 = 800.0;

/// Default playfield height in units.
pub const PLAYFIELD_HEIGHT: f64 = 600.0;

/// Ship size: distance from center to nose, also the triangle height scale.
pub const SHIP_SIZE: f64 = 40.0;

/// Player 2 spawns this far above the bottom edge.
pub const PLAYER_TWO_BOTTOM_OFFSET: f64 = 80.0;

/// Ship rotation rate in degrees per second.
pub const ROTATION_SPEED_DEG: f64 = 120.0;

/// Reload interval while the shoot control is held.
pub const SHOOT_INTERVAL_SECS: f64 = 0.2;

/// Bullet travel speed in units per second.
pub const BULLET_SPEED: f64 = 300.0;

/// Bullet collision radius.
pub const BULLET_RADIUS: f64 = 5.0;

/// Number of targets alive at any time after initialization.
pub const TARGET_COUNT: usize = 7;

/// Smallest target radius.
pub const TARGET_RADIUS_MIN: f64 = 6.0;

/// Random span added on top of [`TARGET_RADIUS_MIN`].
pub const TARGET_RADIUS_SPAN: f64 = 20.0;

/// Slowest target speed in units per second.
pub const TARGET_SPEED_MIN: f64 = 50.0;

/// Random span added on top of [`TARGET_SPEED_MIN`].
pub const TARGET_SPEED_SPAN: f64 = 80.0;

/// Number of background stars.
pub const STAR_COUNT: usize = 100;

/// Dimmest base star brightness.
pub const STAR_BRIGHTNESS_MIN: f64 = 0.3;

/// Explosion lifetime in seconds.
pub const EXPLOSION_DURATION_SECS: f64 = 0.4;

/// Explosion radius reached at the end of its lifetime.
pub const EXPLOSION_MAX_RADIUS: f64 = 40.0;

/// Points credited per destroyed target.
pub const HIT_SCORE: u32 = 10;

/// Target frame interval for the terminal loop (16ms ≈ 60 FPS).
pub const FRAME_MS: u64 = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arcade_parity_tuning_defaults() {
        assert_eq!(SHIP_SIZE, 40.0);
        assert_eq!(ROTATION_SPEED_DEG, 120.0);
        assert_eq!(SHOOT_INTERVAL_SECS, 0.2);
        assert_eq!(BULLET_SPEED, 300.0);
        assert_eq!(BULLET_RADIUS, 5.0);
        assert_eq!(TARGET_COUNT, 7);
        assert_eq!(STAR_COUNT, 100);
        assert_eq!(EXPLOSION_DURATION_SECS, 0.4);
        assert_eq!(EXPLOSION_MAX_RADIUS, 40.0);
        assert_eq!(HIT_SCORE, 10);
    }

    #[test]
    fn wire_names_round_trip() {
        for ev in ControlEvent::ALL {
            assert_eq!(ControlEvent::from_wire(ev.as_wire()), Some(ev));
        }
    }

    #[test]
    fn wire_names_are_case_sensitive() {
        assert_eq!(ControlEvent::from_wire("right_down"), None);
        assert_eq!(ControlEvent::from_wire("Right_Down"), None);
        assert_eq!(ControlEvent::from_wire("FIRE"), None);
        assert_eq!(ControlEvent::from_wire(""), None);
    }

    #[test]
    fn event_constructors_match_accessors() {
        for action in [Action::Right, Action::Left, Action::Shoot] {
            let down = ControlEvent::down(action);
            let up = ControlEvent::up(action);
            assert_eq!(down.action(), action);
            assert_eq!(up.action(), action);
            assert!(down.is_down());
            assert!(!up.is_down());
            assert_eq!(ControlEvent::new(action, true), down);
            assert_eq!(ControlEvent::new(action, false), up);
        }
    }
}

/// The two players.
///
/// - **One**: driven by the remote controller
/// - **Two**: driven by the local keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Numeric owner id stamped on bullets (1 or 2).
    pub fn owner_id(&self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    /// Slot index into per-player arrays.
    pub fn index(&self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// A ship control that can be held down or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Rotate clockwise
    Right,
    /// Rotate counter-clockwise
    Left,
    /// Fire (immediately, then autofire while held)
    Shoot,
}

/// Edge-triggered control transition.
///
/// These are the six named events of the remote controller protocol. Local
/// keyboard input produces the same events for the other ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    RightDown,
    RightUp,
    LeftDown,
    LeftUp,
    ShootDown,
    ShootUp,
}

impl ControlEvent {
    pub const ALL: [ControlEvent; 6] = [
        ControlEvent::RightDown,
        ControlEvent::RightUp,
        ControlEvent::LeftDown,
        ControlEvent::LeftUp,
        ControlEvent::ShootDown,
        ControlEvent::ShootUp,
    ];

    pub fn new(action: Action, down: bool) -> Self {
        if down {
            Self::down(action)
        } else {
            Self::up(action)
        }
    }

    pub fn down(action: Action) -> Self {
        match action {
            Action::Right => ControlEvent::RightDown,
            Action::Left => ControlEvent::LeftDown,
            Action::Shoot => ControlEvent::ShootDown,
        }
    }

    pub fn up(action: Action) -> Self {
        match action {
            Action::Right => ControlEvent::RightUp,
            Action::Left => ControlEvent::LeftUp,
            Action::Shoot => ControlEvent::ShootUp,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            ControlEvent::RightDown | ControlEvent::RightUp => Action::Right,
            ControlEvent::LeftDown | ControlEvent::LeftUp => Action::Left,
            ControlEvent::ShootDown | ControlEvent::ShootUp => Action::Shoot,
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(
            self,
            ControlEvent::RightDown | ControlEvent::LeftDown | ControlEvent::ShootDown
        )
    }

    /// Parse a remote protocol command (exact, case-sensitive match).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_shooter_types::ControlEvent;
    ///
    /// assert_eq!(ControlEvent::from_wire("SHOOT_UP"), Some(ControlEvent::ShootUp));
    /// assert_eq!(ControlEvent::from_wire("shoot_up"), None);
    /// ```
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "RIGHT_DOWN" => Some(ControlEvent::RightDown),
            "RIGHT_UP" => Some(ControlEvent::RightUp),
            "LEFT_DOWN" => Some(ControlEvent::LeftDown),
            "LEFT_UP" => Some(ControlEvent::LeftUp),
            "SHOOT_DOWN" => Some(ControlEvent::ShootDown),
            "SHOOT_UP" => Some(ControlEvent::ShootUp),
            _ => None,
        }
    }

    /// Remote protocol spelling.
    pub fn as_wire(&self) -> &'static str {
        match self {
            ControlEvent::RightDown => "RIGHT_DOWN",
            ControlEvent::RightUp => "RIGHT_UP",
            ControlEvent::LeftDown => "LEFT_DOWN",
            ControlEvent::LeftUp => "LEFT_UP",
            ControlEvent::ShootDown => "SHOOT_DOWN",
            ControlEvent::ShootUp => "SHOOT_UP",
        }
    }
}
