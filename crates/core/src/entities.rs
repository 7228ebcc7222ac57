//! Entity definitions: ships, bullets, targets, explosions, stars.
//!
//! Every entity is a plain value owned by [`Game`](crate::Game). Per-entity motion
//! lives here; ordering across entities (and anything that spawns or destroys
//! them) lives in the game state.

use crate::types::{
    Action, PlayerId, BULLET_RADIUS, BULLET_SPEED, EXPLOSION_DURATION_SECS, EXPLOSION_MAX_RADIUS,
    ROTATION_SPEED_DEG,
};

/// Seconds needed for one full turn; rotation is periodic in this interval.
const FULL_TURN_SECS: f64 = 360.0 / ROTATION_SPEED_DEG;

/// Wrap a heading into [0, 360).
///
/// `rem_euclid` can round up to exactly 360 for tiny negative inputs, so that
/// case is folded back to 0.
pub fn normalize_heading(deg: f64) -> f64 {
    let h = deg.rem_euclid(360.0);
    if h >= 360.0 || !h.is_finite() {
        0.0
    } else {
        h
    }
}

/// Unit direction for a heading (0° = up, clockwise positive, y grows downward).
pub fn heading_direction(deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (rad.sin(), -rad.cos())
}

/// Player ship.
///
/// Control flags are private: only the transition methods used by the game's
/// input entry points change them.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    x: f64,
    y: f64,
    heading_deg: f64,
    size: f64,
    rotating_right: bool,
    rotating_left: bool,
    shooting: bool,
    shoot_cooldown: f64,
}

impl Ship {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self {
            x,
            y,
            heading_deg: 0.0,
            size,
            rotating_right: false,
            rotating_left: false,
            shooting: false,
            shoot_cooldown: 0.0,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn heading_deg(&self) -> f64 {
        self.heading_deg
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn rotating_right(&self) -> bool {
        self.rotating_right
    }

    pub fn rotating_left(&self) -> bool {
        self.rotating_left
    }

    pub fn shooting(&self) -> bool {
        self.shooting
    }

    pub fn shoot_cooldown(&self) -> f64 {
        self.shoot_cooldown
    }

    /// Unit vector the nose points along.
    pub fn direction(&self) -> (f64, f64) {
        heading_direction(self.heading_deg)
    }

    /// Muzzle point: `size` units from the center along the heading.
    pub fn nose(&self) -> (f64, f64) {
        let (dx, dy) = self.direction();
        (self.x + dx * self.size, self.y + dy * self.size)
    }

    pub(crate) fn set_held(&mut self, action: Action, held: bool) {
        match action {
            Action::Right => self.rotating_right = held,
            Action::Left => self.rotating_left = held,
            Action::Shoot => self.shooting = held,
        }
    }

    pub(crate) fn set_cooldown(&mut self, secs: f64) {
        self.shoot_cooldown = secs;
    }

    /// Rotate for `dt` seconds according to the held flags.
    pub(crate) fn rotate(&mut self, dt: f64) {
        let sign = match (self.rotating_right, self.rotating_left) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        // Reduce dt modulo a full turn first so a huge dt cannot overflow.
        let turn = ROTATION_SPEED_DEG * (dt % FULL_TURN_SECS);
        self.heading_deg = normalize_heading(self.heading_deg + sign * turn);
    }

    /// Count the cooldown down; returns true when a shot is due.
    pub(crate) fn cool_down(&mut self, dt: f64) -> bool {
        if !self.shooting {
            return false;
        }
        self.shoot_cooldown -= dt;
        self.shoot_cooldown <= 0.0
    }

    #[cfg(test)]
    pub(crate) fn set_heading(&mut self, deg: f64) {
        self.heading_deg = normalize_heading(deg);
    }
}

/// Projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub speed: f64,
    pub radius: f64,
    pub owner: PlayerId,
}

impl Bullet {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64, owner: PlayerId) -> Self {
        Self {
            x,
            y,
            dx,
            dy,
            speed: BULLET_SPEED,
            radius: BULLET_RADIUS,
            owner,
        }
    }

    pub(crate) fn advance(&mut self, dt: f64) {
        self.x += self.dx * self.speed * dt;
        self.y += self.dy * self.speed * dt;
    }

    /// Inside the closed playfield rectangle.
    pub fn in_bounds(&self, width: f64, height: f64) -> bool {
        (0.0..=width).contains(&self.x) && (0.0..=height).contains(&self.y)
    }

    /// Circle overlap test, boundary inclusive.
    pub fn overlaps(&self, target: &Target) -> bool {
        let dx = self.x - target.x;
        let dy = self.y - target.y;
        let reach = self.radius + target.radius;
        dx * dx + dy * dy <= reach * reach
    }
}

/// Bouncing destructible circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

impl Target {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            radius,
        }
    }

    /// Move and reflect off the walls, each axis independently.
    pub(crate) fn advance(&mut self, dt: f64, width: f64, height: f64) {
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        reflect_axis(&mut self.x, &mut self.vx, self.radius, width);
        reflect_axis(&mut self.y, &mut self.vy, self.radius, height);
    }
}

fn reflect_axis(pos: &mut f64, vel: &mut f64, radius: f64, bound: f64) {
    if *pos - radius < 0.0 {
        *pos = radius;
        *vel = -*vel;
    } else if *pos + radius > bound {
        *pos = bound - radius;
        *vel = -*vel;
    }
}

/// Cosmetic hit effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub x: f64,
    pub y: f64,
    pub age: f64,
    pub duration: f64,
    pub max_radius: f64,
}

impl Explosion {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            age: 0.0,
            duration: EXPLOSION_DURATION_SECS,
            max_radius: EXPLOSION_MAX_RADIUS,
        }
    }

    pub(crate) fn advance(&mut self, dt: f64) {
        self.age += dt;
    }

    pub fn is_done(&self) -> bool {
        self.age >= self.duration
    }

    /// Normalized age in [0, 1].
    pub fn progress(&self) -> f64 {
        (self.age / self.duration).clamp(0.0, 1.0)
    }

    pub fn radius(&self) -> f64 {
        self.max_radius * self.progress()
    }

    pub fn alpha(&self) -> f64 {
        1.0 - self.progress()
    }
}

/// Background star; immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub base_brightness: f64,
    pub phase: f64,
}

impl Star {
    /// Twinkling brightness at wall-clock time `t` (seconds), clamped to [0, 1].
    pub fn brightness_at(&self, t: f64) -> f64 {
        let twinkle = 0.4 + 0.6 * (t * 2.0 + self.phase).sin();
        (self.base_brightness * twinkle).clamp(0.0, 1.0)
    }
}
