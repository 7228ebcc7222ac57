//! Render boundary: draws the current game state onto an abstract 2D surface.
//!
//! The core never rasterizes anything itself. A front-end implements [`Surface`]
//! (the terminal canvas in `tui-shooter-term`, a recording surface in tests) and
//! calls [`Game::render`] once per frame. Rendering only reads game state.

use std::fmt::Write as _;

use arrayvec::ArrayString;

use crate::entities::Ship;
use crate::game_state::Game;
use crate::types::PlayerId;

/// RGBA color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const LIME: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const ORANGE: Color = Color::rgb(1.0, 0.647, 0.0);
    pub const DEEP_SKY_BLUE: Color = Color::rgb(0.0, 0.749, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// 2D affine transform (row-major `[a c e; b d f]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Translate in the current (local) coordinate space.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            e: self.a * dx + self.c * dy + self.e,
            f: self.b * dx + self.d * dy + self.f,
            ..self
        }
    }

    /// Rotate the local space clockwise on screen (y grows downward).
    pub fn rotate_deg(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: self.a * cos + self.c * sin,
            b: self.b * cos + self.d * sin,
            c: -self.a * sin + self.c * cos,
            d: -self.b * sin + self.d * cos,
            e: self.e,
            f: self.f,
        }
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

/// Drawing capability supplied by the front-end.
///
/// Coordinates are playfield units in the surface's current transform.
pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color);
    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color);
    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color);
    /// Draw text with its baseline-left corner at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color);

    /// Push the current transform.
    fn save(&mut self);
    /// Pop back to the last saved transform.
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    /// Rotate clockwise by `degrees`.
    fn rotate(&mut self, degrees: f64);
}

pub const PLAYER_ONE_COLOR: Color = Color::CYAN;
pub const PLAYER_TWO_COLOR: Color = Color::LIME;

pub fn bullet_color(owner: PlayerId) -> Color {
    match owner {
        PlayerId::One => Color::YELLOW,
        PlayerId::Two => Color::ORANGE,
    }
}

/// Seconds since the Unix epoch, used to drive the star twinkle.
pub fn wall_clock_secs() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

impl Game {
    /// Draw the current frame using the wall clock for the twinkle phase.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.render_at(surface, wall_clock_secs());
    }

    /// Draw the current frame at an explicit time (seconds).
    ///
    /// Back to front: background, stars, targets, explosions, ships, bullets, scores.
    pub fn render_at<S: Surface + ?Sized>(&self, surface: &mut S, time_secs: f64) {
        surface.fill_rect(0.0, 0.0, self.width(), self.height(), Color::BLACK);

        for star in self.stars() {
            let alpha = star.brightness_at(time_secs);
            surface.fill_circle(star.x + 1.0, star.y + 1.0, 1.0, Color::WHITE.with_alpha(alpha));
        }

        for target in self.targets() {
            surface.fill_circle(target.x, target.y, target.radius, Color::DEEP_SKY_BLUE);
        }

        for explosion in self.explosions() {
            let radius = explosion.radius();
            let alpha = explosion.alpha();
            surface.fill_circle(
                explosion.x,
                explosion.y,
                radius,
                Color::rgba(1.0, 0.5, 0.0, alpha),
            );
            surface.stroke_circle(
                explosion.x,
                explosion.y,
                radius * 1.2,
                Color::rgba(1.0, 1.0, 0.0, alpha),
            );
        }

        draw_ship(surface, self.ship(PlayerId::One), PLAYER_ONE_COLOR);
        draw_ship(surface, self.ship(PlayerId::Two), PLAYER_TWO_COLOR);

        for bullet in self.bullets() {
            surface.fill_circle(bullet.x, bullet.y, bullet.radius, bullet_color(bullet.owner));
        }

        // Fits the longest label with a full u32 score.
        let mut label = ArrayString::<32>::new();
        let _ = write!(label, "P1 (Remote) Score: {}", self.score(PlayerId::One));
        surface.fill_text(&label, 10.0, 20.0, Color::WHITE);
        label.clear();
        let _ = write!(label, "P2 (Keyboard) Score: {}", self.score(PlayerId::Two));
        surface.fill_text(&label, 10.0, 40.0, Color::WHITE);
    }
}

/// Ship triangle in local space: nose up, base below the center.
pub fn ship_outline(size: f64) -> [(f64, f64); 3] {
    let half_base = size * 0.5;
    [(0.0, -size), (-half_base, size * 0.5), (half_base, size * 0.5)]
}

fn draw_ship<S: Surface + ?Sized>(surface: &mut S, ship: &Ship, color: Color) {
    surface.save();
    surface.translate(ship.x(), ship.y());
    surface.rotate(ship.heading_deg());
    surface.fill_polygon(&ship_outline(ship.size()), color);
    surface.restore();
}
