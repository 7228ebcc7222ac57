//! Game state module - owns every entity and advances the simulation
//!
//! This module ties together ships, bullets, targets, explosions, stars, scores
//! and the session RNG. It handles input transitions, the per-frame tick, and
//! collision resolution.

use crate::command::Command;
use crate::config::{GameConfig, MIN_PLAYFIELD_EXTENT};
use crate::entities::{Bullet, Explosion, Ship, Star, Target};
use crate::rng::SimpleRng;
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    width: f64,
    height: f64,
    target_count: usize,
    ships: [Ship; 2],
    bullets: Vec<Bullet>,
    targets: Vec<Target>,
    explosions: Vec<Explosion>,
    stars: Vec<Star>,
    scores: [u32; 2],
    rng: SimpleRng,
    /// Number of ticks run so far.
    ticks: u64,
}

// Steady-state autofire from both ships stays well under these.
const BULLET_CAPACITY_HINT: usize = 64;
const EXPLOSION_CAPACITY_HINT: usize = 16;

impl Game {
    /// Create a new session: two ships, the initial targets, and the star field.
    pub fn new(config: GameConfig) -> Self {
        let GameConfig {
            width,
            height,
            seed,
            target_count,
            star_count,
        } = config;
        let width = width.max(MIN_PLAYFIELD_EXTENT);
        let height = height.max(MIN_PLAYFIELD_EXTENT);

        let player_one = Ship::new(width / 2.0, height / 2.0, SHIP_SIZE);
        let player_two = Ship::new(width / 2.0, height - PLAYER_TWO_BOTTOM_OFFSET, SHIP_SIZE);

        let mut game = Self {
            width,
            height,
            target_count,
            ships: [player_one, player_two],
            bullets: Vec::with_capacity(BULLET_CAPACITY_HINT),
            targets: Vec::with_capacity(target_count),
            explosions: Vec::with_capacity(EXPLOSION_CAPACITY_HINT),
            stars: Vec::with_capacity(star_count),
            scores: [0; 2],
            rng: SimpleRng::new(seed),
            ticks: 0,
        };

        for _ in 0..target_count {
            game.spawn_target();
        }
        game.init_stars(star_count);
        game
    }

    /// Default-sized session with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(GameConfig::default().with_seed(seed))
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn ship(&self, player: PlayerId) -> &Ship {
        &self.ships[player.index()]
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player.index()]
    }

    /// Size of the target population, fixed for the whole session.
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Hold a control down.
    ///
    /// Idempotent for the flag; pressing Shoot additionally fires one bullet
    /// right away and restarts the reload interval.
    pub fn press(&mut self, player: PlayerId, action: Action) {
        let ship = &mut self.ships[player.index()];
        ship.set_held(action, true);
        if action == Action::Shoot {
            ship.set_cooldown(SHOOT_INTERVAL_SECS);
            self.fire(player);
        }
    }

    /// Release a control. Idempotent.
    pub fn release(&mut self, player: PlayerId, action: Action) {
        self.ships[player.index()].set_held(action, false);
    }

    /// Apply a named transition.
    pub fn apply(&mut self, player: PlayerId, event: ControlEvent) {
        if event.is_down() {
            self.press(player, event.action());
        } else {
            self.release(player, event.action());
        }
    }

    /// Release every control of a ship.
    pub fn release_all(&mut self, player: PlayerId) {
        for action in [Action::Right, Action::Left, Action::Shoot] {
            self.release(player, action);
        }
    }

    pub fn apply_command(&mut self, command: Command) {
        match command {
            Command::Control { player, event } => self.apply(player, event),
            Command::ReleaseAll { player } => self.release_all(player),
        }
    }

    /// Apply queued commands in order, then advance one tick.
    pub fn step<I>(&mut self, dt: f64, commands: I)
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.apply_command(command);
        }
        self.tick(dt);
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Order: ships, bullets, targets, explosions, collisions. Negative or
    /// non-finite `dt` is treated as zero; large values are not clamped.
    pub fn tick(&mut self, dt: f64) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        for player in PlayerId::ALL {
            self.update_ship(player, dt);
        }

        let (w, h) = (self.width, self.height);
        self.bullets.retain_mut(|b| {
            b.advance(dt);
            b.in_bounds(w, h)
        });

        for target in &mut self.targets {
            target.advance(dt, w, h);
        }

        self.explosions.retain_mut(|e| {
            e.advance(dt);
            !e.is_done()
        });

        self.resolve_collisions();

        self.ticks = self.ticks.wrapping_add(1);
    }

    fn update_ship(&mut self, player: PlayerId, dt: f64) {
        let ship = &mut self.ships[player.index()];
        ship.rotate(dt);

        // At most one autofire shot per tick; the reload restarts from the full
        // interval rather than carrying the overshoot.
        if ship.cool_down(dt) {
            ship.set_cooldown(SHOOT_INTERVAL_SECS);
            self.fire(player);
        }
    }

    fn fire(&mut self, player: PlayerId) {
        let ship = &self.ships[player.index()];
        let (dx, dy) = ship.direction();
        let (x, y) = ship.nose();
        self.bullets.push(Bullet::new(x, y, dx, dy, player));
    }

    /// For each bullet, in order, consume the first overlapping target.
    fn resolve_collisions(&mut self) {
        let mut i = 0;
        while i < self.bullets.len() {
            let bullet = self.bullets[i];
            let Some(hit) = self.targets.iter().position(|t| bullet.overlaps(t)) else {
                i += 1;
                continue;
            };

            let target = self.targets.remove(hit);
            self.bullets.remove(i);
            self.explosions.push(Explosion::new(target.x, target.y));
            let score = &mut self.scores[bullet.owner.index()];
            *score = score.saturating_add(HIT_SCORE);
            self.spawn_target();
        }
    }

    fn spawn_target(&mut self) {
        let (w, h) = (self.width, self.height);
        let radius = self.rng.next_in(TARGET_RADIUS_MIN, TARGET_RADIUS_SPAN);
        let x = self.rng.next_in(radius, (w - 2.0 * radius).max(0.0));
        let y = self.rng.next_in(radius, (h - 2.0 * radius).max(0.0));
        let speed = self.rng.next_in(TARGET_SPEED_MIN, TARGET_SPEED_SPAN);
        let angle = self.rng.next_f64() * std::f64::consts::TAU;
        self.targets.push(Target::new(
            x,
            y,
            angle.cos() * speed,
            angle.sin() * speed,
            radius,
        ));
    }

    fn init_stars(&mut self, count: usize) {
        for _ in 0..count {
            let x = self.rng.next_f64() * self.width;
            let y = self.rng.next_f64() * self.height;
            let base_brightness = self.rng.next_in(STAR_BRIGHTNESS_MIN, 1.0 - STAR_BRIGHTNESS_MIN);
            let phase = self.rng.next_f64() * std::f64::consts::TAU;
            self.stars.push(Star {
                x,
                y,
                base_brightness,
                phase,
            });
        }
    }

    #[cfg(test)]
    pub(crate) fn ship_mut(&mut self, player: PlayerId) -> &mut Ship {
        &mut self.ships[player.index()]
    }

    #[cfg(test)]
    pub(crate) fn targets_mut(&mut self) -> &mut Vec<Target> {
        &mut self.targets
    }

    #[cfg(test)]
    pub(crate) fn bullets_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.bullets
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
