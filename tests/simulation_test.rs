//! Long-running simulation properties under scripted input from both players.

use tui_shooter::core::{Command, Game, GameConfig, SimpleRng};
use tui_shooter::types::{ControlEvent, PlayerId, HIT_SCORE};

const EPS: f64 = 1e-9;

fn random_event(rng: &mut SimpleRng) -> ControlEvent {
    ControlEvent::ALL[rng.next_range(ControlEvent::ALL.len() as u32) as usize]
}

fn check_invariants(game: &Game) {
    let (w, h) = (game.width(), game.height());

    assert_eq!(game.targets().len(), game.target_count());

    for t in game.targets() {
        assert!(t.x - t.radius >= -EPS && t.x + t.radius <= w + EPS, "{t:?}");
        assert!(t.y - t.radius >= -EPS && t.y + t.radius <= h + EPS, "{t:?}");
    }

    for b in game.bullets() {
        assert!((0.0..=w).contains(&b.x) && (0.0..=h).contains(&b.y), "{b:?}");
    }

    for player in PlayerId::ALL {
        let ship = game.ship(player);
        assert!((0.0..360.0).contains(&ship.heading_deg()));
        assert_eq!(game.score(player) % HIT_SCORE, 0);
    }

    for e in game.explosions() {
        assert!(e.age < e.duration);
    }
}

#[test]
fn random_play_keeps_world_consistent() {
    let mut game = Game::new(GameConfig::default().with_seed(2024));
    let mut script = SimpleRng::new(99);

    let p1_pos = (game.ship(PlayerId::One).x(), game.ship(PlayerId::One).y());
    let p2_pos = (game.ship(PlayerId::Two).x(), game.ship(PlayerId::Two).y());
    let mut last_scores = [0u32; 2];

    for _ in 0..5_000 {
        let mut queued = Vec::new();
        if script.next_range(4) == 0 {
            queued.push(Command::control(PlayerId::One, random_event(&mut script)));
        }
        if script.next_range(4) == 0 {
            game.apply(PlayerId::Two, random_event(&mut script));
        }

        // Mostly frame-sized steps with the occasional stall.
        let dt = if script.next_range(100) == 0 {
            0.5
        } else {
            0.016
        };
        game.step(dt, queued);
        check_invariants(&game);

        for player in PlayerId::ALL {
            let score = game.score(player);
            assert!(score >= last_scores[player.index()]);
            last_scores[player.index()] = score;
        }
    }

    // Ships never move.
    assert_eq!(
        (game.ship(PlayerId::One).x(), game.ship(PlayerId::One).y()),
        p1_pos
    );
    assert_eq!(
        (game.ship(PlayerId::Two).x(), game.ship(PlayerId::Two).y()),
        p2_pos
    );
}

#[test]
fn identical_inputs_replay_identically() {
    fn play(seed: u32) -> (Vec<(f64, f64)>, [u32; 2], usize) {
        let mut game = Game::with_seed(seed);
        game.step(
            0.016,
            [
                Command::control(PlayerId::One, ControlEvent::ShootDown),
                Command::control(PlayerId::One, ControlEvent::RightDown),
            ],
        );
        game.apply(PlayerId::Two, ControlEvent::ShootDown);
        game.apply(PlayerId::Two, ControlEvent::LeftDown);
        for _ in 0..2_000 {
            game.tick(0.016);
        }
        let targets = game.targets().iter().map(|t| (t.x, t.y)).collect();
        (
            targets,
            [game.score(PlayerId::One), game.score(PlayerId::Two)],
            game.bullets().len(),
        )
    }

    assert_eq!(play(7), play(7));
    assert_ne!(play(7).0, play(8).0);
}

#[test]
fn sustained_fire_eventually_scores() {
    let mut game = Game::with_seed(5);
    game.apply(PlayerId::One, ControlEvent::ShootDown);
    game.apply(PlayerId::One, ControlEvent::RightDown);
    game.apply(PlayerId::Two, ControlEvent::ShootDown);
    game.apply(PlayerId::Two, ControlEvent::LeftDown);

    // Two ships sweeping the whole circle with autofire for a minute of game time.
    for _ in 0..3_750 {
        game.tick(0.016);
    }

    let total = game.score(PlayerId::One) + game.score(PlayerId::Two);
    assert!(total >= HIT_SCORE, "no hits in a minute of sweeping fire");
    assert_eq!(game.targets().len(), game.target_count());
}
