//! Drawing a live game through the terminal canvas.

use tui_shooter::core::{Game, Surface};
use tui_shooter::term::{Canvas, FrameBuffer, Rgb};
use tui_shooter::types::{Action, PlayerId};

fn draw(game: &Game, cols: u16, rows: u16) -> (Canvas, FrameBuffer) {
    let mut canvas = Canvas::new(game.width(), game.height());
    canvas.resize(cols, rows);
    canvas.begin_frame();
    game.render_at(&mut canvas, 0.0);
    let mut fb = FrameBuffer::new(cols, rows);
    canvas.compose_into(&mut fb);
    (canvas, fb)
}

#[test]
fn score_labels_are_visible() {
    let game = Game::with_seed(11);
    let (_, fb) = draw(&game, 80, 30);

    let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.iter().any(|row| row.contains("P1 (Remote) Score: 0")));
    assert!(text.iter().any(|row| row.contains("P2 (Keyboard) Score: 0")));
}

#[test]
fn ships_are_drawn_in_player_colors() {
    let game = Game::with_seed(11);
    let (canvas, _) = draw(&game, 80, 30);

    // 0.1 px per unit: P1 at (400, 300), P2 at (400, 520); sample just below each center.
    assert_eq!(canvas.pixel(40, 31), Some(Rgb::new(0, 255, 255)));
    assert_eq!(canvas.pixel(40, 53), Some(Rgb::new(0, 255, 0)));
}

#[test]
fn bullets_show_up_in_owner_color() {
    let mut game = Game::with_seed(11);
    game.press(PlayerId::Two, Action::Shoot);
    let (canvas, _) = draw(&game, 80, 30);

    // P2 nose sits at (400, 480) -> pixel (40, 48).
    let orange = Rgb::new(255, 165, 0);
    let near_nose = [(39, 47), (40, 47), (39, 48), (40, 48)];
    assert!(near_nose
        .iter()
        .any(|&(x, y)| canvas.pixel(x, y) == Some(orange)));
}

#[test]
fn redraw_starts_from_a_clean_canvas() {
    let game = Game::with_seed(11);
    let mut canvas = Canvas::new(game.width(), game.height());
    canvas.resize(80, 30);

    canvas.begin_frame();
    canvas.fill_rect(0.0, 0.0, 800.0, 600.0, tui_shooter::core::Color::WHITE);
    canvas.begin_frame();
    game.render_at(&mut canvas, 0.0);

    assert_ne!(canvas.pixel(0, 59), Some(Rgb::new(255, 255, 255)));
}
