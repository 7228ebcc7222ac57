use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crossterm::event::KeyCode;

use tui_shooter::core::Game;
use tui_shooter::input::InputHandler;
use tui_shooter::term::{Canvas, FrameBuffer};
use tui_shooter::types::{ControlEvent, PlayerId};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

// The counter is process-global, so every gated path runs inside one test.
#[test]
fn frame_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut game = Game::with_seed(1);
    for player in PlayerId::ALL {
        game.apply(player, ControlEvent::ShootDown);
        game.apply(player, ControlEvent::RightDown);
    }
    let mut input = InputHandler::new();
    let mut canvas = Canvas::new(game.width(), game.height());
    canvas.resize(120, 40);
    let mut fb = FrameBuffer::new(120, 41);

    // Warm-up: several full turns of autofire so bullet storage has peaked.
    for _ in 0..1_500 {
        game.tick(0.016);
    }
    canvas.begin_frame();
    game.render_at(&mut canvas, 0.0);
    canvas.compose_into(&mut fb);

    let allocs = with_alloc_counting(|| {
        for i in 0..300 {
            game.tick(0.016);

            let _ = input.handle_key_press(KeyCode::Left);
            let _ = input.update(16);
            let _ = input.handle_key_release(KeyCode::Left);

            canvas.begin_frame();
            game.render_at(&mut canvas, i as f64 * 0.016);
            canvas.compose_into(&mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
