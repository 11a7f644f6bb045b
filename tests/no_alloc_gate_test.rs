use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_sheep::core::{update_clickability, GameSnapshot, GameState};
use tui_sheep::input::Cursor;
use tui_sheep::types::{LevelConfig, Phase, TICK_MS};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
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

// Tests in this file share the global counter; keep everything in one test so
// the harness cannot interleave them.
#[test]
fn engine_hot_paths_are_allocation_free() {
    // Occlusion refresh over a full hard board.
    let game = GameState::new(LevelConfig::HARD, 42);
    let mut tiles = game.board().tiles().to_vec();
    let allocs = with_alloc_counting(|| {
        for _ in 0..50 {
            update_clickability(&mut tiles);
        }
    });
    assert_eq!(allocs, 0, "update_clickability allocated");

    // Idle ticks.
    let mut game = GameState::new(LevelConfig::EASY, 42);
    let allocs = with_alloc_counting(|| {
        for _ in 0..1000 {
            game.tick(TICK_MS);
        }
    });
    assert_eq!(allocs, 0, "idle tick allocated");

    // Snapshot reuse after warm-up.
    let mut snap = GameSnapshot::default();
    game.snapshot_into(&mut snap);
    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            game.snapshot_into(&mut snap);
        }
    });
    assert_eq!(allocs, 0, "snapshot_into allocated");

    // Cursor navigation.
    let mut cursor = Cursor::new();
    let allocs = with_alloc_counting(|| {
        cursor.sync(&snap.tiles);
        for _ in 0..100 {
            cursor.next(&snap.tiles);
            cursor.prev(&snap.tiles);
        }
    });
    assert_eq!(allocs, 0, "cursor allocated");

    // Countdown inside a locked phase.
    let mut game = GameState::new(LevelConfig::EASY, 42);
    let mut guard = 0;
    while !game.is_locked() && game.phase() == Phase::Idle && guard < 64 {
        let id = game
            .board()
            .tiles()
            .iter()
            .rev()
            .find(|t| t.clickable)
            .map(|t| t.id);
        match id {
            Some(id) => {
                game.click_tile(id);
            }
            None => break,
        }
        guard += 1;
    }
    if game.is_locked() {
        let allocs = with_alloc_counting(|| {
            for _ in 0..5 {
                game.tick(1);
            }
        });
        assert_eq!(allocs, 0, "locked tick allocated");
    }
}
