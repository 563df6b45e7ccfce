use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};

use tui_nim::core::{GameSnapshot, GameState, StrategyTable, Timings};
use tui_nim::input::{handle_key_event, BarCursor};
use tui_nim::term::{FrameBuffer, GameView, Viewport};
use tui_nim::types::{MAX_ROWS, TICK_MS};

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

#[test]
fn e2e_frame_loop_is_allocation_free_without_io() {
    let mut gs = GameState::new(&[1, 3, 5, 7], Timings::default(), Some(1)).unwrap();
    gs.provide_table(Arc::new(StrategyTable::empty()));
    // A staged removal whose reveal has finished: greyed bars on screen.
    gs.select_bar(3, 4);
    for _ in 0..64 {
        gs.tick(TICK_MS).unwrap();
    }
    let _ = gs.drain_events().count();

    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut snap = GameSnapshot::default();
    let mut sizes: Vec<u32> = Vec::with_capacity(MAX_ROWS);
    let mut cursor = BarCursor::new();
    let keys = [KeyCode::Right, KeyCode::Down, KeyCode::Left, KeyCode::Up];

    // Warm-up: first snapshot sizes the row buffers.
    gs.snapshot_into(&mut snap);
    snap.sizes_into(&mut sizes);
    view.render_into(&snap, Some((cursor.row, cursor.bar)), viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for i in 0..500 {
            gs.snapshot_into(&mut snap);
            snap.sizes_into(&mut sizes);
            cursor.clamp(&sizes);
            view.render_into(&snap, Some((cursor.row, cursor.bar)), viewport, &mut fb);

            if let Some(action) = handle_key_event(KeyEvent::from(keys[i % keys.len()])) {
                cursor.apply(action, &sizes);
            }

            let _ = gs.tick(TICK_MS).unwrap();
            for _ in gs.drain_events() {}
        }
    });

    assert!(allocs == 0);
    assert_eq!(snap.rows[3].removed, 3);
}
