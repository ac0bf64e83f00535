use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use blockfall::core::{AutorepeatController, EngineEvent, GameSnapshot, PuzzleEngine, UiSink};
use blockfall::types::{Command, InputKey};

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

/// Counts events without storing them.
struct CountingSink(usize);

impl UiSink for CountingSink {
    fn on_event(&mut self, _event: &EngineEvent) {
        self.0 += 1;
    }
}

#[test]
fn core_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut engine = PuzzleEngine::new(1);
    let mut snap = GameSnapshot::default();
    let mut sink = CountingSink(0);

    // Warm-up.
    engine.frame(16);
    engine.apply(Command::MoveLeft);
    engine.drain_events_into(&mut sink);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            engine.frame(16);
            engine.snapshot_into(&mut snap);
        }

        for _ in 0..50 {
            engine.apply(Command::MoveLeft);
            engine.apply(Command::MoveRight);
            engine.apply(Command::Rotate);
        }

        // Hard drop drives the lock, clear and spawn paths.
        for _ in 0..60 {
            engine.key_down(InputKey::HardDrop);
            engine.key_up(InputKey::HardDrop);
            engine.frame(16);
            engine.drain_events_into(&mut sink);
            engine.snapshot_into(&mut snap);
            if engine.game_over() {
                engine.reset();
                engine.drain_events_into(&mut sink);
            }
        }
    });

    assert_eq!(allocs, 0);
    assert!(sink.0 > 0);

    // Kept in the same test: the counter is process-wide and tests run in parallel.
    let mut controller = AutorepeatController::new().with_key_release_timeout_ms(Some(150));
    controller.press(InputKey::Left);
    controller.press(InputKey::Down);

    let allocs = with_alloc_counting(|| {
        for i in 0..500u32 {
            let _ = controller.update(16);
            if i % 20 == 0 {
                controller.press(InputKey::Right);
                controller.release(InputKey::Left);
            }
        }
    });

    assert_eq!(allocs, 0);
}
