//! Integration tests for the countdown step scheduler.
//!
//! All tests run on a paused tokio clock, so timers fire as soon as the
//! runtime is idle and the tick sequence is deterministic.

use anyhow::anyhow;
use fundamentals::lessons::loops::countdown_line;
use fundamentals::scheduler::{Handle, SchedulePhase, SchedulerError, StepScheduler, Tick};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tokio::time::Instant;

// ─── Helpers ─────────────────────────────────────────────────────────────────

type Ticks = Rc<RefCell<Vec<(i64, bool)>>>;

/// Callback that records every tick it sees
fn recording() -> (Ticks, impl FnMut(Tick) -> anyhow::Result<()> + 'static) {
    let ticks: Ticks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&ticks);
    let on_tick = move |tick: Tick| {
        sink.borrow_mut().push((tick.value, tick.is_terminal));
        Ok(())
    };
    (ticks, on_tick)
}

fn expected_sequence(initial: i64) -> Vec<(i64, bool)> {
    (0..=initial).rev().map(|v| (v, v == 0)).collect()
}

// ─── Tick sequences ──────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_countdown_from_three() {
    let scheduler = StepScheduler::new();
    let (ticks, on_tick) = recording();

    let handle = scheduler.start(3, 500, on_tick).unwrap();
    scheduler.run_until_idle().await.unwrap();

    assert_eq!(
        *ticks.borrow(),
        vec![(3, false), (2, false), (1, false), (0, true)]
    );
    assert_eq!(handle.phase(), SchedulePhase::Terminal);
    assert!(!handle.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_every_initial_delivers_initial_plus_one_ticks() {
    for initial in 0..=8 {
        let scheduler = StepScheduler::new();
        let (ticks, on_tick) = recording();

        scheduler.start(initial, 20, on_tick).unwrap();
        scheduler.run_until_idle().await.unwrap();

        let seen = ticks.borrow();
        assert_eq!(*seen, expected_sequence(initial), "initial = {initial}");
        assert_eq!(seen.iter().filter(|(_, terminal)| *terminal).count(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn test_zero_initial_is_single_terminal_tick() {
    let scheduler = StepScheduler::new();
    let (ticks, on_tick) = recording();

    let handle = scheduler.start(0, 500, on_tick).unwrap();
    scheduler.run_until_idle().await.unwrap();

    assert_eq!(*ticks.borrow(), vec![(0, true)]);
    assert_eq!(handle.phase(), SchedulePhase::Terminal);
}

#[tokio::test(start_paused = true)]
async fn test_negative_initial_delivers_nothing() {
    let scheduler = StepScheduler::new();
    let (ticks, on_tick) = recording();

    let handle = scheduler.start(-2, 500, on_tick).unwrap();
    scheduler.run_until_idle().await.unwrap();

    assert!(ticks.borrow().is_empty());
    assert_eq!(handle.phase(), SchedulePhase::Terminal);
    handle.cancel();
    assert_eq!(handle.phase(), SchedulePhase::Terminal);
}

#[tokio::test(start_paused = true)]
async fn test_no_ticks_after_terminal() {
    let scheduler = StepScheduler::new();
    let (ticks, on_tick) = recording();

    scheduler.start(2, 100, on_tick).unwrap();
    scheduler.run_until_idle().await.unwrap();
    scheduler
        .run_until(tokio::time::sleep(Duration::from_secs(10)))
        .await;

    assert_eq!(*ticks.borrow(), expected_sequence(2));
}

#[tokio::test(start_paused = true)]
async fn test_ticks_are_spaced_by_delay() {
    let scheduler = StepScheduler::new();
    let times = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&times);

    scheduler
        .start(3, 500, move |_| {
            sink.borrow_mut().push(Instant::now());
            Ok(())
        })
        .unwrap();
    scheduler.run_until_idle().await.unwrap();

    let times = times.borrow();
    assert_eq!(times.len(), 4);
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::from_millis(500));
    }
}

// ─── Invalid input ───────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_zero_delay_is_rejected() {
    let scheduler = StepScheduler::new();
    let (ticks, on_tick) = recording();

    let err = scheduler.start(5, 0, on_tick).unwrap_err();

    assert!(matches!(err, SchedulerError::InvalidDelay(0)));
    assert!(ticks.borrow().is_empty());
    assert_eq!(scheduler.scheduled_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_negative_delay_is_rejected() {
    let scheduler = StepScheduler::new();
    let err = scheduler.start(5, -500, |_| Ok(())).unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidDelay(-500)));
}

// ─── Cancellation ────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_cancel_midway_stops_ticks() {
    let scheduler = StepScheduler::new();
    let (ticks, on_tick) = recording();

    let handle = scheduler.start(5, 500, on_tick).unwrap();
    scheduler
        .run_until(tokio::time::sleep(Duration::from_millis(1100)))
        .await;
    assert_eq!(*ticks.borrow(), vec![(5, false), (4, false), (3, false)]);

    scheduler.cancel(&handle);
    assert_eq!(handle.phase(), SchedulePhase::Cancelled);
    assert_eq!(handle.snapshot().remaining(), 3);

    scheduler.run_until_idle().await.unwrap();
    scheduler
        .run_until(tokio::time::sleep(Duration::from_secs(5)))
        .await;
    assert_eq!(ticks.borrow().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_any_delay_elapses() {
    let scheduler = StepScheduler::new();
    let (ticks, on_tick) = recording();

    let handle = scheduler.start(4, 500, on_tick).unwrap();
    handle.cancel();
    scheduler.run_until_idle().await.unwrap();

    assert_eq!(*ticks.borrow(), vec![(4, false)]);
    assert_eq!(handle.phase(), SchedulePhase::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_is_idempotent() {
    let scheduler = StepScheduler::new();
    let handle = scheduler.start(3, 100, |_| Ok(())).unwrap();

    handle.cancel();
    handle.cancel();
    scheduler.cancel(&handle);

    assert_eq!(handle.phase(), SchedulePhase::Cancelled);
    scheduler.run_until_idle().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_cancel_after_terminal_is_noop() {
    let scheduler = StepScheduler::new();
    let handle = scheduler.start(1, 100, |_| Ok(())).unwrap();
    scheduler.run_until_idle().await.unwrap();

    handle.cancel();

    assert_eq!(handle.phase(), SchedulePhase::Terminal);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_through_cloned_handle() {
    let scheduler = StepScheduler::new();
    let (ticks, on_tick) = recording();

    let handle = scheduler.start(3, 100, on_tick).unwrap();
    let clone = handle.clone();
    clone.cancel();
    scheduler.run_until_idle().await.unwrap();

    assert_eq!(handle.phase(), SchedulePhase::Cancelled);
    assert_eq!(ticks.borrow().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_callback_can_cancel_its_own_countdown() {
    let scheduler = StepScheduler::new();
    let (ticks, mut record) = recording();
    let own_handle: Rc<RefCell<Option<Handle>>> = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&own_handle);

    let handle = scheduler
        .start(5, 100, move |tick| {
            record(tick)?;
            if tick.value == 3 {
                if let Some(handle) = slot.borrow().as_ref() {
                    handle.cancel();
                }
            }
            Ok(())
        })
        .unwrap();
    *own_handle.borrow_mut() = Some(handle.clone());

    scheduler.run_until_idle().await.unwrap();

    assert_eq!(*ticks.borrow(), vec![(5, false), (4, false), (3, false)]);
    assert_eq!(handle.phase(), SchedulePhase::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_inside_terminal_callback_is_noop() {
    let scheduler = StepScheduler::new();
    let own_handle: Rc<RefCell<Option<Handle>>> = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&own_handle);

    let handle = scheduler
        .start(1, 100, move |tick| {
            if tick.is_terminal {
                if let Some(handle) = slot.borrow().as_ref() {
                    handle.cancel();
                }
            }
            Ok(())
        })
        .unwrap();
    *own_handle.borrow_mut() = Some(handle.clone());

    scheduler.run_until_idle().await.unwrap();

    assert_eq!(handle.phase(), SchedulePhase::Terminal);
}

// ─── Callback failures ───────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_callback_failure_abandons_countdown() {
    let scheduler = StepScheduler::new();
    let (ticks, mut record) = recording();

    let handle = scheduler
        .start(4, 100, move |tick| {
            record(tick)?;
            if tick.value == 2 {
                return Err(anyhow!("display detached"));
            }
            Ok(())
        })
        .unwrap();

    let err = scheduler.run_until_idle().await.unwrap_err();

    match err {
        SchedulerError::CallbackFailure {
            handle_id,
            value,
            source,
        } => {
            assert_eq!(handle_id, handle.id());
            assert_eq!(value, 2);
            assert_eq!(source.to_string(), "display detached");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(*ticks.borrow(), vec![(4, false), (3, false), (2, false)]);
    assert_eq!(handle.phase(), SchedulePhase::Cancelled);

    scheduler
        .run_until(tokio::time::sleep(Duration::from_secs(5)))
        .await;
    assert_eq!(ticks.borrow().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_failure_does_not_affect_other_countdowns() {
    let scheduler = StepScheduler::new();
    let (ticks, on_tick) = recording();

    scheduler
        .start(3, 100, |tick| {
            if tick.value == 1 {
                Err(anyhow!("broken"))
            } else {
                Ok(())
            }
        })
        .unwrap();
    scheduler.start(3, 150, on_tick).unwrap();

    let err = scheduler.run_until_idle().await.unwrap_err();

    assert_eq!(err.failed_value(), Some(1));
    assert_eq!(*ticks.borrow(), expected_sequence(3));
}

#[tokio::test(start_paused = true)]
#[should_panic(expected = "tick exploded")]
async fn test_callback_panic_is_not_swallowed() {
    let scheduler = StepScheduler::new();
    scheduler
        .start(2, 100, |tick| {
            if tick.value == 1 {
                panic!("tick exploded");
            }
            Ok(())
        })
        .unwrap();

    let _ = scheduler.run_until_idle().await;
}

#[test]
fn test_callback_panic_abandons_countdown() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();
    let scheduler = StepScheduler::new();
    let handle = runtime.block_on(async {
        scheduler
            .start(3, 100, |tick| {
                if tick.value == 2 {
                    panic!("tick exploded");
                }
                Ok(())
            })
            .unwrap()
    });

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = runtime.enter();
        runtime.block_on(scheduler.run_until(tokio::time::sleep(Duration::from_secs(5))))
    }));

    assert!(outcome.is_err());
    assert_eq!(handle.phase(), SchedulePhase::Cancelled);
    assert!(!handle.is_running());
    assert_eq!(handle.snapshot().remaining(), 2);
    assert_eq!(scheduler.scheduled_count(), 0);
}

// ─── Multiple countdowns ─────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_concurrent_countdowns_each_stay_ordered() {
    let scheduler = StepScheduler::new();
    let (fast, fast_tick) = recording();
    let (slow, slow_tick) = recording();

    let a = scheduler.start(4, 100, fast_tick).unwrap();
    let b = scheduler.start(2, 350, slow_tick).unwrap();
    assert_ne!(a.id(), b.id());

    scheduler.run_until_idle().await.unwrap();

    assert_eq!(*fast.borrow(), expected_sequence(4));
    assert_eq!(*slow.borrow(), expected_sequence(2));
}

#[tokio::test(start_paused = true)]
async fn test_callback_can_start_follow_up_countdown() {
    let scheduler = Rc::new(StepScheduler::new());
    let (follow_up, follow_up_tick) = recording();
    let follow_up_tick = Rc::new(RefCell::new(Some(follow_up_tick)));
    let weak: Weak<StepScheduler> = Rc::downgrade(&scheduler);

    scheduler
        .start(1, 100, move |tick| {
            if tick.is_terminal {
                let scheduler = weak.upgrade().ok_or_else(|| anyhow!("scheduler gone"))?;
                if let Some(on_tick) = follow_up_tick.borrow_mut().take() {
                    scheduler.start(2, 100, on_tick)?;
                }
            }
            Ok(())
        })
        .unwrap();

    scheduler.run_until_idle().await.unwrap();

    assert_eq!(*follow_up.borrow(), expected_sequence(2));
}

#[tokio::test(start_paused = true)]
async fn test_run_until_releases_finished_countdowns() {
    let scheduler = StepScheduler::new();

    for _ in 0..100 {
        let handle = scheduler.start(1, 10, |_| Ok(())).unwrap();
        scheduler
            .run_until(tokio::time::sleep(Duration::from_millis(50)))
            .await;
        assert_eq!(handle.phase(), SchedulePhase::Terminal);
    }

    assert_eq!(scheduler.scheduled_count(), 0);
    assert!(scheduler.take_failures().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_run_until_surfaces_failures() {
    let scheduler = StepScheduler::new();
    let (ticks, on_tick) = recording();
    scheduler.start(2, 10, on_tick).unwrap();
    scheduler
        .start(2, 10, |tick| {
            if tick.value == 1 {
                Err(anyhow!("screen unplugged"))
            } else {
                Ok(())
            }
        })
        .unwrap();

    scheduler
        .run_until(tokio::time::sleep(Duration::from_millis(100)))
        .await;

    assert_eq!(*ticks.borrow(), expected_sequence(2));
    let failures = scheduler.take_failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].is_callback_failure());
    assert_eq!(failures[0].failed_value(), Some(1));
}

// ─── Rendering ───────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_rendered_countdown_lines() {
    let scheduler = StepScheduler::new();
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);

    scheduler
        .start(2, 500, move |tick| {
            sink.borrow_mut().push(countdown_line(tick));
            Ok(())
        })
        .unwrap();
    scheduler.run_until_idle().await.unwrap();

    assert_eq!(
        *lines.borrow(),
        vec!["Counting down: 2", "Counting down: 1", "🚀 BLAST OFF!"]
    );
}
