//! Step scheduler - countdown ticks on a single-threaded event loop.
//!
//! The first tick is delivered synchronously from [`StepScheduler::start`];
//! every later tick runs on the scheduler's `LocalSet` after the configured
//! delay. Tasks only make progress while the caller drives the scheduler
//! with [`StepScheduler::run_until`] or [`StepScheduler::run_until_idle`].

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle, LocalSet};
use tracing::{debug, error, info};

use super::error::SchedulerError;
use super::handle::Handle;
use super::state::{CountdownState, Tick};

type TickTask = JoinHandle<Result<(), SchedulerError>>;
type TickOutcome = Result<Result<(), SchedulerError>, JoinError>;

/// Drives countdowns started through [`start`](Self::start)
pub struct StepScheduler {
    tasks: LocalSet,
    /// Tick tasks that have not been joined yet
    pending: RefCell<Vec<TickTask>>,
    /// Failures joined by `run_until` and not yet handed to the caller
    failures: RefCell<Vec<SchedulerError>>,
    next_id: Cell<u64>,
}

impl StepScheduler {
    pub fn new() -> Self {
        Self {
            tasks: LocalSet::new(),
            pending: RefCell::new(Vec::new()),
            failures: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Start a countdown from `initial` down to zero, one tick per
    /// `delay_ms`.
    ///
    /// `on_tick` runs once synchronously with `initial` before this returns.
    /// A negative `initial` produces no ticks and an already-terminal handle.
    pub fn start<F>(
        &self,
        initial: i64,
        delay_ms: i64,
        mut on_tick: F,
    ) -> Result<Handle, SchedulerError>
    where
        F: FnMut(Tick) -> anyhow::Result<()> + 'static,
    {
        let delay = validate_delay(delay_ms)?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let state = Rc::new(RefCell::new(CountdownState::new(initial, delay)));
        let first = state.borrow_mut().begin();
        let Some(tick) = first else {
            debug!(handle_id = id, initial, "negative countdown, nothing to schedule");
            return Ok(Handle::new(id, state, None));
        };

        info!(handle_id = id, initial, delay_ms, "countdown started");
        deliver(id, &state, &mut on_tick, tick)?;

        if tick.is_terminal {
            info!(handle_id = id, "countdown finished");
            return Ok(Handle::new(id, state, None));
        }

        let task = self
            .tasks
            .spawn_local(drive(id, Rc::clone(&state), on_tick));
        let pending = task.abort_handle();
        self.pending.borrow_mut().push(task);

        Ok(Handle::new(id, state, Some(pending)))
    }

    /// Stop the countdown behind `handle`. Idempotent.
    pub fn cancel(&self, handle: &Handle) {
        handle.cancel();
    }

    /// Number of tick tasks spawned but not yet joined
    pub fn scheduled_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Run the event loop until `future` completes.
    ///
    /// Tick tasks that finished meanwhile are joined before returning: their
    /// failures are kept for [`take_failures`](Self::take_failures) and a
    /// callback panic is resumed here. Must not be called from inside a tick
    /// callback.
    pub async fn run_until<F: Future>(&self, future: F) -> F::Output {
        let output = self.tasks.run_until(future).await;

        let finished = {
            let mut pending = self.pending.borrow_mut();
            let (finished, running): (Vec<_>, Vec<_>) =
                pending.drain(..).partition(JoinHandle::is_finished);
            *pending = running;
            finished
        };
        for task in finished {
            self.record(task.await);
        }

        output
    }

    /// Run the event loop until every countdown has stopped, including
    /// countdowns started from inside callbacks.
    ///
    /// Returns the first callback failure not yet taken, and leaves the rest
    /// for [`take_failures`](Self::take_failures). Every failure is also
    /// logged when it happens. A panic inside a callback is resumed here.
    pub async fn run_until_idle(&self) -> Result<(), SchedulerError> {
        self.tasks
            .run_until(async {
                loop {
                    let batch = std::mem::take(&mut *self.pending.borrow_mut());
                    if batch.is_empty() {
                        break;
                    }
                    for task in batch {
                        self.record(task.await);
                    }
                }
            })
            .await;

        let mut failures = self.failures.borrow_mut();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures.remove(0))
        }
    }

    /// Callback failures from joined tick tasks, oldest first
    pub fn take_failures(&self) -> Vec<SchedulerError> {
        std::mem::take(&mut *self.failures.borrow_mut())
    }

    fn record(&self, outcome: TickOutcome) {
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(err)) => self.failures.borrow_mut().push(err),
            Err(join_err) if join_err.is_panic() => {
                std::panic::resume_unwind(join_err.into_panic());
            }
            // Aborted by cancel
            Err(_) => {}
        }
    }
}

impl Default for StepScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_delay(delay_ms: i64) -> Result<Duration, SchedulerError> {
    u64::try_from(delay_ms)
        .ok()
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .ok_or(SchedulerError::InvalidDelay(delay_ms))
}

/// Invoke the callback for one tick, abandoning the countdown on failure.
fn deliver<F>(
    id: u64,
    state: &RefCell<CountdownState>,
    on_tick: &mut F,
    tick: Tick,
) -> Result<(), SchedulerError>
where
    F: FnMut(Tick) -> anyhow::Result<()>,
{
    debug!(
        handle_id = id,
        value = tick.value,
        terminal = tick.is_terminal,
        "tick"
    );
    let _abandon = AbandonOnPanic { id, state };
    on_tick(tick).map_err(|source| {
        state.borrow_mut().cancel();
        error!(
            handle_id = id,
            value = tick.value,
            error = %format!("{source:#}"),
            "tick callback failed, abandoning countdown"
        );
        SchedulerError::CallbackFailure {
            handle_id: id,
            value: tick.value,
            source,
        }
    })
}

/// Marks the countdown cancelled if the callback unwinds.
struct AbandonOnPanic<'a> {
    id: u64,
    state: &'a RefCell<CountdownState>,
}

impl Drop for AbandonOnPanic<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            return;
        }
        // Panicking again here would abort, so only try the borrow
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.cancel();
        }
        error!(handle_id = self.id, "tick callback panicked, abandoning countdown");
    }
}

async fn drive<F>(
    id: u64,
    state: Rc<RefCell<CountdownState>>,
    mut on_tick: F,
) -> Result<(), SchedulerError>
where
    F: FnMut(Tick) -> anyhow::Result<()>,
{
    let delay = state.borrow().delay();
    loop {
        tokio::time::sleep(delay).await;

        let next = state.borrow_mut().advance();
        let Some(tick) = next else {
            debug!(handle_id = id, "countdown stopped before next tick");
            return Ok(());
        };

        deliver(id, &state, &mut on_tick, tick)?;

        if tick.is_terminal {
            info!(handle_id = id, "countdown finished");
            return Ok(());
        }
    }
}
