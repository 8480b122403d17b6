use std::cell::RefCell;
use std::rc::Rc;
use tokio::task::AbortHandle;
use tracing::{debug, info};

use super::state::{CountdownState, SchedulePhase};

/// Token identifying one countdown started by a
/// [`StepScheduler`](super::StepScheduler).
///
/// Cloning a handle yields another view of the same countdown; cancelling
/// through any clone stops it.
#[derive(Debug, Clone)]
pub struct Handle {
    id: u64,
    state: Rc<RefCell<CountdownState>>,
    /// Pending tick task, absent when nothing was ever scheduled
    pending: Option<AbortHandle>,
}

impl Handle {
    pub(crate) fn new(
        id: u64,
        state: Rc<RefCell<CountdownState>>,
        pending: Option<AbortHandle>,
    ) -> Self {
        Self { id, state, pending }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn phase(&self) -> SchedulePhase {
        self.state.borrow().phase()
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().is_running()
    }

    /// Copy of the current countdown state
    pub fn snapshot(&self) -> CountdownState {
        self.state.borrow().clone()
    }

    /// Stop the countdown. No tick is delivered after this returns.
    ///
    /// Cancelling a finished countdown does nothing.
    pub fn cancel(&self) {
        let cancelled = self.state.borrow_mut().cancel();
        if !cancelled {
            debug!(handle_id = self.id, phase = %self.phase(), "cancel ignored");
            return;
        }

        if let Some(ref pending) = self.pending {
            pending.abort();
        }
        info!(
            handle_id = self.id,
            remaining = self.state.borrow().remaining(),
            "countdown cancelled"
        );
    }
}
