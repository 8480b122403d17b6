//! Deferred countdown scheduling.
//!
//! [`StepScheduler::start`] delivers a [`Tick`] for every value from the
//! initial count down to zero, one per delay interval, then stops on its
//! own. The returned [`Handle`] can cancel the countdown at any point.

mod error;
mod handle;
mod state;
mod step;

pub use error::SchedulerError;
pub use handle::Handle;
pub use state::{CountdownState, SchedulePhase, Tick};
pub use step::StepScheduler;
