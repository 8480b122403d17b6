//! Fundamentals - a deferred countdown scheduler and the small lessons that
//! render through it.
//!
//! The core is [`scheduler::StepScheduler`]; everything else is caller code
//! that the `fundamentals` binary exposes as subcommands.

pub mod config;
pub mod env_vars;
pub mod lessons;
pub mod logging;
pub mod page;
pub mod playground;
pub mod scheduler;
