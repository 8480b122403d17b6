//! Countdown state machine.
//!
//! A countdown moves `Idle -> Running -> Terminal`. `Cancelled` is an
//! absorbing state reachable from `Running`. Nothing leaves `Terminal` or
//! `Cancelled`.

use std::fmt;
use std::time::Duration;

/// Lifecycle phase of a single countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulePhase {
    /// Created but no tick consumed yet
    Idle,
    /// Ticks are still being scheduled
    Running,
    /// The zero tick has been consumed
    Terminal,
    /// Stopped by the caller or by a failing callback
    Cancelled,
}

impl SchedulePhase {
    /// Whether no further ticks can happen from this phase
    pub fn is_finished(self) -> bool {
        matches!(self, SchedulePhase::Terminal | SchedulePhase::Cancelled)
    }
}

impl fmt::Display for SchedulePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SchedulePhase::Idle => "idle",
            SchedulePhase::Running => "running",
            SchedulePhase::Terminal => "terminal",
            SchedulePhase::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// One delivered countdown step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub value: i64,
    pub is_terminal: bool,
}

impl Tick {
    fn at(value: i64) -> Self {
        Self {
            value,
            is_terminal: value == 0,
        }
    }
}

/// Mutable state owned by one countdown handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    remaining: i64,
    delay: Duration,
    phase: SchedulePhase,
    ticks_delivered: u64,
}

impl CountdownState {
    pub(crate) fn new(initial: i64, delay: Duration) -> Self {
        Self {
            remaining: initial,
            delay,
            phase: SchedulePhase::Idle,
            ticks_delivered: 0,
        }
    }

    /// Value of the most recently consumed tick (or the initial value)
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn phase(&self) -> SchedulePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SchedulePhase::Running
    }

    pub fn ticks_delivered(&self) -> u64 {
        self.ticks_delivered
    }

    /// Consume the first tick. Negative countdowns produce no tick and go
    /// straight to `Terminal`.
    pub(crate) fn begin(&mut self) -> Option<Tick> {
        if self.phase != SchedulePhase::Idle {
            return None;
        }
        if self.remaining < 0 {
            self.phase = SchedulePhase::Terminal;
            return None;
        }
        Some(self.consume(self.remaining))
    }

    /// Consume the next tick, if the countdown is still running.
    pub(crate) fn advance(&mut self) -> Option<Tick> {
        if self.phase != SchedulePhase::Running {
            return None;
        }
        Some(self.consume(self.remaining - 1))
    }

    /// Move to `Cancelled`. Returns false when already finished.
    pub(crate) fn cancel(&mut self) -> bool {
        if self.phase.is_finished() {
            return false;
        }
        self.phase = SchedulePhase::Cancelled;
        true
    }

    // The terminal transition happens here, before the callback sees the
    // zero tick.
    fn consume(&mut self, value: i64) -> Tick {
        let tick = Tick::at(value);
        self.remaining = value;
        self.ticks_delivered += 1;
        self.phase = if tick.is_terminal {
            SchedulePhase::Terminal
        } else {
            SchedulePhase::Running
        };
        tick
    }
}
