//! Scheduling context for dispatching rule evaluation.

use crate::models::ProcessControlBlock;

/// Runtime simulation state passed to dispatching rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulingContext {
    /// Current simulation clock (time units).
    pub current_time: u64,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: u64) -> Self {
        Self { current_time }
    }

    /// Whether `process` may be dispatched at the current time.
    pub fn is_eligible(&self, process: &ProcessControlBlock) -> bool {
        process.has_arrived(self.current_time)
    }
}
