//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Arrival-based**: FIFO
//! - **Time-based**: SJF (also SRTF, since it reads remaining burst time)
//! - **Priority**: PRIORITY
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::ProcessControlBlock;

/// First In, First Out.
///
/// Prioritizes the process that arrived earliest.
#[derive(Debug, Clone, Copy)]
pub struct FirstArrival;

impl DispatchingRule for FirstArrival {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, process: &ProcessControlBlock, _context: &SchedulingContext) -> RuleScore {
        process.arrival as f64
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

/// Shortest Job.
///
/// Prioritizes the process with the least remaining burst time. Evaluated
/// once per dispatch it yields SJF; re-evaluated every time unit it
/// yields SRTF.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct ShortestJob;

impl DispatchingRule for ShortestJob {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, process: &ProcessControlBlock, _context: &SchedulingContext) -> RuleScore {
        process.remaining_burst_time as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Process priority.
///
/// Lower numeric priority value = dispatched first.
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl DispatchingRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &ProcessControlBlock, _context: &SchedulingContext) -> RuleScore {
        process.priority as f64
    }

    fn description(&self) -> &'static str {
        "Highest Priority (lowest value) First"
    }
}
