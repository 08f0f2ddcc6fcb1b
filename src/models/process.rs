//! Process control block model.
//!
//! A process control block (PCB) describes one schedulable unit of CPU work:
//! how much burst time is left, its priority, and when it arrives.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 3.1.3

use serde::{Deserialize, Serialize};

/// A schedulable process.
///
/// # Time Representation
/// All times are integer time units relative to the simulation epoch (t=0).
///
/// # Priority
/// Lower numeric value = higher priority. `0` is reserved as an invalid
/// marker and is rejected by the loader and every scheduling algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessControlBlock {
    /// CPU time units still required. Never increases once simulation starts.
    pub remaining_burst_time: u32,
    /// Scheduling priority (lower = more important, `0` = invalid).
    pub priority: u32,
    /// Time unit at which the process becomes eligible to run.
    pub arrival: u32,
    /// Whether the process has been dispatched at least once.
    #[serde(default)]
    pub started: bool,
    /// Quantum slices already consumed (round-robin bookkeeping).
    #[serde(default)]
    pub times_processed: u32,
}

impl ProcessControlBlock {
    /// Creates a not-yet-started process.
    pub fn new(remaining_burst_time: u32, priority: u32, arrival: u32) -> Self {
        Self {
            remaining_burst_time,
            priority,
            arrival,
            started: false,
            times_processed: 0,
        }
    }

    /// Creates a process with priority 1 arriving at t=0.
    pub fn with_burst(remaining_burst_time: u32) -> Self {
        Self::new(remaining_burst_time, 1, 0)
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival: u32) -> Self {
        self.arrival = arrival;
        self
    }

    /// Whether the process has arrived by `time`.
    pub fn has_arrived(&self, time: u64) -> bool {
        u64::from(self.arrival) <= time
    }

    /// Whether all burst time has been consumed.
    pub fn is_complete(&self) -> bool {
        self.remaining_burst_time == 0
    }

    /// Whether the priority is usable (non-zero).
    pub fn has_valid_priority(&self) -> bool {
        self.priority != 0
    }
}
