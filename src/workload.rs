//! Random workload generation.
//!
//! Produces ready queues for experiments and for exercising the
//! schedulers with inputs the loader would accept.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::collections::{DynArray, DynArrayError};
use crate::models::ProcessControlBlock;

/// Shape of a generated workload.
///
/// All ranges are inclusive. Priorities never go below `1`.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_procsched::workload::WorkloadConfig;
///
/// let config = WorkloadConfig::new(8)
///     .with_burst_range(1, 10)
///     .with_arrival_window(20);
/// let mut rng = SmallRng::seed_from_u64(1);
/// let queue = config.generate(&mut rng).unwrap();
/// assert_eq!(queue.size(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of processes.
    pub count: usize,
    /// Minimum burst time.
    pub min_burst: u32,
    /// Maximum burst time.
    pub max_burst: u32,
    /// Minimum priority value (at least 1).
    pub min_priority: u32,
    /// Maximum priority value.
    pub max_priority: u32,
    /// Arrivals fall in `[0, arrival_window]`.
    pub arrival_window: u32,
}

impl WorkloadConfig {
    /// Creates a config for `count` processes with bursts in 1..=10,
    /// priorities in 1..=5 and every process arriving at time 0.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            min_burst: 1,
            max_burst: 10,
            min_priority: 1,
            max_priority: 5,
            arrival_window: 0,
        }
    }

    /// Sets the burst range. Bounds are reordered if swapped.
    pub fn with_burst_range(mut self, min: u32, max: u32) -> Self {
        self.min_burst = min.min(max);
        self.max_burst = min.max(max);
        self
    }

    /// Sets the priority range. Values below 1 are raised to 1.
    pub fn with_priority_range(mut self, min: u32, max: u32) -> Self {
        let (low, high) = (min.min(max), min.max(max));
        self.min_priority = low.max(1);
        self.max_priority = high.max(1);
        self
    }

    /// Sets the latest possible arrival time.
    pub fn with_arrival_window(mut self, window: u32) -> Self {
        self.arrival_window = window;
        self
    }

    /// Generates a ready queue. Every process has a valid priority.
    pub fn generate<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<DynArray<ProcessControlBlock>, DynArrayError> {
        let min_priority = self.min_priority.max(1);
        let max_priority = self.max_priority.max(min_priority);
        let max_burst = self.max_burst.max(self.min_burst);

        let mut processes = DynArray::create(self.count, None)?;
        for _ in 0..self.count {
            processes.push_back(ProcessControlBlock::new(
                rng.random_range(self.min_burst..=max_burst),
                rng.random_range(min_priority..=max_priority),
                rng.random_range(0..=self.arrival_window),
            ))?;
        }
        log::debug!(
            "generated {} processes (burst {}..={}, arrival window {})",
            self.count,
            self.min_burst,
            max_burst,
            self.arrival_window
        );
        Ok(processes)
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self::new(10)
    }
}
