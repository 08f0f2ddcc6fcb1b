//! Preemptive Shortest Remaining Time First.
//!
//! # Algorithm
//!
//! Every time unit, among processes with `arrival <= clock`, select the
//! one with the least remaining burst time (ties: earlier arrival, then
//! earlier queue position) and run it for one unit. A selected process
//! with nothing left completes without consuming time. When nothing has
//! arrived the clock jumps to the next arrival.
//!
//! # Metrics
//!
//! | Metric | Per process |
//! |--------|-------------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - original burst |
//!
//! # Complexity
//! O(B · n) rule evaluations, where B is the total burst time.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.2

use super::cpu::VirtualCpu;
use super::{earliest_arrival, rejected, ScheduleError, Scheduler};
use crate::collections::{DynArray, DynArrayError};
use crate::dispatching::{rules, RuleEngine};
use crate::models::{ProcessControlBlock, ScheduleResult, ScheduleStats};
use crate::validation::validate_ready_queue;

/// Shortest Remaining Time First scheduler.
#[derive(Debug, Clone)]
pub struct ShortestRemainingTimeFirst {
    engine: RuleEngine,
}

impl ShortestRemainingTimeFirst {
    pub fn new() -> Self {
        Self {
            engine: RuleEngine::new()
                .with_rule(rules::ShortestJob)
                .with_tie_breaker(rules::FirstArrival),
        }
    }
}

impl Default for ShortestRemainingTimeFirst {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ShortestRemainingTimeFirst {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn schedule(
        &self,
        ready_queue: &mut DynArray<ProcessControlBlock>,
    ) -> Result<ScheduleResult, ScheduleError> {
        validate_ready_queue(ready_queue.as_slice())
            .map_err(|errors| rejected(self.name(), errors))?;

        let process_count = ready_queue.size();
        // Original bursts, index-aligned with `ready_queue`.
        let mut bursts = DynArray::create(process_count, None)?;
        for process in ready_queue.iter() {
            bursts.push_back(process.remaining_burst_time)?;
        }

        let mut cpu = VirtualCpu::default();
        let mut stats = ScheduleStats::new();
        log::debug!("SRTF: scheduling {} processes", process_count);

        while !ready_queue.is_empty() {
            let Some(index) = self.engine.select_best(ready_queue.as_slice(), &cpu.context())
            else {
                if let Some(next) = earliest_arrival(ready_queue.as_slice()) {
                    log::trace!("SRTF: idle {} -> {}", cpu.clock(), next);
                    cpu.idle_until(next);
                }
                continue;
            };

            if run_unit(&mut cpu, &mut stats, ready_queue, index)? {
                let process = ready_queue.extract(index)?;
                let burst = u64::from(bursts.extract(index)?);
                let turnaround = cpu.clock() - u64::from(process.arrival);
                stats.record_completion(turnaround - burst, turnaround);
                log::trace!(
                    "SRTF: completed at t={} (turnaround {})",
                    cpu.clock(),
                    turnaround
                );
            }
        }

        let result = stats.finish(process_count);
        log::debug!(
            "SRTF: done at t={} (avg wait {:.2}, avg turnaround {:.2})",
            cpu.clock(),
            result.average_waiting_time,
            result.average_turnaround_time
        );
        Ok(result)
    }
}

/// Runs the process at `index` for one unit. Returns whether it is done.
fn run_unit(
    cpu: &mut VirtualCpu,
    stats: &mut ScheduleStats,
    ready_queue: &mut DynArray<ProcessControlBlock>,
    index: usize,
) -> Result<bool, DynArrayError> {
    let size = ready_queue.size();
    let process = ready_queue
        .at_mut(index)
        .ok_or(DynArrayError::IndexOutOfBounds { index, size })?;
    if !process.started {
        process.started = true;
        log::trace!("SRTF: first dispatch at t={}", cpu.clock());
    }
    let ran = cpu.tick(process);
    stats.add_run_time(u64::from(ran));
    Ok(process.is_complete())
}
