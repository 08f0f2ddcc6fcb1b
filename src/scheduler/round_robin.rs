//! Preemptive Round Robin with a fixed time quantum.
//!
//! # Algorithm
//!
//! 1. Stable-sort the input by arrival; it becomes the pool of processes
//!    that have not yet arrived. The clock starts at the earliest arrival.
//! 2. Admit every pooled process with `arrival <= clock` to the back of a
//!    FIFO ready queue. When the ready queue is empty, idle the clock to
//!    the next arrival.
//! 3. Dispatch the front of the ready queue:
//!    - remaining > quantum: run `quantum` units, admit new arrivals, then
//!      requeue the process at the back;
//!    - otherwise: run to completion and admit new arrivals.
//!
//! Arrivals admitted at the same instant a process is preempted are
//! queued ahead of it.
//!
//! # Metrics
//!
//! | Metric | Per process |
//! |--------|-------------|
//! | Waiting | last dispatch - (arrival + slices × quantum) |
//! | Turnaround | completion - arrival |
//!
//! Priority is ignored.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.3

use super::cpu::VirtualCpu;
use super::{rejected, ScheduleError, Scheduler};
use crate::collections::DynArray;
use crate::models::{ProcessControlBlock, ScheduleResult, ScheduleStats};
use crate::validation::validate_round_robin;

/// Round Robin scheduler.
///
/// # Example
///
/// ```
/// use u_procsched::collections::DynArray;
/// use u_procsched::models::ProcessControlBlock;
/// use u_procsched::scheduler::{RoundRobin, Scheduler};
///
/// let mut queue = DynArray::import(&[
///     ProcessControlBlock::new(5, 1, 0),
///     ProcessControlBlock::new(8, 1, 1),
///     ProcessControlBlock::new(3, 1, 2),
/// ], None).unwrap();
///
/// let result = RoundRobin::new(5).schedule(&mut queue).unwrap();
/// assert_eq!(result.total_run_time, 16);
/// assert!((result.average_waiting_time - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    quantum: u32,
}

impl RoundRobin {
    /// Creates a Round Robin scheduler. A zero quantum is rejected when
    /// scheduling.
    pub fn new(quantum: u32) -> Self {
        Self { quantum }
    }

    /// Time slice length.
    pub fn quantum(&self) -> u32 {
        self.quantum
    }
}

/// Moves every pooled process that has arrived by `clock` to the ready queue.
fn admit_arrivals(
    pending: &mut DynArray<ProcessControlBlock>,
    ready: &mut DynArray<ProcessControlBlock>,
    clock: u64,
) -> Result<(), ScheduleError> {
    while pending.front().is_some_and(|process| process.has_arrived(clock)) {
        let process = pending.extract_front()?;
        ready.push_back(process)?;
    }
    Ok(())
}

impl Scheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn schedule(
        &self,
        ready_queue: &mut DynArray<ProcessControlBlock>,
    ) -> Result<ScheduleResult, ScheduleError> {
        validate_round_robin(ready_queue.as_slice(), self.quantum)
            .map_err(|errors| rejected(self.name(), errors))?;

        let quantum = self.quantum;
        let process_count = ready_queue.size();
        ready_queue
            .as_mut_slice()
            .sort_by_key(|process| process.arrival);

        let first_arrival = ready_queue
            .front()
            .map_or(0, |process| u64::from(process.arrival));
        let mut cpu = VirtualCpu::starting_at(first_arrival);
        let mut ready = DynArray::create(process_count, None)?;
        let mut stats = ScheduleStats::new();
        log::debug!(
            "RR: scheduling {} processes, quantum {}",
            process_count,
            quantum
        );

        admit_arrivals(ready_queue, &mut ready, cpu.clock())?;
        loop {
            if ready.is_empty() {
                let Some(next) = ready_queue.front().map(|process| process.arrival) else {
                    break;
                };
                log::trace!("RR: idle {} -> {}", cpu.clock(), next);
                cpu.idle_until(u64::from(next));
                admit_arrivals(ready_queue, &mut ready, cpu.clock())?;
                continue;
            }

            let mut process = ready.extract_front()?;
            let arrival = u64::from(process.arrival);
            let waited =
                cpu.clock() - (arrival + u64::from(process.times_processed) * u64::from(quantum));
            process.started = true;

            if process.remaining_burst_time > quantum {
                let ran = cpu.run(&mut process, quantum);
                stats.add_run_time(u64::from(ran));
                process.times_processed += 1;
                log::trace!(
                    "RR: slice {} ended at t={}, {} remaining",
                    process.times_processed,
                    cpu.clock(),
                    process.remaining_burst_time
                );
                admit_arrivals(ready_queue, &mut ready, cpu.clock())?;
                ready.push_back(process)?;
            } else {
                let ran = cpu.run_to_completion(&mut process);
                stats.add_run_time(u64::from(ran));
                stats.record_completion(waited, cpu.clock() - arrival);
                log::trace!("RR: completed at t={} after waiting {}", cpu.clock(), waited);
                admit_arrivals(ready_queue, &mut ready, cpu.clock())?;
            }
        }

        let result = stats.finish(process_count);
        log::debug!(
            "RR: done at t={} (avg wait {:.2}, avg turnaround {:.2})",
            cpu.clock(),
            result.average_waiting_time,
            result.average_turnaround_time
        );
        Ok(result)
    }
}
