//! Non-preemptive, rule-driven scheduling (FCFS, SJF, Priority).
//!
//! # Algorithm
//!
//! 1. Among processes with `arrival <= clock`, select the best one by the
//!    rule engine (ties: earlier arrival, then earlier queue position).
//! 2. If nothing has arrived, idle the clock forward to the earliest
//!    remaining arrival. Idle time is not charged as run time.
//! 3. Extract the selected process and run it to completion.
//!    waiting = start - arrival, turnaround = completion - arrival.
//!
//! FCFS is the `FIFO` rule: selecting the earliest arrival among arrived
//! processes, ties by queue position, visits processes in stable arrival
//! order.
//!
//! # Complexity
//! O(n²) rule evaluations for n processes.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.1-5.3.4

use super::cpu::VirtualCpu;
use super::{earliest_arrival, rejected, ScheduleError, Scheduler};
use crate::collections::DynArray;
use crate::dispatching::{rules, RuleEngine};
use crate::models::{ProcessControlBlock, ScheduleResult, ScheduleStats};
use crate::validation::validate_ready_queue;

/// Run-to-completion scheduler driven by a [`RuleEngine`].
///
/// # Example
///
/// ```
/// use u_procsched::collections::DynArray;
/// use u_procsched::models::ProcessControlBlock;
/// use u_procsched::scheduler::{NonPreemptiveScheduler, Scheduler};
///
/// let mut queue = DynArray::import(&[
///     ProcessControlBlock::new(3, 1, 0),
///     ProcessControlBlock::new(8, 1, 1),
///     ProcessControlBlock::new(5, 1, 2),
/// ], None).unwrap();
///
/// let result = NonPreemptiveScheduler::shortest_job_first()
///     .schedule(&mut queue)
///     .unwrap();
/// assert_eq!(result.total_run_time, 16);
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct NonPreemptiveScheduler {
    name: &'static str,
    engine: RuleEngine,
}

impl NonPreemptiveScheduler {
    /// Creates a scheduler with a custom rule engine.
    pub fn with_engine(name: &'static str, engine: RuleEngine) -> Self {
        Self { name, engine }
    }

    /// First-come-first-served.
    pub fn first_come_first_serve() -> Self {
        Self::with_engine("FCFS", RuleEngine::new().with_rule(rules::FirstArrival))
    }

    /// Shortest-job-first (non-preemptive).
    pub fn shortest_job_first() -> Self {
        Self::with_engine(
            "SJF",
            RuleEngine::new()
                .with_rule(rules::ShortestJob)
                .with_tie_breaker(rules::FirstArrival),
        )
    }

    /// Priority (non-preemptive, lowest value first).
    pub fn priority() -> Self {
        Self::with_engine(
            "PRIORITY",
            RuleEngine::new()
                .with_rule(rules::HighestPriority)
                .with_tie_breaker(rules::FirstArrival),
        )
    }
}

impl Scheduler for NonPreemptiveScheduler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn schedule(
        &self,
        ready_queue: &mut DynArray<ProcessControlBlock>,
    ) -> Result<ScheduleResult, ScheduleError> {
        validate_ready_queue(ready_queue.as_slice())
            .map_err(|errors| rejected(self.name, errors))?;

        let process_count = ready_queue.size();
        let mut cpu = VirtualCpu::default();
        let mut stats = ScheduleStats::new();
        log::debug!("{}: scheduling {} processes", self.name, process_count);

        while !ready_queue.is_empty() {
            let Some(index) = self.engine.select_best(ready_queue.as_slice(), &cpu.context())
            else {
                if let Some(next) = earliest_arrival(ready_queue.as_slice()) {
                    log::trace!("{}: idle {} -> {}", self.name, cpu.clock(), next);
                    cpu.idle_until(next);
                }
                continue;
            };

            let mut process = ready_queue.extract(index)?;
            let arrival = u64::from(process.arrival);
            let start = cpu.clock();

            process.started = true;
            let burst = cpu.run_to_completion(&mut process);
            stats.add_run_time(u64::from(burst));
            stats.record_completion(start - arrival, cpu.clock() - arrival);

            log::trace!(
                "{}: ran burst {} (arrival {}) over [{}, {})",
                self.name,
                burst,
                arrival,
                start,
                cpu.clock()
            );
        }

        let result = stats.finish(process_count);
        log::debug!(
            "{}: done at t={} (avg wait {:.2}, avg turnaround {:.2})",
            self.name,
            cpu.clock(),
            result.average_waiting_time,
            result.average_turnaround_time
        );
        Ok(result)
    }
}
