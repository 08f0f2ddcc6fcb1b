//! CPU scheduling policies.
//!
//! Each policy drains a ready queue of [`ProcessControlBlock`]s through a
//! simulated single-core CPU and reports aggregate statistics.
//!
//! # Policies
//!
//! | Policy | Preemptive | Selection |
//! |--------|------------|-----------|
//! | FCFS | no | earliest arrival |
//! | SJF | no | least burst time among arrived |
//! | Priority | no | lowest priority value among arrived |
//! | RR | yes (quantum) | FIFO ready queue |
//! | SRTF | yes (every unit) | least remaining time among arrived |
//!
//! Ties go to the earlier arrival, then to the earlier queue position.
//!
//! # Contract
//!
//! Input is validated before any mutation: an empty queue, a process with
//! priority `0`, or a zero quantum is rejected and the queue is left as
//! it was. On success the queue is empty.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod cpu;
mod non_preemptive;
mod round_robin;
mod srtf;

pub use cpu::VirtualCpu;
pub use non_preemptive::NonPreemptiveScheduler;
pub use round_robin::RoundRobin;
pub use srtf::ShortestRemainingTimeFirst;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collections::{DynArray, DynArrayError};
use crate::models::{ProcessControlBlock, ScheduleResult};
use crate::validation::{ValidationError, ValidationErrorKind};

/// A scheduling policy.
pub trait Scheduler {
    /// Short policy name (e.g., "FCFS").
    fn name(&self) -> &'static str;

    /// Runs the policy, draining `ready_queue`.
    fn schedule(
        &self,
        ready_queue: &mut DynArray<ProcessControlBlock>,
    ) -> Result<ScheduleResult, ScheduleError>;
}

/// Errors from a scheduling run.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Input was rejected before the simulation started.
    Invalid(Vec<ValidationError>),
    /// The working container could not grow.
    Storage(DynArrayError),
}

impl ScheduleError {
    /// Whether the rejection includes an error of `kind`.
    pub fn has_kind(&self, kind: ValidationErrorKind) -> bool {
        match self {
            Self::Invalid(errors) => errors.iter().any(|e| e.kind == kind),
            Self::Storage(_) => false,
        }
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => {
                write!(f, "invalid scheduling input")?;
                for (i, error) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{error}")?;
                }
                Ok(())
            }
            Self::Storage(e) => write!(f, "ready queue storage failed: {e}"),
        }
    }
}

impl std::error::Error for ScheduleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<DynArrayError> for ScheduleError {
    fn from(e: DynArrayError) -> Self {
        Self::Storage(e)
    }
}

/// Logs and wraps validation failures.
fn rejected(policy: &str, errors: Vec<ValidationError>) -> ScheduleError {
    for error in &errors {
        log::warn!("{policy}: {error}");
    }
    ScheduleError::Invalid(errors)
}

/// Earliest arrival among `processes`, as a clock value.
fn earliest_arrival(processes: &[ProcessControlBlock]) -> Option<u64> {
    processes
        .iter()
        .map(|process| u64::from(process.arrival))
        .min()
}

/// The closed set of scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-come-first-served.
    Fcfs,
    /// Shortest-job-first.
    Sjf,
    /// Non-preemptive priority.
    Priority,
    /// Round Robin; needs a quantum.
    RoundRobin,
    /// Shortest-remaining-time-first.
    Srtf,
}

impl Algorithm {
    /// Every policy, in presentation order.
    pub fn all() -> [Algorithm; 5] {
        [
            Self::Fcfs,
            Self::Sjf,
            Self::Priority,
            Self::RoundRobin,
            Self::Srtf,
        ]
    }

    /// Canonical command-line name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Priority => "P",
            Self::RoundRobin => "RR",
            Self::Srtf => "SRTF",
        }
    }

    /// Whether the policy needs a time slice.
    pub fn requires_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// Runs this policy over `ready_queue`.
    ///
    /// `quantum` is only read by Round Robin; a missing quantum there is
    /// rejected as [`ValidationErrorKind::InvalidQuantum`].
    pub fn run(
        &self,
        ready_queue: &mut DynArray<ProcessControlBlock>,
        quantum: Option<u32>,
    ) -> Result<ScheduleResult, ScheduleError> {
        match self {
            Self::Fcfs => first_come_first_serve(ready_queue),
            Self::Sjf => shortest_job_first(ready_queue),
            Self::Priority => priority(ready_queue),
            Self::RoundRobin => round_robin(ready_queue, quantum.unwrap_or(0)),
            Self::Srtf => shortest_remaining_time_first(ready_queue),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm '{}' (expected FCFS, SJF, P, RR or SRTF)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FCFS" => Ok(Self::Fcfs),
            "SJF" => Ok(Self::Sjf),
            "P" | "PRI" | "PRIORITY" => Ok(Self::Priority),
            "RR" => Ok(Self::RoundRobin),
            "SRTF" => Ok(Self::Srtf),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// First-come-first-served.
pub fn first_come_first_serve(
    ready_queue: &mut DynArray<ProcessControlBlock>,
) -> Result<ScheduleResult, ScheduleError> {
    NonPreemptiveScheduler::first_come_first_serve().schedule(ready_queue)
}

/// Non-preemptive shortest-job-first.
pub fn shortest_job_first(
    ready_queue: &mut DynArray<ProcessControlBlock>,
) -> Result<ScheduleResult, ScheduleError> {
    NonPreemptiveScheduler::shortest_job_first().schedule(ready_queue)
}

/// Non-preemptive priority (lowest value first).
pub fn priority(
    ready_queue: &mut DynArray<ProcessControlBlock>,
) -> Result<ScheduleResult, ScheduleError> {
    NonPreemptiveScheduler::priority().schedule(ready_queue)
}

/// Round Robin with the given time quantum.
pub fn round_robin(
    ready_queue: &mut DynArray<ProcessControlBlock>,
    quantum: u32,
) -> Result<ScheduleResult, ScheduleError> {
    RoundRobin::new(quantum).schedule(ready_queue)
}

/// Preemptive shortest-remaining-time-first.
pub fn shortest_remaining_time_first(
    ready_queue: &mut DynArray<ProcessControlBlock>,
) -> Result<ScheduleResult, ScheduleError> {
    ShortestRemainingTimeFirst::new().schedule(ready_queue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn random_queue(rng: &mut SmallRng, count: usize) -> Vec<ProcessControlBlock> {
        (0..count)
            .map(|_| {
                ProcessControlBlock::new(
                    rng.random_range(0..15),
                    rng.random_range(1..6),
                    rng.random_range(0..30),
                )
            })
            .collect()
    }

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("fcfs".parse::<Algorithm>(), Ok(Algorithm::Fcfs));
        assert_eq!("SJF".parse::<Algorithm>(), Ok(Algorithm::Sjf));
        assert_eq!("p".parse::<Algorithm>(), Ok(Algorithm::Priority));
        assert_eq!("Pri".parse::<Algorithm>(), Ok(Algorithm::Priority));
        assert_eq!("priority".parse::<Algorithm>(), Ok(Algorithm::Priority));
        assert_eq!(" rr ".parse::<Algorithm>(), Ok(Algorithm::RoundRobin));
        assert_eq!("srtf".parse::<Algorithm>(), Ok(Algorithm::Srtf));
        assert!("lottery".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_algorithm_display_round_trips() {
        for algorithm in Algorithm::all() {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
        assert!(Algorithm::RoundRobin.requires_quantum());
        assert!(!Algorithm::Srtf.requires_quantum());
    }

    #[test]
    fn test_algorithm_serde() {
        let json = serde_json::to_string(&Algorithm::RoundRobin).unwrap();
        assert_eq!(json, r#""RoundRobin""#);
        let back: Algorithm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Algorithm::RoundRobin);
    }

    #[test]
    fn test_round_robin_without_quantum_rejected() {
        let mut queue = DynArray::import(&[ProcessControlBlock::with_burst(3)], None).unwrap();
        let err = Algorithm::RoundRobin.run(&mut queue, None).unwrap_err();
        assert!(err.has_kind(ValidationErrorKind::InvalidQuantum));
        assert_eq!(queue.size(), 1);

        let result = Algorithm::RoundRobin.run(&mut queue, Some(2)).unwrap();
        assert_eq!(result.total_run_time, 3);
    }

    #[test]
    fn test_error_reports_every_issue() {
        let mut queue = DynArray::import(
            &[
                ProcessControlBlock::new(1, 0, 0),
                ProcessControlBlock::new(1, 0, 1),
            ],
            None,
        )
        .unwrap();
        let err = round_robin(&mut queue, 0).unwrap_err();
        match &err {
            ScheduleError::Invalid(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error: {other:?}"),
        }
        let text = err.to_string();
        assert!(text.starts_with("invalid scheduling input: "));
        assert!(!err.has_kind(ValidationErrorKind::EmptyQueue));
    }

    #[test]
    fn test_storage_error_source() {
        use std::error::Error;
        let err = ScheduleError::from(DynArrayError::Empty);
        assert!(err.source().is_some());
        assert!(!err.has_kind(ValidationErrorKind::EmptyQueue));
    }

    #[test]
    fn test_common_invariants_on_random_queues() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let count = rng.random_range(1..12);
            let processes = random_queue(&mut rng, count);
            let total_burst: u64 = processes
                .iter()
                .map(|p| u64::from(p.remaining_burst_time))
                .sum();
            let mean_burst = total_burst as f64 / count as f64;

            for algorithm in Algorithm::all() {
                let mut queue = DynArray::import(&processes, None).unwrap();
                let result = algorithm.run(&mut queue, Some(4)).unwrap();

                assert!(queue.is_empty(), "{algorithm} left processes behind");
                assert_eq!(result.total_run_time, total_burst, "{algorithm}");
                assert!(result.average_waiting_time >= 0.0);
                // turnaround = waiting + burst for every process
                assert!(
                    (result.average_turnaround_time
                        - result.average_waiting_time
                        - mean_burst)
                        .abs()
                        < 1e-9,
                    "{algorithm}"
                );
            }
        }
    }

    #[test]
    fn test_same_arrival_sjf_never_worse_than_fcfs() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..30 {
            let processes: Vec<_> = (0..6)
                .map(|_| ProcessControlBlock::with_burst(rng.random_range(1..20)))
                .collect();

            let sjf = shortest_job_first(&mut DynArray::import(&processes, None).unwrap()).unwrap();
            let fcfs =
                first_come_first_serve(&mut DynArray::import(&processes, None).unwrap()).unwrap();
            let srtf =
                shortest_remaining_time_first(&mut DynArray::import(&processes, None).unwrap())
                    .unwrap();

            assert!(sjf.average_waiting_time <= fcfs.average_waiting_time + 1e-9);
            // with simultaneous arrivals preemption never triggers
            assert!((sjf.average_waiting_time - srtf.average_waiting_time).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_process_never_waits() {
        let process = ProcessControlBlock::new(9, 3, 17);
        for algorithm in Algorithm::all() {
            let mut queue = DynArray::import(&[process], None).unwrap();
            let result = algorithm.run(&mut queue, Some(2)).unwrap();
            assert_eq!(result.total_run_time, 9);
            assert!(result.average_waiting_time.abs() < 1e-10);
            assert!((result.average_turnaround_time - 9.0).abs() < 1e-10);
        }
    }
}
