//! Schedule performance statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting time | Time spent arrived but not running |
//! | Turnaround time | Completion - arrival |
//! | Total run time | CPU-busy time units (idle gaps excluded) |
//!
//! Sums are kept as integers while the simulation runs; the only
//! floating-point operation is the final division by the process count.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use std::fmt;

use serde::{Deserialize, Serialize};

/// Aggregate result of one scheduling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Mean waiting time per process.
    pub average_waiting_time: f64,
    /// Mean turnaround time per process.
    pub average_turnaround_time: f64,
    /// Sum of CPU-busy time units across all processes.
    pub total_run_time: u64,
}

impl ScheduleResult {
    /// Mean CPU time per process (`total_run_time / n`).
    pub fn average_burst_time(&self, process_count: usize) -> f64 {
        if process_count == 0 {
            0.0
        } else {
            self.total_run_time as f64 / process_count as f64
        }
    }
}

impl fmt::Display for ScheduleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Waiting Time: {:.2}", self.average_waiting_time)?;
        writeln!(
            f,
            "Average Turnaround Time: {:.2}",
            self.average_turnaround_time
        )?;
        writeln!(f, "Total Run Time: {}", self.total_run_time)
    }
}

/// Running totals collected while a policy simulates.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStats {
    total_waiting: u64,
    total_turnaround: u64,
    total_run: u64,
    completed: usize,
}

impl ScheduleStats {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Charges `units` of CPU-busy time.
    pub fn add_run_time(&mut self, units: u64) {
        self.total_run += units;
    }

    /// Records a finished process.
    pub fn record_completion(&mut self, waiting: u64, turnaround: u64) {
        self.total_waiting += waiting;
        self.total_turnaround += turnaround;
        self.completed += 1;
    }

    /// Number of processes recorded so far.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// CPU-busy time charged so far.
    pub fn total_run_time(&self) -> u64 {
        self.total_run
    }

    /// Produces averages over `process_count` processes.
    pub fn finish(&self, process_count: usize) -> ScheduleResult {
        if process_count == 0 {
            return ScheduleResult::default();
        }
        let n = process_count as f64;
        ScheduleResult {
            average_waiting_time: self.total_waiting as f64 / n,
            average_turnaround_time: self.total_turnaround as f64 / n,
            total_run_time: self.total_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_averages() {
        let mut stats = ScheduleStats::new();
        stats.add_run_time(5);
        stats.record_completion(0, 5);
        stats.add_run_time(3);
        stats.record_completion(5, 8);
        stats.add_run_time(8);
        stats.record_completion(8, 16);

        let result = stats.finish(3);
        assert_eq!(stats.completed(), 3);
        assert_eq!(stats.total_run_time(), 16);
        assert_eq!(result.total_run_time, 16);
        assert!((result.average_waiting_time - 13.0 / 3.0).abs() < 1e-10);
        assert!((result.average_turnaround_time - 29.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_stats_keep_fractions() {
        let mut stats = ScheduleStats::new();
        stats.record_completion(1, 2);
        stats.record_completion(0, 1);

        let result = stats.finish(2);
        assert!((result.average_waiting_time - 0.5).abs() < 1e-10);
        assert!((result.average_turnaround_time - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_stats_empty() {
        let result = ScheduleStats::new().finish(0);
        assert_eq!(result, ScheduleResult::default());
    }

    #[test]
    fn test_result_display() {
        let result = ScheduleResult {
            average_waiting_time: 4.333333,
            average_turnaround_time: 9.666666,
            total_run_time: 16,
        };
        assert_eq!(
            result.to_string(),
            "Average Waiting Time: 4.33\nAverage Turnaround Time: 9.67\nTotal Run Time: 16\n"
        );
        assert!((result.average_burst_time(3) - 16.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_result_serde_shape() {
        let result = ScheduleResult {
            average_waiting_time: 0.5,
            average_turnaround_time: 2.0,
            total_run_time: 3,
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["total_run_time"], 3);
        assert_eq!(json["average_waiting_time"], 0.5);

        let back: ScheduleResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
