//! End-to-end analysis run: load, schedule, report.

use std::fmt;
use std::io::{self, Write};

use crate::config::AnalysisConfig;
use crate::loader::{load_process_control_blocks, LoadError};
use crate::models::ScheduleResult;
use crate::scheduler::ScheduleError;

/// Errors from an analysis run.
#[derive(Debug)]
pub enum AnalysisError {
    /// The input file was rejected.
    Load(LoadError),
    /// The policy rejected the loaded processes.
    Schedule(ScheduleError),
    /// The report could not be written.
    Report(io::Error),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "cannot load process control blocks: {e}"),
            Self::Schedule(e) => write!(f, "scheduling failed: {e}"),
            Self::Report(e) => write!(f, "cannot write report: {e}"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Schedule(e) => Some(e),
            Self::Report(e) => Some(e),
        }
    }
}

impl From<LoadError> for AnalysisError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<ScheduleError> for AnalysisError {
    fn from(e: ScheduleError) -> Self {
        Self::Schedule(e)
    }
}

impl From<io::Error> for AnalysisError {
    fn from(e: io::Error) -> Self {
        Self::Report(e)
    }
}

/// Runs the configured policy over the configured file.
///
/// The report goes to `out` and, when `report_path` is set, to that
/// file as well.
pub fn run<W: Write>(
    config: &AnalysisConfig,
    out: &mut W,
) -> Result<ScheduleResult, AnalysisError> {
    let mut ready_queue = load_process_control_blocks(&config.input)?;
    log::info!(
        "running {} over {} processes",
        config.algorithm,
        ready_queue.size()
    );

    let result = config.algorithm.run(&mut ready_queue, config.quantum)?;
    let report = result.to_string();

    out.write_all(report.as_bytes())?;
    out.flush()?;
    if let Some(path) = &config.report_path {
        std::fs::write(path, &report)?;
        log::info!("report written to {}", path.display());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::write_process_control_blocks;
    use crate::models::ProcessControlBlock;
    use crate::scheduler::Algorithm;
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "u_procsched_analysis_{}_{}",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_run_prints_report() {
        let input = temp_file("fcfs.bin");
        write_process_control_blocks(
            &input,
            &[
                ProcessControlBlock::new(5, 1, 0),
                ProcessControlBlock::new(3, 1, 0),
                ProcessControlBlock::new(8, 1, 0),
            ],
        )
        .unwrap();

        let mut out = Vec::new();
        let result = run(&AnalysisConfig::new(&input, Algorithm::Fcfs), &mut out).unwrap();
        std::fs::remove_file(&input).unwrap();

        assert_eq!(result.total_run_time, 16);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Average Waiting Time: 4.33\nAverage Turnaround Time: 9.67\nTotal Run Time: 16\n"
        );
    }

    #[test]
    fn test_run_writes_report_file() {
        let input = temp_file("rr.bin");
        let report = temp_file("rr_report.md");
        write_process_control_blocks(&input, &[ProcessControlBlock::new(7, 2, 1)]).unwrap();

        let config = AnalysisConfig::new(&input, Algorithm::RoundRobin)
            .with_quantum(3)
            .with_report_path(&report);
        let mut out: Vec<u8> = Vec::new();
        run(&config, &mut out).unwrap();

        let written = std::fs::read_to_string(&report).unwrap();
        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&report).unwrap();
        assert_eq!(written.as_bytes(), out.as_slice());
    }

    #[test]
    fn test_run_missing_file() {
        let config = AnalysisConfig::new(temp_file("absent.bin"), Algorithm::Sjf);
        let err = run(&config, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::Load(LoadError::Io(_))));
    }

    #[test]
    fn test_run_empty_file_is_rejected_by_scheduler() {
        let input = temp_file("empty.bin");
        write_process_control_blocks(&input, &[]).unwrap();

        let mut out: Vec<u8> = Vec::new();
        let err = run(&AnalysisConfig::new(&input, Algorithm::Srtf), &mut out).unwrap_err();
        std::fs::remove_file(&input).unwrap();

        assert!(matches!(err, AnalysisError::Schedule(_)));
        assert!(out.is_empty());
    }
}
