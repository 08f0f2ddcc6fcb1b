//! Configuration for the `analysis` binary.
//!
//! Positional arguments: `<pcb file> <algorithm> [quantum]`.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `PROCSCHED_LOG` | off, error, warn, info, debug, trace | warn |
//! | `PROCSCHED_REPORT` | also write the report to this file | unset |

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::scheduler::{Algorithm, ParseAlgorithmError};

/// Environment variable selecting the log level.
pub const LOG_ENV: &str = "PROCSCHED_LOG";
/// Environment variable naming the optional report file.
pub const REPORT_ENV: &str = "PROCSCHED_REPORT";

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Process-control-block file to load.
    pub input: PathBuf,
    /// Policy to simulate.
    pub algorithm: Algorithm,
    /// Round Robin time slice.
    pub quantum: Option<u32>,
    /// Log verbosity.
    #[serde(skip, default = "default_log_level")]
    pub log_level: LevelFilter,
    /// Where to write a copy of the report.
    pub report_path: Option<PathBuf>,
}

fn default_log_level() -> LevelFilter {
    LevelFilter::Warn
}

/// Errors from reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Too few positional arguments.
    Usage,
    /// The algorithm name is not recognized.
    UnknownAlgorithm(ParseAlgorithmError),
    /// Round Robin was selected without a quantum.
    MissingQuantum,
    /// The quantum is not a non-negative integer.
    InvalidQuantum(String),
    /// The log level is not recognized.
    InvalidLogLevel(String),
    /// More positional arguments than expected.
    UnexpectedArgument(String),
    /// A non-path argument is not valid Unicode.
    NonUnicodeArgument(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => write!(f, "missing arguments"),
            Self::UnknownAlgorithm(e) => write!(f, "{e}"),
            Self::MissingQuantum => write!(f, "RR requires a quantum"),
            Self::InvalidQuantum(s) => write!(f, "invalid quantum '{s}'"),
            Self::InvalidLogLevel(s) => write!(f, "invalid {LOG_ENV} level '{s}'"),
            Self::UnexpectedArgument(s) => write!(f, "unexpected argument '{s}'"),
            Self::NonUnicodeArgument(s) => write!(f, "argument is not valid unicode '{s}'"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownAlgorithm(e) => Some(e),
            _ => None,
        }
    }
}

impl AnalysisConfig {
    /// Creates a config with default logging and no report file.
    pub fn new(input: impl Into<PathBuf>, algorithm: Algorithm) -> Self {
        Self {
            input: input.into(),
            algorithm,
            quantum: None,
            log_level: default_log_level(),
            report_path: None,
        }
    }

    /// Sets the Round Robin time slice.
    pub fn with_quantum(mut self, quantum: u32) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Sets the log verbosity.
    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// Also writes the report to `path`.
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// One-line usage string.
    pub fn usage(program: &str) -> String {
        format!("{program} <pcb file> <schedule algorithm> [quantum]")
    }

    /// Builds a config from positional arguments (program name excluded)
    /// and an environment lookup.
    ///
    /// The file path is taken as-is; the other arguments must be Unicode.
    ///
    /// # Example
    ///
    /// ```
    /// use u_procsched::config::AnalysisConfig;
    /// use u_procsched::scheduler::Algorithm;
    ///
    /// let config = AnalysisConfig::parse(["pcb.bin", "rr", "4"], |_| None).unwrap();
    /// assert_eq!(config.algorithm, Algorithm::RoundRobin);
    /// assert_eq!(config.quantum, Some(4));
    /// ```
    pub fn parse<I, S, F>(args: I, env: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
        F: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter().map(Into::<OsString>::into);
        let input = args.next().ok_or(ConfigError::Usage)?;
        let mut args = args.map(|arg| {
            arg.into_string()
                .map_err(|raw| ConfigError::NonUnicodeArgument(raw.to_string_lossy().into_owned()))
        });
        let algorithm_name = args.next().ok_or(ConfigError::Usage)??;
        let algorithm = algorithm_name
            .parse::<Algorithm>()
            .map_err(ConfigError::UnknownAlgorithm)?;

        let quantum = match args.next().transpose()? {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidQuantum(raw.clone()))?,
            ),
            None if algorithm.requires_quantum() => return Err(ConfigError::MissingQuantum),
            None => None,
        };
        if let Some(extra) = args.next().transpose()? {
            return Err(ConfigError::UnexpectedArgument(extra));
        }

        let mut config = Self::new(input, algorithm);
        config.quantum = quantum;

        if let Some(level) = env(LOG_ENV) {
            config.log_level = level
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| ConfigError::InvalidLogLevel(level.clone()))?;
        }
        if let Some(path) = env(REPORT_ENV).filter(|p| !p.trim().is_empty()) {
            config.report_path = Some(PathBuf::from(path));
        }
        Ok(config)
    }

    /// Builds a config from the process arguments and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse(std::env::args_os().skip(1), |key| std::env::var(key).ok())
    }
}
