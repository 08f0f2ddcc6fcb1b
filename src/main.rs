//! `analysis <pcb file> <schedule algorithm> [quantum]`
//!
//! Simulates one scheduling policy over a process-control-block file and
//! prints the statistics report.

mod logger;

use std::process::ExitCode;

use u_procsched::analysis;
use u_procsched::config::{AnalysisConfig, ConfigError};

fn main() -> ExitCode {
    let config = match AnalysisConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let program = std::env::args_os()
                .next()
                .map(|arg| arg.to_string_lossy().into_owned())
                .unwrap_or_else(|| "analysis".to_string());
            if e != ConfigError::Usage {
                eprintln!("error: {e}");
            }
            eprintln!("{}", AnalysisConfig::usage(&program));
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logger::init(config.log_level) {
        eprintln!("warning: {e}");
    }

    match analysis::run(&config, &mut std::io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
