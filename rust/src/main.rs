//! Command-line entry point: reads `TaskSpec.txt`, writes `Output.txt`.

use std::process::ExitCode;

use cpusched::simulation::{run_files, DEFAULT_INPUT, DEFAULT_OUTPUT};
use cpusched::SimulationConfig;

fn main() -> ExitCode {
    match run_files(DEFAULT_INPUT, DEFAULT_OUTPUT, SimulationConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
