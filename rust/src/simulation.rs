//! Runs every engine over one process table and writes the combined trace.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::config::SimulationConfig;
use crate::log_changes;
use crate::models::{Algorithm, ScheduleReport};
use crate::scheduler::{run_algorithm, SchedulerError};
use crate::table::{ProcessTable, TableError};
use crate::trace::TraceWriter;

/// Default input file read by the command-line entry point.
pub const DEFAULT_INPUT: &str = "TaskSpec.txt";
/// Default output file written by the command-line entry point.
pub const DEFAULT_OUTPUT: &str = "Output.txt";

/// Errors that abort a simulation run.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error("Failed to write trace")]
    Write(#[from] io::Error),
}

/// A loaded process table plus the configuration to run it with.
pub struct Simulation {
    table: ProcessTable,
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(table: ProcessTable, config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { table, config })
    }

    /// Run a single engine.
    pub fn run_one(&self, algorithm: Algorithm) -> Result<ScheduleReport, SimulationError> {
        let report = run_algorithm(algorithm, self.table.processes(), &self.config)?;
        #[cfg(debug_assertions)]
        if let Err(violation) = crate::scheduler::check_invariants(&report, self.table.processes())
        {
            panic!("engine produced an inconsistent schedule: {violation}");
        }
        log_changes!(
            self.config.verbosity,
            "[{}] {} intervals, average wait {:.2}",
            algorithm,
            report.intervals.len(),
            report.average_waiting_time()
        );
        Ok(report)
    }

    /// Run all four engines in trace order.
    pub fn run(&self) -> Result<Vec<ScheduleReport>, SimulationError> {
        Algorithm::ALL.iter().map(|&a| self.run_one(a)).collect()
    }

    /// Run all engines, then write the whole trace to `sink`.
    ///
    /// Nothing is written unless every engine succeeded.
    pub fn render<W: Write>(&self, sink: W) -> Result<W, SimulationError> {
        let reports = self.run()?;
        let mut writer = TraceWriter::new(sink, self.config.trace_format);
        writer.write_reports(&reports)?;
        Ok(writer.finish()?)
    }
}

/// Load `input`, run every engine and write the trace to `output`.
pub fn run_files(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: SimulationConfig,
) -> Result<(), SimulationError> {
    let table = ProcessTable::load(input)?;
    log_changes!(config.verbosity, "Loaded {} processes", table.len());
    let simulation = Simulation::new(table, config)?;

    // Compute before creating the output file so a failure leaves no file behind
    let reports = simulation.run()?;
    let file = File::create(output)?;
    let mut writer = TraceWriter::new(BufWriter::new(file), simulation.config.trace_format);
    writer.write_reports(&reports)?;
    writer.finish()?;
    Ok(())
}
