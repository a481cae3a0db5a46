//! Single-processor CPU scheduling simulator.
//!
//! Loads a table of processes (name, arrival time, burst time), runs it
//! through four scheduling policies (FCFS, non-preemptive SJF, preemptive SJF
//! and round robin) and renders the resulting execution intervals and
//! waiting times as a text trace.

pub mod config;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod simulation;
pub mod table;
pub mod trace;

#[cfg(feature = "python")]
mod python;

pub use config::{SimulationConfig, TraceFormat, DEFAULT_QUANTUM};
pub use models::{Algorithm, Interval, ProcessSpec, ScheduleReport, Ticks, WaitingTime};
pub use scheduler::{check_invariants, run_algorithm, InvariantViolation, SchedulerError};
pub use simulation::{run_files, Simulation, SimulationError};
pub use table::{ProcessTable, TableError};
pub use trace::{render_trace, TraceWriter};
