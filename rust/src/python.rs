//! Python bindings, built with `--features python` (maturin adds
//! `extension-module`).

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{SimulationConfig, TraceFormat, DEFAULT_QUANTUM};
use crate::models::{Algorithm, Interval, ProcessSpec, ScheduleReport, Ticks};
use crate::simulation::Simulation;
use crate::table::ProcessTable;
use crate::trace;

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// One input record (PyO3 wrapper).
#[pyclass(name = "ProcessSpec")]
#[derive(Clone, Debug)]
pub struct PyProcessSpec {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub arrival_time: Ticks,
    #[pyo3(get, set)]
    pub burst_time: Ticks,
}

#[pymethods]
impl PyProcessSpec {
    #[new]
    fn new(name: String, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            name,
            arrival_time,
            burst_time,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ProcessSpec(name={:?}, arrival_time={}, burst_time={})",
            self.name, self.arrival_time, self.burst_time
        )
    }
}

impl From<PyProcessSpec> for ProcessSpec {
    fn from(spec: PyProcessSpec) -> Self {
        ProcessSpec::new(spec.name, spec.arrival_time, spec.burst_time)
    }
}

/// One execution interval (PyO3 wrapper).
#[pyclass(name = "Interval")]
#[derive(Clone, Debug)]
pub struct PyInterval {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub start: Ticks,
    #[pyo3(get)]
    pub end: Ticks,
}

#[pymethods]
impl PyInterval {
    fn __repr__(&self) -> String {
        format!(
            "Interval(name={:?}, start={}, end={})",
            self.name, self.start, self.end
        )
    }
}

impl From<&Interval> for PyInterval {
    fn from(interval: &Interval) -> Self {
        Self {
            name: interval.name.clone(),
            start: interval.start,
            end: interval.end,
        }
    }
}

/// Result of one engine run (PyO3 wrapper).
#[pyclass(name = "ScheduleReport")]
#[derive(Clone, Debug)]
pub struct PyScheduleReport {
    #[pyo3(get)]
    pub algorithm: String,
    #[pyo3(get)]
    pub intervals: Vec<PyInterval>,
    /// (name, waiting time) pairs in report order
    #[pyo3(get)]
    pub waiting_times: Vec<(String, Ticks)>,
    #[pyo3(get)]
    pub average_waiting_time: f64,
    #[pyo3(get)]
    pub algorithm_metadata: HashMap<String, String>,
}

#[pymethods]
impl PyScheduleReport {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleReport(algorithm={}, intervals={}, average_waiting_time={:.2})",
            self.algorithm,
            self.intervals.len(),
            self.average_waiting_time
        )
    }
}

impl From<ScheduleReport> for PyScheduleReport {
    fn from(report: ScheduleReport) -> Self {
        Self {
            algorithm: report.algorithm.name().to_string(),
            intervals: report.intervals.iter().map(PyInterval::from).collect(),
            average_waiting_time: report.average_waiting_time(),
            waiting_times: report
                .waiting_times
                .into_iter()
                .map(|w| (w.name, w.value))
                .collect(),
            algorithm_metadata: report.algorithm_metadata,
        }
    }
}

fn build_simulation(
    processes: Vec<PyProcessSpec>,
    config: SimulationConfig,
) -> PyResult<Simulation> {
    let specs = processes.into_iter().map(ProcessSpec::from).collect();
    let table = ProcessTable::from_specs(specs).map_err(value_error)?;
    Simulation::new(table, config).map_err(value_error)
}

/// Run one scheduling policy over a list of processes.
///
/// # Arguments
/// * `processes` - List of ProcessSpec records, names must be unique
/// * `algorithm` - "fcfs", "nsjf", "psjf" or "rr" (case-insensitive)
/// * `quantum` - Round-robin time slice
/// * `verbosity` - Logging level written to stderr (0-3)
///
/// # Raises
/// * ValueError on duplicate names, invalid records, unknown algorithm or
///   non-positive quantum
#[pyfunction]
#[pyo3(signature = (processes, algorithm, quantum=DEFAULT_QUANTUM, verbosity=0))]
fn simulate(
    processes: Vec<PyProcessSpec>,
    algorithm: String,
    quantum: Ticks,
    verbosity: u8,
) -> PyResult<PyScheduleReport> {
    let algorithm: Algorithm = algorithm.parse().map_err(value_error)?;
    let config = SimulationConfig::new(Some(quantum), Some(verbosity), None);
    let simulation = build_simulation(processes, config)?;
    let report = simulation.run_one(algorithm).map_err(value_error)?;
    Ok(report.into())
}

/// Run all four policies and return the combined text trace.
#[pyfunction]
#[pyo3(signature = (processes, quantum=DEFAULT_QUANTUM, normalized=false))]
fn render_trace(
    processes: Vec<PyProcessSpec>,
    quantum: Ticks,
    normalized: bool,
) -> PyResult<String> {
    let format = if normalized {
        TraceFormat::Normalized
    } else {
        TraceFormat::Legacy
    };
    let config = SimulationConfig::new(Some(quantum), None, Some(format));
    let simulation = build_simulation(processes, config)?;
    let reports = simulation.run().map_err(value_error)?;
    Ok(trace::render_trace(&reports, format))
}

/// The cpusched Python module.
#[pymodule]
fn cpusched(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyProcessSpec>()?;
    m.add_class::<PyInterval>()?;
    m.add_class::<PyScheduleReport>()?;

    m.add_function(wrap_pyfunction!(simulate, m)?)?;
    m.add_function(wrap_pyfunction!(render_trace, m)?)?;

    Ok(())
}
