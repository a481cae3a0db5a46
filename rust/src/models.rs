//! Core data types for the scheduling simulation.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::scheduler::SchedulerError;

/// Simulation time, in abstract ticks.
///
/// Signed because FCFS reports negative waits when the input is not in
/// arrival order.
pub type Ticks = i64;

/// An immutable process record as loaded from the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessSpec {
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

impl ProcessSpec {
    pub fn new(name: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            burst_time,
        }
    }
}

/// The four scheduling disciplines, in trace output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Fcfs,
    Nsjf,
    Psjf,
    RoundRobin,
}

impl Algorithm {
    /// All algorithms in the order their blocks appear in the trace.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Nsjf,
        Algorithm::Psjf,
        Algorithm::RoundRobin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Nsjf => "NSJF",
            Algorithm::Psjf => "PSJF",
            Algorithm::RoundRobin => "RR",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "nsjf" | "sjf" => Ok(Algorithm::Nsjf),
            "psjf" | "srtf" => Ok(Algorithm::Psjf),
            "rr" | "round_robin" => Ok(Algorithm::RoundRobin),
            _ => Err(SchedulerError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A half-open execution interval `[start, end)` of one process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    /// Position of the process in the input table.
    pub process: usize,
    pub name: String,
    pub start: Ticks,
    pub end: Ticks,
}

impl Interval {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Final waiting time of one process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitingTime {
    pub name: String,
    pub value: Ticks,
}

/// Result from one scheduling engine run.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleReport {
    pub algorithm: Algorithm,
    pub intervals: Vec<Interval>,
    /// Waiting times in the order the engine emits them.
    pub waiting_times: Vec<WaitingTime>,
    pub algorithm_metadata: HashMap<String, String>,
}

impl ScheduleReport {
    /// Build a report and derive its summary metadata from the timeline.
    pub fn new(
        algorithm: Algorithm,
        intervals: Vec<Interval>,
        waiting_times: Vec<WaitingTime>,
    ) -> Self {
        let makespan = intervals.iter().map(|i| i.end).max().unwrap_or(0);
        let busy: Ticks = intervals.iter().map(Interval::duration).sum();
        let context_switches = intervals
            .windows(2)
            .filter(|w| w[0].process != w[1].process)
            .count();

        let mut metadata = HashMap::new();
        metadata.insert("algorithm".to_string(), algorithm.name().to_string());
        metadata.insert("makespan".to_string(), makespan.to_string());
        metadata.insert("idle_time".to_string(), (makespan - busy).to_string());
        metadata.insert(
            "context_switches".to_string(),
            context_switches.to_string(),
        );

        Self {
            algorithm,
            intervals,
            waiting_times,
            algorithm_metadata: metadata,
        }
    }

    /// Sum of all waiting times, widened so large tables cannot overflow.
    pub fn total_waiting_time(&self) -> i128 {
        self.waiting_times.iter().map(|w| i128::from(w.value)).sum()
    }

    /// Arithmetic mean of the per-process waiting times (0.0 when empty).
    pub fn average_waiting_time(&self) -> f64 {
        if self.waiting_times.is_empty() {
            return 0.0;
        }
        self.total_waiting_time() as f64 / self.waiting_times.len() as f64
    }

    /// Look up the waiting time reported for a process.
    pub fn waiting_time(&self, name: &str) -> Option<Ticks> {
        self.waiting_times
            .iter()
            .find(|w| w.name == name)
            .map(|w| w.value)
    }

    /// Intervals of a single process, in execution order.
    pub fn intervals_for(&self, process: usize) -> impl Iterator<Item = &Interval> {
        self.intervals.iter().filter(move |i| i.process == process)
    }
}
