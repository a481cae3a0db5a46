//! Consistency checks for engine output.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::models::{ProcessSpec, ScheduleReport, Ticks};

/// A report that breaks one of the single-processor scheduling invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("{algorithm}: interval {position} refers to unknown process {name:?}")]
    UnknownProcess {
        algorithm: &'static str,
        position: usize,
        name: String,
    },
    #[error("{algorithm}: interval {position} for {name} is empty or reversed ({start}..{end})")]
    EmptyInterval {
        algorithm: &'static str,
        position: usize,
        name: String,
        start: Ticks,
        end: Ticks,
    },
    #[error("{algorithm}: interval {position} for {name} starts at {start}, before the previous one ends at {previous_end}")]
    Overlap {
        algorithm: &'static str,
        position: usize,
        name: String,
        start: Ticks,
        previous_end: Ticks,
    },
    #[error("{algorithm}: {name} executed {executed} ticks, burst is {burst}")]
    BurstMismatch {
        algorithm: &'static str,
        name: String,
        executed: Ticks,
        burst: Ticks,
    },
    #[error("{algorithm}: {name} has {count} waiting time entries")]
    WaitingTimeCount {
        algorithm: &'static str,
        name: String,
        count: usize,
    },
}

/// Check a report against the process table it was produced from.
///
/// Verifies that intervals are well formed, time-ordered and never overlap
/// (one CPU), that each process executes exactly its burst, and that every
/// process has exactly one waiting-time entry.
pub fn check_invariants(
    report: &ScheduleReport,
    processes: &[ProcessSpec],
) -> Result<(), InvariantViolation> {
    let algorithm = report.algorithm.name();
    let mut executed: Vec<Ticks> = vec![0; processes.len()];
    let mut previous_end: Option<Ticks> = None;

    for (position, interval) in report.intervals.iter().enumerate() {
        match processes.get(interval.process) {
            Some(spec) if spec.name == interval.name => {}
            _ => {
                return Err(InvariantViolation::UnknownProcess {
                    algorithm,
                    position,
                    name: interval.name.clone(),
                })
            }
        }
        if interval.end <= interval.start {
            return Err(InvariantViolation::EmptyInterval {
                algorithm,
                position,
                name: interval.name.clone(),
                start: interval.start,
                end: interval.end,
            });
        }
        if let Some(prev) = previous_end {
            if interval.start < prev {
                return Err(InvariantViolation::Overlap {
                    algorithm,
                    position,
                    name: interval.name.clone(),
                    start: interval.start,
                    previous_end: prev,
                });
            }
        }
        previous_end = Some(interval.end);
        executed[interval.process] += interval.duration();
    }

    for (spec, &ran) in processes.iter().zip(&executed) {
        if ran != spec.burst_time {
            return Err(InvariantViolation::BurstMismatch {
                algorithm,
                name: spec.name.clone(),
                executed: ran,
                burst: spec.burst_time,
            });
        }
    }

    let mut entries: FxHashMap<&str, usize> = FxHashMap::default();
    for wait in &report.waiting_times {
        *entries.entry(wait.name.as_str()).or_default() += 1;
    }
    for spec in processes {
        let count = entries.get(spec.name.as_str()).copied().unwrap_or(0);
        if count != 1 {
            return Err(InvariantViolation::WaitingTimeCount {
                algorithm,
                name: spec.name.clone(),
                count,
            });
        }
    }
    if report.waiting_times.len() != processes.len() {
        // Entries for names outside the table
        let stray = report
            .waiting_times
            .iter()
            .find(|w| !processes.iter().any(|p| p.name == w.name));
        if let Some(wait) = stray {
            return Err(InvariantViolation::WaitingTimeCount {
                algorithm,
                name: wait.name.clone(),
                count: entries.get(wait.name.as_str()).copied().unwrap_or(0),
            });
        }
    }

    Ok(())
}
