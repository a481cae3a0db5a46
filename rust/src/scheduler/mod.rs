//! The four scheduling engines.
//!
//! Every engine borrows the shared process records read-only and keeps its
//! own working state, so engines can run in any order against the same
//! table without observing each other.

mod fcfs;
mod invariants;
mod nsjf;
mod psjf;
mod round_robin;
mod state;

use thiserror::Error;

use crate::config::SimulationConfig;
use crate::models::{Algorithm, ProcessSpec, ScheduleReport};

pub use fcfs::FcfsScheduler;
pub use invariants::{check_invariants, InvariantViolation};
pub use nsjf::NsjfScheduler;
pub use psjf::PsjfScheduler;
pub use round_robin::RoundRobinScheduler;
pub use state::{Timeline, WorkingState};

/// Errors that can occur before an engine starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Unknown scheduling algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Run one engine over the given processes.
pub fn run_algorithm(
    algorithm: Algorithm,
    processes: &[ProcessSpec],
    config: &SimulationConfig,
) -> Result<ScheduleReport, SchedulerError> {
    let report = match algorithm {
        Algorithm::Fcfs => FcfsScheduler::new(processes, config).schedule(),
        Algorithm::Nsjf => NsjfScheduler::new(processes, config).schedule(),
        Algorithm::Psjf => PsjfScheduler::new(processes, config).schedule(),
        Algorithm::RoundRobin => RoundRobinScheduler::new(processes, config)?.schedule(),
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ticks;

    fn make_processes(records: &[(&str, Ticks, Ticks)]) -> Vec<ProcessSpec> {
        records
            .iter()
            .map(|&(name, arrival, burst)| ProcessSpec::new(name, arrival, burst))
            .collect()
    }

    fn workloads() -> Vec<Vec<ProcessSpec>> {
        vec![
            make_processes(&[("A", 0, 5), ("B", 1, 3), ("C", 2, 8)]),
            make_processes(&[("P1", 0, 8), ("P2", 1, 4), ("P3", 2, 9), ("P4", 3, 5)]),
            make_processes(&[("x", 0, 1), ("y", 0, 1), ("z", 0, 1)]),
            make_processes(&[("early", 0, 2), ("gap", 10, 6), ("tail", 11, 1)]),
            make_processes(&[("solo", 3, 9)]),
        ]
    }

    #[test]
    fn test_every_engine_satisfies_invariants() {
        let config = SimulationConfig::default();
        for processes in workloads() {
            for algorithm in Algorithm::ALL {
                let report = run_algorithm(algorithm, &processes, &config).unwrap();
                assert_eq!(report.algorithm, algorithm);
                assert_eq!(check_invariants(&report, &processes), Ok(()));
            }
        }
    }

    #[test]
    fn test_average_is_mean_of_reported_waits() {
        let config = SimulationConfig::default();
        for processes in workloads() {
            for algorithm in Algorithm::ALL {
                let report = run_algorithm(algorithm, &processes, &config).unwrap();
                let sum: Ticks = report.waiting_times.iter().map(|w| w.value).sum();
                let mean = sum as f64 / processes.len() as f64;
                assert!((report.average_waiting_time() - mean).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_shortest_job_engines_never_start_before_arrival() {
        let config = SimulationConfig::default();
        for processes in workloads() {
            for algorithm in [Algorithm::Nsjf, Algorithm::Psjf] {
                let report = run_algorithm(algorithm, &processes, &config).unwrap();
                for interval in &report.intervals {
                    assert!(interval.start >= processes[interval.process].arrival_time);
                }
            }
        }
    }

    #[test]
    fn test_non_preemptive_waits_are_completion_minus_arrival_minus_burst() {
        let config = SimulationConfig::default();
        let processes = make_processes(&[("A", 0, 4), ("B", 1, 6), ("C", 2, 1), ("D", 3, 2)]);
        for algorithm in [Algorithm::Fcfs, Algorithm::Nsjf] {
            let report = run_algorithm(algorithm, &processes, &config).unwrap();
            for (i, spec) in processes.iter().enumerate() {
                let completion = report.intervals_for(i).map(|iv| iv.end).max().unwrap();
                assert_eq!(
                    report.waiting_time(&spec.name),
                    Some(completion - spec.arrival_time - spec.burst_time)
                );
            }
        }
    }

    #[test]
    fn test_engines_do_not_mutate_shared_input() {
        let config = SimulationConfig::default();
        let processes = make_processes(&[("A", 0, 5), ("B", 1, 3), ("C", 2, 8)]);
        let snapshot = processes.clone();

        let first: Vec<ScheduleReport> = Algorithm::ALL
            .iter()
            .map(|&a| run_algorithm(a, &processes, &config).unwrap())
            .collect();
        let again: Vec<ScheduleReport> = Algorithm::ALL
            .iter()
            .rev()
            .map(|&a| run_algorithm(a, &processes, &config).unwrap())
            .collect();

        assert_eq!(processes, snapshot);
        for (a, b) in first.iter().zip(again.iter().rev()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_invalid_quantum_only_affects_round_robin() {
        let config = SimulationConfig::new(Some(0), None, None);
        let processes = make_processes(&[("A", 0, 1)]);
        assert!(run_algorithm(Algorithm::Fcfs, &processes, &config).is_ok());
        assert_eq!(
            run_algorithm(Algorithm::RoundRobin, &processes, &config),
            Err(SchedulerError::InvalidConfig(
                "quantum must be positive, got 0".to_string()
            ))
        );
    }
}
