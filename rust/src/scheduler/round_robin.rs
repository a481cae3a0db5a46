//! Round-robin engine with a fixed quantum.
//!
//! Processes are visited in circular input order regardless of arrival
//! time. A visit runs the process for `min(remaining, quantum)`; a visit to a
//! finished process is skipped without consuming time but still uses up its
//! turn. While a slice runs, every other unfinished process accrues the
//! slice as waiting time, including processes that have not arrived yet, so
//! the arrival time is subtracted once at the end.

use crate::config::SimulationConfig;
use crate::models::{Algorithm, ProcessSpec, ScheduleReport, Ticks};
use crate::{log_changes, log_checks, log_debug};

use super::state::{collect_waiting_times, Timeline, WorkingState};
use super::SchedulerError;

pub struct RoundRobinScheduler<'a> {
    processes: &'a [ProcessSpec],
    quantum: Ticks,
    verbosity: u8,
}

impl<'a> RoundRobinScheduler<'a> {
    pub fn new(
        processes: &'a [ProcessSpec],
        config: &SimulationConfig,
    ) -> Result<Self, SchedulerError> {
        config.validate()?;
        Ok(Self {
            processes,
            quantum: config.quantum,
            verbosity: config.verbosity,
        })
    }

    pub fn schedule(&self) -> ScheduleReport {
        let n = self.processes.len();
        let mut state = WorkingState::fresh_set(self.processes);
        let mut timeline = Timeline::default();
        let mut current_time: Ticks = 0;
        let mut completed = 0;
        let mut index = 0;

        while completed < n {
            let process = &self.processes[index];

            if state[index].is_complete() {
                log_checks!(
                    self.verbosity,
                    "[RR] t={} skip {} (finished)",
                    current_time,
                    process.name
                );
            } else {
                let slice = state[index].remaining_time.min(self.quantum);
                let end = current_time + slice;
                timeline.push(index, process, current_time, end);
                state[index].execute(slice);

                for (other, other_state) in state.iter_mut().enumerate() {
                    if other != index && !other_state.is_complete() {
                        other_state.accrue_wait(slice);
                    }
                }
                log_debug!(
                    self.verbosity,
                    "[RR] {} others charged {}",
                    state.iter().filter(|s| !s.is_complete()).count(),
                    slice
                );

                log_changes!(
                    self.verbosity,
                    "[RR] {} runs {}..{} (remaining={})",
                    process.name,
                    current_time,
                    end,
                    state[index].remaining_time
                );
                current_time = end;

                if state[index].is_complete() {
                    completed += 1;
                }
            }

            index = (index + 1) % n;
        }

        let waiting_times = collect_waiting_times(self.processes, 0..n, |i| {
            state[i].wait_time - self.processes[i].arrival_time
        });
        let mut report =
            ScheduleReport::new(Algorithm::RoundRobin, timeline.into_intervals(), waiting_times);
        report
            .algorithm_metadata
            .insert("quantum".to_string(), self.quantum.to_string());
        report
    }
}
