//! First-come-first-served engine.
//!
//! Processes run to completion strictly in input order. The input order is
//! the policy: records are not re-sorted by arrival time and the CPU never
//! idles waiting for a late arrival, so an out-of-order input yields negative
//! waiting times.

use crate::config::SimulationConfig;
use crate::log_changes;
use crate::models::{Algorithm, ProcessSpec, ScheduleReport, Ticks};

use super::state::{collect_waiting_times, Timeline};

pub struct FcfsScheduler<'a> {
    processes: &'a [ProcessSpec],
    verbosity: u8,
}

impl<'a> FcfsScheduler<'a> {
    pub fn new(processes: &'a [ProcessSpec], config: &SimulationConfig) -> Self {
        Self {
            processes,
            verbosity: config.verbosity,
        }
    }

    pub fn schedule(&self) -> ScheduleReport {
        let mut timeline = Timeline::with_capacity(self.processes.len());
        let mut waits: Vec<Ticks> = Vec::with_capacity(self.processes.len());
        let mut current_time: Ticks = 0;

        for (index, process) in self.processes.iter().enumerate() {
            let wait = current_time - process.arrival_time;
            let end = current_time + process.burst_time;
            timeline.push(index, process, current_time, end);
            log_changes!(
                self.verbosity,
                "[FCFS] {} runs {}..{} (wait {})",
                process.name,
                current_time,
                end,
                wait
            );
            waits.push(wait);
            current_time = end;
        }

        let waiting_times = collect_waiting_times(self.processes, 0..self.processes.len(), |i| {
            waits[i]
        });
        ScheduleReport::new(Algorithm::Fcfs, timeline.into_intervals(), waiting_times)
    }
}
