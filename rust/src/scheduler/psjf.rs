//! Preemptive shortest-job-first (shortest remaining time first) engine.
//!
//! Semantics are those of a one-tick simulation: every tick the arrived
//! process with the least remaining time runs (lowest input index on ties),
//! every other arrived unfinished process waits one tick, and a tick with
//! nothing ready is idle and charges nobody.
//!
//! Rather than scanning every process on every tick, the engine keeps ready
//! processes in a min-heap keyed by `(remaining, index)` and only makes a
//! decision at events. Between two arrivals the running process stays the
//! minimum (its key only shrinks while the others are frozen), so it can run
//! straight through to the next arrival or its own completion.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::config::SimulationConfig;
use crate::models::{Algorithm, ProcessSpec, ScheduleReport, Ticks};
use crate::{log_changes, log_checks, log_debug};

use super::state::{collect_waiting_times, Timeline, WorkingState};

type ReadyKey = Reverse<(Ticks, usize)>;

pub struct PsjfScheduler<'a> {
    processes: &'a [ProcessSpec],
    verbosity: u8,
}

impl<'a> PsjfScheduler<'a> {
    pub fn new(processes: &'a [ProcessSpec], config: &SimulationConfig) -> Self {
        Self {
            processes,
            verbosity: config.verbosity,
        }
    }

    pub fn schedule(&self) -> ScheduleReport {
        let n = self.processes.len();
        let mut state = WorkingState::fresh_set(self.processes);
        let mut timeline = Timeline::default();

        let mut arrivals: Vec<usize> = (0..n).collect();
        arrivals.sort_by_key(|&i| self.processes[i].arrival_time);
        let mut next_arrival = 0;

        let mut ready: BinaryHeap<ReadyKey> = BinaryHeap::with_capacity(n);
        let mut current_time: Ticks = 0;
        let mut completed = 0;
        let mut last_run: Option<usize> = None;

        while completed < n {
            while let Some(&i) = arrivals.get(next_arrival) {
                if self.processes[i].arrival_time > current_time {
                    break;
                }
                log_debug!(
                    self.verbosity,
                    "[PSJF] t={} {} arrives (remaining={})",
                    current_time,
                    self.processes[i].name,
                    state[i].remaining_time
                );
                ready.push(Reverse((state[i].remaining_time, i)));
                next_arrival += 1;
            }
            let horizon = arrivals
                .get(next_arrival)
                .map(|&i| self.processes[i].arrival_time);

            let Some(Reverse((remaining, running))) = ready.pop() else {
                // Idle until the next arrival; nobody is ready so nobody waits
                let Some(next) = horizon else {
                    break;
                };
                log_changes!(self.verbosity, "[PSJF] idle {}..{}", current_time, next);
                current_time = next;
                continue;
            };

            if let Some(previous) = last_run {
                if previous != running && !state[previous].is_complete() {
                    log_checks!(
                        self.verbosity,
                        "[PSJF] t={} {} (remaining={}) preempts {} (remaining={})",
                        current_time,
                        self.processes[running].name,
                        remaining,
                        self.processes[previous].name,
                        state[previous].remaining_time
                    );
                }
            }

            let slice = match horizon {
                Some(next) => remaining.min(next - current_time),
                None => remaining,
            };
            let end = current_time + slice;

            state[running].execute(slice);
            for &Reverse((_, waiting)) in ready.iter() {
                state[waiting].accrue_wait(slice);
            }
            timeline.extend_or_push(running, &self.processes[running], current_time, end);
            log_debug!(
                self.verbosity,
                "[PSJF] {} runs {}..{}, {} others wait",
                self.processes[running].name,
                current_time,
                end,
                ready.len()
            );

            current_time = end;
            last_run = Some(running);
            if state[running].is_complete() {
                completed += 1;
                log_changes!(
                    self.verbosity,
                    "[PSJF] {} completes at {} (wait {})",
                    self.processes[running].name,
                    current_time,
                    state[running].wait_time
                );
            } else {
                ready.push(Reverse((state[running].remaining_time, running)));
            }
        }

        let waiting_times = collect_waiting_times(self.processes, 0..n, |i| state[i].wait_time);
        ScheduleReport::new(Algorithm::Psjf, timeline.into_intervals(), waiting_times)
    }
}
